//! Full pipeline: generate, write, read back, compare
//!
//! Usage: stampcheck [run] [--file <PATH>] [--seed <N>] [--yes] [--mode sticky|per-entry]

use super::{
    build_config, generate_and_write, read_and_compare, CommandResult, CompareOptions, FileArgs,
    GenerateOptions,
};
use clap::Args;
use stampcheck_core_types::RunId;

#[derive(Debug, Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub file: FileArgs,

    #[command(flatten)]
    pub generate: GenerateOptions,

    #[command(flatten)]
    pub compare: CompareOptions,
}

/// Execute the full pipeline
///
/// A declined overwrite still compares whatever file is on disk.
pub fn execute(args: RunArgs, run_id: &RunId) -> CommandResult<()> {
    let config = build_config(&args.file, &args.compare);
    generate_and_write(&config, &args.generate, run_id)?;
    read_and_compare(&config, run_id)?;
    Ok(())
}
