//! Compare command
//!
//! Usage: stampcheck compare [--file <PATH>] [--mode sticky|per-entry]

use super::{build_config, read_and_compare, CommandResult, CompareOptions, FileArgs};
use clap::Args;
use stampcheck_core_types::RunId;

#[derive(Debug, Args)]
pub struct CompareArgs {
    #[command(flatten)]
    pub file: FileArgs,

    #[command(flatten)]
    pub compare: CompareOptions,
}

/// Execute compare command
pub fn execute(args: CompareArgs, run_id: &RunId) -> CommandResult<()> {
    let config = build_config(&args.file, &args.compare);
    read_and_compare(&config, run_id)?;
    Ok(())
}
