//! Generate command
//!
//! Usage: stampcheck generate [--file <PATH>] [--seed <N>] [--yes]

use super::{build_config, generate_and_write, CommandResult, FileArgs, GenerateOptions};
use clap::Args;
use stampcheck_core_types::RunId;

#[derive(Debug, Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub file: FileArgs,

    #[command(flatten)]
    pub generate: GenerateOptions,
}

/// Execute generate command
pub fn execute(args: GenerateArgs, run_id: &RunId) -> CommandResult<()> {
    let config = build_config(&args.file, &Default::default());
    generate_and_write(&config, &args.generate, run_id)?;
    Ok(())
}
