//! stampcheck CLI
//!
//! Generates a timestamped fixture file and checks data point timestamps
//! against their record's timestamp.

use clap::{Parser, Subcommand, ValueEnum};
use stampcheck_core::logging_facility::{self, Profile};
use stampcheck_core_types::RunId;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "stampcheck")]
#[command(
    about = "stampcheck - generate timestamp fixtures and check data points",
    long_about = None
)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Log output format (logs go to stderr)
    #[arg(long, value_enum, global = true, default_value_t = LogFormat::Dev)]
    log_format: LogFormat,

    /// Defaults to `run` when omitted
    #[command(subcommand)]
    command: Option<Commands>,

    /// `run` options accepted without the subcommand name
    #[command(flatten)]
    run: commands::run::RunArgs,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Dev,
    Json,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Generate, write, read back and compare
    Run(commands::run::RunArgs),
    /// Generate a fixture and write it
    Generate(commands::generate::GenerateArgs),
    /// Read the data file and compare timestamps
    Compare(commands::compare::CompareArgs),
}

fn main() {
    let cli = Cli::parse();

    logging_facility::init(match cli.log_format {
        LogFormat::Dev => Profile::Development,
        LogFormat::Json => Profile::Production,
    });

    let run_id = RunId::new();
    let span = tracing::info_span!("stampcheck", run_id = %run_id);
    let _guard = span.enter();

    let result = match cli.command {
        Some(Commands::Run(args)) => commands::run::execute(args, &run_id),
        Some(Commands::Generate(args)) => commands::generate::execute(args, &run_id),
        Some(Commands::Compare(args)) => commands::compare::execute(args, &run_id),
        None => commands::run::execute(cli.run, &run_id),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
