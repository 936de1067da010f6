//! Subcommands and the pipeline stages they share

pub mod compare;
pub mod generate;
pub mod run;

use clap::{Args, ValueEnum};
use stampcheck_core::compare::{fault_line, RecordFault, STATUS_FAULT};
use stampcheck_core::errors::ExError;
use stampcheck_core::policy::{ConfirmOverwrite, FixedAnswer};
use stampcheck_core::{compare_times, Config, Generator, WithinHourMode};
use stampcheck_core_types::RunId;
use stampcheck_store::{DocumentFile, PromptConfirm, WriteOutcome};
use std::path::PathBuf;

pub type CommandResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Debug, Clone, Args)]
pub struct FileArgs {
    /// Data file (default: data.json next to the executable)
    #[arg(long)]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub struct GenerateOptions {
    /// Seed for a reproducible fixture
    #[arg(long)]
    pub seed: Option<u64>,

    /// Replace an existing file without asking
    #[arg(long)]
    pub yes: bool,
}

#[derive(Debug, Clone, Default, Args)]
pub struct CompareOptions {
    /// How a close entry affects the rest of its record
    #[arg(long, value_enum, default_value_t = ModeArg::Sticky)]
    pub mode: ModeArg,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Once one entry is within the hour, later entries of the record pass
    #[default]
    Sticky,
    /// Every entry is checked on its own
    PerEntry,
}

impl From<ModeArg> for WithinHourMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Sticky => WithinHourMode::Sticky,
            ModeArg::PerEntry => WithinHourMode::PerEntry,
        }
    }
}

pub fn build_config(file: &FileArgs, compare: &CompareOptions) -> Config {
    let config = match &file.file {
        Some(path) => Config::with_data_file(path),
        None => Config::default(),
    };
    config.with_mode(compare.mode.into())
}

/// Generate a document and write it through the overwrite gate
pub fn generate_and_write(
    config: &Config,
    options: &GenerateOptions,
    run_id: &RunId,
) -> CommandResult<WriteOutcome> {
    let mut generator = match options.seed {
        Some(seed) => Generator::seeded(config, seed),
        None => Generator::from_entropy(config),
    };
    let document = generator
        .produce_document()
        .map_err(|e| ExError::from(e).with_run_id(run_id.clone()))?;

    let mut confirm: Box<dyn ConfirmOverwrite> = if options.yes {
        Box::new(FixedAnswer::yes())
    } else {
        Box::new(PromptConfirm::stdio())
    };

    let outcome = DocumentFile::new(&config.data_file)
        .write_document(&document, confirm.as_mut())
        .map_err(|e| e.with_run_id(run_id.clone()))?;

    if outcome == WriteOutcome::Skipped {
        println!("Not writing over current '{}'...", config.file_name());
    }
    Ok(outcome)
}

/// Read the data file and print the comparison
///
/// Returns the comparison status, or `None` when there was no file.
pub fn read_and_compare(config: &Config, run_id: &RunId) -> CommandResult<Option<i32>> {
    let document = DocumentFile::new(&config.data_file)
        .read_document()
        .map_err(|e| e.with_run_id(run_id.clone()))?;

    let Some(document) = document else {
        println!("'{}' not found.", config.file_name());
        return Ok(None);
    };

    let report = match compare_times(&document, config.within_hour_mode) {
        Ok(report) => report,
        Err(err) => {
            // Document-level faults print like record faults and yield the sentinel
            println!("{}", fault_line(&RecordFault::from(err)));
            return Ok(Some(STATUS_FAULT));
        }
    };

    report.write_to(&mut std::io::stdout().lock())?;

    let status = report.status();
    tracing::info!(
        status,
        diagnostics = report.diagnostics().count(),
        "comparison finished"
    );
    Ok(Some(status))
}
