//! Run configuration
//!
//! Everything the pipeline needs is passed around as a `Config` value;
//! nothing is read from globals.

use crate::compare::WithinHourMode;
use chrono::{NaiveDate, NaiveDateTime};
use std::path::{Path, PathBuf};

pub const DEFAULT_FILE_NAME: &str = "data.json";
pub const DEFAULT_RECORD_COUNT: usize = 5;
pub const DEFAULT_ENTRIES_PER_MESSAGE: usize = 5;
pub const DEFAULT_WINDOW_DAYS: u32 = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// JSON file written by the generator and read by the comparator
    pub data_file: PathBuf,
    pub record_count: usize,
    pub entries_per_message: usize,
    /// Length of the random date window, in days after the reference day
    pub window_days: u32,
    /// Reference used for record timestamps (entries use their record's time)
    pub default_reference: NaiveDateTime,
    pub within_hour_mode: WithinHourMode,
}

impl Config {
    /// Default configuration pointing at the given data file
    pub fn with_data_file(data_file: impl Into<PathBuf>) -> Self {
        Self {
            data_file: data_file.into(),
            record_count: DEFAULT_RECORD_COUNT,
            entries_per_message: DEFAULT_ENTRIES_PER_MESSAGE,
            window_days: DEFAULT_WINDOW_DAYS,
            default_reference: default_reference(),
            within_hour_mode: WithinHourMode::default(),
        }
    }

    pub fn with_mode(mut self, mode: WithinHourMode) -> Self {
        self.within_hour_mode = mode;
        self
    }

    /// File name shown in prompts and notices
    pub fn file_name(&self) -> String {
        display_name(&self.data_file)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::with_data_file(default_data_file())
    }
}

/// 2023-01-05 09:00:00, the start of the record window
pub fn default_reference() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2023, 1, 5)
        .and_then(|date| date.and_hms_opt(9, 0, 0))
        .unwrap_or_default()
}

/// `data.json` next to the running executable, or in the working directory
/// when the executable location is unknown
pub fn default_data_file() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_FILE_NAME)
}

pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timestamp::format_timestamp;

    #[test]
    fn test_defaults() {
        let config = Config::with_data_file("/tmp/fixture.json");

        assert_eq!(config.record_count, 5);
        assert_eq!(config.entries_per_message, 5);
        assert_eq!(config.window_days, 4);
        assert_eq!(config.within_hour_mode, WithinHourMode::Sticky);
        assert_eq!(
            format_timestamp(&config.default_reference),
            "23-01-05T09:00:00Z"
        );
    }

    #[test]
    fn test_default_data_file_name() {
        let path = default_data_file();
        assert_eq!(path.file_name().unwrap(), DEFAULT_FILE_NAME);
    }

    #[test]
    fn test_file_name_strips_directories() {
        let config = Config::with_data_file("/var/tmp/out/data.json");
        assert_eq!(config.file_name(), "data.json");
    }

    #[test]
    fn test_with_mode() {
        let config = Config::with_data_file("x.json").with_mode(WithinHourMode::PerEntry);
        assert_eq!(config.within_hour_mode, WithinHourMode::PerEntry);
    }
}
