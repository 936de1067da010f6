//! The JSON data file
//!
//! Writes go through the overwrite gate; reads return a `RawDocument` so
//! the comparator can report missing keys itself.

use crate::atomic::atomic_write;
use crate::errors::{io_error, serialization_error, Result};
use stampcheck_core::errors::ExError;
use stampcheck_core::policy::{decide_overwrite, ConfirmOverwrite, OverwriteDecision};
use stampcheck_core::schema::{OP_READ, OP_WRITE};
use stampcheck_core::{log_op_end, log_op_error, log_op_start, Document, RawDocument};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Result of a write attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Created,
    Overwritten,
    /// The file existed and the user declined; nothing was written
    Skipped,
}

/// Handle on the data file at a fixed path
#[derive(Debug, Clone)]
pub struct DocumentFile {
    path: PathBuf,
}

impl DocumentFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize `document` as 2-space pretty JSON and write it
    ///
    /// When the file already exists `confirm` is asked first; anything but
    /// `Y`/`y` leaves the file untouched and returns `Skipped`.
    ///
    /// # Errors
    ///
    /// Serialization failures, prompt I/O failures and write failures.
    pub fn write_document(
        &self,
        document: &Document,
        confirm: &mut dyn ConfirmOverwrite,
    ) -> Result<WriteOutcome> {
        let start = Instant::now();
        let path = self.path.display().to_string();
        log_op_start!(OP_WRITE, path = %path);

        let result = self.write_gated(document, confirm);
        let duration_ms = start.elapsed().as_millis() as u64;
        match &result {
            Ok(outcome) => {
                log_op_end!(OP_WRITE, duration_ms = duration_ms, outcome = ?outcome);
            }
            Err(err) => log_op_error!(OP_WRITE, err.clone(), duration_ms = duration_ms),
        }
        result
    }

    fn write_gated(
        &self,
        document: &Document,
        confirm: &mut dyn ConfirmOverwrite,
    ) -> Result<WriteOutcome> {
        let json = serde_json::to_string_pretty(document)
            .map_err(|e| serialization_error(OP_WRITE, &self.path, e))?;

        let exists = self.path.exists();
        let answer = if exists {
            Some(
                confirm
                    .confirm_overwrite(&self.path)
                    .map_err(|e| io_error("confirm_overwrite", &self.path, e))?,
            )
        } else {
            None
        };

        let outcome = match decide_overwrite(exists, answer.as_deref()) {
            OverwriteDecision::Skip => {
                tracing::info!(path = %self.path.display(), "overwrite declined, file left as is");
                return Ok(WriteOutcome::Skipped);
            }
            OverwriteDecision::Create => WriteOutcome::Created,
            OverwriteDecision::Overwrite => WriteOutcome::Overwritten,
        };

        atomic_write(&self.path, json.as_bytes())?;
        Ok(outcome)
    }

    /// Read and parse the whole file
    ///
    /// A missing file is not an error: it is logged and `Ok(None)` is
    /// returned.
    ///
    /// # Errors
    ///
    /// I/O failures other than "not found", malformed JSON, and a top level
    /// that is not a JSON object.
    pub fn read_document(&self) -> Result<Option<RawDocument>> {
        let start = Instant::now();
        let path = self.path.display().to_string();
        log_op_start!(OP_READ, path = %path);

        let result = self.read_raw();
        let duration_ms = start.elapsed().as_millis() as u64;
        match &result {
            Ok(document) => {
                log_op_end!(OP_READ, duration_ms = duration_ms, found = document.is_some());
            }
            Err(err) => log_op_error!(OP_READ, err.clone(), duration_ms = duration_ms),
        }
        result
    }

    fn read_raw(&self) -> Result<Option<RawDocument>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!(path = %self.path.display(), "data file not found");
                return Ok(None);
            }
            Err(e) => return Err(io_error(OP_READ, &self.path, e)),
        };

        let value: serde_json::Value =
            serde_json::from_str(&text).map_err(|e| serialization_error(OP_READ, &self.path, e))?;

        RawDocument::from_value(value).map(Some).map_err(|e| {
            ExError::from(e)
                .with_op(OP_READ)
                .with_path(self.path.display().to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stampcheck_core::policy::FixedAnswer;
    use stampcheck_core::ExErrorKind;
    use tempfile::TempDir;

    fn empty_document() -> Document {
        Document { output: Vec::new() }
    }

    #[test]
    fn test_write_creates_missing_file() {
        let dir = TempDir::new().unwrap();
        let file = DocumentFile::new(dir.path().join("data.json"));

        // The answer is never consulted for a new file
        let outcome = file
            .write_document(&empty_document(), &mut FixedAnswer::no())
            .unwrap();

        assert_eq!(outcome, WriteOutcome::Created);
        assert_eq!(
            fs::read_to_string(file.path()).unwrap(),
            "{\n  \"output\": []\n}"
        );
    }

    #[test]
    fn test_declined_overwrite_keeps_bytes() {
        let dir = TempDir::new().unwrap();
        let file = DocumentFile::new(dir.path().join("data.json"));
        fs::write(file.path(), b"previous contents").unwrap();

        let outcome = file
            .write_document(&empty_document(), &mut FixedAnswer::no())
            .unwrap();

        assert_eq!(outcome, WriteOutcome::Skipped);
        assert_eq!(fs::read(file.path()).unwrap(), b"previous contents");
    }

    #[test]
    fn test_confirmed_overwrite_replaces() {
        let dir = TempDir::new().unwrap();
        let file = DocumentFile::new(dir.path().join("data.json"));
        fs::write(file.path(), b"previous contents").unwrap();

        let outcome = file
            .write_document(&empty_document(), &mut FixedAnswer::yes())
            .unwrap();

        assert_eq!(outcome, WriteOutcome::Overwritten);
        assert!(fs::read_to_string(file.path()).unwrap().contains("output"));
    }

    #[test]
    fn test_read_missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        let file = DocumentFile::new(dir.path().join("absent.json"));

        assert!(file.read_document().unwrap().is_none());
    }

    #[test]
    fn test_read_malformed_json_is_error() {
        let dir = TempDir::new().unwrap();
        let file = DocumentFile::new(dir.path().join("data.json"));
        fs::write(file.path(), b"{\"output\": [").unwrap();

        let err = file.read_document().unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::Serialization);
        assert_eq!(err.op(), Some(OP_READ));
    }

    #[test]
    fn test_read_non_object_is_error() {
        let dir = TempDir::new().unwrap();
        let file = DocumentFile::new(dir.path().join("data.json"));
        fs::write(file.path(), b"[]").unwrap();

        let err = file.read_document().unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidInput);
        assert!(err.path().unwrap().ends_with("data.json"));
    }
}
