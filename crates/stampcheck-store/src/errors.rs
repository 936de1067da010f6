//! Error handling for stampcheck-store
//!
//! Wraps stampcheck-core ExError with file-specific helpers

use stampcheck_core::errors::{ExError, ExErrorKind};
use std::path::Path;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create an IO error
pub fn io_error(operation: &str, path: &Path, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation)
        .with_path(path.display().to_string())
        .with_message(err.to_string())
}

/// Create a JSON encode/decode error
pub fn serialization_error(operation: &str, path: &Path, err: serde_json::Error) -> ExError {
    ExError::new(ExErrorKind::Serialization)
        .with_op(operation)
        .with_path(path.display().to_string())
        .with_message(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_carries_path() {
        let err = io_error(
            "write_document",
            Path::new("/tmp/data.json"),
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );

        assert_eq!(err.kind(), ExErrorKind::Io);
        assert_eq!(err.path(), Some("/tmp/data.json"));
        assert_eq!(err.op(), Some("write_document"));
    }

    #[test]
    fn test_serialization_error_code() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = serialization_error("read_document", Path::new("data.json"), json_err);
        assert_eq!(err.code(), "ERR_SERIALIZATION");
        assert_eq!(err.path(), Some("data.json"));
    }
}
