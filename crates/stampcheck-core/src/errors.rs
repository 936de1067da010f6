use stampcheck_core_types::RunId;
use thiserror::Error;

/// Result type alias using StampError
pub type Result<T> = std::result::Result<T, StampError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that tests and log consumers can
/// match on without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Structural/Validation
    InvalidInput,
    /// A key the document shape requires is absent
    MissingField,
    /// A timestamp string does not match `YY-MM-DDTHH:MM:SSZ`
    InvalidTimestamp,
    /// A random draw was asked for an empty inclusive range
    EmptyRange,

    // Integration/IO
    Io,
    Serialization,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::MissingField => "ERR_MISSING_FIELD",
            ExErrorKind::InvalidTimestamp => "ERR_INVALID_TIMESTAMP",
            ExErrorKind::EmptyRange => "ERR_EMPTY_RANGE",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification for programmatic handling plus optional
/// context about where in the pipeline the failure happened.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    field: Option<String>,
    path: Option<String>,
    run_id: Option<RunId>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            field: None,
            path: None,
            run_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add the document field (key or generator field) involved
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Add the file path involved
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add run correlation context
    pub fn with_run_id(mut self, run_id: RunId) -> Self {
        self.run_id = Some(run_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn run_id(&self) -> Option<&RunId> {
        self.run_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(field) = &self.field {
            write!(f, " (field: {})", field)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        if let Some(run_id) = &self.run_id {
            write!(f, " (run_id: {})", run_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Domain errors raised while generating, decoding or comparing documents
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StampError {
    /// Timestamp string does not match the fixed format
    #[error("Invalid timestamp '{value}': {reason}")]
    InvalidTimestamp { value: String, reason: String },

    /// Random draw requested over an empty range.
    ///
    /// Happens when the reference time sits at the edge of the window
    /// (minute or second of 59, or an hour after 12).
    #[error("Empty random range for {field}: {low}..={high}")]
    EmptyRange {
        field: &'static str,
        low: u32,
        high: u32,
    },

    /// Date arithmetic left the representable range
    #[error("Date out of range: {reference} plus {days} days")]
    DateOutOfRange { reference: String, days: i64 },

    /// Required document key is missing
    #[error("Missing key: {key}")]
    MissingKey { key: String },

    /// Document has the wrong JSON shape
    #[error("Invalid document: {reason}")]
    InvalidDocument { reason: String },

    /// A document value has the wrong JSON type; `value` is the JSON text
    #[error("'{key}' should be {expected}, found {value}")]
    UnexpectedValue {
        key: String,
        expected: &'static str,
        value: String,
    },

    /// Serialization error
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl From<StampError> for ExError {
    fn from(err: StampError) -> Self {
        match err {
            StampError::InvalidTimestamp { value, reason } => {
                ExError::new(ExErrorKind::InvalidTimestamp)
                    .with_op("parse_timestamp")
                    .with_message(format!("'{}': {}", value, reason))
            }

            StampError::EmptyRange { field, low, high } => ExError::new(ExErrorKind::EmptyRange)
                .with_op("generate_timestamp")
                .with_field(field)
                .with_message(format!("cannot draw from {}..={}", low, high)),

            StampError::DateOutOfRange { reference, days } => {
                ExError::new(ExErrorKind::InvalidInput)
                    .with_op("generate_timestamp")
                    .with_message(format!("{} plus {} days is out of range", reference, days))
            }

            StampError::MissingKey { key } => ExError::new(ExErrorKind::MissingField)
                .with_field(key)
                .with_message("Missing key"),

            StampError::InvalidDocument { reason } => {
                ExError::new(ExErrorKind::InvalidInput).with_message(reason)
            }

            StampError::UnexpectedValue {
                key,
                expected,
                value,
            } => ExError::new(ExErrorKind::InvalidInput)
                .with_message(format!("'{}' should be {}, found {}", key, expected, value))
                .with_field(key),

            StampError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

impl From<serde_json::Error> for StampError {
    fn from(err: serde_json::Error) -> Self {
        StampError::Serialization {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_codes() {
        let cases = [
            (ExErrorKind::InvalidInput, "ERR_INVALID_INPUT"),
            (ExErrorKind::MissingField, "ERR_MISSING_FIELD"),
            (ExErrorKind::InvalidTimestamp, "ERR_INVALID_TIMESTAMP"),
            (ExErrorKind::EmptyRange, "ERR_EMPTY_RANGE"),
            (ExErrorKind::Io, "ERR_IO"),
            (ExErrorKind::Serialization, "ERR_SERIALIZATION"),
        ];
        for (kind, expected_code) in cases {
            assert_eq!(kind.code(), expected_code, "Wrong code for {:?}", kind);
        }
    }

    #[test]
    fn test_empty_range_conversion_keeps_field() {
        let err = StampError::EmptyRange {
            field: "minute",
            low: 60,
            high: 59,
        };
        let ex: ExError = err.into();

        assert_eq!(ex.kind(), ExErrorKind::EmptyRange);
        assert_eq!(ex.field(), Some("minute"));
        assert_eq!(ex.op(), Some("generate_timestamp"));
        assert!(ex.message().contains("60..=59"));
    }

    #[test]
    fn test_display_includes_code_and_context() {
        let run_id = RunId::from_string("run-7".to_string());
        let err = ExError::new(ExErrorKind::Io)
            .with_op("write_document")
            .with_path("/tmp/data.json")
            .with_run_id(run_id)
            .with_message("disk full");

        let rendered = err.to_string();
        assert!(rendered.starts_with("[ERR_IO] in operation 'write_document': disk full"));
        assert!(rendered.contains("(path: /tmp/data.json)"));
        assert!(rendered.contains("(run_id: run-7)"));
    }

    #[test]
    fn test_serde_json_error_becomes_serialization() {
        let err: StampError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, StampError::Serialization { .. }));

        let ex: ExError = err.into();
        assert_eq!(ex.code(), "ERR_SERIALIZATION");
    }
}
