//! stampcheck core - fixture generation and timestamp comparison
//!
//! This crate provides:
//! - The document model (`Document` for generated data, `RawDocument` for
//!   data read back from disk)
//! - The `YY-MM-DDTHH:MM:SSZ` timestamp codec
//! - A seedable generator for synthetic records
//! - The comparator that flags data points outside the record's hour
//! - The overwrite gate policy used by the writer
//! - Configuration, the error facility and the logging facility

pub mod compare;
pub mod config;
pub mod errors;
pub mod generator;
pub mod logging_facility;
pub mod model;
pub mod policy;
pub mod timestamp;

pub use stampcheck_core_types::schema;

// Re-export commonly used types
pub use compare::{compare_times, ComparisonReport, WithinHourMode};
pub use config::Config;
pub use errors::{ExError, ExErrorKind, Result, StampError};
pub use generator::Generator;
pub use model::{Document, RawDocument};
pub use policy::{decide_overwrite, ConfirmOverwrite, FixedAnswer, OverwriteDecision};
