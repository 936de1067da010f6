//! stampcheck store - the single JSON data file
//!
//! Provides:
//! - Atomic writes (temp file then rename)
//! - The gated writer that asks before replacing an existing file
//! - The reader that hands back a loosely typed document for comparison
//! - A line-based prompt for the overwrite question

pub mod atomic;
pub mod document_file;
pub mod errors;
pub mod prompt;

// Re-export key types
pub use document_file::{DocumentFile, WriteOutcome};
pub use errors::Result;
pub use prompt::PromptConfirm;
