//! Core types shared across stampcheck crates
//!
//! This crate provides the small vocabulary used by error reporting and
//! logging in every other crate:
//!
//! - **Correlation**: `RunId` ties together every log event of one pipeline run
//! - **Schema constants**: Canonical field keys and event names

pub mod correlation;
pub mod schema;

pub use correlation::RunId;
