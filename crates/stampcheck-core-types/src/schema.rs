//! Canonical schema constants for structured logging and events
//!
//! These constants keep field names identical across crates so log
//! consumers can filter on them.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Document coordinates
pub const FIELD_PATH: &str = "path";
pub const FIELD_RECORD_INDEX: &str = "record_index";

// Collection sizes
pub const FIELD_RECORD_COUNT: &str = "record_count";
pub const FIELD_DIAGNOSTIC_COUNT: &str = "diagnostic_count";
pub const FIELD_FAULT_COUNT: &str = "fault_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

// Canonical operation names
pub const OP_GENERATE: &str = "generate_document";
pub const OP_WRITE: &str = "write_document";
pub const OP_READ: &str = "read_document";
pub const OP_COMPARE: &str = "compare_times";
