//! Timestamp comparator
//!
//! Walks every record of a document and checks each data point timestamp
//! against the record's own timestamp. An entry passes when it falls on
//! day zero of the difference and less than an hour after the record.
//!
//! Structural problems are reported per record as a [`RecordFault`]; a
//! faulty record stops at the fault but later records are still checked.

use crate::errors::{Result, StampError};
use crate::model::{json_type, RawDocument};
use crate::schema::OP_COMPARE;
use crate::timestamp::{floor_days, format_delta, format_display, parse_timestamp};
use crate::{log_op_end, log_op_error, log_op_start};
use chrono::{Duration, NaiveDateTime};
use serde_json::{Map, Value};
use std::io::Write;
use std::time::Instant;

/// How the per-record "within an hour" flag is applied across entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WithinHourMode {
    /// The flag is set by the first close entry and never reset, so every
    /// later entry of that record passes as well.
    #[default]
    Sticky,
    /// Every entry is judged on its own difference.
    PerEntry,
}

/// Return value of a pass with no faulty record
pub const STATUS_OK: i32 = 0;
/// Return value of a pass where at least one record faulted
pub const STATUS_FAULT: i32 = 1;

/// An entry whose timestamp was not within the hour
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// 1-based record position
    pub record_index: usize,
    pub entry_key: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// `end - start`
    pub difference: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RecordFault {
    /// A key was absent (or empty where a value is required)
    MissingKey { key: String },
    /// A value had the wrong type or failed to parse
    Parse { value: String, reason: String },
}

impl RecordFault {
    fn missing(key: &str) -> Self {
        RecordFault::MissingKey {
            key: key.to_string(),
        }
    }

    fn wrong_type(key: &str, expected: &str, value: &Value) -> Self {
        RecordFault::Parse {
            value: value.to_string(),
            reason: format!("'{}' should be {}, found {}", key, expected, json_type(value)),
        }
    }
}

impl From<StampError> for RecordFault {
    fn from(err: StampError) -> Self {
        match err {
            StampError::InvalidTimestamp { value, reason } => RecordFault::Parse { value, reason },
            StampError::MissingKey { key } => RecordFault::MissingKey { key },
            StampError::UnexpectedValue {
                key,
                expected,
                value,
            } => RecordFault::Parse {
                value,
                reason: format!("'{}' should be {}", key, expected),
            },
            other => RecordFault::Parse {
                value: other.to_string(),
                reason: String::new(),
            },
        }
    }
}

/// Outcome of checking one record
#[derive(Debug, Clone, PartialEq)]
pub struct RecordReport {
    pub record_index: usize,
    /// Diagnostics emitted before the record finished or faulted
    pub diagnostics: Vec<Diagnostic>,
    pub fault: Option<RecordFault>,
}

impl RecordReport {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty() && self.fault.is_none()
    }
}

/// Aggregated outcome of a comparison pass
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComparisonReport {
    pub records: Vec<RecordReport>,
}

impl ComparisonReport {
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.records.iter().flat_map(|r| r.diagnostics.iter())
    }

    pub fn faults(&self) -> impl Iterator<Item = (usize, &RecordFault)> {
        self.records
            .iter()
            .filter_map(|r| r.fault.as_ref().map(|f| (r.record_index, f)))
    }

    pub fn has_faults(&self) -> bool {
        self.faults().next().is_some()
    }

    /// `STATUS_FAULT` if any record faulted, `STATUS_OK` otherwise
    ///
    /// Diagnostics alone do not change the status.
    pub fn status(&self) -> i32 {
        if self.has_faults() {
            STATUS_FAULT
        } else {
            STATUS_OK
        }
    }

    /// Print diagnostics and fault lines in record order
    ///
    /// # Errors
    ///
    /// Returns the writer's I/O error.
    pub fn write_to<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        for record in &self.records {
            for diagnostic in &record.diagnostics {
                writeln!(out, "{}", diagnostic_line(diagnostic))?;
            }
            if let Some(fault) = &record.fault {
                writeln!(out, "{}", fault_line(fault))?;
            }
        }
        Ok(())
    }
}

pub fn diagnostic_line(d: &Diagnostic) -> String {
    format!(
        "Object: {} Current IDT: {} Start time: {} | End time: {} | Time difference: {} Hours",
        d.record_index,
        d.entry_key,
        format_display(&d.start),
        format_display(&d.end),
        format_delta(d.difference)
    )
}

/// Keys whose fault comes from an emptiness check; they print bare
///
/// Every other missing key was read directly and prints quoted, e.g. `'ts'`.
const CHECKED_KEYS: [&str; 2] = ["body", "dp"];

pub fn fault_line(fault: &RecordFault) -> String {
    match fault {
        RecordFault::MissingKey { key } if CHECKED_KEYS.contains(&key.as_str()) => format!(
            "ERROR: There might be an error where one or more keys does not exist.. Possible error for key: {}",
            key
        ),
        RecordFault::MissingKey { key } => format!(
            "ERROR: There might be an error where one or more keys does not exist.. Possible error for key: '{}'",
            key
        ),
        RecordFault::Parse { value, reason } if reason.is_empty() => format!(
            "ERROR: There might be an error with one or more values while parsing.. Possible error for value: {}",
            value
        ),
        RecordFault::Parse { value, reason } => format!(
            "ERROR: There might be an error with one or more values while parsing.. Possible error for value: {} ({})",
            value, reason
        ),
    }
}

/// True when `difference` is on day zero and under 60 minutes
///
/// Negative differences fall on day -1 and never pass.
pub fn is_within_hour(difference: Duration) -> bool {
    floor_days(difference) == 0 && difference.num_seconds() < 60 * 60
}

/// Compare every record's entry timestamps against the record timestamp
///
/// # Errors
///
/// Fails only when the document has no usable `output` array; record level
/// problems are reported inside the returned report.
pub fn compare_times(document: &RawDocument, mode: WithinHourMode) -> Result<ComparisonReport> {
    let start = Instant::now();
    log_op_start!(OP_COMPARE, mode = ?mode);

    let records = match output_records(document) {
        Ok(records) => records,
        Err(err) => {
            log_op_error!(
                OP_COMPARE,
                err.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            return Err(err);
        }
    };

    let report = ComparisonReport {
        records: records
            .iter()
            .enumerate()
            .map(|(i, record)| check_record(i + 1, record, mode))
            .collect(),
    };

    for (index, fault) in report.faults() {
        tracing::warn!(record_index = index, fault = ?fault, "record check stopped");
    }

    log_op_end!(
        OP_COMPARE,
        duration_ms = start.elapsed().as_millis() as u64,
        record_count = report.records.len(),
        diagnostic_count = report.diagnostics().count(),
        fault_count = report.faults().count()
    );
    Ok(report)
}

fn output_records(document: &RawDocument) -> Result<&Vec<Value>> {
    match document.get("output") {
        None => Err(StampError::MissingKey {
            key: "output".to_string(),
        }),
        Some(Value::Array(records)) => Ok(records),
        Some(other) => Err(StampError::UnexpectedValue {
            key: "output".to_string(),
            expected: "an array",
            value: other.to_string(),
        }),
    }
}

/// Check one record, collecting diagnostics until done or a fault occurs
pub fn check_record(record_index: usize, record: &Value, mode: WithinHourMode) -> RecordReport {
    let mut diagnostics = Vec::new();
    let fault = check_entries(record_index, record, mode, &mut diagnostics).err();
    RecordReport {
        record_index,
        diagnostics,
        fault,
    }
}

fn check_entries(
    record_index: usize,
    record: &Value,
    mode: WithinHourMode,
    diagnostics: &mut Vec<Diagnostic>,
) -> std::result::Result<(), RecordFault> {
    let record = as_object("record", record)?;
    let record_time = timestamp_field(record, "timestamp")?;
    let message = record
        .get("message")
        .ok_or_else(|| RecordFault::missing("message"))?;
    let message = as_object("message", message)?;
    let body = as_object("body", present(message, "body")?)?;
    let dp = as_object("dp", present(body, "dp")?)?;

    let mut within_hour = false;
    for (key, entry) in dp {
        // An empty entry is reported against its container
        if is_empty_value(entry) {
            return Err(RecordFault::missing("dp"));
        }
        let entry = as_object(key, entry)?;
        let entry_time = timestamp_field(entry, "ts")?;
        let difference = entry_time.signed_duration_since(record_time);

        let close = is_within_hour(difference);
        match mode {
            WithinHourMode::Sticky => within_hour |= close,
            WithinHourMode::PerEntry => within_hour = close,
        }

        if !within_hour {
            tracing::debug!(
                record_index,
                entry_key = %key,
                difference_s = difference.num_seconds(),
                "entry outside the hour"
            );
            diagnostics.push(Diagnostic {
                record_index,
                entry_key: key.clone(),
                start: record_time,
                end: entry_time,
                difference,
            });
        }
    }
    Ok(())
}

/// Fetch a key that must be present and non-empty
fn present<'a>(
    object: &'a Map<String, Value>,
    key: &str,
) -> std::result::Result<&'a Value, RecordFault> {
    match object.get(key) {
        Some(value) if !is_empty_value(value) => Ok(value),
        _ => Err(RecordFault::missing(key)),
    }
}

fn as_object<'a>(
    key: &str,
    value: &'a Value,
) -> std::result::Result<&'a Map<String, Value>, RecordFault> {
    value
        .as_object()
        .ok_or_else(|| RecordFault::wrong_type(key, "an object", value))
}

fn timestamp_field(
    object: &Map<String, Value>,
    key: &str,
) -> std::result::Result<NaiveDateTime, RecordFault> {
    let value = object.get(key).ok_or_else(|| RecordFault::missing(key))?;
    let text = value
        .as_str()
        .ok_or_else(|| RecordFault::wrong_type(key, "a string", value))?;
    Ok(parse_timestamp(text)?)
}

/// Null, false, zero, and empty strings/arrays/objects count as absent
fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}
