#![allow(clippy::unwrap_used, clippy::expect_used)]

use serde_json::json;
use stampcheck_core::errors::StampError;
use stampcheck_core::logging_facility::test_capture::{init_test_capture, Boundaries};
use stampcheck_core::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_DIAGNOSTIC_COUNT, FIELD_DURATION_MS,
    FIELD_ERR_CODE, FIELD_ERR_KIND, FIELD_FAULT_COUNT, FIELD_PATH, FIELD_RECORD_COUNT,
    FIELD_RECORD_INDEX, OP_COMPARE, OP_GENERATE,
};
use stampcheck_core::{
    compare_times, log_op_end, log_op_error, log_op_start, Config, Generator, RawDocument,
    WithinHourMode,
};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name, path = "data.json");

    let events = capture.events_for(op_name);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event(), Some(EVENT_START));
    assert_eq!(events[0].field(FIELD_PATH), Some("data.json"));
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let events = capture.events_for(op_name);
    assert_eq!(events.len(), 1, "Should have exactly one end event");
    assert_eq!(events[0].event(), Some(EVENT_END));
    assert_eq!(events[0].field(FIELD_DURATION_MS), Some("42"));
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = StampError::EmptyRange {
        field: "second",
        low: 60,
        high: 59,
    };
    log_op_error!(op_name, err, duration_ms = 10);

    let events = capture.events_for(op_name);
    assert_eq!(events.len(), 1, "Should have exactly one error event");
    assert_eq!(events[0].event(), Some(EVENT_END_ERROR));
    assert_eq!(events[0].field(FIELD_ERR_CODE), Some("ERR_EMPTY_RANGE"));
    assert_eq!(events[0].field(FIELD_ERR_KIND), Some("EmptyRange"));
}

#[test]
fn test_produce_document_logs_single_boundary() {
    let capture = init_test_capture();
    let config = Config::with_data_file("unused.json");

    // Seeds hitting the minute/second 59 edge end with end_error instead
    let attempts = (0u64..64)
        .position(|seed| Generator::seeded(&config, seed).produce_document().is_ok())
        .expect("a seed avoiding the minute/second 59 edge")
        + 1;

    let boundaries = capture.boundaries(OP_GENERATE);
    assert_eq!(
        boundaries,
        Boundaries {
            starts: attempts,
            ends: 1,
            errors: attempts - 1,
        }
    );

    let ends = capture.ends_for(OP_GENERATE);
    assert_eq!(ends[0].field(FIELD_RECORD_COUNT), Some("5"));
    assert_eq!(ends[0].component(), Some("stampcheck_core::generator"));
}

#[test]
fn test_compare_logs_counts_and_fault_warning() {
    let capture = init_test_capture();
    let doc = RawDocument::from_value(json!({
        "output": [
            {"timestamp": "23-01-05T09:00:00Z", "message": {"body": {"dp": {
                "IDT_01": {"ts": "23-01-06T09:00:00Z"},
                "IDT_02": {"ts": "23-01-07T09:00:00Z"}
            }}}},
            {"timestamp": "23-01-05T09:00:00Z", "message": {}}
        ]
    }))
    .unwrap();

    compare_times(&doc, WithinHourMode::PerEntry).unwrap();

    assert!(capture.boundaries(OP_COMPARE).balanced());
    let ends = capture.ends_for(OP_COMPARE);
    let end = ends.last().expect("end event");
    assert_eq!(end.field(FIELD_RECORD_COUNT), Some("2"));
    assert_eq!(end.field(FIELD_DIAGNOSTIC_COUNT), Some("2"));
    assert_eq!(end.field(FIELD_FAULT_COUNT), Some("1"));

    let warnings = capture.with_message(tracing::Level::WARN, "record check stopped");
    assert!(!warnings.is_empty());
    assert_eq!(warnings[0].field(FIELD_RECORD_INDEX), Some("2"));
}
