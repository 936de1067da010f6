use stampcheck_core::errors::{ExError, ExErrorKind, StampError};
use stampcheck_core::timestamp::parse_timestamp;

#[test]
fn test_invalid_timestamp_verifiable_by_kind() {
    let err = parse_timestamp("not-a-time").unwrap_err();

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::InvalidTimestamp);
    assert_eq!(ex_err.code(), "ERR_INVALID_TIMESTAMP");
    assert!(ex_err.message().contains("not-a-time"));
}

#[test]
fn test_missing_key_is_missing_field() {
    let err = StampError::MissingKey {
        key: "output".to_string(),
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::MissingField);
    assert_eq!(ex_err.code(), "ERR_MISSING_FIELD");
    assert_eq!(ex_err.field(), Some("output"));
}

#[test]
fn test_invalid_document_is_invalid_input() {
    let err = StampError::InvalidDocument {
        reason: "top level must be a JSON object, found array".to_string(),
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.code(), "ERR_INVALID_INPUT");
    assert_eq!(
        ex_err.to_string(),
        "[ERR_INVALID_INPUT]: top level must be a JSON object, found array"
    );
}

#[test]
fn test_unexpected_value_keeps_key_and_value() {
    let err = StampError::UnexpectedValue {
        key: "output".to_string(),
        expected: "an array",
        value: "null".to_string(),
    };
    assert_eq!(err.to_string(), "'output' should be an array, found null");

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::InvalidInput);
    assert_eq!(ex_err.field(), Some("output"));
}

#[test]
fn test_domain_error_display() {
    let err = StampError::EmptyRange {
        field: "hour",
        low: 13,
        high: 12,
    };
    assert_eq!(err.to_string(), "Empty random range for hour: 13..=12");
}
