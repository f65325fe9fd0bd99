//! Error recovery and edge case tests.
//!
//! Every rejected submission is reported, never panics, and leaves the
//! session untouched.

use chain_of_draft::chain::FailureResponse;
use chain_of_draft::error::{SubmitError, ValidationError};
use serde_json::{json, Value};
use test_case::test_case;

use super::{session, submit, thought, thought_with};

#[test_case(json!("just a string") ; "not an object")]
#[test_case(json!({ "thoughtNumber": 1, "totalThoughts": 1, "nextThoughtNeeded": true }) ; "missing thought")]
#[test_case(json!({ "thought": 7, "thoughtNumber": 1, "totalThoughts": 1, "nextThoughtNeeded": true }) ; "thought not string")]
#[test_case(json!({ "thought": "x", "thoughtNumber": "1", "totalThoughts": 1, "nextThoughtNeeded": true }) ; "number as string")]
#[test_case(json!({ "thought": "x", "thoughtNumber": 1, "totalThoughts": 1, "nextThoughtNeeded": "yes" }) ; "flag not bool")]
#[test_case(json!({ "thought": "x", "thoughtNumber": 1, "totalThoughts": 1, "nextThoughtNeeded": true, "problemType": "poetry" }) ; "unknown problem type")]
#[test_case(json!({ "thought": "x", "thoughtNumber": 1, "totalThoughts": 1, "nextThoughtNeeded": true, "autoMode": 1 }) ; "auto mode not bool")]
#[test_case(json!({ "thought": "x", "thoughtNumber": 1, "totalThoughts": 1, "nextThoughtNeeded": true, "confidence": 1.5 }) ; "confidence out of range")]
fn test_invalid_submission_is_rejected(value: Value) {
    let mut session = session();
    submit(&mut session, &thought("kept", 1, 2));

    let err = session.submit_thought(&value).unwrap_err();
    assert!(matches!(err, SubmitError::Validation(_)));

    let failure = FailureResponse::from(&err);
    assert_eq!(failure.status, "failed");
    assert_eq!(failure.kind, "validation");
    assert!(failure.error.starts_with("Invalid"));
    assert_eq!(session.history().len(), 1);
}

#[test]
fn test_missing_field_is_named() {
    let mut session = session();
    let err = session
        .submit_thought(&json!({ "thought": "x", "thoughtNumber": 1, "nextThoughtNeeded": true }))
        .unwrap_err();
    assert_eq!(
        err,
        SubmitError::Validation(ValidationError::MissingField {
            field: "totalThoughts".to_string()
        })
    );
}

#[test]
fn test_null_optional_fields_are_ignored() {
    let mut session = session();
    let response = submit(
        &mut session,
        &thought_with("x", 1, 1, json!({ "mode": null, "pathCount": null })),
    );
    assert!(response.consensus.is_none());
}

#[test]
fn test_rejection_does_not_touch_sticky_mode() {
    let mut session = session();
    submit(&mut session, &thought_with("x", 1, 2, json!({ "mode": "concise" })));
    let bad = thought_with("y", 2, 2, json!({ "mode": "draft", "pathCount": 99 }));
    assert!(session.submit_thought(&bad).is_err());
    assert_eq!(session.current_mode().as_str(), "concise");
}

#[test]
fn test_session_usable_after_errors() {
    let mut session = session();
    for _ in 0..3 {
        assert!(session.submit_thought(&json!(null)).is_err());
    }
    let response = submit(&mut session, &thought("recovered", 1, 1));
    assert_eq!(response.thought_history_length, 1);
}

#[test]
fn test_very_long_thought() {
    let mut session = session();
    let text = "word ".repeat(1000);
    let response = submit(&mut session, &thought_with(&text, 1, 1, json!({ "pathCount": 2 })));
    assert_eq!(response.metrics.word_count, 1000);
    assert_eq!(response.metrics.token_count, 1250);
    assert!(response.consensus.is_some());
}
