//! Rollback workflow tests: submit → rollback → continue.

use std::collections::HashSet;

use chain_of_draft::error::{ChainError, SubmitError, ValidationError};
use serde_json::json;

use super::{rollback, session, submit, thought, thought_with};

#[test]
fn test_rollback_to_previous_thought() {
    let mut session = session();
    submit(&mut session, &thought("First step", 1, 3));
    submit(&mut session, &thought("Second step", 2, 3));
    submit(&mut session, &thought("Third step has an error", 3, 3));

    let response = rollback(&mut session, 2, Some("Found error in third thought"));

    assert_eq!(response.operation, "rollback");
    assert_eq!(response.rolled_back_to, 2);
    assert_eq!(response.reason, "Found error in third thought");
    assert_eq!(response.current_history_length, 2);
    assert_eq!(session.history().len(), 2);
}

#[test]
fn test_rollback_count_accumulates() {
    let mut session = session();
    for n in 1..=3 {
        submit(&mut session, &thought("step", n, 3));
    }
    assert_eq!(rollback(&mut session, 2, None).rollback_count, 1);
    submit(&mut session, &thought("retry", 3, 3));
    assert_eq!(rollback(&mut session, 1, None).rollback_count, 2);
}

#[test]
fn test_rollback_beyond_history_fails() {
    let mut session = session();
    submit(&mut session, &thought("only", 1, 1));

    let request = thought_with("x", 1, 1, json!({ "rollbackToThought": 5 }));
    let err = session.submit_thought(&request).unwrap_err();

    assert!(err.to_string().contains("Cannot rollback to thought 5"));
    assert_eq!(err.operation(), Some("rollback"));
    assert_eq!(session.history().len(), 1);
}

#[test]
fn test_rollback_to_zero_is_invalid() {
    let mut session = session();
    submit(&mut session, &thought("only", 1, 1));
    let request = thought_with("x", 1, 1, json!({ "rollbackToThought": 0 }));
    let err = session.submit_thought(&request).unwrap_err();
    assert!(matches!(err, SubmitError::Validation(_)));
}

#[test]
fn test_rollback_reason_must_be_string() {
    let mut session = session();
    submit(&mut session, &thought("only", 1, 1));
    let request = thought_with(
        "x",
        1,
        1,
        json!({ "rollbackToThought": 1, "rollbackReason": 42 }),
    );
    let err = session.submit_thought(&request).unwrap_err();
    assert!(err.to_string().contains("Invalid rollbackReason"));
}

#[test]
fn test_rollback_on_empty_history() {
    let mut session = session();
    let request = thought_with("x", 1, 1, json!({ "rollbackToThought": 1 }));
    let err = session.submit_thought(&request).unwrap_err();
    assert_eq!(
        err,
        SubmitError::Chain(ChainError::RollbackUnavailable {
            target: 1,
            history_len: 0
        })
    );
}

#[test]
fn test_rollback_removes_branches_past_target() {
    let mut session = session();
    submit(&mut session, &thought("Root thought", 1, 4));
    submit(&mut session, &thought("Second thought", 2, 4));
    submit(
        &mut session,
        &thought_with(
            "Branch from thought 2",
            3,
            4,
            json!({ "branchFromThought": 2, "branchId": "A" }),
        ),
    );
    submit(&mut session, &thought("Fourth thought", 4, 4));

    let response = rollback(&mut session, 1, Some("Reset to beginning"));
    assert_eq!(response.current_history_length, 1);

    let next = submit(&mut session, &thought("New thought after rollback", 2, 2));
    assert!(next.branches.is_empty());
}

#[test]
fn test_rollback_keeps_branches_within_target() {
    let mut session = session();
    submit(&mut session, &thought("Root thought", 1, 4));
    submit(
        &mut session,
        &thought_with(
            "Branch from root",
            2,
            4,
            json!({ "branchFromThought": 1, "branchId": "A" }),
        ),
    );
    submit(&mut session, &thought("Third thought", 3, 4));
    submit(&mut session, &thought("Fourth thought", 4, 4));

    let response = rollback(&mut session, 2, Some("Keep branch"));
    assert_eq!(response.current_history_length, 2);

    let next = submit(&mut session, &thought("Check branches", 3, 3));
    assert!(next.branches.contains(&"A".to_string()));
}

#[test]
fn test_snapshots_and_restored_thought() {
    let mut session = session();
    submit(&mut session, &thought("Original first", 1, 3));
    submit(&mut session, &thought("Second", 2, 3));
    submit(&mut session, &thought("Third", 3, 3));

    let response = rollback(&mut session, 1, None);
    assert_eq!(response.available_snapshots, vec![1, 2, 3]);
    assert_eq!(response.restored_thought.thought, "Original first");
    assert_eq!(response.current_history_length, 1);
    assert_eq!(response.reason, "Manual rollback");
}

#[test]
fn test_consensus_after_rollback() {
    let mut session = session();
    submit(&mut session, &thought("Start", 1, 3));
    submit(&mut session, &thought("Wrong turn", 2, 3));
    rollback(&mut session, 1, None);

    let response = submit(
        &mut session,
        &thought_with("Better approach to the problem", 2, 2, json!({ "pathCount": 3 })),
    );
    assert!(response.consensus.is_some());
    assert_eq!(response.thought_history_length, 2);
}

#[test]
fn test_reset_clears_rollback_data() {
    let mut session = session();
    submit(&mut session, &thought("a", 1, 2));
    submit(&mut session, &thought("b", 2, 2));
    rollback(&mut session, 1, None);

    let reset = session.reset();
    assert!(reset.message.contains("rollback data cleared"));

    submit(&mut session, &thought("a", 1, 2));
    submit(&mut session, &thought("b", 2, 2));
    assert_eq!(rollback(&mut session, 1, None).rollback_count, 1);
}

#[test]
fn test_rollback_ids_are_unique() {
    let mut session = session();
    let mut ids = HashSet::new();
    for _ in 0..5 {
        submit(&mut session, &thought("a", 1, 2));
        submit(&mut session, &thought("b", 2, 2));
        assert!(ids.insert(rollback(&mut session, 1, None).rollback_id));
    }
}

#[test]
fn test_rollback_filters_by_number_not_position() {
    let mut session = session();
    submit(&mut session, &thought("one", 1, 3));
    submit(&mut session, &thought("three early", 3, 3));
    submit(&mut session, &thought("two late", 2, 3));

    let response = rollback(&mut session, 2, None);
    assert_eq!(response.current_history_length, 2);
    let numbers: Vec<u32> = session.history().iter().map(|t| t.thought_number).collect();
    assert_eq!(numbers, vec![1, 2]);
}

#[test]
fn test_rollback_validation_precedes_everything() {
    let mut session = session();
    submit(&mut session, &thought("one", 1, 1));
    let request = thought_with(
        "x",
        1,
        1,
        json!({ "rollbackToThought": 1, "pathCount": 42 }),
    );
    let err = session.submit_thought(&request).unwrap_err();
    assert!(matches!(
        err,
        SubmitError::Validation(ValidationError::InvalidValue { ref field, .. }) if field == "pathCount"
    ));
    assert_eq!(session.state().rollback.count(), 0);
}

#[test]
fn test_rollback_releases_unused_branch_ids() {
    let mut session = session();
    submit(&mut session, &thought("Start from the logs", 1, 2));

    for _ in 0..400 {
        let response = submit(&mut session, &thought("good for now", 2, 2));
        assert_eq!(response.suggested_branch_id.as_deref(), Some("A"));
        rollback(&mut session, 1, None);
    }

    assert_eq!(session.state().branches.len(), 0);
    let response = submit(&mut session, &thought("good for now", 2, 2));
    assert_eq!(response.suggested_branch_id.as_deref(), Some("A"));
}
