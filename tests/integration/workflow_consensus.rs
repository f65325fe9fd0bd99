//! Multi-path consensus workflow tests.

use chain_of_draft::chain::ReasoningMode;
use serde_json::json;

use super::{session, submit, thought, thought_with};

#[test]
fn test_consensus_for_multiple_paths() {
    let mut session = session();
    let response = submit(
        &mut session,
        &thought_with(
            "Analyze the database schema design for scalability",
            1,
            1,
            json!({ "pathCount": 3 }),
        ),
    );
    let consensus = response.consensus.expect("consensus");
    assert_eq!(consensus.path_count, 3);
    assert!((0.0..=1.0).contains(&consensus.confidence));
    assert!((0.0..=1.0).contains(&consensus.agreement_score));
    assert!(consensus.statement.starts_with("3/3 paths converge on 'analyze' and 'database'"));
}

#[test]
fn test_no_consensus_for_single_or_missing_path_count() {
    let mut session = session();
    let single = submit(
        &mut session,
        &thought_with("Simple thought", 1, 2, json!({ "pathCount": 1 })),
    );
    assert!(single.consensus.is_none());
    let missing = submit(&mut session, &thought("Another thought", 2, 2));
    assert!(missing.consensus.is_none());
}

#[test]
fn test_votes_cover_every_path() {
    let mut session = session();
    let response = submit(
        &mut session,
        &thought_with(
            "Calculate 15 * 23 step by step",
            1,
            1,
            json!({ "pathCount": 4, "problemType": "arithmetic" }),
        ),
    );
    let consensus = response.consensus.expect("consensus");
    assert_eq!(consensus.path_count, 4);
    assert_eq!(consensus.voting_results.len(), 4);
    assert!(consensus.voting_results.contains_key("path_4"));
}

#[test]
fn test_path_count_range_is_validated() {
    let mut session = session();
    for bad in [json!(0), json!(11), json!(2.5), json!("3")] {
        let err = session
            .submit_thought(&thought_with("x", 1, 1, json!({ "pathCount": bad })))
            .unwrap_err();
        assert!(err.to_string().contains("Invalid pathCount"), "{err}");
    }
    assert!(session.history().is_empty());
}

#[test]
fn test_every_valid_path_count() {
    let mut session = session();
    for count in 2..=10_u32 {
        let response = submit(
            &mut session,
            &thought_with("Evaluate caching strategies", count, 10, json!({ "pathCount": count })),
        );
        assert_eq!(response.consensus.expect("consensus").path_count, count as usize);
    }
}

#[test]
fn test_only_stop_words_yield_no_consensus() {
    let mut session = session();
    let response = submit(
        &mut session,
        &thought_with("The the the this that with", 1, 1, json!({ "pathCount": 3 })),
    );
    let consensus = response.consensus.expect("consensus");
    assert!(consensus.agreement_score < 0.5);
    assert!(consensus.statement.starts_with("No consensus found across 3 paths"));
}

#[test]
fn test_consensus_with_branching() {
    let mut session = session();
    let response = submit(
        &mut session,
        &thought_with(
            "Consider option A or option B for this decision",
            2,
            3,
            json!({
                "pathCount": 3,
                "branchFromThought": 1,
                "branchId": "A",
                "problemType": "planning"
            }),
        ),
    );
    assert!(response.consensus.is_some());
    assert_eq!(response.branches, vec!["A".to_string()]);
    assert!(response.suggested_branching.is_some());
    assert_eq!(response.suggested_branch_id.as_deref(), Some("B"));
}

#[test]
fn test_consensus_keeps_mode_resolution() {
    let mut session = session();
    let response = submit(
        &mut session,
        &thought_with(
            "Quick math: 7 * 8",
            1,
            1,
            json!({ "pathCount": 3, "mode": "auto", "problemType": "arithmetic" }),
        ),
    );
    assert!(response.consensus.is_some());
    assert_eq!(response.current_mode, ReasoningMode::Draft);
}

#[test]
fn test_paths_never_enter_history() {
    let mut session = session();
    submit(
        &mut session,
        &thought_with("First thought", 1, 2, json!({ "pathCount": 3 })),
    );
    let second = submit(
        &mut session,
        &thought_with("Second thought", 2, 2, json!({ "pathCount": 2 })),
    );
    assert_eq!(second.thought_history_length, 2);
    assert_eq!(second.consensus.expect("consensus").path_count, 2);
}

#[test]
fn test_empty_thought_skips_consensus() {
    let mut session = session();
    let response = submit(&mut session, &thought_with("", 1, 1, json!({ "pathCount": 3 })));
    assert!(response.consensus.is_none());
    assert_eq!(response.metrics.word_count, 0);
}
