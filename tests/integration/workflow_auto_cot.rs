//! Auto-CoT trigger and suggestion workflow tests.

use chain_of_draft::chain::{ProblemType, ReasoningMode};
use chain_of_draft::config::{AutoCotConfig, Config};
use serde_json::json;
use test_case::test_case;

use super::{rollback, session, session_with, submit, thought, thought_with};

fn auto(text: &str) -> serde_json::Value {
    thought_with(text, 1, 1, json!({ "autoMode": true }))
}

#[test_case("Let's think step by step about this problem" ; "canonical phrase")]
#[test_case("Let me think about this" ; "let me think")]
#[test_case("Thinking step by step here" ; "thinking step by step")]
#[test_case("Let me work through this carefully" ; "work through")]
#[test_case("Let's break this down" ; "break down")]
fn test_trigger_phrases(text: &str) {
    let mut session = session();
    let response = submit(&mut session, &thought(text, 1, 1));
    assert!(response.auto_cot.expect("auto-cot").auto_trigger_detected);
}

#[test]
fn test_no_trigger_without_cue() {
    let mut session = session();
    let response = submit(
        &mut session,
        &thought("This is just a regular thought without triggers", 1, 1),
    );
    assert!(response.auto_cot.is_none());
}

#[test_case("Calculate 2 + 3 * 4", ReasoningMode::Draft ; "arithmetic")]
#[test_case("If A implies B and B implies C, then A implies C", ReasoningMode::Concise ; "logic")]
#[test_case("Let me design a creative story about space exploration", ReasoningMode::Standard ; "creative")]
#[test_case(
    "This is a very complex problem that requires detailed analysis with multiple considerations, however we need to examine all aspects thoroughly and systematically",
    ReasoningMode::Standard
    ; "complex analysis"
)]
fn test_suggested_mode_is_applied(text: &str, expected: ReasoningMode) {
    let mut session = session();
    let response = submit(&mut session, &auto(text));
    assert_eq!(response.auto_cot.expect("auto-cot").suggested_mode, expected);
    assert_eq!(response.current_mode, expected);
}

#[test_case("Solve the equation: 2x + 5 = 15", ProblemType::Arithmetic ; "arithmetic")]
#[test_case("Given the premises, what conclusion can we logically derive?", ProblemType::Logical ; "logical")]
#[test_case("Brainstorm innovative ideas for a new art installation", ProblemType::Creative ; "creative")]
#[test_case("Create a detailed project timeline and strategy", ProblemType::Planning ; "planning")]
#[test_case("Compare and evaluate the advantages and disadvantages of different approaches", ProblemType::Analysis ; "analysis")]
#[test_case("Just some random thoughts here", ProblemType::General ; "general")]
fn test_detected_problem_type(text: &str, expected: ProblemType) {
    let mut session = session();
    let response = submit(&mut session, &auto(text));
    assert_eq!(
        response.auto_cot.expect("auto-cot").detected_problem_type,
        expected
    );
    assert_eq!(session.current_problem_type(), expected);
}

#[test]
fn test_math_template_suggested() {
    let mut session = session();
    let response = submit(
        &mut session,
        &auto("Let me solve this arithmetic math problem with numbers and calculation"),
    );
    let template = response
        .auto_cot
        .and_then(|a| a.suggested_template)
        .expect("template suggestion");
    assert_eq!(template.name, "GSM8K Math");
    assert_eq!(
        template.example_thoughts,
        vec!["20 - x = 12", "Calculate systematically", "Solve step-by-step"]
    );
}

#[test]
fn test_diversity_sampling_disabled() {
    let mut session = session_with(Config {
        disable_cot_logging: true,
        auto_cot: AutoCotConfig {
            diversity_sampling: false,
            ..AutoCotConfig::default()
        },
        ..Config::default()
    });
    let response = submit(
        &mut session,
        &auto("Let me solve this arithmetic math problem with numbers and calculation"),
    );
    let template = response
        .auto_cot
        .and_then(|a| a.suggested_template)
        .expect("template suggestion");
    assert_eq!(template.example_thoughts, vec!["20 - x = 12"]);
}

#[test]
fn test_no_template_for_low_relevance() {
    let mut session = session();
    let response = submit(&mut session, &auto("Nothing here matches at all"));
    assert!(response.auto_cot.expect("auto-cot").suggested_template.is_none());
}

#[test]
fn test_auto_mode_false_without_trigger() {
    let mut session = session();
    let response = submit(
        &mut session,
        &thought_with(
            "Analyze this complex problem thoroughly",
            1,
            1,
            json!({ "autoMode": false }),
        ),
    );
    assert!(response.auto_cot.is_none());
}

#[test]
fn test_explicit_mode_respected() {
    let mut session = session();
    let response = submit(
        &mut session,
        &thought_with(
            "Simple math: 2+2",
            1,
            1,
            json!({ "autoMode": true, "mode": "standard" }),
        ),
    );
    assert_eq!(response.current_mode, ReasoningMode::Standard);
    assert_eq!(
        response.auto_cot.expect("auto-cot").suggested_mode,
        ReasoningMode::Draft
    );
}

#[test]
fn test_empty_trigger_phrase_disables_detection() {
    let mut session = session_with(Config {
        disable_cot_logging: true,
        auto_cot: AutoCotConfig {
            trigger_phrase: String::new(),
            ..AutoCotConfig::default()
        },
        ..Config::default()
    });
    let response = submit(&mut session, &thought("Let's think step by step", 1, 1));
    assert!(response.auto_cot.is_none());
}

#[test]
fn test_auto_cot_with_consensus_and_branching() {
    let mut session = session();
    let response = submit(
        &mut session,
        &thought_with(
            "Let's think step by step about this mathematical problem",
            1,
            2,
            json!({ "pathCount": 3 }),
        ),
    );
    assert!(response.auto_cot.is_some());
    assert!(response.consensus.is_some());

    let response = submit(
        &mut session,
        &thought("Let me think through this - we could try option A or option B", 2, 2),
    );
    assert!(response.auto_cot.is_some());
    assert!(response.suggested_branching.is_some());
}

#[test]
fn test_auto_cot_after_rollback() {
    let mut session = session();
    submit(&mut session, &thought("Initial thought", 1, 3));
    submit(&mut session, &thought("Second thought", 2, 3));
    rollback(&mut session, 1, None);
    let response = submit(
        &mut session,
        &thought("Let's think step by step about the next move", 2, 2),
    );
    assert!(response.auto_cot.is_some());
    assert_eq!(response.thought_history_length, 2);
}
