//! Integration tests for the Chain-of-Draft session.
//!
//! Each submodule drives a [`ChainSession`] through a multi-step workflow
//! using only the public API.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod error_recovery;
mod workflow_auto_cot;
mod workflow_consensus;
mod workflow_rollback;

use chain_of_draft::chain::{ChainSession, RollbackResponse, ThoughtResponse};
use chain_of_draft::config::Config;
use chain_of_draft::traits::FixedTimeProvider;
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};

/// Session on a frozen clock with thought rendering disabled.
pub fn session() -> ChainSession<FixedTimeProvider> {
    session_with(Config {
        disable_cot_logging: true,
        ..Config::default()
    })
}

/// Session on a frozen clock with a custom configuration.
pub fn session_with(config: Config) -> ChainSession<FixedTimeProvider> {
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    ChainSession::with_time_provider(config, FixedTimeProvider(now))
}

/// Minimal valid submission.
pub fn thought(text: &str, number: u32, total: u32) -> Value {
    json!({
        "thought": text,
        "thoughtNumber": number,
        "totalThoughts": total,
        "nextThoughtNeeded": number < total,
    })
}

/// Submission extended with extra fields.
pub fn thought_with(text: &str, number: u32, total: u32, extra: Value) -> Value {
    let mut value = thought(text, number, total);
    if let (Some(target), Value::Object(fields)) = (value.as_object_mut(), extra) {
        target.extend(fields);
    }
    value
}

/// Submit and expect an appended thought.
pub fn submit(session: &mut ChainSession<FixedTimeProvider>, value: &Value) -> ThoughtResponse {
    let outcome = session.submit_thought(value).expect("submission accepted");
    outcome.as_thought().cloned().expect("thought appended")
}

/// Submit a rollback request and expect success.
pub fn rollback(
    session: &mut ChainSession<FixedTimeProvider>,
    target: u32,
    reason: Option<&str>,
) -> RollbackResponse {
    let mut request = thought_with("Rollback", 1, 1, json!({ "rollbackToThought": target }));
    if let Some(reason) = reason {
        request["rollbackReason"] = json!(reason);
    }
    let outcome = session.submit_thought(&request).expect("rollback accepted");
    outcome.as_rollback().cloned().expect("rollback outcome")
}
