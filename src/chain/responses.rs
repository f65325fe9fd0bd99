//! Serializable results of session operations.
//!
//! Every shape serializes with camelCase keys; optional members are omitted
//! when absent.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::consensus::ConsensusResult;
use super::trigger::AutoCotSuggestion;
use super::types::{ChainMetrics, ProblemType, ReasoningMode, ThoughtRecord};
use crate::error::SubmitError;

/// Per-thought and aggregate measurements returned with each thought.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMetrics {
    /// Words in the accepted thought.
    pub word_count: usize,
    /// Token estimate of the accepted thought.
    pub token_count: usize,
    /// Words across the history.
    pub total_words: usize,
    /// Tokens across the history.
    pub total_tokens: usize,
    /// Standard-baseline efficiency of the history.
    pub efficiency: f64,
    /// Mean words per stored thought.
    pub average_words_per_thought: f64,
}

/// Result of accepting a thought.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThoughtResponse {
    /// Caller-assigned number of the stored thought.
    pub thought_number: u32,
    /// Planned length after raising to the thought number.
    pub total_thoughts: u32,
    /// Whether the caller intends to continue.
    pub next_thought_needed: bool,
    /// Mode the thought was stored under.
    pub current_mode: ReasoningMode,
    /// Recommended mode switch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_mode: Option<ReasoningMode>,
    /// Branching rationale.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_branching: Option<String>,
    /// Identifier reserved for the suggested branch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_branch_id: Option<String>,
    /// Measurements.
    pub metrics: ResponseMetrics,
    /// Live branch identifiers.
    pub branches: Vec<String>,
    /// History length after the append.
    pub thought_history_length: usize,
    /// Auto-CoT suggestions, when active.
    #[serde(rename = "autoCoT", skip_serializing_if = "Option::is_none")]
    pub auto_cot: Option<AutoCotSuggestion>,
    /// Multi-path consensus, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consensus: Option<ConsensusResult>,
}

/// Result of a rollback submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollbackResponse {
    /// Always `"rollback"`.
    pub operation: String,
    /// Target thought number.
    pub rolled_back_to: u32,
    /// Reason recorded in the audit log.
    pub reason: String,
    /// Audit log identifier.
    pub rollback_id: String,
    /// History length after truncation.
    pub current_history_length: usize,
    /// Rollbacks since the last reset.
    pub rollback_count: usize,
    /// Thought numbers with a stored snapshot.
    pub available_snapshots: Vec<u32>,
    /// The record rolled back to.
    pub restored_thought: ThoughtRecord,
}

/// What an accepted submission produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SubmitOutcome {
    /// A thought was appended.
    Thought(Box<ThoughtResponse>),
    /// History was rolled back; nothing was appended.
    Rollback(RollbackResponse),
}

impl SubmitOutcome {
    /// The thought response, if a thought was appended.
    #[must_use]
    pub fn as_thought(&self) -> Option<&ThoughtResponse> {
        match self {
            Self::Thought(response) => Some(response),
            Self::Rollback(_) => None,
        }
    }

    /// The rollback response, if history was rolled back.
    #[must_use]
    pub const fn as_rollback(&self) -> Option<&RollbackResponse> {
        match self {
            Self::Thought(_) => None,
            Self::Rollback(response) => Some(response),
        }
    }
}

/// One line of the summary transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    /// Thought number.
    pub number: u32,
    /// Resolved mode.
    pub mode: ReasoningMode,
    /// Word count.
    pub words: usize,
    /// Text preview, ellipsized past the preview length.
    pub thought: String,
}

impl TranscriptEntry {
    /// Summarize a record, keeping at most `preview_chars` characters.
    #[must_use]
    pub fn from_record(record: &ThoughtRecord, preview_chars: usize) -> Self {
        let mut thought: String = record.thought.chars().take(preview_chars).collect();
        if record.thought.chars().count() > preview_chars {
            thought.push_str("...");
        }
        Self {
            number: record.thought_number,
            mode: record.mode,
            words: record.word_count,
            thought,
        }
    }
}

/// Whole-chain summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    /// Stored thoughts.
    pub total_thoughts: usize,
    /// Aggregate metrics.
    pub metrics: ChainMetrics,
    /// Thought count per mode.
    pub mode_usage: BTreeMap<ReasoningMode, usize>,
    /// Number of live branches.
    pub branch_count: usize,
    /// Live branch identifiers.
    pub branches: Vec<String>,
    /// Session problem type.
    pub problem_type: ProblemType,
    /// Session mode.
    pub current_mode: ReasoningMode,
    /// Rollbacks since the last reset.
    pub rollback_count: usize,
    /// Transcript in history order.
    pub thought_chain: Vec<TranscriptEntry>,
}

/// A template was loaded into the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateLoaded {
    /// Template name.
    pub loaded: String,
    /// Mode now current.
    pub mode: ReasoningMode,
    /// Problem type now current.
    pub problem_type: ProblemType,
    /// Template description.
    pub description: String,
    /// Example thoughts.
    pub example_thoughts: Vec<String>,
}

/// No template carries the requested name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateNotFound {
    /// `Template '<name>' not found`.
    pub error: String,
    /// Names in the catalog.
    pub available_templates: Vec<String>,
}

/// Confirmation of a reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetResponse {
    /// Always `"reset"`.
    pub status: String,
    /// What was cleared.
    pub message: String,
}

/// Normalized failure shape for every rejected operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureResponse {
    /// Always `"failed"`.
    pub status: String,
    /// `"validation"` or `"operational"`.
    pub kind: String,
    /// Human-readable message.
    pub error: String,
    /// Failing operation, for operational errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation: Option<String>,
}

impl From<&SubmitError> for FailureResponse {
    fn from(err: &SubmitError) -> Self {
        let kind = match err {
            SubmitError::Validation(_) => "validation",
            SubmitError::Chain(_) => "operational",
        };
        Self {
            status: "failed".to_string(),
            kind: kind.to_string(),
            error: err.to_string(),
            operation: err.operation().map(str::to_string),
        }
    }
}
