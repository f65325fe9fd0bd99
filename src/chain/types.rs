//! Core data model for a reasoning chain.
//!
//! This module defines:
//! - [`ReasoningMode`]: verbosity policy bounding expected word count
//! - [`ProblemType`]: coarse category of the problem being reasoned about
//! - [`ThoughtRecord`]: one accepted thought with derived measurements
//! - [`ChainMetrics`]: aggregate measurements over the whole history

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::Heuristics;
use crate::error::ValidationError;

/// Verbosity policy for a thought.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ReasoningMode {
    /// Ultra-concise notation.
    Draft,
    /// Short sentences balancing clarity and efficiency.
    Concise,
    /// Full chain-of-thought prose.
    Standard,
    /// Let the classifier choose per thought. Never stored as a resolved mode.
    #[default]
    Auto,
}

impl ReasoningMode {
    /// Every mode, in display order.
    pub const ALL: [Self; 4] = [Self::Draft, Self::Concise, Self::Standard, Self::Auto];

    /// Wire name of the mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Concise => "concise",
            Self::Standard => "standard",
            Self::Auto => "auto",
        }
    }

    /// Word ceiling under the given thresholds, or `None` when unbounded.
    #[must_use]
    pub const fn word_ceiling(self, heuristics: &Heuristics) -> Option<usize> {
        match self {
            Self::Draft => Some(heuristics.draft_max_words),
            Self::Concise => Some(heuristics.concise_max_words),
            Self::Standard | Self::Auto => None,
        }
    }
}

impl fmt::Display for ReasoningMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReasoningMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "concise" => Ok(Self::Concise),
            "standard" => Ok(Self::Standard),
            "auto" => Ok(Self::Auto),
            _ => Err(ValidationError::invalid(
                "mode",
                "must be draft, concise, standard, or auto",
            )),
        }
    }
}

/// Category of the problem a chain is working on.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ProblemType {
    /// Numeric calculation.
    Arithmetic,
    /// Deduction and state tracking.
    Logical,
    /// Open-ended generation.
    Creative,
    /// Sequencing work toward a goal.
    Planning,
    /// Comparing and evaluating options.
    Analysis,
    /// Anything else.
    #[default]
    General,
}

impl ProblemType {
    /// Every problem type, in precedence order.
    pub const ALL: [Self; 6] = [
        Self::Arithmetic,
        Self::Logical,
        Self::Creative,
        Self::Planning,
        Self::Analysis,
        Self::General,
    ];

    /// Wire name of the problem type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Arithmetic => "arithmetic",
            Self::Logical => "logical",
            Self::Creative => "creative",
            Self::Planning => "planning",
            Self::Analysis => "analysis",
            Self::General => "general",
        }
    }
}

impl fmt::Display for ProblemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProblemType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| {
                ValidationError::invalid(
                    "problemType",
                    "must be arithmetic, logical, creative, planning, analysis, or general",
                )
            })
    }
}

/// Count non-empty whitespace-delimited tokens.
#[must_use]
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Rough token estimate: one token per four UTF-16 code units, rounded up.
///
/// Characters outside the Basic Multilingual Plane count twice.
#[must_use]
pub fn estimate_tokens(text: &str) -> usize {
    text.encode_utf16().count().div_ceil(4)
}

/// One accepted thought.
///
/// Suggestion fields are computed once, at creation, from the chain state
/// immediately before insertion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThoughtRecord {
    /// Thought text.
    pub thought: String,
    /// Caller-assigned sequence number.
    pub thought_number: u32,
    /// Estimated chain length, raised to at least `thought_number`.
    pub total_thoughts: u32,
    /// Resolved mode; never `Auto`.
    pub mode: ReasoningMode,
    /// Problem type supplied with the thought.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem_type: Option<ProblemType>,
    /// Whitespace-delimited word count.
    pub word_count: usize,
    /// Estimated token count.
    pub token_count: usize,
    /// Acceptance time.
    pub timestamp: DateTime<Utc>,
    /// Whether the caller expects another thought.
    pub next_thought_needed: bool,
    /// Whether this revises an earlier thought.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_revision: Option<bool>,
    /// Thought being revised.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revises_thought: Option<u32>,
    /// Branch point.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_from_thought: Option<u32>,
    /// Branch this thought belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<String>,
    /// Whether the caller wants to extend the chain.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub needs_more_thoughts: Option<bool>,
    /// Caller confidence in `[0, 1]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    /// Recommended mode for upcoming thoughts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_mode_switch: Option<ReasoningMode>,
    /// Recommended branching, as a short rationale.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_branching: Option<String>,
}

impl ThoughtRecord {
    /// Create a record with derived measurements and no optional flags.
    #[must_use]
    pub fn new(
        thought: impl Into<String>,
        thought_number: u32,
        total_thoughts: u32,
        mode: ReasoningMode,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let thought = thought.into();
        let word_count = count_words(&thought);
        let token_count = estimate_tokens(&thought);
        Self {
            thought,
            thought_number,
            total_thoughts,
            mode,
            problem_type: None,
            word_count,
            token_count,
            timestamp,
            next_thought_needed: false,
            is_revision: None,
            revises_thought: None,
            branch_from_thought: None,
            branch_id: None,
            needs_more_thoughts: None,
            confidence: None,
            suggested_mode_switch: None,
            suggested_branching: None,
        }
    }

    /// Set the problem type.
    #[must_use]
    pub fn with_problem_type(mut self, problem_type: ProblemType) -> Self {
        self.problem_type = Some(problem_type);
        self
    }

    /// Mark as branching from `from` under `branch_id`.
    #[must_use]
    pub fn with_branch(mut self, from: u32, branch_id: impl Into<String>) -> Self {
        self.branch_from_thought = Some(from);
        self.branch_id = Some(branch_id.into());
        self
    }

    /// Set whether another thought is needed.
    #[must_use]
    pub fn with_next_thought_needed(mut self, needed: bool) -> Self {
        self.next_thought_needed = needed;
        self
    }

    /// Whether this record belongs to a branch.
    #[must_use]
    pub const fn is_branch_member(&self) -> bool {
        self.branch_from_thought.is_some() && self.branch_id.is_some()
    }
}

/// Aggregate measurements over the current history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainMetrics {
    /// Sum of token estimates.
    pub total_tokens: usize,
    /// Sum of word counts.
    pub total_words: usize,
    /// Mean words per thought, `0.0` when empty.
    pub average_words_per_thought: f64,
    /// Standard-baseline words divided by mean words, `1.0` when empty.
    pub efficiency: f64,
    /// Milliseconds since the session started.
    pub latency: i64,
    /// Thought count per resolved mode.
    pub mode_distribution: BTreeMap<ReasoningMode, usize>,
}
