//! Self-consistency consensus over synthesized reasoning paths.
//!
//! A single submission is restated along several fixed variants, each
//! reclassified and remeasured, then the variants vote on shared concepts.
//! Paths are transient and never enter the canonical history.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::classifier::resolve_mode;
use super::input::ThoughtInput;
use super::types::{ProblemType, ReasoningMode, ThoughtRecord};
use crate::config::Heuristics;
use crate::error::ChainError;

/// Words ignored when extracting concepts. Includes the variant prefixes so
/// synthesized framing never dominates the vote.
pub const STOP_WORDS: [&str; 40] = [
    "the", "and", "that", "this", "with", "from", "have", "will", "would", "could", "should",
    "about", "into", "than", "then", "them", "they", "their", "there", "these", "those", "what",
    "when", "where", "which", "while", "been", "being", "were", "your", "some", "such", "also",
    "just", "very", "more", "most", "alternatively", "considering", "carefully",
];

/// Aggregated vote across reasoning paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsensusResult {
    /// The synthesized paths. Not serialized.
    #[serde(skip)]
    pub paths: Vec<Vec<ThoughtRecord>>,
    /// Human-readable consensus statement.
    pub statement: String,
    /// Confidence in `[0, 1]`.
    pub confidence: f64,
    /// Share of paths carrying the top concept, in `[0, 1]`.
    pub agreement_score: f64,
    /// Number of paths considered.
    pub path_count: usize,
    /// Top concepts each path contains, keyed `path_1`, `path_2`, ...
    pub voting_results: BTreeMap<String, usize>,
}

/// Variant text for path `index`.
#[must_use]
pub fn variant_text(text: &str, index: usize) -> String {
    match index {
        0 => text.to_string(),
        1 => format!("Alternatively: {text}"),
        2 => format!("Considering carefully: {text}"),
        n => format!("Path {n}: {text}"),
    }
}

/// Restate a submission along `path_count` variants.
///
/// Each variant is classified under `current_mode` and measured afresh.
#[must_use]
pub fn synthesize_paths(
    input: &ThoughtInput,
    path_count: usize,
    current_mode: ReasoningMode,
    problem_type: ProblemType,
    now: DateTime<Utc>,
    heuristics: &Heuristics,
) -> Vec<Vec<ThoughtRecord>> {
    (0..path_count)
        .map(|index| {
            let text = variant_text(&input.thought, index);
            let mode = resolve_mode(&text, current_mode, problem_type, heuristics);
            let record = ThoughtRecord::new(
                text,
                input.thought_number,
                input.total_thoughts,
                mode,
                now,
            )
            .with_problem_type(problem_type)
            .with_next_thought_needed(input.next_thought_needed);
            vec![record]
        })
        .collect()
}

/// Distinct concept tokens of `text`, in first-occurrence order.
///
/// Lower-cases, strips punctuation, keeps tokens longer than
/// `min_chars` and drops [`STOP_WORDS`] and `path`.
#[must_use]
pub fn extract_concepts(text: &str, min_chars: usize) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() || c.is_whitespace() { c } else { ' ' })
        .collect();

    let mut seen = HashSet::new();
    cleaned
        .split_whitespace()
        .filter(|w| w.chars().count() > min_chars)
        .filter(|w| *w != "path" && !STOP_WORDS.contains(w))
        .filter(|w| seen.insert((*w).to_string()))
        .map(str::to_string)
        .collect()
}

/// Tally concepts across each path's final variant.
///
/// # Errors
///
/// Returns [`ChainError::NoConsensusPaths`] when `paths` is empty.
#[allow(clippy::cast_precision_loss)]
pub fn consensus(
    paths: Vec<Vec<ThoughtRecord>>,
    heuristics: &Heuristics,
) -> Result<ConsensusResult, ChainError> {
    if paths.is_empty() {
        return Err(ChainError::NoConsensusPaths);
    }
    let path_count = paths.len();

    let per_path: Vec<Vec<String>> = paths
        .iter()
        .map(|path| {
            path.last()
                .map(|t| extract_concepts(&t.thought, heuristics.min_concept_chars))
                .unwrap_or_default()
        })
        .collect();

    let mut order: Vec<&str> = Vec::new();
    let mut frequency: HashMap<&str, usize> = HashMap::new();
    for concept in per_path.iter().flatten() {
        let count = frequency.entry(concept.as_str()).or_insert(0);
        if *count == 0 {
            order.push(concept.as_str());
        }
        *count += 1;
    }
    // Stable sort keeps first-occurrence order among ties.
    order.sort_by(|a, b| frequency[b].cmp(&frequency[a]));
    order.truncate(heuristics.consensus_top_concepts);

    let top_frequency = order.first().map_or(0, |c| frequency[c]);
    let agreement_score = top_frequency as f64 / path_count as f64;
    let confidence = (agreement_score * heuristics.confidence_boost).min(1.0);

    let statement = match order.as_slice() {
        [] => format!(
            "No consensus found across {path_count} paths: no shared concepts survived filtering"
        ),
        [only] => format!("{top_frequency}/{path_count} paths converge on '{only}'"),
        [first, second, ..] => {
            format!("{top_frequency}/{path_count} paths converge on '{first}' and '{second}'")
        }
    };

    let voting_results = per_path
        .iter()
        .enumerate()
        .map(|(i, concepts)| {
            let votes = order.iter().filter(|c| concepts.iter().any(|x| x == *c)).count();
            (format!("path_{}", i + 1), votes)
        })
        .collect();

    debug!(
        path_count,
        agreement_score,
        confidence,
        top = ?order,
        "Computed consensus"
    );

    Ok(ConsensusResult {
        paths,
        statement,
        confidence,
        agreement_score,
        path_count,
        voting_results,
    })
}
