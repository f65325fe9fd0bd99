//! Ordered thought history and derived metrics.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use super::classifier::efficiency;
use super::types::{ChainMetrics, ReasoningMode, ThoughtRecord};
use crate::config::Heuristics;

/// Owns the ordered history of accepted thoughts.
#[derive(Debug, Clone, Default)]
pub struct ThoughtStore {
    history: Vec<ThoughtRecord>,
}

impl ThoughtStore {
    /// Create an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            history: Vec::new(),
        }
    }

    /// Append a record, raising `total_thoughts` to its thought number.
    ///
    /// Returns a reference to the stored record.
    pub fn append(&mut self, mut record: ThoughtRecord) -> &ThoughtRecord {
        record.total_thoughts = record.total_thoughts.max(record.thought_number);
        self.history.push(record);
        &self.history[self.history.len() - 1]
    }

    /// The history in insertion order.
    #[must_use]
    pub fn history(&self) -> &[ThoughtRecord] {
        &self.history
    }

    /// Number of stored thoughts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// Whether the history is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// First record carrying `thought_number`.
    #[must_use]
    pub fn find(&self, thought_number: u32) -> Option<&ThoughtRecord> {
        self.history
            .iter()
            .find(|t| t.thought_number == thought_number)
    }

    /// Keep only records numbered at most `thought_number`.
    ///
    /// Filters by number, not by position.
    pub fn truncate_to(&mut self, thought_number: u32) {
        self.history.retain(|t| t.thought_number <= thought_number);
    }

    /// Drop every record.
    pub fn clear(&mut self) {
        self.history.clear();
    }

    /// Recompute aggregate metrics from the current history.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn metrics(
        &self,
        started_at: DateTime<Utc>,
        now: DateTime<Utc>,
        heuristics: &Heuristics,
    ) -> ChainMetrics {
        let total_words: usize = self.history.iter().map(|t| t.word_count).sum();
        let total_tokens: usize = self.history.iter().map(|t| t.token_count).sum();

        let mut mode_distribution: BTreeMap<ReasoningMode, usize> =
            ReasoningMode::ALL.into_iter().map(|m| (m, 0)).collect();
        for record in &self.history {
            *mode_distribution.entry(record.mode).or_default() += 1;
        }

        let average_words_per_thought = if self.history.is_empty() {
            0.0
        } else {
            total_words as f64 / self.history.len() as f64
        };

        ChainMetrics {
            total_tokens,
            total_words,
            average_words_per_thought,
            efficiency: efficiency(&self.history, heuristics),
            latency: (now - started_at).num_milliseconds(),
            mode_distribution,
        }
    }
}
