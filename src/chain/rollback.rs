//! History snapshots and rollback with an audit log.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use super::branch::BranchManager;
use super::store::ThoughtStore;
use super::types::ThoughtRecord;
use crate::error::ChainError;

/// Reason recorded when the caller gives none.
pub const DEFAULT_ROLLBACK_REASON: &str = "Manual rollback";

/// One audited rollback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollbackEntry {
    /// Unique identifier, `rollback_{n}_{millis}_{suffix}`.
    pub id: String,
    /// Full history before the rollback.
    pub previous_states: Vec<ThoughtRecord>,
    /// Caller-supplied reason.
    pub reason: String,
    /// The record the rollback targeted.
    pub target: ThoughtRecord,
    /// When the rollback happened.
    pub timestamp: DateTime<Utc>,
}

/// Snapshot index and append-only rollback log.
#[derive(Debug, Clone, Default)]
pub struct RollbackManager {
    snapshots: BTreeMap<u32, Vec<ThoughtRecord>>,
    log: Vec<RollbackEntry>,
}

impl RollbackManager {
    /// Create an empty manager.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            snapshots: BTreeMap::new(),
            log: Vec::new(),
        }
    }

    /// Record a copy of `history` as of appending `thought_number`.
    pub fn snapshot(&mut self, thought_number: u32, history: &[ThoughtRecord]) {
        self.snapshots.insert(thought_number, history.to_vec());
    }

    /// Whether `target` lies within `1..=history_len`.
    #[must_use]
    pub fn can_rollback(target: u32, history_len: usize) -> bool {
        target >= 1 && usize::try_from(target).is_ok_and(|t| t <= history_len)
    }

    /// Truncate history back to `target` and prune branches past it.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::RollbackUnavailable`] when `target` is out of
    /// range, or [`ChainError::RollbackTargetNotFound`] when no record carries
    /// that number.
    pub fn rollback(
        &mut self,
        target: u32,
        reason: Option<&str>,
        store: &mut ThoughtStore,
        branches: &mut BranchManager,
        now: DateTime<Utc>,
    ) -> Result<&RollbackEntry, ChainError> {
        if !Self::can_rollback(target, store.len()) {
            return Err(ChainError::RollbackUnavailable {
                target,
                history_len: store.len(),
            });
        }
        let target_record = store
            .find(target)
            .cloned()
            .ok_or(ChainError::RollbackTargetNotFound { target })?;

        let suffix = Uuid::new_v4().simple().to_string();
        let entry = RollbackEntry {
            id: format!("rollback_{target}_{}_{}", now.timestamp_millis(), &suffix[..8]),
            previous_states: store.history().to_vec(),
            reason: reason.unwrap_or(DEFAULT_ROLLBACK_REASON).to_string(),
            target: target_record,
            timestamp: now,
        };

        let before = store.len();
        store.truncate_to(target);
        branches.prune_after(target);

        info!(
            rollback_id = %entry.id,
            target,
            removed = before - store.len(),
            reason = %entry.reason,
            "Rolled back thought history"
        );

        self.log.push(entry);
        Ok(&self.log[self.log.len() - 1])
    }

    /// Number of rollbacks since the last reset.
    #[must_use]
    pub fn count(&self) -> usize {
        self.log.len()
    }

    /// The audit log, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[RollbackEntry] {
        &self.log
    }

    /// Thought numbers with a stored snapshot, ascending.
    #[must_use]
    pub fn snapshot_ids(&self) -> Vec<u32> {
        self.snapshots.keys().copied().collect()
    }

    /// History copy taken when `thought_number` was appended.
    #[must_use]
    pub fn snapshot_at(&self, thought_number: u32) -> Option<&[ThoughtRecord]> {
        self.snapshots.get(&thought_number).map(Vec::as_slice)
    }

    /// Drop every snapshot and log entry.
    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.log.clear();
    }
}
