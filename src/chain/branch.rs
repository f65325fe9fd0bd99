//! Branch suggestion, identifier allocation and the branch index.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use tracing::debug;

use super::types::{ProblemType, ThoughtRecord};

/// Why branching was suggested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchReason {
    /// The thought names alternatives.
    Exploration,
    /// The thought hedges.
    Uncertainty,
    /// Analysis or planning with no branches yet.
    Structured,
    /// Creative work a few thoughts in.
    Creative,
}

impl BranchReason {
    /// Short rationale returned to the caller.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Exploration => {
                "Alternatives mentioned: consider exploring each in its own branch"
            }
            Self::Uncertainty => "Uncertainty detected: consider branching to test each possibility",
            Self::Structured => "Consider branching to compare approaches side by side",
            Self::Creative => "Consider branching to explore a different creative direction",
        }
    }
}

impl fmt::Display for BranchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

const EXPLORATION_CUES: [&str; 3] = ["or ", "alternatively", "however"];
const UNCERTAINTY_CUES: [&str; 3] = ["maybe", "possibly", "might"];

/// Decide whether a thought should fork the chain. Only the first matching
/// rule fires.
#[must_use]
pub fn suggest_branching(
    record: &ThoughtRecord,
    current_problem_type: ProblemType,
    has_active_branches: bool,
) -> Option<BranchReason> {
    let text = record.thought.to_lowercase();

    if EXPLORATION_CUES.iter().any(|cue| text.contains(cue)) {
        Some(BranchReason::Exploration)
    } else if UNCERTAINTY_CUES.iter().any(|cue| text.contains(cue)) {
        Some(BranchReason::Uncertainty)
    } else if matches!(
        current_problem_type,
        ProblemType::Analysis | ProblemType::Planning
    ) && record.thought_number >= 2
        && !has_active_branches
    {
        Some(BranchReason::Structured)
    } else if current_problem_type == ProblemType::Creative && record.thought_number >= 3 {
        Some(BranchReason::Creative)
    } else {
        None
    }
}

/// Branch index plus the identifiers handed out but not yet used.
///
/// Each reservation remembers the thought it was suggested on, so a
/// rollback past that thought releases it.
#[derive(Debug, Clone, Default)]
pub struct BranchManager {
    branches: BTreeMap<String, Vec<ThoughtRecord>>,
    reserved: BTreeMap<String, u32>,
}

impl BranchManager {
    /// Create an empty branch index.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            branches: BTreeMap::new(),
            reserved: BTreeMap::new(),
        }
    }

    fn is_live(&self, id: &str) -> bool {
        self.branches.contains_key(id) || self.reserved.contains_key(id)
    }

    /// Hand out the smallest unused identifier and reserve it for the
    /// suggestion made on `thought_number`.
    ///
    /// Tries `A`..`Z`, then `AA`..`ZZ`, then a time-based tag.
    pub fn allocate_id(&mut self, thought_number: u32, now: DateTime<Utc>) -> String {
        let letters = || (b'A'..=b'Z').map(char::from);
        let singles = letters().map(String::from);
        let pairs = letters().flat_map(move |a| letters().map(move |b| format!("{a}{b}")));

        let id = singles.chain(pairs).find(|id| !self.is_live(id)).unwrap_or_else(|| {
            let base = format!("branch_{}", now.timestamp_millis());
            let mut candidate = base.clone();
            let mut suffix = 1;
            while self.is_live(&candidate) {
                candidate = format!("{base}_{suffix}");
                suffix += 1;
            }
            candidate
        });

        debug!(branch_id = %id, thought_number, "Allocated branch identifier");
        self.reserved.insert(id.clone(), thought_number);
        id
    }

    /// Index a stored record under its branch, creating the branch if needed.
    ///
    /// Records without both a branch point and an identifier are ignored.
    pub fn attach(&mut self, record: &ThoughtRecord) {
        let Some(id) = record.branch_id.as_ref().filter(|_| record.is_branch_member()) else {
            return;
        };
        self.reserved.remove(id);
        self.branches
            .entry(id.clone())
            .or_default()
            .push(record.clone());
    }

    /// Drop members branching from beyond `target`, then empty branches.
    ///
    /// Unused identifiers suggested on thoughts after `target` are released.
    pub fn prune_after(&mut self, target: u32) {
        self.reserved.retain(|_, suggested_on| *suggested_on <= target);
        for members in self.branches.values_mut() {
            members.retain(|t| t.branch_from_thought.is_some_and(|from| from <= target));
        }
        self.branches.retain(|id, members| {
            let keep = !members.is_empty();
            if !keep {
                debug!(branch_id = %id, target, "Pruned empty branch");
            }
            keep
        });
    }

    /// Identifiers of branches with at least one member.
    #[must_use]
    pub fn ids(&self) -> Vec<String> {
        self.branches.keys().cloned().collect()
    }

    /// Members of a branch.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&[ThoughtRecord]> {
        self.branches.get(id).map(Vec::as_slice)
    }

    /// Number of branches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.branches.len()
    }

    /// Whether no branch exists.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }

    /// Drop every branch and reservation.
    pub fn clear(&mut self) {
        self.branches.clear();
        self.reserved.clear();
    }
}
