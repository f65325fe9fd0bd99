//! Heuristic thresholds for classification, suggestion and consensus.
//!
//! Every magic number the chain heuristics use lives here as a named
//! `DEFAULT_*` constant and a field on [`Heuristics`], so thresholds can be
//! tuned and tested independently of the matching logic.
//!
//! # Example
//!
//! ```
//! use chain_of_draft::config::Heuristics;
//!
//! let heuristics = Heuristics::default();
//! assert_eq!(heuristics.draft_max_words, 5);
//! assert_eq!(heuristics.concise_max_words, 15);
//! ```

/// Word ceiling for draft mode.
pub const DEFAULT_DRAFT_MAX_WORDS: usize = 5;

/// Word ceiling for concise mode.
pub const DEFAULT_CONCISE_MAX_WORDS: usize = 15;

/// Auto-CoT: arithmetic content at or under this many words is drafted.
pub const DEFAULT_AUTO_ARITHMETIC_MAX_WORDS: usize = 10;

/// Auto-CoT: logical content at or under this many words is concise.
pub const DEFAULT_AUTO_LOGIC_MAX_WORDS: usize = 20;

/// Auto-CoT: content over this many words counts as complex.
pub const DEFAULT_AUTO_COMPLEXITY_WORDS: usize = 20;

/// Auto-CoT: plain content at or under this many words is drafted.
pub const DEFAULT_AUTO_DRAFT_MAX_WORDS: usize = 8;

/// How many trailing thoughts are inspected for a standard-to-concise switch.
pub const DEFAULT_RECENT_WINDOW: usize = 3;

/// Thoughts under this many words count as short.
pub const DEFAULT_SHORT_THOUGHT_WORDS: usize = 10;

/// Efficiency below this suggests leaving standard mode.
pub const DEFAULT_EFFICIENCY_FLOOR: f64 = 0.5;

/// Assumed average words per thought for standard chain-of-thought.
pub const DEFAULT_STANDARD_AVG_WORDS: f64 = 50.0;

/// A template is suggested only when its match score exceeds this.
pub const DEFAULT_TEMPLATE_MATCH_CUTOFF: f64 = 1.5;

/// Largest accepted `pathCount`.
pub const DEFAULT_MAX_PATH_COUNT: u32 = 10;

/// Number of ranked concepts kept by the consensus tally.
pub const DEFAULT_CONSENSUS_TOP_CONCEPTS: usize = 3;

/// Multiplier turning agreement into confidence (capped at 1.0).
pub const DEFAULT_CONFIDENCE_BOOST: f64 = 1.2;

/// Concepts must be longer than this many characters.
pub const DEFAULT_MIN_CONCEPT_CHARS: usize = 3;

/// Characters of thought text shown per transcript entry in summaries.
pub const DEFAULT_SUMMARY_PREVIEW_CHARS: usize = 50;

/// Tunable thresholds for the chain heuristics.
#[derive(Debug, Clone, PartialEq)]
pub struct Heuristics {
    /// Word ceiling for draft mode.
    pub draft_max_words: usize,
    /// Word ceiling for concise mode.
    pub concise_max_words: usize,
    /// Auto-CoT arithmetic word limit for draft.
    pub auto_arithmetic_max_words: usize,
    /// Auto-CoT logic word limit for concise.
    pub auto_logic_max_words: usize,
    /// Auto-CoT word count above which content is complex.
    pub auto_complexity_words: usize,
    /// Auto-CoT fallback word limit for draft.
    pub auto_draft_max_words: usize,
    /// Trailing window for the short-thought switch rule.
    pub recent_window: usize,
    /// Word count under which a thought is short.
    pub short_thought_words: usize,
    /// Efficiency floor for standard mode.
    pub efficiency_floor: f64,
    /// Baseline average words for standard chain-of-thought.
    pub standard_avg_words: f64,
    /// Minimum template score (exclusive) for a suggestion.
    pub template_match_cutoff: f64,
    /// Largest accepted `pathCount`.
    pub max_path_count: u32,
    /// Ranked concepts kept by consensus.
    pub consensus_top_concepts: usize,
    /// Agreement-to-confidence multiplier.
    pub confidence_boost: f64,
    /// Concepts must be longer than this.
    pub min_concept_chars: usize,
    /// Transcript preview length in summaries.
    pub summary_preview_chars: usize,
}

impl Default for Heuristics {
    fn default() -> Self {
        Self {
            draft_max_words: DEFAULT_DRAFT_MAX_WORDS,
            concise_max_words: DEFAULT_CONCISE_MAX_WORDS,
            auto_arithmetic_max_words: DEFAULT_AUTO_ARITHMETIC_MAX_WORDS,
            auto_logic_max_words: DEFAULT_AUTO_LOGIC_MAX_WORDS,
            auto_complexity_words: DEFAULT_AUTO_COMPLEXITY_WORDS,
            auto_draft_max_words: DEFAULT_AUTO_DRAFT_MAX_WORDS,
            recent_window: DEFAULT_RECENT_WINDOW,
            short_thought_words: DEFAULT_SHORT_THOUGHT_WORDS,
            efficiency_floor: DEFAULT_EFFICIENCY_FLOOR,
            standard_avg_words: DEFAULT_STANDARD_AVG_WORDS,
            template_match_cutoff: DEFAULT_TEMPLATE_MATCH_CUTOFF,
            max_path_count: DEFAULT_MAX_PATH_COUNT,
            consensus_top_concepts: DEFAULT_CONSENSUS_TOP_CONCEPTS,
            confidence_boost: DEFAULT_CONFIDENCE_BOOST,
            min_concept_chars: DEFAULT_MIN_CONCEPT_CHARS,
            summary_preview_chars: DEFAULT_SUMMARY_PREVIEW_CHARS,
        }
    }
}
