//! Mode and problem-type classification heuristics.
//!
//! All functions here are pure: they read text, history and thresholds and
//! return a decision. Callers apply the result to session state.

use once_cell::sync::Lazy;
use regex::Regex;

use super::types::{count_words, ProblemType, ReasoningMode, ThoughtRecord};
use crate::config::Heuristics;

#[allow(clippy::expect_used)]
fn pattern(source: &str) -> Regex {
    Regex::new(source).expect("static classifier pattern compiles")
}

static ARITHMETIC: Lazy<Regex> =
    Lazy::new(|| pattern(r"(?i)(\d+[+\-*/=]\d+|calculate|solve|equation|formula|math)"));

static LOGIC: Lazy<Regex> = Lazy::new(|| {
    pattern(r"(?i)(if.*then|because|therefore|thus|hence|implies|logic|reason)")
});

static CREATIVE: Lazy<Regex> =
    Lazy::new(|| pattern(r"(?i)(story|creative|imagine|design|brainstorm|idea|innovate)"));

static ANALYSIS: Lazy<Regex> =
    Lazy::new(|| pattern(r"(?i)(analyze|compare|evaluate|assess|consider|examine|pros.*cons)"));

static ARITHMETIC_TOPIC: Lazy<Regex> = Lazy::new(|| {
    pattern(
        r"(?i)(\d+[+\-*/=]\d+|calculate|solve|equation|formula|math|arithmetic|number|sum|product|divide)",
    )
});

static LOGICAL_TOPIC: Lazy<Regex> = Lazy::new(|| {
    pattern(
        r"(?i)(if.*then|because|therefore|thus|hence|implies|logic|reason|premise|conclusion|valid|invalid)",
    )
});

static CREATIVE_TOPIC: Lazy<Regex> = Lazy::new(|| {
    pattern(
        r"(?i)(story|creative|imagine|design|brainstorm|idea|innovate|art|write|compose|invent)",
    )
});

static PLANNING_TOPIC: Lazy<Regex> = Lazy::new(|| {
    pattern(r"(?i)(plan|schedule|organize|strategy|steps|process|workflow|timeline|roadmap|goal)")
});

static ANALYSIS_TOPIC: Lazy<Regex> = Lazy::new(|| {
    pattern(
        r"(?i)(analyze|compare|evaluate|assess|consider|examine|pros.*cons|advantages|disadvantages|review)",
    )
});

/// Phrases that mark a thought as intricate enough for full prose.
pub const COMPLEXITY_INDICATORS: [&str; 10] = [
    "however",
    "although",
    "furthermore",
    "moreover",
    "nevertheless",
    "complex",
    "detailed",
    "thoroughly",
    "multiple considerations",
    "systematically",
];

const MATH_SYMBOLS: [char; 7] = ['+', '-', '*', '/', '=', '<', '>'];

const DETAIL_CUES: [&str; 3] = ["explain", "why", "how"];

/// Digit together with an arithmetic or comparison symbol.
fn looks_mathematical(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_digit()) && text.contains(MATH_SYMBOLS)
}

fn has_complexity(text: &str) -> bool {
    let lower = text.to_lowercase();
    COMPLEXITY_INDICATORS.iter().any(|i| lower.contains(i))
}

/// Resolve the mode a thought is stored under.
///
/// An explicit session mode is sticky and returned unchanged. Under
/// [`ReasoningMode::Auto`] the text and problem type decide.
#[must_use]
pub fn resolve_mode(
    text: &str,
    current_mode: ReasoningMode,
    problem_type: ProblemType,
    heuristics: &Heuristics,
) -> ReasoningMode {
    if current_mode != ReasoningMode::Auto {
        return current_mode;
    }

    let words = count_words(text);
    let math_logical = looks_mathematical(text)
        || matches!(problem_type, ProblemType::Arithmetic | ProblemType::Logical);
    let needs_detail =
        DETAIL_CUES.iter().any(|cue| text.contains(cue)) || problem_type == ProblemType::Creative;

    if math_logical && words <= heuristics.draft_max_words {
        ReasoningMode::Draft
    } else if !needs_detail && words <= heuristics.concise_max_words {
        ReasoningMode::Concise
    } else {
        ReasoningMode::Standard
    }
}

/// Suggest a mode from content alone, for auto-CoT.
#[must_use]
pub fn analyze_for_auto(text: &str, heuristics: &Heuristics) -> ReasoningMode {
    let words = count_words(text);
    let long = words > heuristics.auto_complexity_words;

    if ARITHMETIC.is_match(text) && words <= heuristics.auto_arithmetic_max_words {
        return ReasoningMode::Draft;
    }
    if LOGIC.is_match(text) && words <= heuristics.auto_logic_max_words {
        return ReasoningMode::Concise;
    }
    if CREATIVE.is_match(text) {
        return ReasoningMode::Standard;
    }

    let complex = has_complexity(text);
    if ANALYSIS.is_match(text) {
        return if complex || long {
            ReasoningMode::Standard
        } else {
            ReasoningMode::Concise
        };
    }

    if complex || long {
        ReasoningMode::Standard
    } else if words <= heuristics.auto_draft_max_words {
        ReasoningMode::Draft
    } else {
        ReasoningMode::Concise
    }
}

/// Detect the problem type from keywords, first match wins.
#[must_use]
pub fn detect_problem_type(text: &str) -> ProblemType {
    let table: [(&Lazy<Regex>, ProblemType); 5] = [
        (&ARITHMETIC_TOPIC, ProblemType::Arithmetic),
        (&LOGICAL_TOPIC, ProblemType::Logical),
        (&CREATIVE_TOPIC, ProblemType::Creative),
        (&PLANNING_TOPIC, ProblemType::Planning),
        (&ANALYSIS_TOPIC, ProblemType::Analysis),
    ];
    table
        .into_iter()
        .find(|(re, _)| re.is_match(text))
        .map_or(ProblemType::General, |(_, problem)| problem)
}

/// Standard-baseline words divided by mean words per thought.
///
/// Returns `1.0` for an empty history.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn efficiency(history: &[ThoughtRecord], heuristics: &Heuristics) -> f64 {
    if history.is_empty() {
        return 1.0;
    }
    let total: usize = history.iter().map(|t| t.word_count).sum();
    let average = total as f64 / history.len() as f64;
    if average == 0.0 {
        return f64::INFINITY;
    }
    heuristics.standard_avg_words / average
}

/// Recommend a mode switch for the thought about to be stored.
///
/// `history` is the chain before `latest` is appended.
#[must_use]
pub fn suggest_mode_switch(
    current_mode: ReasoningMode,
    latest: &ThoughtRecord,
    history: &[ThoughtRecord],
    heuristics: &Heuristics,
) -> Option<ReasoningMode> {
    let window_start = history.len().saturating_sub(heuristics.recent_window);
    let recent_all_short = history[window_start..]
        .iter()
        .all(|t| t.word_count < heuristics.short_thought_words);

    match current_mode {
        ReasoningMode::Standard if recent_all_short => Some(ReasoningMode::Concise),
        ReasoningMode::Draft if latest.word_count > heuristics.draft_max_words => {
            Some(ReasoningMode::Concise)
        }
        ReasoningMode::Standard if efficiency(history, heuristics) < heuristics.efficiency_floor => {
            Some(ReasoningMode::Concise)
        }
        _ => None,
    }
}
