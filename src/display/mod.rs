//! Console rendering of accepted thoughts.
//!
//! Rendering is a pure function of a [`ThoughtRecord`]; it never reads or
//! writes session state. The session logs the result under
//! [`THOUGHT_LOG_TARGET`] unless thought rendering is disabled.

use std::fmt::Write as _;

use crate::chain::ThoughtRecord;

/// Tracing target for rendered thoughts.
///
/// [`crate::config::log_filter`] always admits this target at `info`, so
/// `DISABLE_COT_LOGGING` alone decides whether thoughts are shown.
pub const THOUGHT_LOG_TARGET: &str = "chain_of_draft::thoughts";

/// Minimum border width in characters.
pub const MIN_BORDER_WIDTH: usize = 50;

fn header(record: &ThoughtRecord) -> String {
    let mut tag = record.mode.as_str().to_uppercase();
    if record.is_revision == Some(true) {
        match record.revises_thought {
            Some(n) => {
                let _ = write!(tag, " REVISION of #{n}");
            }
            None => tag.push_str(" REVISION"),
        }
    }
    if let (Some(from), Some(id)) = (record.branch_from_thought, &record.branch_id) {
        let _ = write!(tag, " BRANCH {id} from #{from}");
    }
    format!(
        "[{tag}] {}/{} [{}w, ~{}t]",
        record.thought_number, record.total_thoughts, record.word_count, record.token_count
    )
}

/// Render a record as a bordered block.
#[must_use]
pub fn render_thought(record: &ThoughtRecord) -> String {
    let width = MIN_BORDER_WIDTH.max(record.thought.chars().count() + 4);
    let border = "-".repeat(width);

    let mut out = format!("\n{border}\n{}\n{}", header(record), record.thought);
    if let Some(mode) = record.suggested_mode_switch {
        let _ = write!(out, "\n  -> Consider switching to {mode} mode");
    }
    if let Some(branching) = &record.suggested_branching {
        let _ = write!(out, "\n  -> {branching}");
    }
    let _ = write!(out, "\n{border}");
    out
}
