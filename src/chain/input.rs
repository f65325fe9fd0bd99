//! Typed parsing of untyped thought submissions.
//!
//! Every field constraint is checked before anything touches session state;
//! a rejected submission leaves the chain exactly as it was.

use serde_json::{Map, Value};

use super::types::{ProblemType, ReasoningMode};
use crate::config::Heuristics;
use crate::error::ValidationError;

/// A validated thought submission.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ThoughtInput {
    /// Thought text. May be empty.
    pub thought: String,
    /// Caller-assigned sequence number (≥1).
    pub thought_number: u32,
    /// Estimated chain length (≥1).
    pub total_thoughts: u32,
    /// Whether another thought is expected.
    pub next_thought_needed: bool,
    /// Explicit mode, sticky for later thoughts.
    pub mode: Option<ReasoningMode>,
    /// Explicit problem type, sticky for later thoughts.
    pub problem_type: Option<ProblemType>,
    /// Revision flag.
    pub is_revision: Option<bool>,
    /// Thought being revised.
    pub revises_thought: Option<u32>,
    /// Branch point.
    pub branch_from_thought: Option<u32>,
    /// Branch identifier.
    pub branch_id: Option<String>,
    /// Whether the chain should be extended.
    pub needs_more_thoughts: Option<bool>,
    /// Caller confidence in `[0, 1]`.
    pub confidence: Option<f64>,
    /// Number of reasoning paths for consensus.
    pub path_count: Option<u32>,
    /// Roll history back to this thought number.
    pub rollback_to_thought: Option<u32>,
    /// Audit reason for a rollback.
    pub rollback_reason: Option<String>,
    /// Request auto-CoT suggestions.
    pub auto_mode: Option<bool>,
}

impl ThoughtInput {
    /// Parse and validate an untyped submission.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] naming the first offending field.
    pub fn parse(value: &Value, heuristics: &Heuristics) -> Result<Self, ValidationError> {
        let fields = value.as_object().ok_or(ValidationError::NotAnObject)?;
        let reader = FieldReader(fields);

        let thought = reader
            .required("thought")?
            .as_str()
            .ok_or_else(|| ValidationError::invalid("thought", "must be a string"))?
            .to_string();
        let thought_number = reader.required_count("thoughtNumber")?;
        let total_thoughts = reader.required_count("totalThoughts")?;
        let next_thought_needed = reader
            .required("nextThoughtNeeded")?
            .as_bool()
            .ok_or_else(|| ValidationError::invalid("nextThoughtNeeded", "must be a boolean"))?;

        let mode = reader
            .string("mode")?
            .map(|s| s.parse::<ReasoningMode>())
            .transpose()?;
        let problem_type = reader
            .string("problemType")?
            .map(|s| s.parse::<ProblemType>())
            .transpose()?;

        let path_count = reader
            .optional("pathCount")
            .map(|v| {
                as_count(v)
                    .filter(|count| *count <= heuristics.max_path_count)
                    .ok_or_else(|| {
                        ValidationError::invalid(
                            "pathCount",
                            format!(
                                "must be an integer between 1 and {}",
                                heuristics.max_path_count
                            ),
                        )
                    })
            })
            .transpose()?;

        let confidence = match reader.optional("confidence") {
            None => None,
            Some(v) => match v.as_f64() {
                Some(c) if (0.0..=1.0).contains(&c) => Some(c),
                _ => {
                    return Err(ValidationError::invalid(
                        "confidence",
                        "must be a number between 0 and 1",
                    ))
                }
            },
        };

        Ok(Self {
            thought,
            thought_number,
            total_thoughts,
            next_thought_needed,
            mode,
            problem_type,
            is_revision: reader.boolean("isRevision")?,
            revises_thought: reader.count("revisesThought")?,
            branch_from_thought: reader.count("branchFromThought")?,
            branch_id: reader.string("branchId")?.map(str::to_string),
            needs_more_thoughts: reader.boolean("needsMoreThoughts")?,
            confidence,
            path_count,
            rollback_to_thought: reader.count("rollbackToThought")?,
            rollback_reason: reader.string("rollbackReason")?.map(str::to_string),
            auto_mode: reader.boolean("autoMode")?,
        })
    }
}

/// Field access over a JSON object. `null` counts as absent.
struct FieldReader<'a>(&'a Map<String, Value>);

impl<'a> FieldReader<'a> {
    fn optional(&self, name: &str) -> Option<&'a Value> {
        self.0.get(name).filter(|v| !v.is_null())
    }

    fn required(&self, name: &str) -> Result<&'a Value, ValidationError> {
        self.optional(name).ok_or_else(|| ValidationError::MissingField {
            field: name.to_string(),
        })
    }

    fn required_count(&self, name: &str) -> Result<u32, ValidationError> {
        as_count(self.required(name)?).ok_or_else(|| not_a_count(name))
    }

    fn count(&self, name: &str) -> Result<Option<u32>, ValidationError> {
        self.optional(name)
            .map(|v| as_count(v).ok_or_else(|| not_a_count(name)))
            .transpose()
    }

    fn boolean(&self, name: &str) -> Result<Option<bool>, ValidationError> {
        self.optional(name)
            .map(|v| {
                v.as_bool()
                    .ok_or_else(|| ValidationError::invalid(name, "must be a boolean"))
            })
            .transpose()
    }

    fn string(&self, name: &str) -> Result<Option<&'a str>, ValidationError> {
        self.optional(name)
            .map(|v| {
                v.as_str()
                    .ok_or_else(|| ValidationError::invalid(name, "must be a string"))
            })
            .transpose()
    }
}

/// Interpret a JSON number as an integer ≥1 that fits in `u32`.
///
/// Whole-valued floats such as `2.0` are accepted.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn as_count(value: &Value) -> Option<u32> {
    let n = value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= f64::from(u32::MAX))
            .map(|f| f as u64)
    })?;
    u32::try_from(n).ok().filter(|n| *n >= 1)
}

fn not_a_count(name: &str) -> ValidationError {
    ValidationError::invalid(name, "must be an integer greater than or equal to 1")
}
