//! Auto-CoT trigger detection and non-binding suggestions.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::classifier::{analyze_for_auto, detect_problem_type};
use super::types::{ProblemType, ReasoningMode};
use crate::config::{AutoCotConfig, Heuristics};
use crate::templates::{ChainTemplate, TemplateRegistry};

/// Paraphrases that trigger auto-CoT besides the configured phrase.
pub const TRIGGER_PATTERNS: [&str; 8] = [
    "let me think",
    "let's think",
    "thinking step by step",
    "step by step",
    "let me work through this",
    "let me break this down",
    "let's work through",
    "let's break this down",
];

/// Template offered alongside auto-CoT suggestions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedTemplate {
    /// Template name, loadable via `load_template`.
    pub name: String,
    /// Template description.
    pub description: String,
    /// Example thoughts, diversified per problem type.
    pub example_thoughts: Vec<String>,
}

/// Suggestions produced when auto-CoT is active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoCotSuggestion {
    /// Whether a trigger phrase was present.
    pub auto_trigger_detected: bool,
    /// Mode suggested from content.
    pub suggested_mode: ReasoningMode,
    /// Explicit problem type, or the detected one.
    pub detected_problem_type: ProblemType,
    /// Best matching template, if any scored high enough.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_template: Option<SuggestedTemplate>,
}

/// Detects triggers and produces suggestions.
#[derive(Debug, Clone, Copy)]
pub struct AutoTriggerDetector<'a> {
    config: &'a AutoCotConfig,
    heuristics: &'a Heuristics,
    templates: &'a TemplateRegistry,
}

impl<'a> AutoTriggerDetector<'a> {
    /// Create a detector over the given configuration and catalog.
    #[must_use]
    pub const fn new(
        config: &'a AutoCotConfig,
        heuristics: &'a Heuristics,
        templates: &'a TemplateRegistry,
    ) -> Self {
        Self {
            config,
            heuristics,
            templates,
        }
    }

    /// Case-insensitive containment of the configured phrase or a paraphrase.
    ///
    /// An empty configured phrase disables detection entirely.
    #[must_use]
    pub fn detect_trigger(&self, text: &str) -> bool {
        if self.config.trigger_phrase.is_empty() {
            return false;
        }
        let lower = text.to_lowercase();
        lower.contains(&self.config.trigger_phrase.to_lowercase())
            || TRIGGER_PATTERNS.iter().any(|p| lower.contains(p))
    }

    /// Suggest a mode from content, or keep `current_mode` when context
    /// awareness is off.
    #[must_use]
    pub fn suggest_mode(&self, text: &str, current_mode: ReasoningMode) -> ReasoningMode {
        if self.config.context_aware {
            analyze_for_auto(text, self.heuristics)
        } else {
            current_mode
        }
    }

    /// Best-scoring template for `problem_type`, if it clears the cutoff.
    ///
    /// Description words longer than three characters found in the text
    /// score 1 each; example-thought words score 0.5 each.
    #[must_use]
    pub fn suggest_template(&self, text: &str, problem_type: ProblemType) -> Option<&'a ChainTemplate> {
        if !self.config.template_suggestion {
            return None;
        }
        let lower = text.to_lowercase();
        let hits = |source: &str| {
            source
                .to_lowercase()
                .split(' ')
                .filter(|w| w.chars().count() > 3 && lower.contains(*w))
                .count()
        };

        let mut best: Option<(&ChainTemplate, f64)> = None;
        for template in self.templates.list_by_problem_type(problem_type) {
            let examples: usize = template.example_thoughts.iter().map(|e| hits(e)).sum();
            #[allow(clippy::cast_precision_loss)]
            let score = hits(&template.description) as f64 + examples as f64 * 0.5;
            if best.is_none_or(|(_, top)| score > top) {
                best = Some((template, score));
            }
        }

        best.filter(|(_, score)| *score > self.heuristics.template_match_cutoff)
            .map(|(template, score)| {
                debug!(template = %template.name, score, "Matched template");
                template
            })
    }

    /// Example thoughts for a suggested template.
    ///
    /// With diversity sampling, the first example is joined by two prompts
    /// specific to the problem type. Without it, only the first example.
    #[must_use]
    pub fn diverse_examples(&self, template: &ChainTemplate) -> Vec<String> {
        let base = template
            .example_thoughts
            .first()
            .cloned()
            .unwrap_or_else(|| "Think step by step".to_string());
        if !self.config.diversity_sampling {
            return vec![base];
        }
        let [a, b] = match template.problem_type {
            ProblemType::Arithmetic => ["Calculate systematically", "Solve step-by-step"],
            ProblemType::Logical => [
                "Apply logical reasoning",
                "Consider premises and conclusions",
            ],
            ProblemType::Creative => [
                "Explore creative possibilities",
                "Generate innovative solutions",
            ],
            ProblemType::Planning => [
                "Break down into actionable steps",
                "Consider resources and constraints",
            ],
            ProblemType::Analysis => [
                "Examine from multiple angles",
                "Compare different perspectives",
            ],
            ProblemType::General => ["Think systematically", "Consider all aspects"],
        };
        vec![base, a.to_string(), b.to_string()]
    }

    /// Produce suggestions when auto mode is requested or a trigger fires.
    ///
    /// `explicit_problem_type` takes precedence over detection.
    #[must_use]
    pub fn analyze(
        &self,
        text: &str,
        auto_mode: bool,
        explicit_problem_type: Option<ProblemType>,
        current_mode: ReasoningMode,
    ) -> Option<AutoCotSuggestion> {
        let triggered = self.detect_trigger(text);
        if !auto_mode && !triggered {
            return None;
        }

        let suggested_mode = self.suggest_mode(text, current_mode);
        let detected_problem_type =
            explicit_problem_type.unwrap_or_else(|| detect_problem_type(text));
        let suggested_template = self
            .suggest_template(text, detected_problem_type)
            .map(|template| SuggestedTemplate {
                name: template.name.clone(),
                description: template.description.clone(),
                example_thoughts: self.diverse_examples(template),
            });

        debug!(
            triggered,
            auto_mode,
            %suggested_mode,
            %detected_problem_type,
            "Auto-CoT suggestions"
        );

        Some(AutoCotSuggestion {
            auto_trigger_detected: triggered,
            suggested_mode,
            detected_problem_type,
            suggested_template,
        })
    }
}
