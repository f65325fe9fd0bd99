//! Chain templates.
//!
//! This module provides:
//! - Built-in template definitions (9 templates)
//! - Template lookup by name and by problem type
//!
//! # Available Templates
//!
//! | Template | Problem type | Mode |
//! |----------|--------------|------|
//! | GSM8K Math | arithmetic | draft |
//! | Coin Flip | logical | draft |
//! | Creative Writing | creative | standard |
//! | Tree Exploration | analysis | concise |
//! | Decision Tree | planning | concise |
//! | Debugging Tree | logical | concise |
//! | Research Tree | analysis | standard |
//! | Feature Design Tree | creative | standard |
//! | Learning Tree | general | concise |

use serde::{Deserialize, Serialize};

use crate::chain::{ProblemType, ReasoningMode};

/// A worked example of a reasoning style for one problem type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainTemplate {
    /// Unique display name, used for lookup.
    pub name: String,
    /// Problem type the template targets.
    pub problem_type: ProblemType,
    /// Mode the template is written in.
    pub mode: ReasoningMode,
    /// Description of the reasoning style.
    pub description: String,
    /// Example thoughts, in order.
    pub example_thoughts: Vec<String>,
}

impl ChainTemplate {
    /// Create a template with no examples.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        problem_type: ProblemType,
        mode: ReasoningMode,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            problem_type,
            mode,
            description: description.into(),
            example_thoughts: Vec::new(),
        }
    }

    /// Set the example thoughts.
    #[must_use]
    pub fn with_examples<I, S>(mut self, examples: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.example_thoughts = examples.into_iter().map(Into::into).collect();
        self
    }
}

/// Registry of available templates, in catalog order.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: Vec<ChainTemplate>,
}

impl TemplateRegistry {
    /// Create a new registry with built-in templates.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self::default();
        registry.register_builtin_templates();
        registry
    }

    /// Register the 9 built-in templates.
    fn register_builtin_templates(&mut self) {
        use ProblemType::{Analysis, Arithmetic, Creative, General, Logical, Planning};
        use ReasoningMode::{Concise, Draft, Standard};

        self.register(
            ChainTemplate::new(
                "GSM8K Math",
                Arithmetic,
                Draft,
                "Math word problem solving using minimal notation",
            )
            .with_examples(["20 - x = 12", "x = 8", "#### 8"]),
        );

        self.register(
            ChainTemplate::new(
                "Coin Flip",
                Logical,
                Draft,
                "Tracking state changes with minimal notation",
            )
            .with_examples(["H→T (flip)", "T→H (flip)", "H (no flip)", "#### heads"]),
        );

        self.register(
            ChainTemplate::new(
                "Creative Writing",
                Creative,
                Standard,
                "Detailed creative process with full reasoning",
            )
            .with_examples([
                "Setting: A mysterious library that appears only at midnight",
                "Protagonist: Young librarian discovers ancient texts that predict the future",
                "Conflict: Each prediction read alters reality, creating paradoxes",
                "Theme: The weight of knowledge and free will vs determinism",
            ]),
        );

        self.register(
            ChainTemplate::new(
                "Tree Exploration",
                Analysis,
                Concise,
                "Systematic tree-like exploration of options with branching",
            )
            .with_examples([
                "Root: Problem space analysis",
                "Branch A: Option 1 feasibility",
                "Branch B: Option 2 constraints",
                "Branch A1: Implementation path",
                "Branch A2: Alternative approach",
                "Merge: Best solution synthesis",
            ]),
        );

        self.register(
            ChainTemplate::new(
                "Decision Tree",
                Planning,
                Concise,
                "Structured decision making with clear branching points",
            )
            .with_examples([
                "Root: Core decision criteria",
                "If condition A → Branch left",
                "If condition B → Branch right",
                "Left branch: Pros/cons analysis",
                "Right branch: Risk assessment",
                "Final: Optimal path selection",
            ]),
        );

        self.register(
            ChainTemplate::new(
                "Debugging Tree",
                Logical,
                Concise,
                "Systematic debugging with hypothesis branching",
            )
            .with_examples([
                "Error: Initial problem statement",
                "Hypothesis A: Network issue",
                "Hypothesis B: Logic error",
                "Test A: Network diagnostics",
                "Test B: Code review",
                "Branch A failed → Try B",
                "Solution: Root cause found",
            ]),
        );

        self.register(
            ChainTemplate::new(
                "Research Tree",
                Analysis,
                Standard,
                "Multi-perspective research with branching viewpoints",
            )
            .with_examples([
                "Topic: Central research question",
                "Branch 1: Academic perspective with detailed literature review",
                "Branch 2: Industry perspective with market analysis",
                "Branch 3: User perspective with behavioral insights",
                "Cross-analysis: Connecting patterns across branches",
                "Synthesis: Integrated understanding and conclusions",
            ]),
        );

        self.register(
            ChainTemplate::new(
                "Feature Design Tree",
                Creative,
                Standard,
                "Feature development with architectural branching",
            )
            .with_examples([
                "Feature goal: Core user need identification",
                "UI Branch: Interface design considerations and user flow",
                "Backend Branch: Data models and API requirements",
                "Performance Branch: Optimization and scaling concerns",
                "Integration points: How branches connect and dependencies",
                "MVP definition: Minimal viable implementation path",
            ]),
        );

        self.register(
            ChainTemplate::new(
                "Learning Tree",
                General,
                Concise,
                "Knowledge acquisition with concept branching",
            )
            .with_examples([
                "Core concept: Foundation",
                "Branch 1: Practical applications",
                "Branch 2: Theoretical depth",
                "Branch 3: Related concepts",
                "Connections: Links between branches",
                "Mastery: Integrated understanding",
            ]),
        );
    }

    /// Register a template, replacing any with the same name.
    pub fn register(&mut self, template: ChainTemplate) {
        if let Some(existing) = self.templates.iter_mut().find(|t| t.name == template.name) {
            *existing = template;
        } else {
            self.templates.push(template);
        }
    }

    /// Get a template by exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ChainTemplate> {
        self.templates.iter().find(|t| t.name == name)
    }

    /// List all templates.
    #[must_use]
    pub fn list(&self) -> &[ChainTemplate] {
        &self.templates
    }

    /// Names of all templates, in catalog order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.templates.iter().map(|t| t.name.clone()).collect()
    }

    /// List templates for a problem type.
    #[must_use]
    pub fn list_by_problem_type(&self, problem_type: ProblemType) -> Vec<&ChainTemplate> {
        self.templates
            .iter()
            .filter(|t| t.problem_type == problem_type)
            .collect()
    }
}
