//! The per-session context object.
//!
//! [`ChainSession`] owns one [`ChainState`] and threads it through every
//! operation. Calls are synchronous and assume exclusive access; the MCP
//! layer serializes them behind a lock.

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, info, warn};

use super::branch::{suggest_branching, BranchManager};
use super::classifier::{resolve_mode, suggest_mode_switch};
use super::consensus::{consensus, synthesize_paths};
use super::input::ThoughtInput;
use super::responses::{
    ResetResponse, ResponseMetrics, RollbackResponse, SubmitOutcome, SummaryResponse,
    TemplateLoaded, TemplateNotFound, ThoughtResponse, TranscriptEntry,
};
use super::rollback::RollbackManager;
use super::store::ThoughtStore;
use super::trigger::AutoTriggerDetector;
use super::types::{ChainMetrics, ProblemType, ReasoningMode, ThoughtRecord};
use crate::config::Config;
use crate::display::{render_thought, THOUGHT_LOG_TARGET};
use crate::error::SubmitError;
use crate::templates::TemplateRegistry;
use crate::traits::{RealTimeProvider, TimeProvider};

/// Everything a session mutates.
#[derive(Debug, Clone)]
pub struct ChainState {
    /// Canonical history.
    pub store: ThoughtStore,
    /// Branch index and reserved identifiers.
    pub branches: BranchManager,
    /// Snapshots and rollback audit log.
    pub rollback: RollbackManager,
    /// Sticky session mode.
    pub current_mode: ReasoningMode,
    /// Sticky session problem type.
    pub current_problem_type: ProblemType,
    /// Start of the session, for latency.
    pub started_at: DateTime<Utc>,
}

impl ChainState {
    /// Fresh state starting at `started_at`.
    #[must_use]
    pub const fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            store: ThoughtStore::new(),
            branches: BranchManager::new(),
            rollback: RollbackManager::new(),
            current_mode: ReasoningMode::Auto,
            current_problem_type: ProblemType::General,
            started_at,
        }
    }
}

/// A Chain-of-Draft reasoning session.
#[derive(Debug)]
pub struct ChainSession<T: TimeProvider = RealTimeProvider> {
    config: Config,
    templates: TemplateRegistry,
    clock: T,
    state: ChainState,
}

impl ChainSession<RealTimeProvider> {
    /// Create a session on the system clock.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self::with_time_provider(config, RealTimeProvider)
    }
}

impl<T: TimeProvider> ChainSession<T> {
    /// Create a session on a custom clock.
    #[must_use]
    pub fn with_time_provider(config: Config, clock: T) -> Self {
        let state = ChainState::new(clock.now());
        Self {
            config,
            templates: TemplateRegistry::new(),
            clock,
            state,
        }
    }

    /// Session configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// The template catalog.
    #[must_use]
    pub const fn templates(&self) -> &TemplateRegistry {
        &self.templates
    }

    /// Current session state.
    #[must_use]
    pub const fn state(&self) -> &ChainState {
        &self.state
    }

    /// Stored thoughts in insertion order.
    #[must_use]
    pub fn history(&self) -> &[ThoughtRecord] {
        self.state.store.history()
    }

    /// Sticky session mode.
    #[must_use]
    pub const fn current_mode(&self) -> ReasoningMode {
        self.state.current_mode
    }

    /// Sticky session problem type.
    #[must_use]
    pub const fn current_problem_type(&self) -> ProblemType {
        self.state.current_problem_type
    }

    /// Aggregate metrics as of now.
    #[must_use]
    pub fn metrics(&self) -> ChainMetrics {
        self.state.store.metrics(
            self.state.started_at,
            self.clock.now(),
            &self.config.heuristics,
        )
    }

    /// Validate and apply one submission.
    ///
    /// A submission naming `rollbackToThought` only rolls back. Any other
    /// valid submission appends exactly one thought.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::Validation`] for malformed input and
    /// [`SubmitError::Chain`] when rollback or consensus fails. State is
    /// unchanged in either case.
    pub fn submit_thought(&mut self, value: &Value) -> Result<SubmitOutcome, SubmitError> {
        let result = self.apply(value);
        if let Err(err) = &result {
            warn!(error = %err, operation = err.operation(), "Rejected thought submission");
        }
        result
    }

    fn apply(&mut self, value: &Value) -> Result<SubmitOutcome, SubmitError> {
        let input = ThoughtInput::parse(value, &self.config.heuristics)?;
        let now = self.clock.now();

        if let Some(target) = input.rollback_to_thought {
            return self
                .rollback(target, input.rollback_reason.as_deref(), now)
                .map(SubmitOutcome::Rollback);
        }
        self.append_thought(&input, now)
            .map(|response| SubmitOutcome::Thought(Box::new(response)))
    }

    fn rollback(
        &mut self,
        target: u32,
        reason: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<RollbackResponse, SubmitError> {
        let state = &mut self.state;
        let entry = state
            .rollback
            .rollback(target, reason, &mut state.store, &mut state.branches, now)?;
        let (rollback_id, reason, restored_thought) =
            (entry.id.clone(), entry.reason.clone(), entry.target.clone());

        Ok(RollbackResponse {
            operation: "rollback".to_string(),
            rolled_back_to: target,
            reason,
            rollback_id,
            current_history_length: state.store.len(),
            rollback_count: state.rollback.count(),
            available_snapshots: state.rollback.snapshot_ids(),
            restored_thought,
        })
    }

    fn append_thought(
        &mut self,
        input: &ThoughtInput,
        now: DateTime<Utc>,
    ) -> Result<ThoughtResponse, SubmitError> {
        let heuristics = &self.config.heuristics;
        let state = &mut self.state;

        let auto_cot = AutoTriggerDetector::new(&self.config.auto_cot, heuristics, &self.templates)
            .analyze(
                &input.thought,
                input.auto_mode.unwrap_or(false),
                input.problem_type,
                state.current_mode,
            );

        // Explicit values win over suggestions; both become sticky.
        let explicit_mode = input
            .mode
            .or_else(|| auto_cot.as_ref().map(|s| s.suggested_mode));
        let problem_type = input
            .problem_type
            .or_else(|| auto_cot.as_ref().map(|s| s.detected_problem_type));
        let session_mode = explicit_mode.unwrap_or(state.current_mode);
        let session_problem_type = problem_type.unwrap_or(state.current_problem_type);

        let mode = resolve_mode(&input.thought, session_mode, session_problem_type, heuristics);
        let mut record = ThoughtRecord::new(
            input.thought.as_str(),
            input.thought_number,
            input.total_thoughts,
            mode,
            now,
        )
        .with_next_thought_needed(input.next_thought_needed);
        record.problem_type = problem_type;
        record.is_revision = input.is_revision;
        record.revises_thought = input.revises_thought;
        record.branch_from_thought = input.branch_from_thought;
        record.branch_id.clone_from(&input.branch_id);
        record.needs_more_thoughts = input.needs_more_thoughts;
        record.confidence = input.confidence;

        if let Some(ceiling) = mode.word_ceiling(heuristics) {
            if record.word_count > ceiling {
                warn!(
                    %mode,
                    words = record.word_count,
                    ceiling,
                    "Thought exceeds mode word limit"
                );
            }
        }

        record.suggested_mode_switch =
            suggest_mode_switch(session_mode, &record, state.store.history(), heuristics);

        let consensus = match input.path_count {
            Some(count) if count > 1 && !input.thought.trim().is_empty() => {
                let paths = synthesize_paths(
                    input,
                    count as usize,
                    session_mode,
                    session_problem_type,
                    now,
                    heuristics,
                );
                Some(consensus(paths, heuristics)?)
            }
            _ => None,
        };

        // Nothing below can fail.
        state.current_mode = session_mode;
        state.current_problem_type = session_problem_type;

        let branch_reason =
            suggest_branching(&record, session_problem_type, !state.branches.is_empty());
        if let Some(reason) = branch_reason {
            debug!(?reason, thought = record.thought_number, "Suggesting branch");
            record.suggested_branching = Some(reason.message().to_string());
        }

        let stored = state.store.append(record).clone();
        state.branches.attach(&stored);
        state
            .rollback
            .snapshot(stored.thought_number, state.store.history());
        // Allocated after attaching so the id never matches the thought's own branch.
        let suggested_branch_id =
            branch_reason.map(|_| state.branches.allocate_id(stored.thought_number, now));

        info!(
            thought_number = stored.thought_number,
            total_thoughts = stored.total_thoughts,
            mode = %stored.mode,
            words = stored.word_count,
            "Accepted thought"
        );
        if self.config.render_thoughts() {
            info!(target: THOUGHT_LOG_TARGET, "{}", render_thought(&stored));
        }

        let metrics = state.store.metrics(state.started_at, now, heuristics);
        Ok(ThoughtResponse {
            thought_number: stored.thought_number,
            total_thoughts: stored.total_thoughts,
            next_thought_needed: stored.next_thought_needed,
            current_mode: stored.mode,
            suggested_mode: stored.suggested_mode_switch,
            suggested_branching: stored.suggested_branching.clone(),
            suggested_branch_id,
            metrics: ResponseMetrics {
                word_count: stored.word_count,
                token_count: stored.token_count,
                total_words: metrics.total_words,
                total_tokens: metrics.total_tokens,
                efficiency: metrics.efficiency,
                average_words_per_thought: metrics.average_words_per_thought,
            },
            branches: state.branches.ids(),
            thought_history_length: state.store.len(),
            auto_cot,
            consensus,
        })
    }

    /// Summarize the chain without mutating it.
    #[must_use]
    pub fn summarize(&self) -> SummaryResponse {
        let metrics = self.metrics();
        let preview = self.config.heuristics.summary_preview_chars;
        SummaryResponse {
            total_thoughts: self.state.store.len(),
            mode_usage: metrics.mode_distribution.clone(),
            metrics,
            branch_count: self.state.branches.len(),
            branches: self.state.branches.ids(),
            problem_type: self.state.current_problem_type,
            current_mode: self.state.current_mode,
            rollback_count: self.state.rollback.count(),
            thought_chain: self
                .history()
                .iter()
                .map(|record| TranscriptEntry::from_record(record, preview))
                .collect(),
        }
    }

    /// Make a catalog template's mode and problem type current.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateNotFound`] listing the catalog when no template
    /// has exactly `name`.
    pub fn load_template(&mut self, name: &str) -> Result<TemplateLoaded, TemplateNotFound> {
        let Some(template) = self.templates.get(name) else {
            warn!(template = name, "Template not found");
            return Err(TemplateNotFound {
                error: format!("Template '{name}' not found"),
                available_templates: self.templates.names(),
            });
        };

        self.state.current_mode = template.mode;
        self.state.current_problem_type = template.problem_type;
        info!(template = %template.name, mode = %template.mode, "Loaded template");

        Ok(TemplateLoaded {
            loaded: template.name.clone(),
            mode: template.mode,
            problem_type: template.problem_type,
            description: template.description.clone(),
            example_thoughts: template.example_thoughts.clone(),
        })
    }

    /// Discard all session state and restart the clock.
    pub fn reset(&mut self) -> ResetResponse {
        let cleared = self.state.store.len();
        self.state = ChainState::new(self.clock.now());
        info!(cleared, "Reset chain state");
        ResetResponse {
            status: "reset".to_string(),
            message: "Chain-of-Draft state reset: history, branches, and rollback data cleared"
                .to_string(),
        }
    }
}
