//! The thought-chain state machine.
//!
//! Submissions flow through these components:
//!
//! - [`input`]: typed validation of untyped submissions
//! - [`trigger`]: auto-CoT trigger detection and suggestions
//! - [`classifier`]: mode and problem-type heuristics
//! - [`consensus`]: multi-path self-consistency voting
//! - [`branch`]: branch suggestion and identifier allocation
//! - [`store`]: ordered history and metrics
//! - [`rollback`]: snapshots and history truncation
//!
//! [`ChainSession`] owns the state and sequences the components per call.
//!
//! # Example
//!
//! ```
//! use chain_of_draft::chain::{ChainSession, ReasoningMode};
//! use chain_of_draft::config::Config;
//! use serde_json::json;
//!
//! let mut session = ChainSession::new(Config::default());
//! let outcome = session
//!     .submit_thought(&json!({
//!         "thought": "2 + 2 = 4",
//!         "thoughtNumber": 1,
//!         "totalThoughts": 1,
//!         "nextThoughtNeeded": false,
//!         "problemType": "arithmetic"
//!     }))
//!     .unwrap();
//! assert_eq!(outcome.as_thought().unwrap().current_mode, ReasoningMode::Draft);
//! ```

pub mod branch;
pub mod classifier;
pub mod consensus;
pub mod input;
pub mod responses;
pub mod rollback;
pub mod session;
pub mod store;
pub mod trigger;
pub mod types;

pub use branch::{BranchManager, BranchReason};
pub use consensus::ConsensusResult;
pub use input::ThoughtInput;
pub use responses::{
    FailureResponse, ResetResponse, ResponseMetrics, RollbackResponse, SubmitOutcome,
    SummaryResponse, TemplateLoaded, TemplateNotFound, ThoughtResponse, TranscriptEntry,
};
pub use rollback::{RollbackEntry, RollbackManager};
pub use session::{ChainSession, ChainState};
pub use store::ThoughtStore;
pub use trigger::{AutoCotSuggestion, AutoTriggerDetector, SuggestedTemplate};
pub use types::{count_words, estimate_tokens, ChainMetrics, ProblemType, ReasoningMode, ThoughtRecord};
