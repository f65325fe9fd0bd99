//! Tool definitions with rmcp macros.
//!
//! Four tools are exposed: `chainofthought`, `chainsummary`,
//! `loadtemplate` and `resetchain`. Results are pretty-printed JSON text;
//! rejected submissions come back as `isError` results carrying the
//! normalized failure shape.

use std::borrow::Cow;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::{tool, tool_handler, tool_router, ErrorData, ServerHandler};
use schemars::{json_schema, JsonSchema, Schema, SchemaGenerator};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use super::types::AppState;
use crate::chain::FailureResponse;

/// Raw `chainofthought` arguments.
///
/// Arguments are passed through untyped so that every type or range error
/// is reported by the chain core in its own failure shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainOfThoughtArgs(pub Map<String, Value>);

impl JsonSchema for ChainOfThoughtArgs {
    fn schema_name() -> Cow<'static, str> {
        "ChainOfThoughtArgs".into()
    }

    fn json_schema(_generator: &mut SchemaGenerator) -> Schema {
        json_schema!({
            "type": "object",
            "properties": {
                "thought": { "type": "string", "description": "Your current thinking step" },
                "nextThoughtNeeded": { "type": "boolean", "description": "Whether another thought step is needed" },
                "thoughtNumber": { "type": "integer", "minimum": 1, "description": "Current thought number" },
                "totalThoughts": { "type": "integer", "minimum": 1, "description": "Estimated total thoughts needed" },
                "mode": {
                    "type": "string",
                    "enum": ["draft", "concise", "standard", "auto"],
                    "description": "Reasoning mode; sticky for later thoughts"
                },
                "problemType": {
                    "type": "string",
                    "enum": ["arithmetic", "logical", "creative", "planning", "analysis", "general"],
                    "description": "Problem type hint; sticky for later thoughts"
                },
                "isRevision": { "type": "boolean", "description": "Whether this revises previous thinking" },
                "revisesThought": { "type": "integer", "minimum": 1, "description": "Which thought is being reconsidered" },
                "branchFromThought": { "type": "integer", "minimum": 1, "description": "Branching point thought number" },
                "branchId": { "type": "string", "description": "Branch identifier" },
                "needsMoreThoughts": { "type": "boolean", "description": "If more thoughts are needed" },
                "confidence": { "type": "number", "minimum": 0, "maximum": 1, "description": "Confidence in this thought" },
                "pathCount": { "type": "integer", "minimum": 1, "maximum": 10, "description": "Reasoning paths for self-consistency consensus" },
                "rollbackToThought": { "type": "integer", "minimum": 1, "description": "Roll history back to this thought number" },
                "rollbackReason": { "type": "string", "description": "Reason recorded for the rollback" },
                "autoMode": { "type": "boolean", "description": "Request auto-CoT mode and template suggestions" }
            },
            "required": ["thought", "nextThoughtNeeded", "thoughtNumber", "totalThoughts"]
        })
    }
}

/// `loadtemplate` arguments.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct LoadTemplateArgs {
    /// Name of the template to load.
    #[serde(rename = "templateName")]
    pub template_name: String,
}

fn json_result<T: Serialize>(value: &T, is_error: bool) -> Result<CallToolResult, ErrorData> {
    let text = serde_json::to_string_pretty(value).map_err(|e| {
        ErrorData::internal_error(format!("Failed to serialize response: {e}"), None)
    })?;
    let content = vec![Content::text(text)];
    Ok(if is_error {
        CallToolResult::error(content)
    } else {
        CallToolResult::success(content)
    })
}

/// MCP server exposing the Chain-of-Draft tools.
#[derive(Clone)]
pub struct ChainServer {
    state: AppState,
    tool_router: ToolRouter<Self>,
}

impl ChainServer {
    /// Creates a server over shared state.
    #[must_use]
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            tool_router: Self::tool_router(),
        }
    }

    /// Shared state.
    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }
}

impl std::fmt::Debug for ChainServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainServer")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

#[tool_router]
impl ChainServer {
    /// Submit one thought, or roll the chain back.
    #[tool(
        name = "chainofthought",
        description = "Chain-of-Draft reasoning step. Submit thoughts with a verbosity mode \
            (draft ≤5 words, concise ≤15, standard, or auto), optional problemType, revision \
            and branch metadata, pathCount>1 for self-consistency consensus, autoMode for \
            auto-CoT suggestions, or rollbackToThought to truncate history."
    )]
    pub async fn chainofthought(
        &self,
        Parameters(args): Parameters<ChainOfThoughtArgs>,
    ) -> Result<CallToolResult, ErrorData> {
        let input = Value::Object(args.0);
        let mut session = self.state.session.lock().await;
        match session.submit_thought(&input) {
            Ok(outcome) => json_result(&outcome, false),
            Err(err) => json_result(&FailureResponse::from(&err), true),
        }
    }

    /// Summarize the current chain.
    #[tool(
        name = "chainsummary",
        description = "Summarize the chain: metrics, mode usage, branches, rollback count and a transcript."
    )]
    pub async fn chainsummary(&self) -> Result<CallToolResult, ErrorData> {
        let session = self.state.session.lock().await;
        json_result(&session.summarize(), false)
    }

    /// Load a reasoning template by name.
    #[tool(
        name = "loadtemplate",
        description = "Load a reasoning template by name, making its mode and problem type current."
    )]
    pub async fn loadtemplate(
        &self,
        Parameters(args): Parameters<LoadTemplateArgs>,
    ) -> Result<CallToolResult, ErrorData> {
        let mut session = self.state.session.lock().await;
        match session.load_template(&args.template_name) {
            Ok(loaded) => json_result(&loaded, false),
            Err(missing) => json_result(&missing, false),
        }
    }

    /// Clear the whole session.
    #[tool(
        name = "resetchain",
        description = "Reset the chain: clears history, branches, and rollback data."
    )]
    pub async fn resetchain(&self) -> Result<CallToolResult, ErrorData> {
        let mut session = self.state.session.lock().await;
        debug!("Reset requested");
        json_result(&session.reset(), false)
    }
}

#[tool_handler]
impl ServerHandler for ChainServer {
    fn get_info(&self) -> ServerInfo {
        let mut info = ServerInfo::default();
        info.capabilities = ServerCapabilities::builder().enable_tools().build();
        info.server_info = Implementation::from_build_env();
        info.instructions = Some(
            "Chain-of-Draft reasoning server: concise thought chains with mode \
             classification, branching, consensus and rollback."
                .to_string(),
        );
        info
    }
}
