//! MCP server implementation for strayl-mcp.
//!
//! This crate wires the control plane into rmcp tool handlers and exposes the
//! MCP-facing API surface for log search and documentation search.

mod helpers;
mod tools;
pub mod server;

use std::sync::Arc;

use rmcp::model::{CallToolResult, Content, ServerCapabilities, ServerInfo};
use rmcp::{
    ErrorData,
    ServerHandler,
    handler::server::tool::ToolRouter,
    tool,
    tool_handler,
    tool_router,
};
use strayl_core::control::StraylControlPlane;

const SERVER_INSTRUCTIONS: &str = r"strayl-mcp provides MCP tools for searching application logs and documentation through the Strayl backend.

Workflow:
1. Search logs:
   - `search_logs_semantic` for natural-language queries (vector similarity).
   - `search_logs_exact` for literal text, optionally filtered by log level.
   Both accept an optional `time_period` such as 5m, 1h, today, yesterday, or 7d.
   Call `list_time_periods` for the full list of accepted tokens.
2. Search documentation:
   - `search_documentation` queries indexed documentation, optionally with an
     AI-structured answer (`use_ai`) and chat persistence (`chat_id`).
   - `list_documentation_sources` shows which sources are indexed and searchable.
   - `index_documentation` crawls and indexes a new documentation URL.
3. Manage documentation chats:
   - `manage_documentation_chats` with action list, create, get, or delete.

Notes:
- All tools require the STRAYL_API_KEY environment variable except
  `list_time_periods` and `health`.
- Failures come back as text starting with 'Error:' or 'Configuration error:'.
- `health` returns `ok`.";

/// MCP server wrapper around the control plane and tool routers.
#[derive(Clone)]
pub struct StraylMcp {
    tool_router: ToolRouter<Self>,
    control: Arc<StraylControlPlane>,
}

impl StraylMcp {
    /// Creates a new server using a control plane by value.
    #[must_use]
    pub fn new(control: StraylControlPlane) -> Self {
        Self::with_control(Arc::new(control))
    }

    /// Creates a new server using a shared control plane handle.
    #[must_use]
    pub fn with_control(control: Arc<StraylControlPlane>) -> Self {
        let tool_router = Self::tool_router_core()
            + Self::tool_router_logs()
            + Self::tool_router_docs()
            + Self::tool_router_chats()
            + Self::tool_router_context();
        Self {
            tool_router,
            control,
        }
    }

    pub(crate) fn control(&self) -> &StraylControlPlane {
        &self.control
    }
}

#[tool_router(router = tool_router_core, vis = "pub")]
impl StraylMcp {
    #[tool(description = "Health check. Returns 'ok'.")]
    async fn health(&self) -> Result<CallToolResult, ErrorData> {
        Ok(CallToolResult::success(vec![Content::text("ok")]))
    }
}

#[tool_handler]
impl ServerHandler for StraylMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(SERVER_INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            ..Default::default()
        }
    }
}
