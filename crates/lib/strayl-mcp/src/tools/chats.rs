use rmcp::{
    ErrorData,
    handler::server::wrapper::Parameters,
    model::CallToolResult,
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};
use strayl_core::control::ChatAction;

use crate::StraylMcp;
use crate::helpers;

/// Parameters for chat management.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ManageDocumentationChatsParams {
    /// One of `list`, `create`, `get`, or `delete`.
    pub action: String,
    /// Chat title. Required for `create`.
    pub title: Option<String>,
    /// Chat id. Required for `get` and `delete`.
    pub chat_id: Option<String>,
    /// Optional documentation source to associate with a new chat.
    pub source_id: Option<String>,
}

#[tool_router(router = tool_router_chats, vis = "pub")]
impl StraylMcp {
    #[tool(
        description = "Manage documentation chat sessions. Actions: list your chats, create a new chat (requires title), get a chat's message history (requires chat_id), or delete a chat (requires chat_id)."
    )]
    async fn manage_documentation_chats(
        &self,
        Parameters(params): Parameters<ManageDocumentationChatsParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let action = ChatAction::from_request(
            &params.action,
            params.title,
            params.chat_id,
            params.source_id,
        );
        let result = match action {
            Ok(action) => self.control().manage_chats(action).await,
            Err(err) => Err(err),
        };
        Ok(helpers::render(result))
    }
}
