use rmcp::{
    ErrorData,
    model::{CallToolResult, Content},
    tool,
    tool_router,
};
use strayl_core::time_period::SUPPORTED_TIME_PERIODS;

use crate::StraylMcp;

#[tool_router(router = tool_router_context, vis = "pub")]
impl StraylMcp {
    #[tool(
        description = "List the time period tokens accepted by the log search tools, with examples."
    )]
    async fn list_time_periods(&self) -> Result<CallToolResult, ErrorData> {
        Ok(CallToolResult::success(vec![Content::text(
            SUPPORTED_TIME_PERIODS,
        )]))
    }
}
