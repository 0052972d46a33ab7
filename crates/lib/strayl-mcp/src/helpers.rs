use rmcp::model::{CallToolResult, Content};
use strayl_core::error::ControlError;

/// Renders a control-plane outcome as tool output.
///
/// Every failure becomes an error-flagged text result so callers always get
/// display text back, never a protocol-level fault.
pub fn render(result: Result<String, ControlError>) -> CallToolResult {
    match result {
        Ok(text) => CallToolResult::success(vec![Content::text(text)]),
        Err(err) => CallToolResult::error(vec![Content::text(err.to_string())]),
    }
}
