//! MCP tool modules.
//!
//! Tools are grouped by domain: log search, documentation search and
//! indexing, chat management, and contextual help.

pub mod chats;
pub mod docs;
pub mod logs;
mod context;
