//! Deserialized shapes for backend response payloads.
//!
//! Every field the backend may omit is `Option` or defaulted, so a record
//! with missing keys still deserializes and the formatters substitute
//! placeholders instead of failing.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

/// One log entry as returned by the log search routes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogRecord {
    pub timestamp: Option<String>,
    pub level: Option<String>,
    pub message: Option<String>,
    pub source: Option<String>,
    /// Present only for semantic search results.
    pub similarity: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchMetadata {
    #[serde(default)]
    pub logs_with_embeddings: u64,
}

/// Payload of `search-logs` and `exact-search-logs`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogSearchData {
    #[serde(default)]
    pub results: Vec<LogRecord>,
    #[serde(default)]
    pub total_results: u64,
    #[serde(default)]
    pub search_metadata: SearchMetadata,
}

/// Source metadata attached to a documentation result or chat.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourceRef {
    pub name: Option<String>,
}

/// One documentation chunk from `search-documentation`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocResult {
    pub content: Option<String>,
    pub source: Option<SourceRef>,
}

/// Payload of `search-documentation`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocSearchData {
    #[serde(default)]
    pub results: Vec<DocResult>,
    /// AI-structured answer; usually a string, but treated as opaque JSON.
    pub structured_answer: Option<Value>,
}

/// One entry from `list-documentation-sources`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourceRecord {
    pub id: Option<String>,
    pub name: Option<String>,
    pub url: Option<String>,
    pub status: Option<String>,
    #[serde(default)]
    pub chunks_count: u64,
    pub indexed_at: Option<String>,
    #[serde(default)]
    pub is_public: bool,
}

/// Payload of `list-documentation-sources`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourcesData {
    #[serde(default)]
    pub sources: Vec<SourceRecord>,
    #[serde(default)]
    pub count: u64,
}

/// Stage timings reported by the indexer, in milliseconds.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PerformanceReport {
    #[serde(default)]
    pub total_duration_ms: f64,
    #[serde(default)]
    pub stages: BTreeMap<String, f64>,
}

/// Payload of `index-documentation` on success.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IndexReport {
    pub source_id: Option<String>,
    #[serde(default)]
    pub pages_crawled: u64,
    #[serde(default)]
    pub chunks_indexed: u64,
    #[serde(default)]
    pub total_tokens: u64,
    pub performance: Option<PerformanceReport>,
}

/// Chat session metadata.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatSummary {
    pub id: Option<String>,
    pub title: Option<String>,
    pub updated_at: Option<String>,
    pub documentation_sources: Option<SourceRef>,
}

/// One message in a chat history.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatMessage {
    pub role: Option<String>,
    pub content: Option<String>,
    pub created_at: Option<String>,
}

/// Payload of `manage-documentation-chats?action=list`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatListData {
    #[serde(default)]
    pub chats: Vec<ChatSummary>,
    #[serde(default)]
    pub count: u64,
}

/// Payload of `manage-documentation-chats?action=create`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatCreateData {
    #[serde(default)]
    pub chat: ChatSummary,
}

/// Payload of `manage-documentation-chats?action=get`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatGetData {
    #[serde(default)]
    pub chat: ChatSummary,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub count: u64,
}
