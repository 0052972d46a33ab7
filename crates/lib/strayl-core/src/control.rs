//! Control plane: one operation per tool.
//!
//! Each operation validates its inputs, resolves an optional time-period
//! token, builds the JSON payload, performs a single backend call through
//! [`StraylClient`], and renders the classified response as display text.
//! Validation failures short-circuit before any network traffic.

use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::client::StraylClient;
use crate::error::{ApiError, ControlError};
use crate::format::{format_doc_result, format_log_record, format_timestamp, group_thousands};
use crate::models::{
    ChatCreateData,
    ChatGetData,
    ChatListData,
    DocSearchData,
    IndexReport,
    LogSearchData,
    SourcesData,
};
use crate::time_period::{self, TimeRange};

/// Default similarity threshold for semantic log search.
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.2;
/// Default result count requested from the backend by both log search tools.
pub const DEFAULT_MATCH_COUNT: u64 = 50;
/// At most this many log records are rendered; the rest become a notice.
pub const LOG_DISPLAY_CAP: usize = 10;

/// Fixed backend-side limits for documentation search. Not caller-tunable.
const DOC_SEARCH_LIMIT: u64 = 15;
const DOC_SIMILARITY_THRESHOLD: f64 = 0.22;

const BANNER: &str =
    "================================================================================";
const RECORD_RULE: &str =
    "--------------------------------------------------------------------------------";

/// Log level filter accepted by exact search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
    Debug,
}

impl LogLevel {
    /// Parses a case-insensitive level name.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "info" => Some(Self::Info),
            "warn" => Some(Self::Warn),
            "error" => Some(Self::Error),
            "debug" => Some(Self::Debug),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Debug => "debug",
        }
    }
}

/// Chat management action with per-variant required fields.
#[derive(Debug, Clone)]
pub enum ChatAction {
    List,
    Create {
        title: String,
        source_id: Option<String>,
    },
    Get {
        chat_id: String,
    },
    Delete {
        chat_id: String,
    },
}

impl ChatAction {
    /// Builds a validated action from raw tool parameters.
    ///
    /// # Errors
    /// Returns a validation error for unknown actions or missing
    /// action-required fields, before any network call.
    pub fn from_request(
        action: &str,
        title: Option<String>,
        chat_id: Option<String>,
        source_id: Option<String>,
    ) -> Result<Self, ControlError> {
        match action {
            "list" => Ok(Self::List),
            "create" => title
                .filter(|title| !title.trim().is_empty())
                .map(|title| Self::Create { title, source_id })
                .ok_or_else(|| {
                    ControlError::Validation("'title' is required for creating a chat".to_string())
                }),
            "get" | "delete" => {
                let chat_id = chat_id.filter(|id| !id.trim().is_empty()).ok_or_else(|| {
                    ControlError::Validation(format!("'chat_id' is required for action '{action}'"))
                })?;
                if action == "get" {
                    Ok(Self::Get { chat_id })
                } else {
                    Ok(Self::Delete { chat_id })
                }
            }
            other => Err(ControlError::Validation(format!(
                "Invalid action '{other}'. Must be one of: list, create, get, delete"
            ))),
        }
    }
}

/// Inputs for `search_logs_semantic`.
#[derive(Debug, Clone)]
pub struct SemanticSearchRequest {
    pub query: String,
    pub time_period: Option<String>,
    pub match_threshold: f64,
    pub match_count: u64,
}

/// Inputs for `search_logs_exact`.
#[derive(Debug, Clone)]
pub struct ExactSearchRequest {
    pub query: String,
    pub time_period: Option<String>,
    pub level: Option<String>,
    pub case_sensitive: bool,
    pub limit: u64,
}

/// Inputs for `search_documentation`.
#[derive(Debug, Clone)]
pub struct DocSearchRequest {
    pub query: String,
    pub chat_id: Option<String>,
    pub source_id: Option<String>,
    pub use_ai: bool,
}

/// Inputs for `index_documentation`.
#[derive(Debug, Clone)]
pub struct IndexRequest {
    pub url: String,
    pub is_public: bool,
    pub force: bool,
}

/// Stateless dispatch layer over the backend client.
#[derive(Debug, Clone)]
pub struct StraylControlPlane {
    client: StraylClient,
}

impl StraylControlPlane {
    #[must_use]
    pub const fn new(client: StraylClient) -> Self {
        Self { client }
    }

    /// Semantic (vector) log search with optional time filtering.
    ///
    /// # Errors
    /// Validation, transport, or backend faults; all carry display text.
    pub async fn search_logs_semantic(
        &self,
        request: SemanticSearchRequest,
    ) -> Result<String, ControlError> {
        let range = resolve_period(request.time_period.as_deref())?;
        let mut payload = json!({
            "query": request.query,
            "match_threshold": request.match_threshold,
            "match_count": request.match_count,
        });
        apply_range(&mut payload, range);

        let value = self.client.search_logs(&payload).await?;
        let data: LogSearchData = decode(value)?;
        Ok(render_semantic_results(&request, &data))
    }

    /// Exact-text log search with optional time and level filtering.
    ///
    /// # Errors
    /// Validation, transport, or backend faults; all carry display text.
    pub async fn search_logs_exact(
        &self,
        request: ExactSearchRequest,
    ) -> Result<String, ControlError> {
        let level = request
            .level
            .as_deref()
            .map(|raw| {
                LogLevel::parse(raw).ok_or_else(|| {
                    ControlError::Validation(format!(
                        "Invalid log level '{raw}'. Must be one of: info, warn, error, debug"
                    ))
                })
            })
            .transpose()?;
        let range = resolve_period(request.time_period.as_deref())?;

        let mut payload = json!({
            "query": request.query,
            "case_sensitive": request.case_sensitive,
            "limit": request.limit,
        });
        if let Some(level) = level {
            payload["level"] = json!(level.as_str());
        }
        apply_range(&mut payload, range);

        let value = self.client.exact_search_logs(&payload).await?;
        let data: LogSearchData = decode(value)?;
        Ok(render_exact_results(&request, level, &data))
    }

    /// Documentation search, optionally AI-structured and chat-persisted.
    ///
    /// # Errors
    /// Validation, transport, or backend faults; all carry display text.
    pub async fn search_documentation(
        &self,
        request: DocSearchRequest,
    ) -> Result<String, ControlError> {
        let mut payload = json!({
            "query": request.query,
            "limit": DOC_SEARCH_LIMIT,
            "similarity_threshold": DOC_SIMILARITY_THRESHOLD,
            "use_ai": request.use_ai,
        });
        if let Some(chat_id) = &request.chat_id {
            payload["chat_id"] = json!(chat_id);
        }
        if let Some(source_id) = &request.source_id {
            payload["source_id"] = json!(source_id);
        }

        let value = self.client.search_documentation(&payload).await?;
        let data: DocSearchData = decode(value)?;
        Ok(render_doc_search(&request, &data))
    }

    /// Enumerates documentation sources visible to the caller.
    ///
    /// # Errors
    /// Transport or backend faults; all carry display text.
    pub async fn list_documentation_sources(
        &self,
        include_public: bool,
        include_private: bool,
    ) -> Result<String, ControlError> {
        let payload = json!({
            "include_public": include_public,
            "include_private": include_private,
        });
        let value = self.client.list_documentation_sources(&payload).await?;
        let data: SourcesData = decode(value)?;
        Ok(render_sources(include_public, include_private, &data))
    }

    /// Triggers a remote crawl and embed of the given documentation URL.
    ///
    /// # Errors
    /// Transport or backend faults; all carry display text.
    pub async fn index_documentation(&self, request: IndexRequest) -> Result<String, ControlError> {
        let payload = json!({
            "url": request.url,
            "is_public": request.is_public,
            "force": request.force,
        });
        let value = self.client.index_documentation(&payload).await?;
        let report: IndexReport = decode(value)?;
        Ok(render_index_report(&request, &report))
    }

    /// Chat session management: list, create, get, delete.
    ///
    /// # Errors
    /// Transport or backend faults; all carry display text.
    pub async fn manage_chats(&self, action: ChatAction) -> Result<String, ControlError> {
        match action {
            ChatAction::List => {
                let value = self.client.manage_chats("list", None, None).await?;
                let data: ChatListData = decode(value)?;
                Ok(render_chat_list(&data))
            }
            ChatAction::Create { title, source_id } => {
                let mut body = json!({ "title": title });
                if let Some(source_id) = source_id {
                    body["source_id"] = json!(source_id);
                }
                let value = self.client.manage_chats("create", None, Some(&body)).await?;
                let data: ChatCreateData = decode(value)?;
                Ok(render_chat_created(&data))
            }
            ChatAction::Get { chat_id } => {
                let value = self.client.manage_chats("get", Some(&chat_id), None).await?;
                let data: ChatGetData = decode(value)?;
                Ok(render_chat_history(&data))
            }
            ChatAction::Delete { chat_id } => {
                let _ = self.client.manage_chats("delete", Some(&chat_id), None).await?;
                Ok(format!("Chat deleted successfully (ID: {chat_id})"))
            }
        }
    }
}

/// Resolves an optional time-period token, failing before any network call.
fn resolve_period(token: Option<&str>) -> Result<Option<TimeRange>, ControlError> {
    token
        .map(|token| {
            time_period::resolve(token).ok_or_else(|| {
                ControlError::Validation(format!(
                    "Invalid time period '{token}'. Supported values: 5m, 1h, today, yesterday, 7d, etc."
                ))
            })
        })
        .transpose()
}

fn apply_range(payload: &mut Value, range: Option<TimeRange>) {
    if let Some(range) = range {
        payload["start_time"] = json!(range.start.to_rfc3339());
        payload["end_time"] = json!(range.end.to_rfc3339());
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ControlError> {
    serde_json::from_value(value)
        .map_err(|err| ApiError::Backend(format!("Malformed response payload: {err}")).into())
}

fn render_semantic_results(request: &SemanticSearchRequest, data: &LogSearchData) -> String {
    if data.results.is_empty() {
        let time_info = request
            .time_period
            .as_deref()
            .map(|period| format!(" in period '{period}'"))
            .unwrap_or_default();
        return format!("No logs found for query '{}'{time_info}", request.query);
    }

    let mut output = vec![
        format!("Semantic Search Results for: '{}'", request.query),
        format!("Total results: {}", data.total_results),
    ];
    if let Some(period) = &request.time_period {
        output.push(format!("Time period: {period}"));
    }
    output.push(format!("Similarity threshold: {}", request.match_threshold));
    output.push(format!(
        "Logs with embeddings: {}",
        data.search_metadata.logs_with_embeddings
    ));
    push_records(&mut output, data);
    output.join("\n")
}

fn render_exact_results(
    request: &ExactSearchRequest,
    level: Option<LogLevel>,
    data: &LogSearchData,
) -> String {
    if data.results.is_empty() {
        let mut filters = Vec::new();
        if let Some(period) = &request.time_period {
            filters.push(format!("period '{period}'"));
        }
        if let Some(level) = level {
            filters.push(format!("level '{}'", level.as_str()));
        }
        let filter_info = if filters.is_empty() {
            String::new()
        } else {
            format!(" with filters: {}", filters.join(", "))
        };
        return format!(
            "No logs found for exact text '{}'{filter_info}",
            request.query
        );
    }

    let mut output = vec![
        format!("Exact Search Results for: '{}'", request.query),
        format!("Total results: {}", data.total_results),
    ];
    if let Some(period) = &request.time_period {
        output.push(format!("Time period: {period}"));
    }
    if let Some(level) = level {
        output.push(format!("Log level: {}", level.as_str()));
    }
    output.push(format!("Case sensitive: {}", request.case_sensitive));
    push_records(&mut output, data);
    output.join("\n")
}

/// Appends the banner, up to [`LOG_DISPLAY_CAP`] formatted records, and the
/// overflow notice shared by both log search renderings.
fn push_records(output: &mut Vec<String>, data: &LogSearchData) {
    output.push(format!("\n{BANNER}\n"));
    for (i, record) in data.results.iter().take(LOG_DISPLAY_CAP).enumerate() {
        output.push(format!("{}. {}", i + 1, format_log_record(record)));
        output.push(RECORD_RULE.to_string());
    }
    let cap = LOG_DISPLAY_CAP as u64;
    if data.total_results > cap {
        output.push(format!("\n... and {} more results", data.total_results - cap));
    }
}

fn render_doc_search(request: &DocSearchRequest, data: &DocSearchData) -> String {
    // AI answers are returned verbatim, without headers or metadata.
    if let Some(answer) = &data.structured_answer {
        let text = answer
            .as_str()
            .map_or_else(|| answer.to_string(), str::to_string);
        let text = text.trim();
        if !text.is_empty() && !answer.is_null() {
            return text.to_string();
        }
    }

    if data.results.is_empty() {
        let source_info = request
            .source_id
            .as_deref()
            .map(|source_id| format!(" in source '{source_id}'"))
            .unwrap_or_default();
        return format!(
            "No documentation found for query '{}'{source_info}",
            request.query
        );
    }

    let mut output = vec![format!(
        "{} documentation result(s) for: {}\n",
        data.results.len(),
        request.query
    )];
    for (i, result) in data.results.iter().enumerate() {
        output.push(format_doc_result(i + 1, result));
        output.push(String::new());
    }
    output.join("\n")
}

fn render_sources(include_public: bool, include_private: bool, data: &SourcesData) -> String {
    if data.sources.is_empty() {
        let mut excluded = Vec::new();
        if !include_public {
            excluded.push("excluding public");
        }
        if !include_private {
            excluded.push("excluding private");
        }
        let filter_info = if excluded.is_empty() {
            String::new()
        } else {
            format!(" ({})", excluded.join(", "))
        };
        return format!("No documentation sources found{filter_info}.");
    }

    let yes_no = |flag: bool| if flag { "Yes" } else { "No" };
    let mut output = vec![
        BANNER.to_string(),
        "AVAILABLE DOCUMENTATION SOURCES".to_string(),
        BANNER.to_string(),
        format!("Total sources: {}", data.count),
        format!(
            "Filters: Public={}, Private={}",
            yes_no(include_public),
            yes_no(include_private)
        ),
        String::new(),
    ];

    for (i, source) in data.sources.iter().enumerate() {
        output.push(format!(
            "{}. {}",
            i + 1,
            source.name.as_deref().unwrap_or("Unnamed")
        ));
        output.push(format!("   ID: {}", source.id.as_deref().unwrap_or("Unknown")));
        output.push(format!("   URL: {}", source.url.as_deref().unwrap_or("N/A")));
        output.push(format!(
            "   Status: {}",
            source.status.as_deref().unwrap_or("unknown").to_ascii_uppercase()
        ));
        output.push(format!(
            "   Public: {}",
            if source.is_public {
                "Yes"
            } else {
                "No (Your private source)"
            }
        ));
        if source.chunks_count > 0 {
            output.push(format!("   Chunks: {}", source.chunks_count));
        }
        if let Some(indexed_at) = source.indexed_at.as_deref().filter(|raw| !raw.is_empty()) {
            output.push(format!(
                "   Indexed: {}",
                format_timestamp(indexed_at, "%Y-%m-%d %H:%M", 10)
            ));
        }
        output.push(String::new());
    }

    output.push(BANNER.to_string());
    output.push(
        "\nTip: Use source_id to search within a specific documentation source".to_string(),
    );
    output.push("   Example: search_documentation('query', source_id='uuid-here')".to_string());
    output.join("\n")
}

fn render_index_report(request: &IndexRequest, report: &IndexReport) -> String {
    let source_id = report.source_id.as_deref().unwrap_or("");
    let mut output = vec![
        BANNER.to_string(),
        "DOCUMENTATION ADDED & INDEXED".to_string(),
        BANNER.to_string(),
        format!("URL: {}", request.url),
        format!("Source ID: {source_id}"),
        format!(
            "Public: {}",
            if request.is_public { "Yes" } else { "No (Private)" }
        ),
        format!("Pages crawled: {}", report.pages_crawled),
        format!("Chunks indexed: {}", report.chunks_indexed),
        format!("Total tokens: {}", group_thousands(report.total_tokens)),
    ];

    if let Some(performance) = &report.performance {
        output.push(format!(
            "\nTotal duration: {:.2}s",
            performance.total_duration_ms / 1000.0
        ));
        if !performance.stages.is_empty() {
            output.push("\nStage timings:".to_string());
            for (stage, duration_ms) in &performance.stages {
                output.push(format!("  - {stage}: {:.2}s", duration_ms / 1000.0));
            }
        }
    }

    output.push(format!("\n{BANNER}"));
    output.push("The documentation is now searchable!".to_string());
    output.push("   Use: search_documentation('your query here')".to_string());
    output.push(format!(
        "   Or: search_documentation('your query', source_id='{source_id}')"
    ));
    output.join("\n")
}

fn render_chat_list(data: &ChatListData) -> String {
    if data.chats.is_empty() {
        return "No chats found. Create a new chat with action='create'.".to_string();
    }

    let mut output = vec![
        BANNER.to_string(),
        "YOUR DOCUMENTATION CHATS".to_string(),
        BANNER.to_string(),
        format!("Total chats: {}", data.count),
        String::new(),
    ];
    for (i, chat) in data.chats.iter().enumerate() {
        output.push(format!(
            "{}. {}",
            i + 1,
            chat.title.as_deref().unwrap_or("Untitled")
        ));
        output.push(format!("   ID: {}", chat.id.as_deref().unwrap_or("Unknown")));
        if let Some(source) = &chat.documentation_sources {
            output.push(format!(
                "   Source: {}",
                source.name.as_deref().unwrap_or("N/A")
            ));
        }
        if let Some(updated_at) = chat.updated_at.as_deref().filter(|raw| !raw.is_empty()) {
            output.push(format!(
                "   Updated: {}",
                format_timestamp(updated_at, "%Y-%m-%d %H:%M", 16)
            ));
        }
        output.push(String::new());
    }
    output.push(BANNER.to_string());
    output.push("\nTip: Use chat_id with search_documentation to continue conversation".to_string());
    output.push("   Example: search_documentation('query', chat_id='uuid-here')".to_string());
    output.join("\n")
}

fn render_chat_created(data: &ChatCreateData) -> String {
    let chat_id = data.chat.id.as_deref().unwrap_or("Unknown");
    let title = data.chat.title.as_deref().unwrap_or("Untitled");
    format!(
        "Chat created successfully!\n\n\
         Title: {title}\n\
         Chat ID: {chat_id}\n\n\
         Use this chat_id with search_documentation to save conversation history:\n  \
         search_documentation('your query', chat_id='{chat_id}')"
    )
}

fn render_chat_history(data: &ChatGetData) -> String {
    let title = data.chat.title.as_deref().unwrap_or("Untitled");
    let mut output = vec![
        BANNER.to_string(),
        format!("CHAT: {title}"),
        BANNER.to_string(),
        format!("Messages: {}", data.count),
        String::new(),
    ];

    if data.messages.is_empty() {
        output.push("No messages in this chat yet.".to_string());
    } else {
        for message in &data.messages {
            let role = message
                .role
                .as_deref()
                .unwrap_or("unknown")
                .to_ascii_uppercase();
            let date = message
                .created_at
                .as_deref()
                .filter(|raw| !raw.is_empty())
                .map_or_else(String::new, |raw| {
                    format_timestamp(raw, "%Y-%m-%d %H:%M:%S", 19)
                });
            output.push(format!("{role} [{date}]"));
            output.push(message.content.clone().unwrap_or_default());
            output.push(RECORD_RULE.to_string());
        }
    }
    output.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        ChatMessage,
        ChatSummary,
        DocResult,
        LogRecord,
        SearchMetadata,
        SourceRecord,
        SourceRef,
    };

    fn log_records(count: usize) -> Vec<LogRecord> {
        (0..count)
            .map(|i| LogRecord {
                timestamp: Some("2024-01-01T12:00:00Z".to_string()),
                level: Some("error".to_string()),
                message: Some(format!("failure {i}")),
                source: Some("worker".to_string()),
                similarity: None,
            })
            .collect()
    }

    fn exact_request() -> ExactSearchRequest {
        ExactSearchRequest {
            query: "timeout".to_string(),
            time_period: None,
            level: None,
            case_sensitive: false,
            limit: 50,
        }
    }

    #[test]
    fn eleven_results_render_ten_entries_plus_notice() {
        let data = LogSearchData {
            results: log_records(11),
            total_results: 11,
            search_metadata: SearchMetadata::default(),
        };
        let text = render_exact_results(&exact_request(), None, &data);
        assert_eq!(text.matches("failure ").count(), 10);
        assert!(text.contains("10. "));
        assert!(!text.contains("11. "));
        assert!(text.ends_with("... and 1 more results"));
    }

    #[test]
    fn capped_results_carry_no_notice() {
        let data = LogSearchData {
            results: log_records(3),
            total_results: 3,
            search_metadata: SearchMetadata::default(),
        };
        let text = render_exact_results(&exact_request(), None, &data);
        assert!(!text.contains("more results"));
    }

    #[test]
    fn empty_exact_results_name_active_filters() {
        let request = ExactSearchRequest {
            time_period: Some("7d".to_string()),
            ..exact_request()
        };
        let text = render_exact_results(&request, Some(LogLevel::Error), &LogSearchData::default());
        assert_eq!(
            text,
            "No logs found for exact text 'timeout' with filters: period '7d', level 'error'"
        );
    }

    #[test]
    fn empty_semantic_results_name_period() {
        let request = SemanticSearchRequest {
            query: "db errors".to_string(),
            time_period: Some("1h".to_string()),
            match_threshold: DEFAULT_MATCH_THRESHOLD,
            match_count: DEFAULT_MATCH_COUNT,
        };
        let text = render_semantic_results(&request, &LogSearchData::default());
        assert_eq!(text, "No logs found for query 'db errors' in period '1h'");
    }

    #[test]
    fn semantic_header_carries_metadata() {
        let request = SemanticSearchRequest {
            query: "oom".to_string(),
            time_period: Some("today".to_string()),
            match_threshold: 0.4,
            match_count: 20,
        };
        let data = LogSearchData {
            results: log_records(1),
            total_results: 1,
            search_metadata: SearchMetadata {
                logs_with_embeddings: 42,
            },
        };
        let text = render_semantic_results(&request, &data);
        assert!(text.contains("Semantic Search Results for: 'oom'"));
        assert!(text.contains("Time period: today"));
        assert!(text.contains("Similarity threshold: 0.4"));
        assert!(text.contains("Logs with embeddings: 42"));
    }

    #[test]
    fn structured_answer_is_returned_verbatim() {
        let request = DocSearchRequest {
            query: "how to deploy".to_string(),
            chat_id: None,
            source_id: None,
            use_ai: true,
        };
        let data = DocSearchData {
            results: vec![DocResult::default()],
            structured_answer: Some(serde_json::json!("  Deploy with `cargo run`.  ")),
        };
        assert_eq!(render_doc_search(&request, &data), "Deploy with `cargo run`.");
    }

    #[test]
    fn blank_structured_answer_falls_back_to_results() {
        let request = DocSearchRequest {
            query: "deploy".to_string(),
            chat_id: None,
            source_id: Some("src-1".to_string()),
            use_ai: true,
        };
        let data = DocSearchData {
            results: Vec::new(),
            structured_answer: Some(serde_json::json!("   ")),
        };
        assert_eq!(
            render_doc_search(&request, &data),
            "No documentation found for query 'deploy' in source 'src-1'"
        );
    }

    #[test]
    fn sources_render_placeholders_and_filters() {
        let data = SourcesData {
            sources: vec![SourceRecord {
                name: Some("Example".to_string()),
                status: Some("ready".to_string()),
                indexed_at: Some("2024-02-03T04:05:06Z".to_string()),
                chunks_count: 12,
                is_public: false,
                ..SourceRecord::default()
            }],
            count: 1,
        };
        let text = render_sources(true, true, &data);
        assert!(text.contains("Total sources: 1"));
        assert!(text.contains("Filters: Public=Yes, Private=Yes"));
        assert!(text.contains("ID: Unknown"));
        assert!(text.contains("URL: N/A"));
        assert!(text.contains("Status: READY"));
        assert!(text.contains("No (Your private source)"));
        assert!(text.contains("Chunks: 12"));
        assert!(text.contains("Indexed: 2024-02-03 04:05"));
    }

    #[test]
    fn empty_sources_name_exclusions() {
        let text = render_sources(true, false, &SourcesData::default());
        assert_eq!(text, "No documentation sources found (excluding private).");
    }

    #[test]
    fn index_report_renders_counts_and_stages() {
        let request = IndexRequest {
            url: "https://docs.example.com".to_string(),
            is_public: true,
            force: false,
        };
        let report = IndexReport {
            source_id: Some("src-9".to_string()),
            pages_crawled: 120,
            chunks_indexed: 456,
            total_tokens: 1_234_567,
            performance: Some(crate::models::PerformanceReport {
                total_duration_ms: 12_345.0,
                stages: [("crawl".to_string(), 10_000.0), ("embed".to_string(), 2_345.0)]
                    .into_iter()
                    .collect(),
            }),
        };
        let text = render_index_report(&request, &report);
        assert!(text.contains("URL: https://docs.example.com"));
        assert!(text.contains("Source ID: src-9"));
        assert!(text.contains("Total tokens: 1,234,567"));
        assert!(text.contains("Total duration: 12.35s"));
        assert!(text.contains("  - crawl: 10.00s"));
        assert!(text.contains("  - embed: 2.35s"));
        assert!(text.contains("source_id='src-9'"));
    }

    #[test]
    fn chat_list_and_history_render() {
        let list = ChatListData {
            chats: vec![ChatSummary {
                id: Some("chat-1".to_string()),
                title: Some("Deploy notes".to_string()),
                updated_at: Some("2024-05-06T07:08:09Z".to_string()),
                documentation_sources: Some(SourceRef {
                    name: Some("Example Docs".to_string()),
                }),
            }],
            count: 1,
        };
        let text = render_chat_list(&list);
        assert!(text.contains("1. Deploy notes"));
        assert!(text.contains("ID: chat-1"));
        assert!(text.contains("Source: Example Docs"));
        assert!(text.contains("Updated: 2024-05-06 07:08"));

        let history = ChatGetData {
            chat: ChatSummary {
                title: Some("Deploy notes".to_string()),
                ..ChatSummary::default()
            },
            messages: vec![ChatMessage {
                role: Some("user".to_string()),
                content: Some("how do I deploy?".to_string()),
                created_at: Some("2024-05-06T07:08:09Z".to_string()),
            }],
            count: 1,
        };
        let text = render_chat_history(&history);
        assert!(text.contains("CHAT: Deploy notes"));
        assert!(text.contains("USER [2024-05-06 07:08:09]"));
        assert!(text.contains("how do I deploy?"));
    }

    #[test]
    fn empty_chat_list_suggests_create() {
        assert_eq!(
            render_chat_list(&ChatListData::default()),
            "No chats found. Create a new chat with action='create'."
        );
    }

    #[test]
    fn chat_action_validation() {
        assert!(matches!(
            ChatAction::from_request("list", None, None, None),
            Ok(ChatAction::List)
        ));
        assert!(ChatAction::from_request("create", None, None, None).is_err());
        assert!(ChatAction::from_request("create", Some("  ".to_string()), None, None).is_err());
        assert!(matches!(
            ChatAction::from_request("create", Some("notes".to_string()), None, None),
            Ok(ChatAction::Create { .. })
        ));
        assert!(ChatAction::from_request("get", None, None, None).is_err());
        assert!(matches!(
            ChatAction::from_request("delete", None, Some("chat-1".to_string()), None),
            Ok(ChatAction::Delete { .. })
        ));
        let err = ChatAction::from_request("purge", None, None, None).unwrap_err();
        assert!(err.to_string().contains("Invalid action 'purge'"));
    }

    #[test]
    fn log_level_parsing() {
        assert_eq!(LogLevel::parse("ERROR"), Some(LogLevel::Error));
        assert_eq!(LogLevel::parse("warn"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::parse("critical"), None);
    }

    #[test]
    fn invalid_period_short_circuits() {
        let err = resolve_period(Some("banana")).unwrap_err();
        assert!(err.to_string().contains("Invalid time period 'banana'"));
        assert!(resolve_period(None).expect("no token is fine").is_none());
    }
}
