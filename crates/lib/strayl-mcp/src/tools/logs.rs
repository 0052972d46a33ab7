use rmcp::{
    ErrorData,
    handler::server::wrapper::Parameters,
    model::CallToolResult,
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};
use strayl_core::control::{
    DEFAULT_MATCH_COUNT,
    DEFAULT_MATCH_THRESHOLD,
    ExactSearchRequest,
    SemanticSearchRequest,
};

use crate::StraylMcp;
use crate::helpers;

/// Parameters for semantic log search.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct SearchLogsSemanticParams {
    /// Natural-language description of the logs to find.
    pub query: String,
    /// Optional time window token, e.g. `5m`, `1h`, `today`, `yesterday`, `7d`.
    pub time_period: Option<String>,
    /// Minimum vector similarity, 0.0 to 1.0. Defaults to 0.2.
    pub match_threshold: Option<f64>,
    /// Maximum number of results to request. Defaults to 50.
    pub match_count: Option<u64>,
}

/// Parameters for exact-text log search.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct SearchLogsExactParams {
    /// Literal text to match inside log messages.
    pub query: String,
    /// Optional time window token, e.g. `5m`, `1h`, `today`, `yesterday`, `7d`.
    pub time_period: Option<String>,
    /// Optional level filter: `info`, `warn`, `error`, or `debug`.
    pub level: Option<String>,
    /// Match case exactly. Defaults to false.
    pub case_sensitive: Option<bool>,
    /// Maximum number of results to request. Defaults to 50.
    pub limit: Option<u64>,
}

#[tool_router(router = tool_router_logs, vis = "pub")]
impl StraylMcp {
    #[tool(
        description = "Search logs by meaning using vector similarity. Use for natural-language queries like 'database connection failures'. Optional time_period filters the window (see list_time_periods)."
    )]
    async fn search_logs_semantic(
        &self,
        Parameters(params): Parameters<SearchLogsSemanticParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let request = SemanticSearchRequest {
            query: params.query,
            time_period: params.time_period,
            match_threshold: params.match_threshold.unwrap_or(DEFAULT_MATCH_THRESHOLD),
            match_count: params.match_count.unwrap_or(DEFAULT_MATCH_COUNT),
        };
        Ok(helpers::render(
            self.control().search_logs_semantic(request).await,
        ))
    }

    #[tool(
        description = "Search logs for an exact text match, optionally filtered by time_period and level (info, warn, error, debug). Use when you know the literal message text."
    )]
    async fn search_logs_exact(
        &self,
        Parameters(params): Parameters<SearchLogsExactParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let request = ExactSearchRequest {
            query: params.query,
            time_period: params.time_period,
            level: params.level,
            case_sensitive: params.case_sensitive.unwrap_or(false),
            limit: params.limit.unwrap_or(DEFAULT_MATCH_COUNT),
        };
        Ok(helpers::render(
            self.control().search_logs_exact(request).await,
        ))
    }
}
