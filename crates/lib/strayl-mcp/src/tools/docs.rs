use rmcp::{
    ErrorData,
    handler::server::wrapper::Parameters,
    model::CallToolResult,
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};
use strayl_core::control::{DocSearchRequest, IndexRequest};

use crate::StraylMcp;
use crate::helpers;

/// Parameters for documentation search.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct SearchDocumentationParams {
    /// What to look for in the indexed documentation.
    pub query: String,
    /// Optional chat id to persist the exchange as conversation history.
    pub chat_id: Option<String>,
    /// Optional source id restricting the search to one documentation source.
    pub source_id: Option<String>,
    /// Ask the backend for an AI-structured answer. Defaults to true.
    pub use_ai: Option<bool>,
}

/// Parameters for listing documentation sources.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ListDocumentationSourcesParams {
    /// Include publicly shared sources. Defaults to true.
    pub include_public: Option<bool>,
    /// Include your private sources. Defaults to true.
    pub include_private: Option<bool>,
}

/// Parameters for indexing a documentation URL.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct IndexDocumentationParams {
    /// Root URL of the documentation site to crawl and index.
    pub url: String,
    /// Share the indexed source publicly. Defaults to true.
    pub is_public: Option<bool>,
    /// Re-index even if the URL was indexed before. Defaults to false.
    pub force: Option<bool>,
}

#[tool_router(router = tool_router_docs, vis = "pub")]
impl StraylMcp {
    #[tool(
        description = "Search indexed documentation. Returns an AI-structured answer when use_ai is set, otherwise the top matching excerpts. Pass chat_id to keep conversation history and source_id to search one source."
    )]
    async fn search_documentation(
        &self,
        Parameters(params): Parameters<SearchDocumentationParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let request = DocSearchRequest {
            query: params.query,
            chat_id: params.chat_id,
            source_id: params.source_id,
            use_ai: params.use_ai.unwrap_or(true),
        };
        Ok(helpers::render(
            self.control().search_documentation(request).await,
        ))
    }

    #[tool(
        description = "List the documentation sources available for searching, with their ids, status, and indexing details."
    )]
    async fn list_documentation_sources(
        &self,
        Parameters(params): Parameters<ListDocumentationSourcesParams>,
    ) -> Result<CallToolResult, ErrorData> {
        Ok(helpers::render(
            self.control()
                .list_documentation_sources(
                    params.include_public.unwrap_or(true),
                    params.include_private.unwrap_or(true),
                )
                .await,
        ))
    }

    #[tool(
        description = "Crawl and index a documentation URL so it becomes searchable. Indexing can take several minutes for large sites. Set force to re-index an existing source."
    )]
    async fn index_documentation(
        &self,
        Parameters(params): Parameters<IndexDocumentationParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let request = IndexRequest {
            url: params.url,
            is_public: params.is_public.unwrap_or(true),
            force: params.force.unwrap_or(false),
        };
        Ok(helpers::render(
            self.control().index_documentation(request).await,
        ))
    }
}
