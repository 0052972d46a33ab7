//! HTTP client for the Strayl backend.
//!
//! Every tool call maps to exactly one HTTPS POST against a fixed sub-route
//! of the backend origin, with a bearer credential and a per-route timeout
//! budget. Responses are classified once into success or a typed failure;
//! callers never see raw transport or status handling.

use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use crate::error::ApiError;

/// Default backend origin.
pub const DEFAULT_API_URL: &str = "https://ougtygyvcgdnytkswier.supabase.co/functions/v1";

const DEFAULT_TIMEOUT_MESSAGE: &str = "Request timed out. Please try again.";

const SEARCH_LOGS: Route = Route::new("search-logs", 30);
const EXACT_SEARCH_LOGS: Route = Route::new("exact-search-logs", 30);
const SEARCH_DOCUMENTATION: Route = Route::new("search-documentation", 60).with_timeout_message(
    "Request timed out (AI processing can take up to 60s). Please try again.",
);
const LIST_DOCUMENTATION_SOURCES: Route = Route::new("list-documentation-sources", 30);
const INDEX_DOCUMENTATION: Route = Route::new("index-documentation", 300).with_timeout_message(
    "Request timed out. Indexing can take several minutes. Please check the status later.",
);
const MANAGE_CHATS: Route = Route::new("manage-documentation-chats", 30);

/// One backend sub-route with its timeout budget.
#[derive(Debug, Clone, Copy)]
struct Route {
    path: &'static str,
    timeout: Duration,
    timeout_message: &'static str,
}

impl Route {
    const fn new(path: &'static str, timeout_secs: u64) -> Self {
        Self {
            path,
            timeout: Duration::from_secs(timeout_secs),
            timeout_message: DEFAULT_TIMEOUT_MESSAGE,
        }
    }

    const fn with_timeout_message(mut self, timeout_message: &'static str) -> Self {
        self.timeout_message = timeout_message;
        self
    }
}

/// Client configuration, read once at startup and passed in explicitly.
#[derive(Debug, Clone)]
pub struct StraylConfig {
    pub api_url: String,
    /// Bearer credential. `None` becomes a per-call configuration error so
    /// the server can still start and serve credential-free tools.
    pub api_key: Option<String>,
}

impl Default for StraylConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: None,
        }
    }
}

/// Stateless backend client. Holds only the connection pool and config.
#[derive(Debug, Clone)]
pub struct StraylClient {
    http: reqwest::Client,
    config: StraylConfig,
}

impl StraylClient {
    /// Builds a client from explicit configuration.
    ///
    /// # Errors
    /// Returns a transport error if the underlying HTTP client cannot be
    /// constructed.
    pub fn new(config: StraylConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        Ok(Self { http, config })
    }

    pub async fn search_logs(&self, payload: &Value) -> Result<Value, ApiError> {
        self.post(SEARCH_LOGS, Some(payload), &[]).await
    }

    pub async fn exact_search_logs(&self, payload: &Value) -> Result<Value, ApiError> {
        self.post(EXACT_SEARCH_LOGS, Some(payload), &[]).await
    }

    pub async fn search_documentation(&self, payload: &Value) -> Result<Value, ApiError> {
        self.post(SEARCH_DOCUMENTATION, Some(payload), &[]).await
    }

    pub async fn list_documentation_sources(&self, payload: &Value) -> Result<Value, ApiError> {
        self.post(LIST_DOCUMENTATION_SOURCES, Some(payload), &[])
            .await
    }

    pub async fn index_documentation(&self, payload: &Value) -> Result<Value, ApiError> {
        self.post(INDEX_DOCUMENTATION, Some(payload), &[]).await
    }

    /// Chat management rides one route with the action (and optional chat id)
    /// as query parameters; only `create` carries a JSON body.
    pub async fn manage_chats(
        &self,
        action: &str,
        chat_id: Option<&str>,
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        let mut query = vec![("action", action)];
        if let Some(chat_id) = chat_id {
            query.push(("chat_id", chat_id));
        }
        self.post(MANAGE_CHATS, body, &query).await
    }

    async fn post(
        &self,
        route: Route,
        body: Option<&Value>,
        query: &[(&str, &str)],
    ) -> Result<Value, ApiError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                ApiError::Config(
                    "STRAYL_API_KEY environment variable is required. \
                     Get your API key from https://strayl.dev"
                        .to_string(),
                )
            })?;

        let url = format!("{}/{}", self.config.api_url.trim_end_matches('/'), route.path);
        debug!(path = route.path, "calling backend");

        let mut request = self
            .http
            .post(&url)
            .bearer_auth(api_key)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .timeout(route.timeout);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|err| classify_transport(&err, route))?;
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|err| classify_transport(&err, route))?;
        classify_response(status, &text)
    }
}

fn classify_transport(err: &reqwest::Error, route: Route) -> ApiError {
    if err.is_timeout() {
        ApiError::Timeout(route.timeout_message.to_string())
    } else {
        ApiError::Transport(err.to_string())
    }
}

/// Classifies one backend response into a payload or a typed failure.
///
/// A JSON body with an explicit failure indicator (`error` key or
/// `success: false`) is a domain error even on a 2xx status.
///
/// # Errors
/// Returns the classified [`ApiError`] for every non-success outcome.
pub fn classify_response(status: u16, body: &str) -> Result<Value, ApiError> {
    let parsed: Option<Value> = serde_json::from_str(body).ok();

    if !(200..300).contains(&status) {
        let message = parsed
            .as_ref()
            .and_then(|value| value.get("error"))
            .and_then(Value::as_str)
            .map_or_else(|| body.trim().to_string(), str::to_string);
        return Err(ApiError::Status {
            code: status,
            message,
        });
    }

    let Some(value) = parsed else {
        let raw = body.trim();
        let message = if raw.is_empty() {
            "Empty response from backend".to_string()
        } else {
            raw.to_string()
        };
        return Err(ApiError::Backend(message));
    };

    if let Some(error) = value.get("error").filter(|error| !error.is_null()) {
        let message = error
            .as_str()
            .map_or_else(|| error.to_string(), str::to_string);
        return Err(ApiError::Backend(message));
    }
    if value.get("success").and_then(Value::as_bool) == Some(false) {
        return Err(ApiError::Backend("Unknown error".to_string()));
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_body_passes_through() {
        let value = classify_response(200, r#"{"success": true, "results": []}"#)
            .expect("success body should classify as ok");
        assert_eq!(value["success"], true);
    }

    #[test]
    fn domain_error_on_2xx_is_surfaced() {
        let err = classify_response(200, r#"{"success": false, "error": "bad query"}"#)
            .expect_err("failure indicator should classify as error");
        match err {
            ApiError::Backend(message) => assert_eq!(message, "bad query"),
            other => panic!("expected backend error, got {other:?}"),
        }
    }

    #[test]
    fn success_false_without_message_is_unknown() {
        let err = classify_response(200, r#"{"success": false}"#).expect_err("should fail");
        match err {
            ApiError::Backend(message) => assert_eq!(message, "Unknown error"),
            other => panic!("expected backend error, got {other:?}"),
        }
    }

    #[test]
    fn status_error_extracts_json_message() {
        let err = classify_response(401, r#"{"error": "invalid api key"}"#)
            .expect_err("non-2xx should fail");
        match err {
            ApiError::Status { code, message } => {
                assert_eq!(code, 401);
                assert_eq!(message, "invalid api key");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[test]
    fn status_error_falls_back_to_raw_text() {
        let err =
            classify_response(502, "upstream unavailable").expect_err("non-2xx should fail");
        match err {
            ApiError::Status { code, message } => {
                assert_eq!(code, 502);
                assert_eq!(message, "upstream unavailable");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[test]
    fn non_json_success_body_is_a_backend_error() {
        let err = classify_response(200, "<html>oops</html>").expect_err("should fail");
        match err {
            ApiError::Backend(message) => assert_eq!(message, "<html>oops</html>"),
            other => panic!("expected backend error, got {other:?}"),
        }
    }

    #[test]
    fn null_error_key_is_not_a_failure() {
        let value = classify_response(200, r#"{"error": null, "results": []}"#)
            .expect("null error key should not classify as failure");
        assert!(value["results"].as_array().is_some());
    }
}
