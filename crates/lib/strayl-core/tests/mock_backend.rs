//! End-to-end exercises against a local mock backend.

use axum::extract::Query;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};
use std::collections::HashMap;

use strayl_core::client::{StraylClient, StraylConfig};
use strayl_core::control::{
    ChatAction,
    DEFAULT_MATCH_COUNT,
    DEFAULT_MATCH_THRESHOLD,
    SemanticSearchRequest,
    StraylControlPlane,
};
use strayl_core::error::{ApiError, ControlError};

/// Serves the given router on an ephemeral port and returns its origin URL.
async fn spawn_backend(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve mock backend");
    });
    format!("http://{addr}")
}

fn control_plane(api_url: String) -> StraylControlPlane {
    let client = StraylClient::new(StraylConfig {
        api_url,
        api_key: Some("test-key".to_string()),
    })
    .expect("client construction");
    StraylControlPlane::new(client)
}

fn semantic_request(query: &str) -> SemanticSearchRequest {
    SemanticSearchRequest {
        query: query.to_string(),
        time_period: None,
        match_threshold: DEFAULT_MATCH_THRESHOLD,
        match_count: DEFAULT_MATCH_COUNT,
    }
}

#[tokio::test]
async fn semantic_search_renders_backend_results() {
    let router = Router::new().route(
        "/search-logs",
        post(|Json(payload): Json<Value>| async move {
            assert_eq!(payload["query"], "disk full");
            assert_eq!(payload["match_count"], 50);
            Json(json!({
                "success": true,
                "results": [{
                    "timestamp": "2024-01-01T12:00:00Z",
                    "level": "error",
                    "message": "no space left on device",
                    "source": "ingestd",
                    "similarity": 0.91,
                }],
                "total_results": 1,
                "search_metadata": { "logs_with_embeddings": 7 },
            }))
        }),
    );
    let url = spawn_backend(router).await;

    let text = control_plane(url)
        .search_logs_semantic(semantic_request("disk full"))
        .await
        .expect("search should succeed");
    assert!(text.contains("Semantic Search Results for: 'disk full'"));
    assert!(text.contains("Total results: 1"));
    assert!(text.contains("Logs with embeddings: 7"));
    assert!(text.contains("[2024-01-01 12:00:00] [ERROR] ingestd"));
    assert!(text.contains("no space left on device"));
    assert!(text.contains("(similarity: 0.910)"));
}

#[tokio::test]
async fn domain_error_on_ok_status_is_a_backend_error() {
    let router = Router::new().route(
        "/search-logs",
        post(|| async { Json(json!({ "success": false, "error": "bad query" })) }),
    );
    let url = spawn_backend(router).await;

    let err = control_plane(url)
        .search_logs_semantic(semantic_request("anything"))
        .await
        .expect_err("failure indicator should surface");
    match err {
        ControlError::Api(ApiError::Backend(message)) => assert_eq!(message, "bad query"),
        other => panic!("expected backend error, got {other:?}"),
    }
    assert_eq!(
        ControlError::Api(ApiError::Backend("bad query".to_string())).to_string(),
        "Error: bad query"
    );
}

#[tokio::test]
async fn auth_failure_carries_status_and_message() {
    let router = Router::new().route(
        "/search-logs",
        post(|| async {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "invalid api key" })),
            )
        }),
    );
    let url = spawn_backend(router).await;

    let err = control_plane(url)
        .search_logs_semantic(semantic_request("anything"))
        .await
        .expect_err("401 should surface");
    match &err {
        ControlError::Api(ApiError::Status { code, message }) => {
            assert_eq!(*code, 401);
            assert_eq!(message, "invalid api key");
        }
        other => panic!("expected status error, got {other:?}"),
    }
    assert_eq!(err.to_string(), "Error: API returned status 401: invalid api key");
}

#[tokio::test]
async fn chat_actions_ride_query_parameters() {
    let router = Router::new().route(
        "/manage-documentation-chats",
        post(
            |Query(params): Query<HashMap<String, String>>, body: Option<Json<Value>>| async move {
                match params.get("action").map(String::as_str) {
                    Some("create") => {
                        let body = body.expect("create carries a body").0;
                        assert_eq!(body["title"], "Release notes");
                        Json(json!({
                            "chat": { "id": "chat-42", "title": "Release notes" },
                        }))
                    }
                    Some("delete") => {
                        assert_eq!(params.get("chat_id").map(String::as_str), Some("chat-42"));
                        Json(json!({ "success": true }))
                    }
                    other => panic!("unexpected action {other:?}"),
                }
            },
        ),
    );
    let url = spawn_backend(router).await;
    let control = control_plane(url);

    let created = control
        .manage_chats(ChatAction::Create {
            title: "Release notes".to_string(),
            source_id: None,
        })
        .await
        .expect("create should succeed");
    assert!(created.contains("Chat ID: chat-42"));
    assert!(created.contains("chat_id='chat-42'"));

    let deleted = control
        .manage_chats(ChatAction::Delete {
            chat_id: "chat-42".to_string(),
        })
        .await
        .expect("delete should succeed");
    assert_eq!(deleted, "Chat deleted successfully (ID: chat-42)");
}

#[tokio::test]
async fn missing_credential_fails_before_any_request() {
    let client = StraylClient::new(StraylConfig {
        api_url: "http://127.0.0.1:9".to_string(),
        api_key: None,
    })
    .expect("client construction");

    let err = StraylControlPlane::new(client)
        .search_logs_semantic(semantic_request("anything"))
        .await
        .expect_err("missing key should fail");
    match err {
        ControlError::Api(ApiError::Config(message)) => {
            assert!(message.contains("STRAYL_API_KEY"));
            assert!(message.contains("https://strayl.dev"));
        }
        other => panic!("expected config error, got {other:?}"),
    }
}
