//! HTTP-level tests for the chat relay routes.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use chat_relay::connector::api::http::{routes, CHAT_PATH, HEALTH_PATH};
use chat_relay::{
    ChatProvider, Container, ContainerConfig, MissingCredentialPolicy, MockChatProvider,
    ProviderKind,
};

fn app_with(provider: Arc<dyn ChatProvider>) -> Router {
    let container = Container::with_provider(ContainerConfig::new(ProviderKind::Mock), provider);
    routes(Arc::new(container))
}

fn post_chat(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(CHAT_PATH)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let resp = app.oneshot(request).await.unwrap();
    let status = resp.status();
    let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn test_chat_returns_reply() {
    let provider = Arc::new(MockChatProvider::new());
    let app = app_with(provider.clone());

    let body = json!({
        "messages": [
            {"role": "system", "content": "be supportive"},
            {"role": "assistant", "content": "Hi! What would you like to explore today?"},
            {"role": "user", "content": "My stress"}
        ]
    });
    let (status, value) = send(app, post_chat(body.to_string())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(value, json!({"reply": "You said: My stress"}));
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn test_empty_messages_rejected_before_provider_call() {
    let provider = Arc::new(MockChatProvider::new());

    for body in [json!({"messages": []}), json!({}), json!({"messages": "hi"})] {
        let (status, value) = send(app_with(provider.clone()), post_chat(body.to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            value,
            json!({"error": "Invalid or empty messages array provided."})
        );
    }

    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_malformed_json_is_a_client_error() {
    let provider = Arc::new(MockChatProvider::new());
    let (status, value) = send(app_with(provider.clone()), post_chat("{not json")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(value["error"], json!("Invalid JSON in request body."));
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_unknown_role_is_a_client_error() {
    let body = json!({"messages": [{"role": "tool", "content": "x"}]});
    let (status, value) = send(
        app_with(Arc::new(MockChatProvider::new())),
        post_chat(body.to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(value["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid message at index 0"));
}

#[tokio::test]
async fn test_provider_failure_reports_message_and_details() {
    let provider = Arc::new(MockChatProvider::failing(
        "Rate limit exceeded",
        Some(json!({"error": {"code": 429}})),
    ));
    let body = json!({"messages": [{"role": "user", "content": "Hi"}]});

    let (status, value) = send(app_with(provider), post_chat(body.to_string())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(value["error"], json!("Rate limit exceeded"));
    assert_eq!(value["details"]["error"]["code"], json!(429));
}

#[tokio::test]
async fn test_provider_failure_without_details_sends_null() {
    let provider = Arc::new(MockChatProvider::failing("upstream down", None));
    let body = json!({"messages": [{"role": "user", "content": "Hi"}]});

    let (status, value) = send(app_with(provider), post_chat(body.to_string())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(value, json!({"error": "upstream down", "details": null}));
}

#[tokio::test]
async fn test_missing_credential_fails_each_request() {
    let mut config = ContainerConfig::new(ProviderKind::OpenRouter);
    config.missing_credential = MissingCredentialPolicy::PerRequest;
    let app = routes(Arc::new(Container::new(config).unwrap()));

    let body = json!({"messages": [{"role": "user", "content": "Hi"}]});
    let (status, value) = send(app, post_chat(body.to_string())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        value,
        json!({"error": "Server configuration error: API key not set."})
    );
}

#[tokio::test]
async fn test_responses_carry_cors_headers() {
    let app = app_with(Arc::new(MockChatProvider::new()));
    let body = json!({"messages": [{"role": "user", "content": "Hi"}]});

    let resp = app.oneshot(post_chat(body.to_string())).await.unwrap();

    let headers = resp.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "POST, OPTIONS");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type");
}

#[tokio::test]
async fn test_preflight() {
    let app = app_with(Arc::new(MockChatProvider::new()));
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri(CHAT_PATH)
        .body(Body::empty())
        .unwrap();

    let resp = app.oneshot(request).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert_eq!(resp.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}

#[tokio::test]
async fn test_health_names_provider() {
    let app = app_with(Arc::new(MockChatProvider::new()));
    let request = Request::builder()
        .uri(HEALTH_PATH)
        .body(Body::empty())
        .unwrap();

    let (status, value) = send(app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(value, json!({"status": "ok", "provider": "mock"}));
}

#[tokio::test]
async fn test_get_on_chat_path_is_not_allowed() {
    let app = app_with(Arc::new(MockChatProvider::new()));
    let request = Request::builder()
        .uri(CHAT_PATH)
        .body(Body::empty())
        .unwrap();

    let resp = app.oneshot(request).await.unwrap();
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_alternating_provider_rejects_trailing_assistant() {
    use std::time::Duration;

    use chat_relay::GeminiClient;

    // Unroutable upstream: the request must fail before any network call.
    let gemini = GeminiClient::new(
        "k",
        "gemini-1.5-flash-latest",
        "http://127.0.0.1:1",
        Duration::from_secs(1),
    );
    let app = app_with(Arc::new(gemini));
    let body = json!({
        "messages": [
            {"role": "user", "content": "Hi"},
            {"role": "assistant", "content": "Hello"}
        ]
    });

    let (status, value) = send(app, post_chat(body.to_string())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        value,
        json!({"error": "Invalid conversation history format: Missing latest user message."})
    );
}

#[tokio::test]
async fn test_missing_credential_is_reported_before_body_validation() {
    let mut config = ContainerConfig::new(ProviderKind::Gemini);
    config.missing_credential = MissingCredentialPolicy::PerRequest;
    let container = Arc::new(Container::new(config).unwrap());

    for body in [json!({"messages": []}).to_string(), "{not json".to_string()] {
        let (status, value) = send(routes(container.clone()), post_chat(body)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            value,
            json!({"error": "Server configuration error: API key not set."})
        );
    }
}

#[tokio::test]
async fn test_missing_content_type_is_named() {
    let provider = Arc::new(MockChatProvider::new());
    let body = json!({"messages": [{"role": "user", "content": "Hi"}]});
    let request = Request::builder()
        .method(Method::POST)
        .uri(CHAT_PATH)
        .body(Body::from(body.to_string()))
        .unwrap();

    let (status, value) = send(app_with(provider.clone()), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        value["error"],
        json!("Expected request with `Content-Type: application/json`.")
    );
    assert_eq!(provider.call_count(), 0);
}
