use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::header::{
    HeaderValue, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN,
};
use axum::http::StatusCode;
use axum::middleware::map_response;
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::Value;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use super::controller::ChatController;
use super::dto::{ChatReply, HealthStatus};
use super::error::{ApiError, INVALID_JSON_MESSAGE, MISSING_CONTENT_TYPE_MESSAGE};
use super::Container;

/// Chat relay endpoint path.
pub const CHAT_PATH: &str = "/api/chat";
/// Health endpoint path.
pub const HEALTH_PATH: &str = "/health";

/// Build the relay's HTTP routes over a shared container.
pub fn routes(container: Arc<Container>) -> Router {
    Router::new()
        .route(CHAT_PATH, post(chat).options(preflight))
        .route(HEALTH_PATH, get(health))
        .layer(map_response(cors_headers))
        .with_state(container)
}

async fn chat(
    State(container): State<Arc<Container>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ChatReply>, ApiError> {
    let request_id = Uuid::new_v4();

    async move {
        info!("Received request at {}", CHAT_PATH);

        let controller = ChatController::new(&container);
        controller.ensure_configured()?;

        let Json(payload) = body.map_err(|e| {
            warn!("Failed to parse request body: {}", e);
            let message = match e {
                JsonRejection::MissingJsonContentType(_) => MISSING_CONTENT_TYPE_MESSAGE,
                _ => INVALID_JSON_MESSAGE,
            };
            ApiError::BadRequest(message.to_string())
        })?;

        let result = controller.chat(payload).await;
        if let Err(e) = &result {
            warn!("Chat request failed with {}: {}", e.status(), e);
        }
        result.map(Json)
    }
    .instrument(info_span!("chat", %request_id))
    .await
}

async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn health(State(container): State<Arc<Container>>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_string(),
        provider: container.provider_name().to_string(),
    })
}

async fn cors_headers(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("POST, OPTIONS"),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    response
}
