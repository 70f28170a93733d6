//! Shared helpers: a stub upstream LLM server bound to an ephemeral port.

use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;

/// One request received by the stub.
#[derive(Debug, Clone)]
pub struct Captured {
    pub headers: HeaderMap,
    pub body: Value,
}

#[derive(Clone)]
struct StubState {
    status: StatusCode,
    response: Value,
    captured: Arc<Mutex<Vec<Captured>>>,
}

pub struct StubUpstream {
    pub base_url: String,
    captured: Arc<Mutex<Vec<Captured>>>,
}

impl StubUpstream {
    /// Serve `response` with `status` for every POST to `path`.
    pub async fn start(path: &str, status: StatusCode, response: Value) -> Self {
        let captured = Arc::new(Mutex::new(Vec::new()));
        let state = StubState {
            status,
            response,
            captured: captured.clone(),
        };
        let app = Router::new().route(path, post(handle)).with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            captured,
        }
    }

    pub fn requests(&self) -> Vec<Captured> {
        self.captured.lock().unwrap().clone()
    }
}

async fn handle(
    State(state): State<StubState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state
        .captured
        .lock()
        .unwrap()
        .push(Captured { headers, body });
    (state.status, Json(state.response.clone()))
}
