//! Test utilities for spendcat-core
//!
//! This module provides a mock Messages API server so the HTTP backend and the
//! full categorization pipeline can be exercised without network access.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Json, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::Deserialize;
use tokio::sync::oneshot;

/// A request received by the mock server
#[derive(Debug, Clone, Deserialize)]
pub struct RecordedRequest {
    pub model: String,
    pub max_tokens: u32,
    pub messages: Vec<RecordedMessage>,
    #[serde(default)]
    pub system: Option<String>,
    #[serde(skip)]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecordedMessage {
    pub role: String,
    pub content: String,
}

#[derive(Clone)]
enum Reply {
    Text(String),
    Failure(StatusCode, String),
}

#[derive(Clone)]
struct MockState {
    reply: Reply,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// Mock Messages API server for testing
pub struct MockAnthropicServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockAnthropicServer {
    /// Start a server that answers every request with `reply` as its text
    pub async fn start(reply: &str) -> Self {
        Self::spawn(Reply::Text(reply.to_string())).await
    }

    /// Start a server that answers every request with an error status
    pub async fn failing(status: u16, body: &str) -> Self {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Self::spawn(Reply::Failure(status, body.to_string())).await
    }

    async fn spawn(reply: Reply) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            reply,
            requests: requests.clone(),
        };
        let app = Router::new()
            .route("/v1/messages", post(handle_messages))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            requests,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Get the base URL for this mock server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockAnthropicServer {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn handle_messages(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(mut request): Json<RecordedRequest>,
) -> Response {
    request.api_key = headers
        .get("x-api-key")
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    state.requests.lock().unwrap().push(request.clone());

    match state.reply {
        Reply::Text(text) => Json(serde_json::json!({
            "id": "msg_mock",
            "type": "message",
            "role": "assistant",
            "model": request.model,
            "content": [{"type": "text", "text": text}],
            "stop_reason": "end_turn",
            "stop_sequence": null,
            "usage": {"input_tokens": 100, "output_tokens": 20}
        }))
        .into_response(),
        Reply::Failure(status, body) => (status, body).into_response(),
    }
}
