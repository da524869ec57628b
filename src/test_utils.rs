//! Scripted mock GLM server for orchestrator and facade tests

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::net::TcpListener;

#[derive(Clone)]
struct MockState {
    responses: Arc<Mutex<VecDeque<Value>>>,
    requests: Arc<Mutex<Vec<Value>>>,
}

async fn chat_completions(
    State(state): State<MockState>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    state.requests.lock().unwrap().push(payload);
    match state.responses.lock().unwrap().pop_front() {
        Some(response) => Ok(Json(response)),
        None => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// Mock chat-completions server on an ephemeral port
///
/// Serves the scripted responses in order and records every request body.
/// Once the script is exhausted it answers 500, which doubles as the
/// provider-failure scenario.
pub struct MockGlmServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<Value>>>,
}

impl MockGlmServer {
    pub async fn start(responses: Vec<Value>) -> Self {
        let state = MockState {
            responses: Arc::new(Mutex::new(VecDeque::from(responses))),
            requests: Arc::new(Mutex::new(Vec::new())),
        };
        let requests = state.requests.clone();

        let app = Router::new()
            .route("/chat/completions", post(chat_completions))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, requests }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn recorded_requests(&self) -> Vec<Value> {
        self.requests.lock().unwrap().clone()
    }
}

/// A plain-text assistant response body
pub fn text_response(text: &str) -> Value {
    json!({
        "choices": [{
            "finish_reason": "stop",
            "message": {"role": "assistant", "content": text}
        }]
    })
}

/// An assistant response requesting a single tool invocation
pub fn tool_call_response(id: &str, name: &str, arguments: &str) -> Value {
    json!({
        "choices": [{
            "finish_reason": "tool_calls",
            "message": {
                "role": "assistant",
                "content": null,
                "tool_calls": [{
                    "id": id,
                    "type": "function",
                    "function": {"name": name, "arguments": arguments}
                }]
            }
        }]
    })
}
