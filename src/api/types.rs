//! HTTP facade request/response payloads

use serde::{Deserialize, Serialize};

/// Body for `POST /api/chat` and `POST /api/calculate`
///
/// The field is optional so that a missing `message` produces our own 400
/// payload instead of an extractor rejection.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: Option<String>,
}

/// Body for `POST /calculate`
#[derive(Debug, Deserialize)]
pub struct CalculateRequest {
    pub expression: Option<String>,
}

/// Success payload for the chat endpoints
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

/// Success payload for `POST /calculate`
#[derive(Debug, Serialize)]
pub struct CalculateResponse {
    pub result: String,
}

/// Error payload: `{"error": "..."}`
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
