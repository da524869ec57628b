//! HTTP facade Handler 函数

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

use crate::calculator;
use crate::orchestrator;

use super::middleware::AppState;
use super::types::{CalculateRequest, CalculateResponse, ChatRequest, ChatResponse, ErrorResponse};

/// POST /api/chat
///
/// Plain conversation, tools disabled. `{message}` → `{response}`,
/// provider failures → 500 `{error}`.
pub async fn api_chat(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Response {
    let Some(message) = payload.message else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("缺少消息内容")),
        )
            .into_response();
    };

    tracing::info!(message_len = message.len(), "Received POST /api/chat request");

    match orchestrator::converse(&state.provider, &message, Vec::new(), false).await {
        Ok((reply, _)) => Json(ChatResponse { response: reply }).into_response(),
        Err(e) => {
            tracing::error!("Chat request failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(e.to_string())),
            )
                .into_response()
        }
    }
}

/// POST /api/calculate
///
/// Tool-augmented conversation: the model may invoke the calculator before
/// answering. Body is a natural-language prompt, not a raw expression.
pub async fn api_calculate(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Response {
    let Some(message) = payload.message else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("缺少消息内容")),
        )
            .into_response();
    };

    tracing::info!(
        message_len = message.len(),
        "Received POST /api/calculate request"
    );

    match orchestrator::converse(&state.provider, &message, Vec::new(), true).await {
        Ok((reply, _)) => Json(ChatResponse { response: reply }).into_response(),
        Err(e) => {
            tracing::error!("Calculate request failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(e.to_string())),
            )
                .into_response()
        }
    }
}

/// POST /calculate
///
/// Direct expression evaluation, no model involved. `{expression}` →
/// `{result}`, missing field or evaluation failure → 400 `{error}`.
pub async fn calculate(Json(payload): Json<CalculateRequest>) -> Response {
    let Some(expression) = payload.expression else {
        tracing::warn!("Missing expression in /calculate request");
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("缺少表达式")),
        )
            .into_response();
    };

    tracing::info!(expression = %expression, "Received expression");

    match calculator::evaluate(&expression) {
        Ok(value) => {
            let result = calculator::format_number(value);
            tracing::info!(result = %result, "Calculated result");
            Json(CalculateResponse { result }).into_response()
        }
        Err(e) => {
            tracing::error!("Calculation error: {}", e);
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(e.to_string())),
            )
                .into_response()
        }
    }
}
