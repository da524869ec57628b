//! HTTP facade 路由配置

use axum::{Router, routing::post};

use super::handlers::{api_calculate, api_chat, calculate};
use super::middleware::{AppState, cors_layer};

/// 创建 HTTP 路由
///
/// # 端点
/// - `POST /api/chat` - 普通对话（不启用工具）
/// - `POST /api/calculate` - 工具增强对话（启用计算器工具）
/// - `POST /calculate` - 直接计算表达式（不经过模型）
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/chat", post(api_chat))
        .route("/api/calculate", post(api_calculate))
        .route("/calculate", post(calculate))
        .layer(cors_layer())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glm::provider::GlmProvider;
    use crate::model::config::Config;
    use crate::test_utils::{MockGlmServer, text_response, tool_call_response};

    async fn serve(state: AppState) -> String {
        let app = create_router(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn state_for(mock: &MockGlmServer) -> AppState {
        let mut config = Config::default();
        config.base_url = mock.base_url();
        AppState::new(GlmProvider::new(&config, "test-key").unwrap())
    }

    #[tokio::test]
    async fn test_calculate_endpoint_end_to_end() {
        let mock = MockGlmServer::start(vec![]).await;
        let base = serve(state_for(&mock)).await;
        let client = reqwest::Client::new();

        let response = client
            .post(format!("{}/calculate", base))
            .json(&serde_json::json!({"expression": "1999*2048"}))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 200);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["result"], "4094152");

        // Empty body object is missing the required field
        let response = client
            .post(format!("{}/calculate", base))
            .json(&serde_json::json!({}))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 400);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["error"], "缺少表达式");
    }

    #[tokio::test]
    async fn test_api_calculate_endpoint_runs_tool_loop() {
        let mock = MockGlmServer::start(vec![
            tool_call_response("call_1", "calculator", r#"{"expression": "2^2"}"#),
            text_response("2^2 等于 4。"),
        ])
        .await;
        let base = serve(state_for(&mock)).await;

        let response = reqwest::Client::new()
            .post(format!("{}/api/calculate", base))
            .json(&serde_json::json!({"message": "计算2^2"}))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 200);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["response"], "2^2 等于 4。");

        let requests = mock.recorded_requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(
            requests[1]["messages"].as_array().unwrap().last().unwrap()["content"],
            "4"
        );
    }

    #[tokio::test]
    async fn test_api_chat_provider_failure_returns_500() {
        // Unscripted mock answers 500, surfaced as a provider error
        let mock = MockGlmServer::start(vec![]).await;
        let base = serve(state_for(&mock)).await;

        let response = reqwest::Client::new()
            .post(format!("{}/api/chat", base))
            .json(&serde_json::json!({"message": "你好"}))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 500);
        let body: serde_json::Value = response.json().await.unwrap();
        assert!(body["error"].as_str().unwrap().contains("GLM API"));
    }

    #[tokio::test]
    async fn test_api_chat_missing_message_returns_400() {
        let mock = MockGlmServer::start(vec![]).await;
        let base = serve(state_for(&mock)).await;

        let response = reqwest::Client::new()
            .post(format!("{}/api/chat", base))
            .json(&serde_json::json!({}))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 400);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["error"], "缺少消息内容");
    }
}
