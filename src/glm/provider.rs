//! GLM API Provider
//!
//! Component responsible for communicating with the Zhipu chat-completions
//! API. Explicitly constructed and passed into the handlers; owns its HTTP
//! client and credential.

use reqwest::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};

use crate::http_client::{ProxyConfig, build_client};
use crate::model::config::Config;

use super::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ToolDescriptor};

/// GLM API Provider
pub struct GlmProvider {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GlmProvider {
    /// Create a new GlmProvider instance
    ///
    /// # Arguments
    /// * `config` - Application configuration (base URL, model, timeout, proxy)
    /// * `api_key` - Resolved API key (config file or `ZHIPUAPI` env)
    pub fn new(config: &Config, api_key: impl Into<String>) -> anyhow::Result<Self> {
        let proxy = config.proxy_url.as_ref().map(|url| {
            let mut proxy = ProxyConfig::new(url);
            if let (Some(username), Some(password)) =
                (&config.proxy_username, &config.proxy_password)
            {
                proxy = proxy.with_auth(username, password);
            }
            proxy
        });

        let client = build_client(proxy.as_ref(), config.request_timeout_secs)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: config.model.clone(),
        })
    }

    /// Chat completions endpoint URL
    pub fn chat_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn build_headers(&self) -> anyhow::Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.api_key))
                .map_err(|_| anyhow::anyhow!("API key contains invalid header characters"))?,
        );
        Ok(headers)
    }

    /// Send a chat-completions request and return the assistant message
    ///
    /// When `tools` is `Some`, the registry is advertised with
    /// `tool_choice: "auto"`. Non-2xx statuses, network failures and
    /// timeouts all surface as provider errors; no retry is attempted.
    pub async fn chat(
        &self,
        messages: Vec<ChatMessage>,
        tools: Option<&[ToolDescriptor]>,
    ) -> anyhow::Result<ChatMessage> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages,
            tool_choice: tools.map(|_| "auto".to_string()),
            tools: tools.map(|t| t.to_vec()),
        };

        let response = self
            .client
            .post(self.chat_url())
            .headers(self.build_headers()?)
            .json(&request)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("GLM API request failed to send: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("GLM API request failed: {} {}", status, body);
        }

        let body: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| anyhow::anyhow!("GLM API response parsing failed: {}", e))?;

        let choice = body
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("GLM API response contains no choices"))?;

        tracing::debug!(
            finish_reason = choice.finish_reason.as_deref().unwrap_or("unknown"),
            "GLM API request succeeded"
        );

        Ok(choice.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_url() {
        let config = Config::default();
        let provider = GlmProvider::new(&config, "test-key").unwrap();
        assert_eq!(
            provider.chat_url(),
            "https://open.bigmodel.cn/api/paas/v4/chat/completions"
        );
    }

    #[test]
    fn test_chat_url_trims_trailing_slash() {
        let mut config = Config::default();
        config.base_url = "http://127.0.0.1:9000/".to_string();
        let provider = GlmProvider::new(&config, "test-key").unwrap();
        assert_eq!(provider.chat_url(), "http://127.0.0.1:9000/chat/completions");
    }

    #[test]
    fn test_build_headers() {
        let config = Config::default();
        let provider = GlmProvider::new(&config, "secret").unwrap();
        let headers = provider.build_headers().unwrap();
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer secret");
    }
}
