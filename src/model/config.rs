use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Model name sent to the provider
    #[serde(default = "default_model")]
    pub model: String,

    /// Provider API base URL (chat-completions is appended)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Provider API key; the `ZHIPUAPI` environment variable is used when
    /// this is not set
    #[serde(default)]
    pub api_key: Option<String>,

    /// Outbound request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// HTTP proxy URL (optional)
    /// Supported formats: http://host:port, https://host:port, socks5://host:port
    #[serde(default)]
    pub proxy_url: Option<String>,

    /// Proxy authentication username (optional)
    #[serde(default)]
    pub proxy_username: Option<String>,

    /// Proxy authentication password (optional)
    #[serde(default)]
    pub proxy_password: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_model() -> String {
    "glm-4-plus".to_string()
}

fn default_base_url() -> String {
    "https://open.bigmodel.cn/api/paas/v4".to_string()
}

fn default_request_timeout_secs() -> u64 {
    120
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            model: default_model(),
            base_url: default_base_url(),
            api_key: None,
            request_timeout_secs: default_request_timeout_secs(),
            proxy_url: None,
            proxy_username: None,
            proxy_password: None,
        }
    }
}

impl Config {
    /// Get default config file path
    pub fn default_config_path() -> &'static str {
        "config.json"
    }

    /// Load configuration from file
    ///
    /// Returns the defaults when the file does not exist.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Resolve the provider API key
    ///
    /// The config file value takes precedence; otherwise the `ZHIPUAPI`
    /// environment variable supplies it. Blank values count as unset.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| {
                std::env::var("ZHIPUAPI")
                    .ok()
                    .filter(|k| !k.trim().is_empty())
            })
    }
}
