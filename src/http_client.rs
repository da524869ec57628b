//! HTTP Client builder module
//!
//! Provides unified HTTP Client building functionality with proxy support

use reqwest::{Client, Proxy};
use std::time::Duration;

/// Proxy configuration
#[derive(Debug, Clone, Default)]
pub struct ProxyConfig {
    /// Proxy URL, supports http/https/socks5
    pub url: String,
    /// Proxy authentication username
    pub username: Option<String>,
    /// Proxy authentication password
    pub password: Option<String>,
}

impl ProxyConfig {
    /// Create proxy configuration from URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            username: None,
            password: None,
        }
    }

    /// Set authentication credentials
    pub fn with_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }
}

/// Build HTTP Client
///
/// # Arguments
/// * `proxy` - Optional proxy configuration
/// * `timeout_secs` - Timeout in seconds
pub fn build_client(proxy: Option<&ProxyConfig>, timeout_secs: u64) -> anyhow::Result<Client> {
    let mut builder = Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .use_rustls_tls();

    if let Some(proxy_config) = proxy {
        let mut proxy = Proxy::all(&proxy_config.url)?;

        if let (Some(username), Some(password)) = (&proxy_config.username, &proxy_config.password) {
            proxy = proxy.basic_auth(username, password);
        }

        builder = builder.proxy(proxy);
        tracing::debug!("HTTP Client using proxy: {}", proxy_config.url);
    }

    Ok(builder.build()?)
}
