mod api;
mod calculator;
mod glm;
mod http_client;
mod model;
mod orchestrator;
mod tools;

#[cfg(test)]
mod test_utils;

use clap::Parser;
use glm::provider::GlmProvider;
use model::arg::Args;
use model::config::Config;

#[tokio::main]
async fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Load .env before resolving the API key
    if dotenvy::dotenv().is_ok() {
        tracing::debug!("Loaded environment from .env");
    }

    // Load configuration
    let config_path = args
        .config
        .unwrap_or_else(|| Config::default_config_path().to_string());
    let config = Config::load(&config_path).unwrap_or_else(|e| {
        tracing::error!("Failed to load config: {}", e);
        std::process::exit(1);
    });

    // Resolve API key (config file or ZHIPUAPI env), fail fast when unset
    let api_key = config.resolve_api_key().unwrap_or_else(|| {
        tracing::error!("apiKey not set in config file and ZHIPUAPI not set in environment");
        std::process::exit(1);
    });

    if config.proxy_url.is_some() {
        tracing::info!("HTTP proxy configured: {}", config.proxy_url.as_ref().unwrap());
    }

    // Create provider and build router
    let provider = GlmProvider::new(&config, api_key).unwrap_or_else(|e| {
        tracing::error!("Failed to create GLM provider: {}", e);
        std::process::exit(1);
    });
    let app = api::create_router(api::AppState::new(provider));

    // Start server
    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting GLM chat service: {}", addr);
    tracing::info!("Model: {}", config.model);
    tracing::info!("Available APIs:");
    tracing::info!("  POST /api/chat");
    tracing::info!("  POST /api/calculate");
    tracing::info!("  POST /calculate");

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
