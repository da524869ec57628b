//! HTTP facade shared state and middleware

use std::sync::Arc;

use crate::glm::provider::GlmProvider;

/// Application shared state
///
/// Only the provider; the tool registry is process-wide and read-only, so it
/// is not part of the state.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<GlmProvider>,
}

impl AppState {
    pub fn new(provider: GlmProvider) -> Self {
        Self {
            provider: Arc::new(provider),
        }
    }
}

/// CORS middleware layer
///
/// Allows all origins, methods and headers so a browser front-end can call
/// the endpoints directly.
pub fn cors_layer() -> tower_http::cors::CorsLayer {
    use tower_http::cors::{Any, CorsLayer};

    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
