//! HTTP facade module
//!
//! Exposes the chat orchestrator and the expression evaluator as network
//! endpoints for a front-end to call.
//!
//! # Endpoints
//! - `POST /api/chat` - plain conversation, tools disabled
//! - `POST /api/calculate` - tool-augmented conversation
//! - `POST /calculate` - direct expression evaluation

mod handlers;
mod middleware;
mod router;
pub mod types;

pub use middleware::AppState;
pub use router::create_router;
