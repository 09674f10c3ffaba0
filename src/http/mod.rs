//! Axum-based HTTP server.
//!
//! Router, handlers, shared state, and error responses for the REST API
//! consumed by the front end.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use config::ServerConfig;
pub use error::AppError;
pub use router::create_router;
pub use state::AppState;
