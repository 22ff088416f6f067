//! HTTP server layer
//!
//! Axum server with:
//! - CORS for the configured front-end origin
//! - Request tracing
//! - Graceful shutdown
//! - JSON error envelopes for every failure

pub mod server;
pub mod error;
pub mod extractors;
pub mod routes;

pub use server::{build_router, run_server, ServerConfig, ServerError};
pub use error::ApiError;
