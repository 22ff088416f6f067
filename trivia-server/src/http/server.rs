//! Axum server setup
//!
//! Server skeleton with:
//! - CORS restricted to the front-end origin by default
//! - Tracing middleware
//! - Envelope-shaped 404/405 fallbacks
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::net::SocketAddr;

use axum::http::{header, HeaderValue, Method, Uri};
use axum::middleware::map_response;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::error::{envelope_method_not_allowed, ApiError};
use super::routes;
use crate::db::SharedStore;
use crate::quiz::QuizSelector;
use crate::state::AppState;

/// Front-end origin allowed by default
pub const DEFAULT_FRONTEND_ORIGIN: &str = "http://localhost:3000";

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:5000)
    pub bind_addr: SocketAddr,

    /// Origin of the front-end allowed to call the API with credentials
    pub frontend_origin: String,

    /// Allow any origin, without credentials (default: false)
    ///
    /// WARNING: only for development.
    pub cors_permissive: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            frontend_origin: DEFAULT_FRONTEND_ORIGIN.to_string(),
            cors_permissive: false,
        }
    }
}

/// Build the CORS layer for the configured front-end.
pub fn cors_layer(config: &ServerConfig) -> Result<CorsLayer, ServerError> {
    if config.cors_permissive {
        tracing::warn!("CORS: Permissive mode enabled - all origins allowed");
        return Ok(CorsLayer::permissive());
    }

    let origin = HeaderValue::from_str(&config.frontend_origin)
        .map_err(|_| ServerError::InvalidOrigin(config.frontend_origin.clone()))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true))
}

/// Unknown paths get the same envelope as every other 404.
async fn route_not_found(uri: Uri) -> ApiError {
    ApiError::not_found("route", uri.path())
}

/// Build the application router with all routes.
pub fn build_router(state: AppState, config: &ServerConfig) -> Result<Router, ServerError> {
    let cors = cors_layer(config)?;

    Ok(Router::new()
        .merge(routes::health::router())
        .merge(routes::categories::router())
        .merge(routes::questions::router())
        .merge(routes::quizzes::router())
        .fallback(route_not_found)
        .layer(map_response(envelope_method_not_allowed))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// Run the HTTP server until a shutdown signal arrives.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(&database_url).await?;
/// let store = Arc::new(PgStore::new(pool));
/// run_server(store, ServerConfig::default()).await?;
/// ```
pub async fn run_server(store: SharedStore, config: ServerConfig) -> Result<(), ServerError> {
    let state = AppState::new(store, QuizSelector::from_entropy());
    let app = build_router(state, &config)?;

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!(
        origin = %config.frontend_origin,
        "Server listening on {}",
        config.bind_addr
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid front-end origin: {0}")]
    InvalidOrigin(String),
}
