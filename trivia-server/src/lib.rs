//! trivia-server: HTTP API for a trivia game
//!
//! Serves categories and paginated questions, question search, creation and
//! deletion, and random quiz rounds over a PostgreSQL (or in-memory) store.

pub mod db;
pub mod http;
pub mod models;
pub mod quiz;
pub mod state;

pub use db::{DbError, MemoryStore, PgStore, SharedStore, TriviaStore};
pub use http::{build_router, run_server, ApiError, ServerConfig, ServerError};
pub use quiz::QuizSelector;
pub use state::AppState;
