//! Database layer - store trait, connection pool and implementations
//!
//! Handlers only see [`TriviaStore`]. Two implementations exist:
//!
//! - [`PgStore`]: PostgreSQL through a sqlx pool
//! - [`MemoryStore`]: in-process maps, for tests and demo runs

pub mod memory;
pub mod migrations;
pub mod pool;
pub mod postgres;
pub mod store;

pub use memory::MemoryStore;
pub use pool::create_pool;
pub use postgres::PgStore;
pub use store::{DbError, SharedStore, TriviaStore};
