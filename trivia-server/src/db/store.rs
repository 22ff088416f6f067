//! Data-access trait shared by every store implementation

use std::sync::Arc;

use async_trait::async_trait;

use crate::models::{Category, NewQuestion, Question};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// A write violated a storage constraint (e.g. unknown category)
    #[error("constraint violated: {0}")]
    Constraint(String),

    #[error("store unavailable")]
    Unavailable,
}

/// Access to persisted questions and categories.
///
/// Every listing is ordered by ascending id.
#[async_trait]
pub trait TriviaStore: Send + Sync {
    async fn list_categories(&self) -> Result<Vec<Category>, DbError>;

    async fn get_category(&self, id: i64) -> Result<Option<Category>, DbError>;

    async fn list_questions(&self) -> Result<Vec<Question>, DbError>;

    async fn questions_in_category(&self, category: i64) -> Result<Vec<Question>, DbError>;

    /// Questions whose text contains `term`, ignoring case.
    async fn search_questions(&self, term: &str) -> Result<Vec<Question>, DbError>;

    async fn get_question(&self, id: i64) -> Result<Option<Question>, DbError>;

    /// Persist a question and return it with its assigned id.
    async fn insert_question(&self, question: NewQuestion) -> Result<Question, DbError>;

    /// Delete a question, returning whether a row was removed.
    async fn delete_question(&self, id: i64) -> Result<bool, DbError>;

    async fn count_questions(&self) -> Result<i64, DbError>;
}

/// Store handle held in application state
pub type SharedStore = Arc<dyn TriviaStore>;
