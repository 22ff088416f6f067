//! In-memory store
//!
//! Mirrors the PostgreSQL schema rules: ids are assigned from a counter that
//! never reuses a value, and questions must reference an existing category.
//! Can be switched offline to simulate an unreachable database.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::models::{Category, NewQuestion, Question};

use super::{DbError, TriviaStore};

#[derive(Default)]
struct Tables {
    categories: BTreeMap<i64, Category>,
    questions: BTreeMap<i64, Question>,
    last_question_id: i64,
    offline: bool,
}

/// Store keeping all rows in process memory
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    /// Empty store with no categories.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store preloaded with the default categories.
    pub fn with_default_categories() -> Self {
        let store = Self::new();
        for category in Category::defaults() {
            store.add_category(category);
        }
        store
    }

    /// Add or replace a category.
    pub fn add_category(&self, category: Category) {
        self.lock().categories.insert(category.id, category);
    }

    /// Simulate the database becoming unreachable (or reachable again).
    pub fn set_offline(&self, offline: bool) {
        self.lock().offline = offline;
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        // A panic while holding the lock cannot leave the maps half-written.
        self.tables.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn online(&self) -> Result<MutexGuard<'_, Tables>, DbError> {
        let tables = self.lock();
        if tables.offline {
            return Err(DbError::Unavailable);
        }
        Ok(tables)
    }

    fn filtered<F>(&self, keep: F) -> Result<Vec<Question>, DbError>
    where
        F: Fn(&Question) -> bool,
    {
        let tables = self.online()?;
        Ok(tables
            .questions
            .values()
            .filter(|q| keep(q))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl TriviaStore for MemoryStore {
    async fn list_categories(&self) -> Result<Vec<Category>, DbError> {
        Ok(self.online()?.categories.values().cloned().collect())
    }

    async fn get_category(&self, id: i64) -> Result<Option<Category>, DbError> {
        Ok(self.online()?.categories.get(&id).cloned())
    }

    async fn list_questions(&self) -> Result<Vec<Question>, DbError> {
        self.filtered(|_| true)
    }

    async fn questions_in_category(&self, category: i64) -> Result<Vec<Question>, DbError> {
        self.filtered(|q| q.category == category)
    }

    async fn search_questions(&self, term: &str) -> Result<Vec<Question>, DbError> {
        self.filtered(|q| q.matches(term))
    }

    async fn get_question(&self, id: i64) -> Result<Option<Question>, DbError> {
        Ok(self.online()?.questions.get(&id).cloned())
    }

    async fn insert_question(&self, question: NewQuestion) -> Result<Question, DbError> {
        let mut tables = self.online()?;
        if !tables.categories.contains_key(&question.category()) {
            return Err(DbError::Constraint(format!(
                "unknown category {}",
                question.category()
            )));
        }

        tables.last_question_id += 1;
        let stored = question.with_id(tables.last_question_id);
        tables.questions.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn delete_question(&self, id: i64) -> Result<bool, DbError> {
        Ok(self.online()?.questions.remove(&id).is_some())
    }

    async fn count_questions(&self) -> Result<i64, DbError> {
        let tables = self.online()?;
        Ok(i64::try_from(tables.questions.len()).unwrap_or(i64::MAX))
    }
}
