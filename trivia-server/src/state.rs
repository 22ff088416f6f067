//! Application state shared across handlers

use std::sync::Arc;

use crate::db::{SharedStore, TriviaStore};
use crate::quiz::QuizSelector;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: SharedStore,
    quiz: QuizSelector,
}

impl AppState {
    pub fn new(store: SharedStore, quiz: QuizSelector) -> Self {
        Self {
            inner: Arc::new(AppStateInner { store, quiz }),
        }
    }

    pub fn store(&self) -> &dyn TriviaStore {
        self.inner.store.as_ref()
    }

    pub fn quiz(&self) -> &QuizSelector {
        &self.inner.quiz
    }
}
