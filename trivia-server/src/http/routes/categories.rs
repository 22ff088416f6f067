//! Category endpoints

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::http::error::ApiError;
use crate::http::extractors::{Page, ValidId};
use crate::models::{category_map, CategoryMap, Question};
use crate::state::AppState;

/// Category listing response
#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub success: bool,
    pub categories: CategoryMap,
    pub total_categories: usize,
}

/// One page of questions with an optional category label.
///
/// Shared by the category listing and the search variant of POST /questions.
#[derive(Debug, Serialize)]
pub struct QuestionPageResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub current_category: Option<String>,
}

/// GET /categories
async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<CategoriesResponse>, ApiError> {
    let categories = state.store().list_categories().await?;
    let total_categories = categories.len();

    Ok(Json(CategoriesResponse {
        success: true,
        categories: category_map(categories),
        total_categories,
    }))
}

/// GET /categories/{id}/questions - questions in one category
async fn list_category_questions(
    State(state): State<AppState>,
    ValidId(id): ValidId,
    Page(page): Page,
) -> Result<Json<QuestionPageResponse>, ApiError> {
    let store = state.store();
    let category = store
        .get_category(id)
        .await?
        .ok_or_else(|| ApiError::not_found("category", id))?;

    let questions = store.questions_in_category(id).await?;

    Ok(Json(QuestionPageResponse {
        success: true,
        questions: page.paginate(&questions),
        total_questions: questions.len(),
        current_category: Some(category.kind),
    }))
}

/// Category routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories))
        .route("/categories/{id}/questions", get(list_category_questions))
}
