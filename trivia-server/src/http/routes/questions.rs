//! Question endpoints
//!
//! POST /questions is two operations on one route: a body carrying
//! `searchTerm` is a search, any other object is a new question.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::{delete, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::categories::QuestionPageResponse;
use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, Page, ValidId};
use crate::models::{category_map, lenient_i64, CategoryMap, NewQuestion, Pagination, Question};
use crate::state::AppState;

/// Body field that turns POST /questions into a search
const SEARCH_TERM_FIELD: &str = "searchTerm";

/// Create question request
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateQuestionRequest {
    pub question: String,
    pub answer: String,
    #[serde(deserialize_with = "lenient_i64")]
    pub category: i64,
    #[serde(deserialize_with = "lenient_i64")]
    pub difficulty: i64,
}

/// Full question listing response
#[derive(Debug, Serialize)]
pub struct QuestionListResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub categories: CategoryMap,
    pub current_category: Option<String>,
}

/// Created question response
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub success: bool,
    pub question_id: i64,
    pub total_questions: i64,
}

/// Deleted question response
#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub success: bool,
    pub deleted_question_id: i64,
    pub questions: Vec<Question>,
    pub total_questions: usize,
}

/// GET /questions - one page of all questions
///
/// An empty page is a 404, including when there are no questions at all.
async fn list_questions(
    State(state): State<AppState>,
    Page(page): Page,
) -> Result<Json<QuestionListResponse>, ApiError> {
    let store = state.store();
    let questions = store.list_questions().await?;

    let items = page.paginate(&questions);
    if items.is_empty() {
        return Err(ApiError::not_found("questions page", page.page));
    }

    let categories = category_map(store.list_categories().await?);

    Ok(Json(QuestionListResponse {
        success: true,
        questions: items,
        total_questions: questions.len(),
        categories,
        current_category: None,
    }))
}

/// POST /questions - search or create, depending on the body
async fn post_questions(
    State(state): State<AppState>,
    Page(page): Page,
    JsonBody(body): JsonBody<Value>,
) -> Result<Response, ApiError> {
    let Value::Object(mut fields) = body else {
        return Err(ApiError::BadRequest {
            reason: "request body must be a JSON object".into(),
        });
    };

    match fields.remove(SEARCH_TERM_FIELD) {
        Some(term) => Ok(search_questions(&state, page, term).await?.into_response()),
        None => Ok(create_question(&state, fields).await?.into_response()),
    }
}

/// Case-insensitive substring search. No matches is still a success.
async fn search_questions(
    state: &AppState,
    page: Pagination,
    term: Value,
) -> Result<Json<QuestionPageResponse>, ApiError> {
    let Value::String(term) = term else {
        return Err(ApiError::unprocessable("searchTerm must be a string"));
    };

    let matches = state.store().search_questions(&term).await?;
    tracing::debug!(term = %term, matches = matches.len(), "question search");

    Ok(Json(QuestionPageResponse {
        success: true,
        questions: page.paginate(&matches),
        total_questions: matches.len(),
        current_category: None,
    }))
}

/// Every failure while building or storing the question is a 422.
async fn create_question(
    state: &AppState,
    fields: Map<String, Value>,
) -> Result<Json<CreatedResponse>, ApiError> {
    let req: CreateQuestionRequest =
        serde_json::from_value(Value::Object(fields)).map_err(ApiError::unprocessable)?;
    let new_question = NewQuestion::new(&req.question, &req.answer, req.category, req.difficulty)?;

    let store = state.store();
    let created = store
        .insert_question(new_question)
        .await
        .map_err(ApiError::unprocessable)?;
    let total_questions = store.count_questions().await?;

    tracing::info!(id = created.id, category = created.category, "question created");

    Ok(Json(CreatedResponse {
        success: true,
        question_id: created.id,
        total_questions,
    }))
}

/// DELETE /questions/{id} - delete and return the remaining page
///
/// Existence is checked first so that a missing question is a 404 while
/// any failure of the delete itself is a 422.
async fn delete_question(
    State(state): State<AppState>,
    ValidId(id): ValidId,
    Page(page): Page,
) -> Result<Json<DeletedResponse>, ApiError> {
    let store = state.store();

    let existing = store
        .get_question(id)
        .await
        .map_err(ApiError::unprocessable)?;
    if existing.is_none() {
        return Err(ApiError::not_found("question", id));
    }

    let removed = store
        .delete_question(id)
        .await
        .map_err(ApiError::unprocessable)?;
    if !removed {
        // Deleted by a concurrent request between the check and the delete
        return Err(ApiError::not_found("question", id));
    }

    let remaining = store
        .list_questions()
        .await
        .map_err(ApiError::unprocessable)?;

    tracing::info!(id, "question deleted");

    Ok(Json(DeletedResponse {
        success: true,
        deleted_question_id: id,
        questions: page.paginate(&remaining),
        total_questions: remaining.len(),
    }))
}

/// Question routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/questions", get(list_questions).post(post_questions))
        .route("/questions/{id}", delete(delete_question))
}
