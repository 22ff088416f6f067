//! Quiz endpoint

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::http::error::ApiError;
use crate::http::extractors::JsonBody;
use crate::models::{lenient_i64, Question};
use crate::quiz::QuizCategory;
use crate::state::AppState;

/// Quiz round request
#[derive(Debug, Deserialize)]
pub struct QuizRequest {
    pub quiz_category: QuizCategoryRef,
    pub previous_questions: Vec<i64>,
}

/// Category chosen by the player; the front-end also sends its `type`,
/// which is ignored.
#[derive(Debug, Deserialize)]
pub struct QuizCategoryRef {
    #[serde(deserialize_with = "lenient_i64")]
    pub id: i64,
}

/// Quiz round response. No `question` means the quiz is over.
#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<Question>,
}

/// POST /quizzes - next random unseen question
async fn next_question(
    State(state): State<AppState>,
    body: Result<JsonBody<QuizRequest>, ApiError>,
) -> Result<Json<QuizResponse>, ApiError> {
    let JsonBody(req) = body.map_err(ApiError::into_unprocessable)?;
    let store = state.store();

    let candidates = match QuizCategory::from(req.quiz_category.id) {
        QuizCategory::All => store.list_questions().await,
        QuizCategory::Only(id) => {
            let category = store
                .get_category(id)
                .await
                .map_err(ApiError::unprocessable)?;
            if category.is_none() {
                return Err(ApiError::not_found("category", id));
            }
            store.questions_in_category(id).await
        }
    }
    .map_err(ApiError::unprocessable)?;

    let question = state.quiz().next_question(candidates, &req.previous_questions);
    if question.is_none() {
        tracing::debug!(
            category = req.quiz_category.id,
            answered = req.previous_questions.len(),
            "quiz pool exhausted"
        );
    }

    Ok(Json(QuizResponse {
        success: true,
        question,
    }))
}

/// Quiz routes
pub fn router() -> Router<AppState> {
    Router::new().route("/quizzes", post(next_question))
}
