//! API error types with IntoResponse
//!
//! Every failure becomes the same envelope:
//! `{"success": false, "message": <text>, "error": <status>}`.
//! The message is fixed per status; the specific cause is only logged.

use std::fmt::Display;

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::DbError;
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Malformed request (400)
    BadRequest { reason: String },

    /// Resource not found (404)
    NotFound { resource: &'static str, id: String },

    /// Route exists but not for this method (405)
    MethodNotAllowed,

    /// Well-formed but unusable input, or a failed write (422)
    Unprocessable { reason: String },

    /// Database error on a read path (500, logged)
    Database(DbError),
}

impl ApiError {
    pub fn not_found(resource: &'static str, id: impl Display) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    /// Convenience for `map_err` on write paths.
    pub fn unprocessable(reason: impl Display) -> Self {
        Self::Unprocessable {
            reason: reason.to_string(),
        }
    }

    /// Treat a malformed request as unprocessable. Routes whose every
    /// input failure is a 422 use this on their body rejections.
    pub fn into_unprocessable(self) -> Self {
        match self {
            Self::BadRequest { reason } => Self::Unprocessable { reason },
            other => other,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Unprocessable { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Client-facing message for an error status
pub fn status_message(status: StatusCode) -> &'static str {
    match status {
        StatusCode::BAD_REQUEST => "Bad Request",
        StatusCode::NOT_FOUND => "Resource Not Found",
        StatusCode::METHOD_NOT_ALLOWED => "Method Not Allowed",
        StatusCode::UNPROCESSABLE_ENTITY => "Unprocessable Request",
        _ => "Internal Server Error",
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::BadRequest { reason } => tracing::warn!(%reason, "bad request"),
            Self::NotFound { resource, id } => tracing::debug!("{} '{}' not found", resource, id),
            Self::MethodNotAllowed => {}
            Self::Unprocessable { reason } => tracing::warn!(%reason, "unprocessable request"),
            Self::Database(e) => tracing::error!("Database error: {}", e),
        }

        let status = self.status();
        let body = json!({
            "success": false,
            "message": status_message(status),
            "error": status.as_u16()
        });

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::unprocessable(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        Self::Database(e)
    }
}

/// Rewrite the router's bare 405 responses into the error envelope,
/// keeping the `Allow` header.
pub async fn envelope_method_not_allowed(response: Response) -> Response {
    if response.status() != StatusCode::METHOD_NOT_ALLOWED {
        return response;
    }

    let allow = response.headers().get(header::ALLOW).cloned();
    let mut rewritten = ApiError::MethodNotAllowed.into_response();
    if let Some(allow) = allow {
        rewritten.headers_mut().insert(header::ALLOW, allow);
    }
    rewritten
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn not_found_is_404_with_envelope() {
        let response = ApiError::not_found("question", 999_999).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Resource Not Found");
        assert_eq!(body["error"], 404);
    }

    #[tokio::test]
    async fn validation_error_is_422() {
        let err = ApiError::from(ValidationError::Empty { field: "answer" });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = body_json(response).await;
        assert_eq!(body["message"], "Unprocessable Request");
        assert_eq!(body["error"], 422);
    }

    #[tokio::test]
    async fn database_error_hides_details() {
        let response = ApiError::from(DbError::Unavailable).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["message"], "Internal Server Error");
        assert_eq!(body["error"], 500);
    }

    #[test]
    fn bad_request_becomes_unprocessable_on_demand() {
        let err = ApiError::BadRequest {
            reason: "expected value".into(),
        };
        assert_eq!(err.into_unprocessable().status(), StatusCode::UNPROCESSABLE_ENTITY);

        let err = ApiError::not_found("category", 404);
        assert_eq!(err.into_unprocessable().status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn rewrites_bare_405() {
        let bare = Response::builder()
            .status(StatusCode::METHOD_NOT_ALLOWED)
            .header(header::ALLOW, "GET,HEAD,POST")
            .body(axum::body::Body::empty())
            .unwrap();

        let response = envelope_method_not_allowed(bare).await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[header::ALLOW], "GET,HEAD,POST");

        let body = body_json(response).await;
        assert_eq!(body["message"], "Method Not Allowed");
        assert_eq!(body["error"], 405);
    }

    #[tokio::test]
    async fn other_responses_pass_through() {
        let ok = StatusCode::OK.into_response();
        let response = envelope_method_not_allowed(ok).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
