//! Custom Axum extractors

use std::convert::Infallible;

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::Json;

use super::error::ApiError;
use crate::models::{Pagination, PaginationParams};

/// Page requested through `?page=N`.
///
/// Never rejects: a missing or malformed value means page 1.
pub struct Page(pub Pagination);

impl<S> FromRequestParts<S> for Page
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let params = Query::<PaginationParams>::try_from_uri(&parts.uri)
            .map(|Query(params)| params)
            .unwrap_or_default();
        Ok(Self(Pagination::from(params)))
    }
}

/// Extract an integer id from the path.
///
/// Anything that is not an integer cannot name a resource, so it is a 404.
pub struct ValidId(pub i64);

impl<S> FromRequestParts<S> for ValidId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::not_found("path id", "<missing>"))?;

        let id = raw
            .parse::<i64>()
            .map_err(|_| ApiError::not_found("path id", &raw))?;

        Ok(Self(id))
    }
}

/// JSON body whose rejections use the API error envelope.
///
/// - syntax errors and missing content type → 400
/// - valid JSON with the wrong shape → 422
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(rejection.into()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(e) => ApiError::unprocessable(e.body_text()),
            other => ApiError::BadRequest {
                reason: other.body_text(),
            },
        }
    }
}
