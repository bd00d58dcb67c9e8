// Mapping of service errors and extractor rejections onto HTTP responses
use crate::application::error::{ServiceError, ServiceResult};
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::future::Future;

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::Validation(_) | ServiceError::UnsupportedSort(_) => {
                StatusCode::BAD_REQUEST
            }
            ServiceError::Store(e) => {
                tracing::error!(error = %e, "Store failure");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let message = match self {
            ServiceError::Store(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

/// A path id that does not parse cannot name an existing row.
pub fn path_id(resource: &str, path: Result<Path<i64>, PathRejection>) -> ServiceResult<i64> {
    path.map(|Path(id)| id)
        .map_err(|_| ServiceError::NotFound(format!("{} not found", resource)))
}

pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> ServiceResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ServiceError::Validation(rejection.body_text()))
}

/// Body of an item PATCH. A missing row wins over a rejected body, so
/// `lookup` is only awaited when the body did not parse.
pub async fn patch_body<T, R>(
    resource: &str,
    id: i64,
    payload: Result<Json<T>, JsonRejection>,
    lookup: impl Future<Output = ServiceResult<Option<R>>>,
) -> ServiceResult<T> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => match lookup.await? {
            Some(_) => Err(ServiceError::Validation(rejection.body_text())),
            None => Err(ServiceError::not_found(resource, id)),
        },
    }
}

pub fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> ServiceResult<T> {
    query
        .map(|Query(params)| params)
        .map_err(|rejection| ServiceError::Validation(rejection.body_text()))
}
