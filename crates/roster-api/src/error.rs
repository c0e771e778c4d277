//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::{JsonRejection, PathRejection, QueryRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use roster_core::service::ServiceError;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("bad request: {0}")]
  Input(#[from] roster_core::Error),

  #[error(transparent)]
  Service(#[from] ServiceError),
}

impl ApiError {
  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::BadRequest(_) | ApiError::Input(_) => StatusCode::BAD_REQUEST,
      ApiError::Service(e) => match e {
        ServiceError::ClientNotFound(_) | ServiceError::StorageNotFound(_) => StatusCode::NOT_FOUND,
        ServiceError::StorageNoNewValues(_) => StatusCode::CONFLICT,
        ServiceError::StorageConstraintViolated(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ServiceError::ClientInternal(_) | ServiceError::StorageInternal(_) => {
          StatusCode::INTERNAL_SERVER_ERROR
        }
      },
    }
  }
}

// Extractor rejections are client errors and share the JSON error body.

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self { ApiError::BadRequest(rejection.body_text()) }
}

impl From<QueryRejection> for ApiError {
  fn from(rejection: QueryRejection) -> Self { ApiError::BadRequest(rejection.body_text()) }
}

impl From<PathRejection> for ApiError {
  fn from(rejection: PathRejection) -> Self { ApiError::BadRequest(rejection.body_text()) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    (status, Json(json!({ "error": self.to_string() }))).into_response()
  }
}
