//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::JsonRejection,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::drive::DriveError;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("Unauthorized")]
  Unauthorized,

  #[error("{0}")]
  NotFound(String),

  #[error("{0}")]
  BadRequest(String),

  #[error("{0}")]
  Conflict(String),

  #[error(transparent)]
  Drive(#[from] DriveError),

  #[error("{}", .0.body_text())]
  Body(#[from] JsonRejection),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Wrap a backend error, surfacing any [`portal_core::Error`] found in its
  /// source chain as the matching client error.
  pub fn store<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    let mut cause: Option<&(dyn std::error::Error + 'static)> = Some(&err);
    while let Some(e) = cause {
      if let Some(core) = e.downcast_ref::<portal_core::Error>() {
        return Self::from_core(core);
      }
      cause = e.source();
    }
    ApiError::Store(Box::new(err))
  }

  fn from_core(err: &portal_core::Error) -> Self {
    match err {
      portal_core::Error::DuplicateId { .. } => ApiError::Conflict(err.to_string()),
      portal_core::Error::InvalidYear(_) | portal_core::Error::UnknownCollection(_) => {
        ApiError::BadRequest(err.to_string())
      }
    }
  }
}

impl From<portal_core::Error> for ApiError {
  fn from(err: portal_core::Error) -> Self { Self::from_core(&err) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = match &self {
      ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::BadRequest(_) | ApiError::Drive(_) => StatusCode::BAD_REQUEST,
      ApiError::Conflict(_) => StatusCode::CONFLICT,
      ApiError::Body(rejection) => rejection.status(),
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store operation failed");
        StatusCode::INTERNAL_SERVER_ERROR
      }
    };
    (status, Json(json!({ "error": self.to_string() }))).into_response()
  }
}

#[cfg(test)]
mod tests {
  use portal_core::Collection;

  use super::*;

  #[derive(Debug, Error)]
  enum WrappingError {
    #[error("core: {0}")]
    Core(#[from] portal_core::Error),
    #[error("disk on fire")]
    Disk,
  }

  #[test]
  fn duplicate_id_in_source_chain_becomes_conflict() {
    let err = WrappingError::from(portal_core::Error::DuplicateId {
      collection: Collection::Papers,
      id:         "abc".into(),
    });
    assert!(matches!(ApiError::store(err), ApiError::Conflict(_)));
  }

  #[test]
  fn opaque_store_errors_stay_internal() {
    let resp = ApiError::store(WrappingError::Disk).into_response();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
  }

  #[test]
  fn statuses() {
    assert_eq!(ApiError::Unauthorized.into_response().status(), StatusCode::UNAUTHORIZED);
    assert_eq!(ApiError::NotFound("x".into()).into_response().status(), StatusCode::NOT_FOUND);
    assert_eq!(
      ApiError::from(portal_core::Error::InvalidYear("\"abc\"".into())).into_response().status(),
      StatusCode::BAD_REQUEST
    );
    assert_eq!(
      ApiError::Drive(DriveError::NotPublic { file_id: "x".into() }).into_response().status(),
      StatusCode::BAD_REQUEST
    );
  }
}
