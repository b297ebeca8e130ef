//! Handlers for `/api/requests` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/api/requests` | Public |
//! | `POST`   | `/api/requests` | Public. Body: [`RequestSubmission`] |
//! | `DELETE` | `/api/requests/:id` | Admin. 404 if not found |

use axum::{
  Json,
  extract::{Path, State},
};
use portal_core::{
  request::{RequestRecord, RequestSubmission},
  store::PortalStore,
};
use serde_json::Value;

use crate::{AppState, auth::Admin, error::ApiError, extract::ApiJson, message};

/// `GET /api/requests`
pub async fn list<S>(State(state): State<AppState<S>>) -> Result<Json<Vec<RequestRecord>>, ApiError>
where
  S: PortalStore,
{
  let requests = state
    .store
    .list_requests()
    .await
    .map_err(ApiError::store)?;
  Ok(Json(requests))
}

/// `POST /api/requests`. The server assigns `id` and `timestamp`.
pub async fn create<S>(
  State(state): State<AppState<S>>,
  ApiJson(body): ApiJson<RequestSubmission>,
) -> Result<Json<RequestRecord>, ApiError>
where
  S: PortalStore,
{
  let record = state
    .store
    .insert_request(RequestRecord::from_submission(body))
    .await
    .map_err(ApiError::store)?;
  tracing::info!(id = %record.id, department = %record.department, "resource request submitted");
  Ok(Json(record))
}

/// `DELETE /api/requests/:id`
pub async fn delete_one<S>(
  State(state): State<AppState<S>>,
  _admin: Admin,
  Path(id): Path<String>,
) -> Result<Json<Value>, ApiError>
where
  S: PortalStore,
{
  let deleted = state
    .store
    .delete_request(id.clone())
    .await
    .map_err(ApiError::store)?;
  if !deleted {
    return Err(ApiError::NotFound("Request not found".into()));
  }
  tracing::info!(%id, "resource request deleted");
  Ok(message("Request deleted successfully"))
}
