//! Handlers for `/api/subjects` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/api/subjects` | All subjects |
//! | `POST` | `/api/subjects` | Body: `{"name":"...","department":"..."}` |

use axum::{Json, extract::State};
use portal_core::{
  store::PortalStore,
  subject::{NewSubject, Subject},
};
use serde::Deserialize;

use crate::{AppState, error::ApiError, extract::ApiJson};

/// `GET /api/subjects`
pub async fn list<S>(State(state): State<AppState<S>>) -> Result<Json<Vec<Subject>>, ApiError>
where
  S: PortalStore,
{
  let subjects = state
    .store
    .list_subjects()
    .await
    .map_err(ApiError::store)?;
  Ok(Json(subjects))
}

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub id:         Option<String>,
  pub name:       String,
  pub department: String,
}

/// `POST /api/subjects`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  ApiJson(body): ApiJson<CreateBody>,
) -> Result<Json<Subject>, ApiError>
where
  S: PortalStore,
{
  let subject = NewSubject {
    id:         body.id,
    name:       body.name,
    department: body.department,
  }
  .into_subject();
  let subject = state
    .store
    .insert_subject(subject)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(subject))
}
