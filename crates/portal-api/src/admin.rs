//! Admin utility endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `POST`   | `/api/admin/verify` | 400 without header, 401 on mismatch |
//! | `GET`    | `/api/admin/stats` | Admin. Document counts |
//! | `DELETE` | `/api/delete-all` | Admin. Empties papers, materials, requests |
//! | `DELETE` | `/api/drop/:collection` | Admin. Removes one allow-listed collection |

use axum::{
  Json,
  extract::{Path, State},
  http::HeaderMap,
};
use portal_core::{Collection, store::PortalStore};
use serde::Serialize;
use serde_json::{Value, json};

use crate::{
  AppState, message,
  auth::{Admin, PasscodeError, check_passcode},
  error::ApiError,
};

/// `POST /api/admin/verify`: `{"status":"success"}` for the right passcode.
pub async fn verify<S>(
  State(state): State<AppState<S>>,
  headers: HeaderMap,
) -> Result<Json<Value>, ApiError>
where
  S: PortalStore,
{
  match check_passcode(&headers, &state.admin) {
    Ok(()) => Ok(Json(json!({ "status": "success" }))),
    Err(PasscodeError::Missing) => Err(ApiError::BadRequest("Admin passcode required".into())),
    Err(PasscodeError::Invalid) => Err(ApiError::Unauthorized),
  }
}

#[derive(Debug, Serialize)]
pub struct Stats {
  pub papers:    u64,
  pub materials: u64,
  pub requests:  u64,
}

/// `GET /api/admin/stats`
pub async fn stats<S>(State(state): State<AppState<S>>, _admin: Admin) -> Result<Json<Stats>, ApiError>
where
  S: PortalStore,
{
  let store = &state.store;
  Ok(Json(Stats {
    papers:    store.count(Collection::Papers).await.map_err(ApiError::store)?,
    materials: store.count(Collection::Materials).await.map_err(ApiError::store)?,
    requests:  store.count(Collection::Requests).await.map_err(ApiError::store)?,
  }))
}

/// `DELETE /api/delete-all` empties every bulk-clearable collection.
pub async fn delete_all<S>(State(state): State<AppState<S>>, _admin: Admin) -> Result<Json<Value>, ApiError>
where
  S: PortalStore,
{
  for collection in Collection::CLEARED_IN_BULK {
    let removed = state
      .store
      .clear(collection)
      .await
      .map_err(ApiError::store)?;
    tracing::info!(%collection, removed, "collection cleared");
  }
  Ok(message("All collections cleared successfully!"))
}

/// `DELETE /api/drop/:collection`
pub async fn drop_collection<S>(
  State(state): State<AppState<S>>,
  _admin: Admin,
  Path(name): Path<String>,
) -> Result<Json<Value>, ApiError>
where
  S: PortalStore,
{
  let collection = Collection::parse(&name)?;
  state
    .store
    .drop_collection(collection)
    .await
    .map_err(ApiError::store)?;
  tracing::warn!(%collection, "collection dropped");
  Ok(message(format!("Collection '{collection}' dropped successfully")))
}
