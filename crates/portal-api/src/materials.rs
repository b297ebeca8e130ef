//! Handlers for `/api/materials` endpoints.
//!
//! Same contract as [`papers`](crate::papers), with `url` in place of
//! `pdfUrl` and listing filtered by `?subject` only.

use axum::{
  Json,
  extract::{Path, Query, State},
};
use portal_core::{
  material::{Material, MaterialFilter, MaterialPatch, NewMaterial},
  store::PortalStore,
};
use serde::Deserialize;
use serde_json::Value;

use crate::{AppState, auth::Admin, error::ApiError, extract::ApiJson, message, papers::non_empty};

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub subject: Option<String>,
}

/// `GET /api/materials[?subject=...]`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Material>>, ApiError>
where
  S: PortalStore,
{
  let filter = MaterialFilter { subject: non_empty(params.subject) };
  let materials = state
    .store
    .list_materials(filter)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(materials))
}

/// `GET /api/materials/:id`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<String>,
) -> Result<Json<Material>, ApiError>
where
  S: PortalStore,
{
  let material = state
    .store
    .get_material(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound("Material not found".into()))?;
  Ok(Json(material))
}

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub id:          Option<String>,
  pub title:       String,
  pub subject:     String,
  #[serde(rename = "type")]
  pub kind:        String,
  pub url:         String,
  pub description: String,
}

/// `POST /api/materials`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  _admin: Admin,
  ApiJson(body): ApiJson<CreateBody>,
) -> Result<Json<Material>, ApiError>
where
  S: PortalStore,
{
  let url = state.drive.normalize(&body.url).await?;
  let material = NewMaterial {
    id: body.id,
    title: body.title,
    subject: body.subject,
    kind: body.kind,
    url,
    description: body.description,
  }
  .into_material();

  let material = state
    .store
    .insert_material(material)
    .await
    .map_err(ApiError::store)?;
  tracing::info!(id = %material.id, title = %material.title, "material created");
  Ok(Json(material))
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateBody {
  pub title:       Option<String>,
  pub subject:     Option<String>,
  #[serde(rename = "type")]
  pub kind:        Option<String>,
  pub url:         Option<String>,
  pub description: Option<String>,
}

/// `PUT /api/materials/:id`
pub async fn update<S>(
  State(state): State<AppState<S>>,
  _admin: Admin,
  Path(id): Path<String>,
  ApiJson(body): ApiJson<UpdateBody>,
) -> Result<Json<Material>, ApiError>
where
  S: PortalStore,
{
  let mut patch = MaterialPatch {
    title:       body.title,
    subject:     body.subject,
    kind:        body.kind,
    url:         None,
    description: body.description,
  };
  if body.url.is_none() && patch.is_empty() {
    return Err(ApiError::BadRequest("No fields provided".into()));
  }
  if let Some(url) = body.url {
    patch.url = Some(state.drive.normalize(&url).await?);
  }

  let material = state
    .store
    .update_material(id, patch)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound("Material not found".into()))?;
  tracing::info!(id = %material.id, "material updated");
  Ok(Json(material))
}

/// `DELETE /api/materials/:id`
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
    .delete_material(id.clone())
    .await
    .map_err(ApiError::store)?;
  if !deleted {
    return Err(ApiError::NotFound("Material not found".into()));
  }
  tracing::info!(%id, "material deleted");
  Ok(message("Material deleted successfully"))
}
