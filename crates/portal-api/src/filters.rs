//! Filter-option endpoints, derived from a full (capped) collection scan on
//! every call.

use axum::{Json, extract::State};
use portal_core::{
  facets::{MaterialSubjects, PaperFacets},
  material::MaterialFilter,
  paper::PaperFilter,
  store::PortalStore,
};

use crate::{AppState, error::ApiError};

/// `GET /api/filters`: `{years, departments, subjects}` across all papers.
pub async fn paper_filters<S>(State(state): State<AppState<S>>) -> Result<Json<PaperFacets>, ApiError>
where
  S: PortalStore,
{
  let papers = state
    .store
    .list_papers(PaperFilter::default())
    .await
    .map_err(ApiError::store)?;
  Ok(Json(PaperFacets::from_papers(&papers)))
}

/// `GET /api/material-subjects`: `{subjects}` across all materials.
pub async fn material_subjects<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<MaterialSubjects>, ApiError>
where
  S: PortalStore,
{
  let materials = state
    .store
    .list_materials(MaterialFilter::default())
    .await
    .map_err(ApiError::store)?;
  Ok(Json(MaterialSubjects::from_materials(&materials)))
}
