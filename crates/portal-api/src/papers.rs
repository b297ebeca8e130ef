//! Handlers for `/api/papers` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/api/papers` | Optional exact-match `?year`, `?department`, `?subject` |
//! | `GET`    | `/api/papers/:id` | 404 if not found |
//! | `POST`   | `/api/papers` | Admin. Body: [`CreateBody`]; Drive links are validated |
//! | `PUT`    | `/api/papers/:id` | Admin. Body: [`UpdateBody`]; only supplied fields change |
//! | `DELETE` | `/api/papers/:id` | Admin. 404 if not found |

use axum::{
  Json,
  extract::{Path, Query, State},
};
use portal_core::{
  paper::{NewPaper, Paper, PaperFilter, PaperPatch},
  store::PortalStore,
  year::YearInput,
};
use serde::Deserialize;
use serde_json::Value;

use crate::{AppState, auth::Admin, error::ApiError, extract::ApiJson, message};

/// Treat `?field=` the same as an absent parameter.
pub(crate) fn non_empty(s: Option<String>) -> Option<String> { s.filter(|s| !s.is_empty()) }

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub year:       Option<String>,
  pub department: Option<String>,
  pub subject:    Option<String>,
}

/// `GET /api/papers[?year=...][&department=...][&subject=...]`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Paper>>, ApiError>
where
  S: PortalStore,
{
  let year = non_empty(params.year)
    .map(|y| YearInput::Text(y).coerce())
    .transpose()?;
  let filter = PaperFilter {
    year,
    department: non_empty(params.department),
    subject: non_empty(params.subject),
  };
  let papers = state
    .store
    .list_papers(filter)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(papers))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /api/papers/:id`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<String>,
) -> Result<Json<Paper>, ApiError>
where
  S: PortalStore,
{
  let paper = state
    .store
    .get_paper(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound("Paper not found".into()))?;
  Ok(Json(paper))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /api/papers`. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBody {
  pub id:         Option<String>,
  pub title:      String,
  pub subject:    String,
  pub department: String,
  pub year:       YearInput,
  pub pdf_url:    String,
  #[serde(rename = "type")]
  pub kind:       String,
}

/// `POST /api/papers`, returning the stored paper.
pub async fn create<S>(
  State(state): State<AppState<S>>,
  _admin: Admin,
  ApiJson(body): ApiJson<CreateBody>,
) -> Result<Json<Paper>, ApiError>
where
  S: PortalStore,
{
  let year = body.year.coerce()?;
  let pdf_url = state.drive.normalize(&body.pdf_url).await?;

  let paper = NewPaper {
    id: body.id,
    title: body.title,
    subject: body.subject,
    department: body.department,
    year,
    pdf_url,
    kind: body.kind,
  }
  .into_paper();

  let paper = state
    .store
    .insert_paper(paper)
    .await
    .map_err(ApiError::store)?;
  tracing::info!(id = %paper.id, title = %paper.title, "paper created");
  Ok(Json(paper))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `PUT /api/papers/:id`. `null` counts as absent.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBody {
  pub title:      Option<String>,
  pub subject:    Option<String>,
  pub department: Option<String>,
  pub year:       Option<YearInput>,
  pub pdf_url:    Option<String>,
  #[serde(rename = "type")]
  pub kind:       Option<String>,
}

/// `PUT /api/papers/:id`, returning the merged paper.
///
/// Nothing is written unless every supplied field validates, including the
/// Drive probe for a new `pdfUrl`.
pub async fn update<S>(
  State(state): State<AppState<S>>,
  _admin: Admin,
  Path(id): Path<String>,
  ApiJson(body): ApiJson<UpdateBody>,
) -> Result<Json<Paper>, ApiError>
where
  S: PortalStore,
{
  let mut patch = PaperPatch {
    title:      body.title,
    subject:    body.subject,
    department: body.department,
    year:       body.year.map(YearInput::coerce).transpose()?,
    pdf_url:    None,
    kind:       body.kind,
  };
  if body.pdf_url.is_none() && patch.is_empty() {
    return Err(ApiError::BadRequest("No fields provided".into()));
  }
  if let Some(url) = body.pdf_url {
    patch.pdf_url = Some(state.drive.normalize(&url).await?);
  }

  let paper = state
    .store
    .update_paper(id, patch)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound("Paper not found".into()))?;
  tracing::info!(id = %paper.id, "paper updated");
  Ok(Json(paper))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /api/papers/:id`
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
    .delete_paper(id.clone())
    .await
    .map_err(ApiError::store)?;
  if !deleted {
    return Err(ApiError::NotFound("Paper not found".into()));
  }
  tracing::info!(%id, "paper deleted");
  Ok(message("Paper deleted successfully"))
}
