//! JSON REST API for the study portal.
//!
//! Exposes an axum [`Router`] backed by any [`portal_core::store::PortalStore`].
//! Every route already carries its `/api` prefix, so the router can be merged
//! into a parent as-is. CORS, tracing and transport concerns are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = Router::new().merge(portal_api::api_router(state));
//! ```

pub mod admin;
pub mod auth;
pub mod drive;
pub mod error;
pub mod extract;
pub mod filters;
pub mod materials;
pub mod papers;
pub mod requests;
pub mod subjects;

use std::sync::Arc;

use axum::{
  Json, Router,
  routing::{delete, get, post},
};
use portal_core::store::PortalStore;
use serde_json::{Value, json};

pub use auth::AdminSecret;
pub use drive::DriveValidator;
pub use error::ApiError;

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all handlers. Built once at startup.
pub struct AppState<S> {
  pub store: Arc<S>,
  pub admin: Arc<AdminSecret>,
  pub drive: Arc<DriveValidator>,
}

impl<S> AppState<S> {
  pub fn new(store: S, admin: AdminSecret, drive: DriveValidator) -> Self {
    Self {
      store: Arc::new(store),
      admin: Arc::new(admin),
      drive: Arc::new(drive),
    }
  }
}

// Manual impl: cloning the state must not require `S: Clone`.
impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self {
      store: Arc::clone(&self.store),
      admin: Arc::clone(&self.admin),
      drive: Arc::clone(&self.drive),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the fully-materialised API router for `state`.
pub fn api_router<S>(state: AppState<S>) -> Router<()>
where
  S: PortalStore + Send + Sync + 'static,
{
  Router::new()
    .route("/api/", get(root))
    // Papers
    .route("/api/papers", get(papers::list::<S>).post(papers::create::<S>))
    .route(
      "/api/papers/{id}",
      get(papers::get_one::<S>)
        .put(papers::update::<S>)
        .delete(papers::delete_one::<S>),
    )
    // Materials
    .route("/api/materials", get(materials::list::<S>).post(materials::create::<S>))
    .route(
      "/api/materials/{id}",
      get(materials::get_one::<S>)
        .put(materials::update::<S>)
        .delete(materials::delete_one::<S>),
    )
    // Requests
    .route("/api/requests", get(requests::list::<S>).post(requests::create::<S>))
    .route("/api/requests/{id}", delete(requests::delete_one::<S>))
    // Subjects
    .route("/api/subjects", get(subjects::list::<S>).post(subjects::create::<S>))
    // Aggregations
    .route("/api/filters", get(filters::paper_filters::<S>))
    .route("/api/material-subjects", get(filters::material_subjects::<S>))
    // Admin
    .route("/api/admin/verify", post(admin::verify::<S>))
    .route("/api/admin/stats", get(admin::stats::<S>))
    .route("/api/delete-all", delete(admin::delete_all::<S>))
    .route("/api/drop/{collection}", delete(admin::drop_collection::<S>))
    .fallback(not_found)
    .with_state(state)
}

/// `GET /api/`
async fn root() -> Json<Value> { Json(json!({ "message": "Student Toolkit API" })) }

async fn not_found() -> ApiError { ApiError::NotFound("Not found".into()) }

/// `{"message": ...}` body used by delete-style endpoints.
pub(crate) fn message(text: impl Into<String>) -> Json<Value> {
  Json(json!({ "message": text.into() }))
}
