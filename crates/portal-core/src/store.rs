//! The `PortalStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `portal-store-sqlite`).
//! The HTTP layer depends on this abstraction, not on any concrete backend.
//!
//! Every document is keyed by its domain `id`. Whatever row identifier the
//! backend uses internally never appears in the returned values.

use std::future::Future;

use crate::{
  Collection,
  material::{Material, MaterialFilter, MaterialPatch},
  paper::{Paper, PaperFilter, PaperPatch},
  request::RequestRecord,
  subject::Subject,
};

/// Abstraction over the portal's document store.
///
/// Reads return at most [`FETCH_LIMIT`](crate::FETCH_LIMIT) documents, in
/// insertion order. Single-document writes are atomic; there are no
/// cross-document transactions.
///
/// Inserting a document whose `id` is already taken fails with an error whose
/// source chain contains [`Error::DuplicateId`](crate::Error::DuplicateId).
pub trait PortalStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Papers ────────────────────────────────────────────────────────────

  fn list_papers(
    &self,
    filter: PaperFilter,
  ) -> impl Future<Output = Result<Vec<Paper>, Self::Error>> + Send + '_;

  fn get_paper(
    &self,
    id: String,
  ) -> impl Future<Output = Result<Option<Paper>, Self::Error>> + Send + '_;

  fn insert_paper(
    &self,
    paper: Paper,
  ) -> impl Future<Output = Result<Paper, Self::Error>> + Send + '_;

  /// Merge `patch` into the paper atomically and return the result, or
  /// `None` if no paper has that id. Never creates a document.
  fn update_paper(
    &self,
    id: String,
    patch: PaperPatch,
  ) -> impl Future<Output = Result<Option<Paper>, Self::Error>> + Send + '_;

  /// Returns `false` if no paper has that id.
  fn delete_paper(
    &self,
    id: String,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Materials ─────────────────────────────────────────────────────────

  fn list_materials(
    &self,
    filter: MaterialFilter,
  ) -> impl Future<Output = Result<Vec<Material>, Self::Error>> + Send + '_;

  fn get_material(
    &self,
    id: String,
  ) -> impl Future<Output = Result<Option<Material>, Self::Error>> + Send + '_;

  fn insert_material(
    &self,
    material: Material,
  ) -> impl Future<Output = Result<Material, Self::Error>> + Send + '_;

  fn update_material(
    &self,
    id: String,
    patch: MaterialPatch,
  ) -> impl Future<Output = Result<Option<Material>, Self::Error>> + Send + '_;

  fn delete_material(
    &self,
    id: String,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Requests (append-only) ────────────────────────────────────────────

  fn list_requests(
    &self,
  ) -> impl Future<Output = Result<Vec<RequestRecord>, Self::Error>> + Send + '_;

  fn insert_request(
    &self,
    request: RequestRecord,
  ) -> impl Future<Output = Result<RequestRecord, Self::Error>> + Send + '_;

  fn delete_request(
    &self,
    id: String,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Subjects (append-only) ────────────────────────────────────────────

  fn list_subjects(
    &self,
  ) -> impl Future<Output = Result<Vec<Subject>, Self::Error>> + Send + '_;

  fn insert_subject(
    &self,
    subject: Subject,
  ) -> impl Future<Output = Result<Subject, Self::Error>> + Send + '_;

  // ── Collections ───────────────────────────────────────────────────────

  /// Number of documents in `collection`.
  fn count(
    &self,
    collection: Collection,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// Delete every document in `collection`, keeping the collection itself.
  /// Returns the number of documents removed.
  fn clear(
    &self,
    collection: Collection,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// Remove `collection` entirely, including its indexes. The collection
  /// behaves as new and empty on next use.
  fn drop_collection(
    &self,
    collection: Collection,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
