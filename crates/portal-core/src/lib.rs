//! Core types and trait definitions for the study portal.
//!
//! Entities, payloads, the collection allow-list and the [`store::PortalStore`]
//! trait. No HTTP or database code lives here.

pub mod collection;
pub mod error;
pub mod facets;
pub mod material;
pub mod paper;
pub mod request;
pub mod store;
pub mod subject;
pub mod year;

pub use collection::Collection;
pub use error::{Error, Result};

/// Upper bound on documents returned by any single read.
///
/// List endpoints and facet derivation scan at most this many documents per
/// collection; anything beyond is not returned. This is a capacity ceiling,
/// not pagination.
pub const FETCH_LIMIT: usize = 1000;

/// Generate a fresh document id (hyphenated UUID v4).
pub fn new_id() -> String { uuid::Uuid::new_v4().hyphenated().to_string() }

/// Keep a client-supplied id unless it is blank, otherwise generate one.
pub(crate) fn id_or_new(id: Option<String>) -> String {
  id.filter(|id| !id.trim().is_empty()).unwrap_or_else(new_id)
}
