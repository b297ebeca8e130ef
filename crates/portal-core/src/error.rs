//! Error types for `portal-core`.

use thiserror::Error;

use crate::Collection;

#[derive(Debug, Error)]
pub enum Error {
  #[error("year must be a number, got {0}")]
  InvalidYear(String),

  #[error("invalid collection: {0:?}")]
  UnknownCollection(String),

  #[error("{collection} already contains a document with id {id:?}")]
  DuplicateId { collection: Collection, id: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
