//! SQLite backend for the portal document store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. Each collection is one table; the
//! table's `INTEGER PRIMARY KEY` is the internal row identifier and is never
//! read back out.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;
