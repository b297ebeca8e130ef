//! SQL schema for the portal SQLite store.
//!
//! Executed once at connection startup, and per table when a collection is
//! dropped and must be recreated. Every statement is idempotent thanks to
//! `IF NOT EXISTS`.

use portal_core::Collection;

/// Connection-level settings applied before any table DDL.
pub const PRAGMAS: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;
";

// `row_id` is the internal row identifier; `id` is the domain key exposed to
// clients and is unique per collection.

const PAPERS: &str = "
CREATE TABLE IF NOT EXISTS papers (
    row_id      INTEGER PRIMARY KEY,
    id          TEXT NOT NULL UNIQUE,
    title       TEXT NOT NULL,
    subject     TEXT NOT NULL,
    department  TEXT NOT NULL,
    year        INTEGER NOT NULL,
    pdf_url     TEXT NOT NULL,
    kind        TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS papers_filter_idx ON papers(year, department, subject);
";

const MATERIALS: &str = "
CREATE TABLE IF NOT EXISTS materials (
    row_id      INTEGER PRIMARY KEY,
    id          TEXT NOT NULL UNIQUE,
    title       TEXT NOT NULL,
    subject     TEXT NOT NULL,
    kind        TEXT NOT NULL,   -- 'pdf' | 'drive' | 'link' by convention
    url         TEXT NOT NULL,
    description TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS materials_subject_idx ON materials(subject);
";

// Requests and subjects are append-only: rows are inserted and deleted,
// never updated.

const REQUESTS: &str = "
CREATE TABLE IF NOT EXISTS requests (
    row_id      INTEGER PRIMARY KEY,
    id          TEXT NOT NULL UNIQUE,
    name        TEXT NOT NULL,
    email       TEXT NOT NULL,
    department  TEXT NOT NULL,
    details     TEXT NOT NULL,
    timestamp   TEXT NOT NULL    -- RFC 3339 UTC; server-assigned
);
";

const SUBJECTS: &str = "
CREATE TABLE IF NOT EXISTS subjects (
    row_id      INTEGER PRIMARY KEY,
    id          TEXT NOT NULL UNIQUE,
    name        TEXT NOT NULL,
    department  TEXT NOT NULL
);
";

/// DDL for a single collection's table and indexes.
pub fn table_ddl(collection: Collection) -> &'static str {
  match collection {
    Collection::Papers => PAPERS,
    Collection::Materials => MATERIALS,
    Collection::Requests => REQUESTS,
    Collection::Subjects => SUBJECTS,
  }
}
