//! Conversions between domain types and SQLite rows.
//!
//! Timestamps are stored as RFC 3339 strings. Row mappers read columns in the
//! order of the matching `*_COLUMNS` constant.

use chrono::{DateTime, Utc};
use portal_core::{
  material::Material, paper::Paper, request::RequestRecord, subject::Subject,
};
use rusqlite::Row;

use crate::{Error, Result};

pub const PAPER_COLUMNS: &str = "id, title, subject, department, year, pdf_url, kind";
pub const MATERIAL_COLUMNS: &str = "id, title, subject, kind, url, description";
pub const REQUEST_COLUMNS: &str = "id, name, email, department, details, timestamp";
pub const SUBJECT_COLUMNS: &str = "id, name, department";

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row mappers ─────────────────────────────────────────────────────────────

pub fn paper_from_row(row: &Row<'_>) -> rusqlite::Result<Paper> {
  Ok(Paper {
    id:         row.get(0)?,
    title:      row.get(1)?,
    subject:    row.get(2)?,
    department: row.get(3)?,
    year:       row.get(4)?,
    pdf_url:    row.get(5)?,
    kind:       row.get(6)?,
  })
}

pub fn material_from_row(row: &Row<'_>) -> rusqlite::Result<Material> {
  Ok(Material {
    id:          row.get(0)?,
    title:       row.get(1)?,
    subject:     row.get(2)?,
    kind:        row.get(3)?,
    url:         row.get(4)?,
    description: row.get(5)?,
  })
}

pub fn subject_from_row(row: &Row<'_>) -> rusqlite::Result<Subject> {
  Ok(Subject {
    id:         row.get(0)?,
    name:       row.get(1)?,
    department: row.get(2)?,
  })
}

/// A `requests` row before its timestamp column is parsed.
pub struct RawRequest {
  pub id:         String,
  pub name:       String,
  pub email:      String,
  pub department: String,
  pub details:    String,
  pub timestamp:  String,
}

impl RawRequest {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(RawRequest {
      id:         row.get(0)?,
      name:       row.get(1)?,
      email:      row.get(2)?,
      department: row.get(3)?,
      details:    row.get(4)?,
      timestamp:  row.get(5)?,
    })
  }

  pub fn into_request(self) -> Result<RequestRecord> {
    Ok(RequestRecord {
      id:         self.id,
      name:       self.name,
      email:      self.email,
      department: self.department,
      details:    self.details,
      timestamp:  decode_dt(&self.timestamp)?,
    })
  }
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;

  #[test]
  fn timestamps_round_trip_through_rfc3339() {
    let dt = Utc.with_ymd_and_hms(2024, 11, 3, 9, 30, 0).unwrap();
    let s = encode_dt(dt);
    assert_eq!(s, "2024-11-03T09:30:00+00:00");
    assert_eq!(decode_dt(&s).unwrap(), dt);
  }

  #[test]
  fn garbage_timestamp_is_a_parse_error() {
    assert!(matches!(decode_dt("yesterday"), Err(Error::DateParse(_))));
  }
}
