//! Resource requests submitted by students.
//!
//! Requests are append-only: they are created and deleted, never edited.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::new_id;

/// A public submission asking for a resource to be added.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RequestSubmission {
  pub name:       String,
  pub email:      String,
  pub department: String,
  pub details:    String,
}

/// A stored request. `id` and `timestamp` are assigned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestRecord {
  pub id:         String,
  pub name:       String,
  pub email:      String,
  pub department: String,
  pub details:    String,
  pub timestamp:  DateTime<Utc>,
}

impl RequestRecord {
  /// Stamp a submission with a fresh id and the current UTC time.
  pub fn from_submission(submission: RequestSubmission) -> Self {
    RequestRecord {
      id:         new_id(),
      name:       submission.name,
      email:      submission.email,
      department: submission.department,
      details:    submission.details,
      timestamp:  Utc::now(),
    }
  }
}
