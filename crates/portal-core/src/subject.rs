//! Subjects: a lookup entity naming a course within a department.

use serde::{Deserialize, Serialize};

use crate::id_or_new;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
  pub id:         String,
  pub name:       String,
  pub department: String,
}

#[derive(Debug, Clone)]
pub struct NewSubject {
  pub id:         Option<String>,
  pub name:       String,
  pub department: String,
}

impl NewSubject {
  pub fn into_subject(self) -> Subject {
    Subject {
      id:         id_or_new(self.id),
      name:       self.name,
      department: self.department,
    }
  }
}
