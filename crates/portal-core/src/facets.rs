//! Distinct filter values derived from a collection scan.
//!
//! Nothing here is cached: callers load the (capped) collection and derive
//! the facets on every request.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::{material::Material, paper::Paper};

/// Filter options for the papers listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PaperFacets {
  /// Strictly descending.
  pub years:       Vec<i32>,
  /// Strictly ascending (byte-wise lexical).
  pub departments: Vec<String>,
  /// Strictly ascending (byte-wise lexical).
  pub subjects:    Vec<String>,
}

impl PaperFacets {
  pub fn from_papers<'a>(papers: impl IntoIterator<Item = &'a Paper>) -> Self {
    let mut years = BTreeSet::new();
    let mut departments = BTreeSet::new();
    let mut subjects = BTreeSet::new();
    for p in papers {
      years.insert(p.year);
      departments.insert(p.department.as_str());
      subjects.insert(p.subject.as_str());
    }
    PaperFacets {
      years:       years.into_iter().rev().collect(),
      departments: departments.into_iter().map(str::to_owned).collect(),
      subjects:    subjects.into_iter().map(str::to_owned).collect(),
    }
  }
}

/// Distinct subjects across all materials.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MaterialSubjects {
  pub subjects: Vec<String>,
}

impl MaterialSubjects {
  pub fn from_materials<'a>(materials: impl IntoIterator<Item = &'a Material>) -> Self {
    let subjects: BTreeSet<&str> = materials.into_iter().map(|m| m.subject.as_str()).collect();
    MaterialSubjects {
      subjects: subjects.into_iter().map(str::to_owned).collect(),
    }
  }
}
