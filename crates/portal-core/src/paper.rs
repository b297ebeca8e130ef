//! Exam papers.

use serde::{Deserialize, Serialize};

use crate::id_or_new;

/// A stored exam paper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paper {
  pub id:         String,
  pub title:      String,
  pub subject:    String,
  pub department: String,
  pub year:       i32,
  pub pdf_url:    String,
  /// Free-form label such as `"midterm"` or `"final"`.
  #[serde(rename = "type")]
  pub kind:       String,
}

/// Input for creating a paper. `id` is generated when absent.
#[derive(Debug, Clone)]
pub struct NewPaper {
  pub id:         Option<String>,
  pub title:      String,
  pub subject:    String,
  pub department: String,
  pub year:       i32,
  pub pdf_url:    String,
  pub kind:       String,
}

impl NewPaper {
  pub fn into_paper(self) -> Paper {
    Paper {
      id:         id_or_new(self.id),
      title:      self.title,
      subject:    self.subject,
      department: self.department,
      year:       self.year,
      pdf_url:    self.pdf_url,
      kind:       self.kind,
    }
  }
}

/// A partial update. `None` fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaperPatch {
  pub title:      Option<String>,
  pub subject:    Option<String>,
  pub department: Option<String>,
  pub year:       Option<i32>,
  pub pdf_url:    Option<String>,
  pub kind:       Option<String>,
}

impl PaperPatch {
  /// `true` if the patch would not change any field.
  pub fn is_empty(&self) -> bool {
    self.title.is_none()
      && self.subject.is_none()
      && self.department.is_none()
      && self.year.is_none()
      && self.pdf_url.is_none()
      && self.kind.is_none()
  }
}

/// Exact-match filter for listing papers. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaperFilter {
  pub year:       Option<i32>,
  pub department: Option<String>,
  pub subject:    Option<String>,
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn sample() -> Paper { sample_new().into_paper() }

  fn sample_new() -> NewPaper {
    NewPaper {
      id:         None,
      title:      "Midterm".into(),
      subject:    "Algorithms".into(),
      department: "CS".into(),
      year:       2024,
      pdf_url:    "https://example.com/x.pdf".into(),
      kind:       "midterm".into(),
    }
  }

  #[test]
  fn generated_ids_are_unique() {
    let a = sample();
    let b = sample();
    assert!(!a.id.is_empty());
    assert_ne!(a.id, b.id);
  }

  #[test]
  fn supplied_id_is_kept() {
    let p = NewPaper {
      id:         Some("fixed".into()),
      title:      "Final".into(),
      subject:    "Calculus".into(),
      department: "Mathematics".into(),
      year:       2023,
      pdf_url:    "https://example.com/calc.pdf".into(),
      kind:       "final".into(),
    }
    .into_paper();
    assert_eq!(p.id, "fixed");
  }

  #[test]
  fn blank_id_is_replaced() {
    for blank in ["", "   "] {
      let p = NewPaper { id: Some(blank.into()), ..sample_new() }.into_paper();
      assert!(!p.id.trim().is_empty(), "{blank:?} kept as id");
    }
  }

  #[test]
  fn serialises_with_wire_field_names() {
    let v = serde_json::to_value(sample()).unwrap();
    assert_eq!(v["pdfUrl"], json!("https://example.com/x.pdf"));
    assert_eq!(v["type"], json!("midterm"));
    assert_eq!(v["year"], json!(2024));
    assert!(v.get("_id").is_none());
    assert!(v.get("pdf_url").is_none());
  }

  #[test]
  fn patch_with_any_field_is_not_empty() {
    assert!(PaperPatch::default().is_empty());
    assert!(!PaperPatch { year: Some(2023), ..Default::default() }.is_empty());
    assert!(!PaperPatch { kind: Some("final".into()), ..Default::default() }.is_empty());
  }
}
