//! Study materials.

use serde::{Deserialize, Serialize};

use crate::id_or_new;

/// A stored study material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Material {
  pub id:          String,
  pub title:       String,
  pub subject:     String,
  /// `"pdf"`, `"drive"` or `"link"` by convention; not enforced.
  #[serde(rename = "type")]
  pub kind:        String,
  pub url:         String,
  pub description: String,
}

/// Input for creating a material. `id` is generated when absent.
#[derive(Debug, Clone)]
pub struct NewMaterial {
  pub id:          Option<String>,
  pub title:       String,
  pub subject:     String,
  pub kind:        String,
  pub url:         String,
  pub description: String,
}

impl NewMaterial {
  pub fn into_material(self) -> Material {
    Material {
      id:          id_or_new(self.id),
      title:       self.title,
      subject:     self.subject,
      kind:        self.kind,
      url:         self.url,
      description: self.description,
    }
  }
}

/// A partial update. `None` fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterialPatch {
  pub title:       Option<String>,
  pub subject:     Option<String>,
  pub kind:        Option<String>,
  pub url:         Option<String>,
  pub description: Option<String>,
}

impl MaterialPatch {
  pub fn is_empty(&self) -> bool {
    self.title.is_none()
      && self.subject.is_none()
      && self.kind.is_none()
      && self.url.is_none()
      && self.description.is_none()
  }
}

/// Materials are filtered by subject only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterialFilter {
  pub subject: Option<String>,
}
