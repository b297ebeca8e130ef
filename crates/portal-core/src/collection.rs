//! The four named collections and their allow-list.

use std::str::FromStr;

use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::Error;

/// A named group of documents of one entity type.
///
/// The string forms (`papers`, `materials`, `requests`, `subjects`) are the
/// only names accepted by collection-level admin operations.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Display,
  EnumIter,
  EnumString,
  IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum Collection {
  Papers,
  Materials,
  Requests,
  Subjects,
}

impl Collection {
  pub const ALL: [Collection; 4] =
    [Collection::Papers, Collection::Materials, Collection::Requests, Collection::Subjects];

  /// Collections emptied by a bulk clear. Subjects are lookup data and
  /// survive it; they can still be dropped individually.
  pub const CLEARED_IN_BULK: [Collection; 3] =
    [Collection::Papers, Collection::Materials, Collection::Requests];

  /// The lowercase name, also used as the storage table name.
  pub fn as_str(self) -> &'static str { self.into() }

  /// Parse a collection name against the allow-list.
  pub fn parse(name: &str) -> Result<Self, Error> {
    Collection::from_str(name).map_err(|_| Error::UnknownCollection(name.to_owned()))
  }
}

#[cfg(test)]
mod tests {
  use strum::IntoEnumIterator;

  use super::*;

  #[test]
  fn parses_every_allowed_name() {
    for c in Collection::iter() {
      assert_eq!(Collection::parse(c.as_str()).unwrap(), c);
    }
    assert_eq!(Collection::parse("papers").unwrap(), Collection::Papers);
    assert_eq!(Collection::Subjects.as_str(), "subjects");
  }

  #[test]
  fn rejects_names_outside_allow_list() {
    for bad in ["bogus", "Papers", "", "papers ", "users"] {
      assert!(
        matches!(Collection::parse(bad), Err(Error::UnknownCollection(ref n)) if n == bad),
        "{bad:?} should be rejected"
      );
    }
  }

  #[test]
  fn bulk_clear_keeps_subjects() {
    assert!(!Collection::CLEARED_IN_BULK.contains(&Collection::Subjects));
  }
}
