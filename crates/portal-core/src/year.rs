//! Coercion of client-supplied `year` values into integers.
//!
//! Clients send years as JSON numbers or as numeric strings (form inputs).
//! Both are accepted; anything that does not denote a whole number is a
//! validation error rather than a deserialisation failure, so the caller can
//! report it as a bad request.

use serde::Deserialize;
use serde_json::Value;

use crate::{Error, Result};

/// A `year` field as it arrives on the wire, before coercion.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum YearInput {
  Integer(i64),
  Float(f64),
  Text(String),
  Other(Value),
}

impl YearInput {
  /// Coerce to an integer year.
  pub fn coerce(self) -> Result<i32> {
    match self {
      YearInput::Integer(n) => i32::try_from(n).map_err(|_| Error::InvalidYear(n.to_string())),
      YearInput::Float(f) => {
        if f.fract() == 0.0 && f >= f64::from(i32::MIN) && f <= f64::from(i32::MAX) {
          Ok(f as i32)
        } else {
          Err(Error::InvalidYear(f.to_string()))
        }
      }
      YearInput::Text(s) => s
        .trim()
        .parse::<i32>()
        .map_err(|_| Error::InvalidYear(format!("{s:?}"))),
      YearInput::Other(v) => Err(Error::InvalidYear(v.to_string())),
    }
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn coerce(v: Value) -> Result<i32> {
    serde_json::from_value::<YearInput>(v).unwrap().coerce()
  }

  #[test]
  fn accepts_integers_and_numeric_strings() {
    assert_eq!(coerce(json!(2024)).unwrap(), 2024);
    assert_eq!(coerce(json!("2023")).unwrap(), 2023);
    assert_eq!(coerce(json!(" 2022 ")).unwrap(), 2022);
    assert_eq!(coerce(json!(2021.0)).unwrap(), 2021);
  }

  #[test]
  fn rejects_non_numeric_input() {
    for v in [json!("twenty"), json!(""), json!(2024.5), json!(true), json!([2024]), json!({})] {
      assert!(matches!(coerce(v.clone()), Err(Error::InvalidYear(_))), "{v} should be rejected");
    }
  }

  #[test]
  fn rejects_out_of_range_integers() {
    assert!(matches!(coerce(json!(i64::MAX)), Err(Error::InvalidYear(_))));
  }
}
