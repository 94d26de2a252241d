//! Documents, collections and query filters: the shapes exchanged with a
//! [`DocumentStore`](crate::store::DocumentStore).

use std::fmt;

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

use crate::{Error, Result};

/// A JSON object holding a document's top-level fields.
pub type Fields = Map<String, Value>;

// ─── Collection ──────────────────────────────────────────────────────────────

/// The named collections this system reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
  Doctors,
  Patients,
  Appointments,
}

impl Collection {
  /// The collection name used by the backing store.
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Doctors => "doctors",
      Self::Patients => "patients",
      Self::Appointments => "appointments",
    }
  }

  pub fn parse(s: &str) -> Option<Self> {
    match s {
      "doctors" => Some(Self::Doctors),
      "patients" => Some(Self::Patients),
      "appointments" => Some(Self::Appointments),
      _ => None,
    }
  }
}

impl fmt::Display for Collection {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

// ─── Document ────────────────────────────────────────────────────────────────

/// A stored document: a store-assigned (or caller-assigned) id plus its
/// fields. The id is not part of `fields`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
  pub id:     String,
  pub fields: Fields,
}

impl Document {
  /// Deserialise the fields into a typed value.
  pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
    Ok(serde_json::from_value(Value::Object(self.fields.clone()))?)
  }
}

/// Serialise a typed value into top-level document fields.
///
/// Fails with [`Error::NotAnObject`] for values that do not serialise to a
/// JSON object (strings, sequences, ...).
pub fn to_fields<T: Serialize>(value: &T) -> Result<Fields> {
  match serde_json::to_value(value)? {
    Value::Object(map) => Ok(map),
    _ => Err(Error::NotAnObject),
  }
}

// ─── Filter ──────────────────────────────────────────────────────────────────

/// An equality filter on a single top-level string field, as used by live
/// queries (`doctorId == <id>`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFilter {
  pub field:  String,
  pub equals: String,
}

impl FieldFilter {
  pub fn eq(field: impl Into<String>, equals: impl Into<String>) -> Self {
    Self { field: field.into(), equals: equals.into() }
  }

  /// Whether `fields` satisfies this filter.
  pub fn matches(&self, fields: &Fields) -> bool {
    fields.get(&self.field).and_then(Value::as_str) == Some(self.equals.as_str())
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn collection_names_round_trip() {
    for c in [Collection::Doctors, Collection::Patients, Collection::Appointments] {
      assert_eq!(Collection::parse(c.as_str()), Some(c));
    }
    assert_eq!(Collection::parse("nurses"), None);
  }

  #[test]
  fn to_fields_rejects_non_objects() {
    assert!(matches!(to_fields(&"just a string"), Err(Error::NotAnObject)));
    assert!(to_fields(&json!({ "a": 1 })).is_ok());
  }

  #[test]
  fn filter_matches_only_equal_strings() {
    let filter = FieldFilter::eq("doctorId", "d1");
    let hit = to_fields(&json!({ "doctorId": "d1" })).unwrap();
    let miss = to_fields(&json!({ "doctorId": "d2" })).unwrap();
    let wrong_type = to_fields(&json!({ "doctorId": 1 })).unwrap();
    assert!(filter.matches(&hit));
    assert!(!filter.matches(&miss));
    assert!(!filter.matches(&wrong_type));
    assert!(!filter.matches(&Fields::new()));
  }
}
