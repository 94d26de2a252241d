//! Practitioner and client profiles.
//!
//! A profile document lives in its role's collection under the owning
//! user's id. Profiles are created implicitly by the first upsert-merge and
//! are never deleted. Fields missing from a stored document read back as
//! empty strings.

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{document::Collection, identity::UserId};

/// The shape shared by both kinds of profile.
pub trait Profile:
  Clone + Default + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
  /// Collection holding documents of this kind.
  const COLLECTION: Collection;
  /// Human-readable kind used in user-facing messages ("Doctor", "Patient").
  const LABEL: &'static str;
}

/// A doctor's public profile. Stored in `doctors`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PractitionerProfile {
  pub name:           String,
  pub specialization: String,
}

impl Profile for PractitionerProfile {
  const COLLECTION: Collection = Collection::Doctors;
  const LABEL: &'static str = "Doctor";
}

/// A patient's profile. Stored in `patients`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientProfile {
  pub name:            String,
  pub contact_details: String,
  pub medical_history: String,
}

impl Profile for ClientProfile {
  const COLLECTION: Collection = Collection::Patients;
  const LABEL: &'static str = "Patient";
}

/// A profile together with the id of the user it describes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredProfile<P> {
  pub id:      UserId,
  pub profile: P,
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;
  use crate::document::{Document, to_fields};

  #[test]
  fn client_profile_uses_camel_case_fields() {
    let profile = ClientProfile {
      name:            "Ada".into(),
      contact_details: "ada@example.com".into(),
      medical_history: "none".into(),
    };
    let fields = to_fields(&profile).unwrap();
    assert_eq!(fields["contactDetails"], json!("ada@example.com"));
    assert_eq!(fields["medicalHistory"], json!("none"));
  }

  #[test]
  fn missing_fields_decode_as_empty() {
    let doc = Document {
      id:     "d1".into(),
      fields: to_fields(&json!({ "name": "Dr. Who", "licence": "X-1" })).unwrap(),
    };
    let profile: PractitionerProfile = doc.decode().unwrap();
    assert_eq!(profile.name, "Dr. Who");
    assert_eq!(profile.specialization, "");
  }
}
