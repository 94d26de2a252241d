//! The practitioner roster offered to clients when booking.

use clinic_core::{
  document::Collection,
  identity::UserId,
  profile::{PractitionerProfile, StoredProfile},
  store::DocumentStore,
};

use crate::{Error, Result};

/// Fetch every practitioner profile, once. Documents that fail to decode are
/// skipped.
pub async fn load_roster<S: DocumentStore>(
  store: &S,
) -> Result<Vec<StoredProfile<PractitionerProfile>>> {
  let docs = store
    .get_all(Collection::Doctors)
    .await
    .map_err(Error::storage)?;

  let roster: Vec<_> = docs
    .iter()
    .filter_map(|doc| match doc.decode::<PractitionerProfile>() {
      Ok(profile) => Some(StoredProfile { id: UserId::new(doc.id.clone()), profile }),
      Err(e) => {
        tracing::warn!(doc_id = %doc.id, error = %e, "skipping malformed doctor profile");
        None
      }
    })
    .collect();

  tracing::debug!(count = roster.len(), "roster loaded");
  Ok(roster)
}
