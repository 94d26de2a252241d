//! Profile loading, saving and the edit/cancel discipline around them.
//!
//! One implementation serves both roles; the [`Profile`] type parameter
//! picks the collection and the fields.

use clinic_core::{
  document::to_fields,
  identity::UserId,
  profile::Profile,
  store::DocumentStore,
};

use crate::{Error, Result};

/// Fetch the profile stored under `id`.
///
/// A missing document is "no data yet": it is logged and reported as
/// `None`, never as an error.
pub async fn load_profile<P, S>(store: &S, id: &UserId) -> Result<Option<P>>
where
  P: Profile,
  S: DocumentStore,
{
  let doc = store
    .get_one(P::COLLECTION, id.as_str())
    .await
    .map_err(Error::storage)?;

  match doc {
    Some(doc) => Ok(Some(doc.decode()?)),
    None => {
      tracing::debug!(collection = %P::COLLECTION, user_id = %id, "no such document");
      Ok(None)
    }
  }
}

/// Upsert-merge the profile's fields under `id`. Other stored fields are
/// left untouched. Contents are not validated; empty strings are written.
pub async fn save_profile<P, S>(store: &S, id: &UserId, profile: &P) -> Result<()>
where
  P: Profile,
  S: DocumentStore,
{
  let fields = to_fields(profile)?;
  store
    .upsert_merge(P::COLLECTION, id.as_str(), fields)
    .await
    .map_err(Error::storage)?;
  tracing::debug!(collection = %P::COLLECTION, user_id = %id, "profile saved");
  Ok(())
}

// ─── Manager ─────────────────────────────────────────────────────────────────

/// A user's own profile as shown and edited by their dashboard.
///
/// `profile()` is the last loaded or saved snapshot; `draft()` holds the
/// editable copy while `is_editing()` is set.
#[derive(Debug, Clone)]
pub struct ProfileManager<P> {
  owner:    UserId,
  snapshot: P,
  draft:    P,
  editing:  bool,
}

impl<P: Profile> ProfileManager<P> {
  /// Start with empty-string fields until a load succeeds.
  pub fn new(owner: UserId) -> Self {
    Self {
      owner,
      snapshot: P::default(),
      draft: P::default(),
      editing: false,
    }
  }

  pub fn owner(&self) -> &UserId { &self.owner }

  pub fn profile(&self) -> &P { &self.snapshot }

  pub fn draft(&self) -> &P { &self.draft }

  pub fn draft_mut(&mut self) -> &mut P { &mut self.draft }

  pub fn is_editing(&self) -> bool { self.editing }

  /// Load from the store. Returns whether a document existed; when it did
  /// not, the fields keep their current values.
  pub async fn load<S: DocumentStore>(&mut self, store: &S) -> Result<bool> {
    match load_profile::<P, S>(store, &self.owner).await? {
      Some(profile) => {
        self.draft = profile.clone();
        self.snapshot = profile;
        Ok(true)
      }
      None => Ok(false),
    }
  }

  /// Seed the draft from the snapshot and enter edit mode.
  pub fn begin_edit(&mut self) {
    self.draft = self.snapshot.clone();
    self.editing = true;
  }

  /// Leave edit mode, discarding unsaved changes.
  pub fn cancel_edit(&mut self) {
    self.draft = self.snapshot.clone();
    self.editing = false;
  }

  /// Persist the draft. On success it becomes the snapshot and edit mode
  /// ends; on failure the draft and edit mode are kept as they were.
  pub async fn save<S: DocumentStore>(&mut self, store: &S) -> Result<()> {
    save_profile(store, &self.owner, &self.draft).await?;
    self.snapshot = self.draft.clone();
    self.editing = false;
    Ok(())
  }
}
