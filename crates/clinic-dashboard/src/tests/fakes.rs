use std::{future::pending, io, sync::Mutex};

use clinic_core::{
  document::{Collection, Document, FieldFilter, Fields},
  identity::{IdentityProvider, Role, UserId},
  navigation::{Navigator, Route},
  store::DocumentStore,
  subscription::Subscription,
};
use tokio::sync::watch;

// ─── Identity ────────────────────────────────────────────────────────────────

pub struct FakeIdentity {
  session: watch::Sender<Option<UserId>>,
}

impl FakeIdentity {
  pub fn signed_in(id: &str) -> Self {
    let (session, _) = watch::channel(Some(UserId::from(id)));
    Self { session }
  }

  pub fn signed_out() -> Self {
    let (session, _) = watch::channel(None);
    Self { session }
  }

  pub fn set(&self, user: Option<&str>) { self.session.send_replace(user.map(UserId::from)); }

  pub fn subscribers(&self) -> usize { self.session.receiver_count() }
}

impl IdentityProvider for FakeIdentity {
  type Error = io::Error;

  fn subscribe(&self) -> Subscription<Option<UserId>> {
    Subscription::new(self.session.subscribe())
  }

  async fn sign_out(&self) -> io::Result<()> {
    self.session.send_replace(None);
    Ok(())
  }

  async fn role_of(&self, _id: &UserId) -> io::Result<Option<Role>> { Ok(None) }
}

// ─── Navigator ───────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingNavigator {
  routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
  pub fn routes(&self) -> Vec<Route> { self.routes.lock().unwrap().clone() }
}

impl Navigator for RecordingNavigator {
  fn redirect(&self, route: Route) { self.routes.lock().unwrap().push(route); }
}

// ─── Stores ──────────────────────────────────────────────────────────────────

fn unavailable() -> io::Error {
  io::Error::new(io::ErrorKind::ConnectionRefused, "backend unavailable")
}

/// Every call fails.
pub struct FailingStore;

impl DocumentStore for FailingStore {
  type Error = io::Error;

  async fn get_one(&self, _: Collection, _: &str) -> io::Result<Option<Document>> {
    Err(unavailable())
  }

  async fn upsert_merge(&self, _: Collection, _: &str, _: Fields) -> io::Result<()> {
    Err(unavailable())
  }

  async fn insert(&self, _: Collection, _: Fields) -> io::Result<String> {
    Err(unavailable())
  }

  async fn get_all(&self, _: Collection) -> io::Result<Vec<Document>> {
    Err(unavailable())
  }

  async fn subscribe_query(
    &self,
    _: Collection,
    _: FieldFilter,
  ) -> io::Result<Subscription<Vec<Document>>> {
    Err(unavailable())
  }
}

/// Every call waits forever.
pub struct HangingStore;

impl DocumentStore for HangingStore {
  type Error = io::Error;

  async fn get_one(&self, _: Collection, _: &str) -> io::Result<Option<Document>> {
    pending().await
  }

  async fn upsert_merge(&self, _: Collection, _: &str, _: Fields) -> io::Result<()> {
    pending().await
  }

  async fn insert(&self, _: Collection, _: Fields) -> io::Result<String> { pending().await }

  async fn get_all(&self, _: Collection) -> io::Result<Vec<Document>> { pending().await }

  async fn subscribe_query(
    &self,
    _: Collection,
    _: FieldFilter,
  ) -> io::Result<Subscription<Vec<Document>>> {
    pending().await
  }
}
