//! Dashboard tests. Storage runs against an in-memory `SqliteStore`; the
//! identity provider, navigator and misbehaving stores are fakes.

mod fakes;
mod lifetime;
mod profile;
mod slots;

use clinic_store_sqlite::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}
