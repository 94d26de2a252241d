//! Integration tests for `SqliteStore` and `SqliteIdentity` against an
//! in-memory database.

use std::time::Duration;

use clinic_core::{
  document::{Collection, FieldFilter, Fields, to_fields},
  identity::{IdentityProvider, Role, UserId},
  store::DocumentStore,
};
use serde_json::json;

use crate::{Error, SqliteIdentity, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn fields(value: serde_json::Value) -> Fields { to_fields(&value).unwrap() }

fn appointment(doctor: &str, notes: &str) -> Fields {
  fields(json!({
    "doctorId": doctor,
    "patientId": "p1",
    "dateTime": { "seconds": 1_735_725_600, "nanoseconds": 0 },
    "notes": notes,
  }))
}

// ─── Single documents ────────────────────────────────────────────────────────

#[tokio::test]
async fn get_one_missing_returns_none() {
  let s = store().await;
  let doc = s.get_one(Collection::Doctors, "nobody").await.unwrap();
  assert!(doc.is_none());
}

#[tokio::test]
async fn upsert_creates_then_reads_back() {
  let s = store().await;
  s.upsert_merge(
    Collection::Doctors,
    "d1",
    fields(json!({ "name": "Dr. Grey", "specialization": "Surgery" })),
  )
  .await
  .unwrap();

  let doc = s.get_one(Collection::Doctors, "d1").await.unwrap().unwrap();
  assert_eq!(doc.id, "d1");
  assert_eq!(doc.fields["name"], json!("Dr. Grey"));
  assert_eq!(doc.fields["specialization"], json!("Surgery"));
}

#[tokio::test]
async fn upsert_preserves_unspecified_fields() {
  let s = store().await;
  s.upsert_merge(
    Collection::Patients,
    "p1",
    fields(json!({ "name": "Ada", "insurer": "Acme" })),
  )
  .await
  .unwrap();
  s.upsert_merge(Collection::Patients, "p1", fields(json!({ "name": "Ada L." })))
    .await
    .unwrap();

  let doc = s.get_one(Collection::Patients, "p1").await.unwrap().unwrap();
  assert_eq!(doc.fields["name"], json!("Ada L."));
  assert_eq!(doc.fields["insurer"], json!("Acme"));
}

#[tokio::test]
async fn disjoint_merges_commute() {
  let a = store().await;
  let b = store().await;
  let first = fields(json!({ "name": "Ada" }));
  let second = fields(json!({ "contactDetails": "ada@example.com" }));

  a.upsert_merge(Collection::Patients, "p1", first.clone()).await.unwrap();
  a.upsert_merge(Collection::Patients, "p1", second.clone()).await.unwrap();
  b.upsert_merge(Collection::Patients, "p1", second).await.unwrap();
  b.upsert_merge(Collection::Patients, "p1", first).await.unwrap();

  let from_a = a.get_one(Collection::Patients, "p1").await.unwrap().unwrap();
  let from_b = b.get_one(Collection::Patients, "p1").await.unwrap().unwrap();
  assert_eq!(from_a.fields, from_b.fields);
}

#[tokio::test]
async fn collections_are_isolated() {
  let s = store().await;
  s.upsert_merge(Collection::Doctors, "u1", fields(json!({ "name": "Doc" })))
    .await
    .unwrap();
  assert!(s.get_one(Collection::Patients, "u1").await.unwrap().is_none());
}

// ─── Insert and list ─────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_generates_distinct_ids() {
  let s = store().await;
  let a = s.insert(Collection::Appointments, appointment("d1", "a")).await.unwrap();
  let b = s.insert(Collection::Appointments, appointment("d1", "b")).await.unwrap();
  assert_ne!(a, b);

  let doc = s.get_one(Collection::Appointments, &a).await.unwrap().unwrap();
  assert_eq!(doc.fields["notes"], json!("a"));
}

#[tokio::test]
async fn get_all_returns_every_document_in_collection() {
  let s = store().await;
  for (id, name) in [("d1", "One"), ("d2", "Two"), ("d3", "Three")] {
    s.upsert_merge(Collection::Doctors, id, fields(json!({ "name": name })))
      .await
      .unwrap();
  }
  s.upsert_merge(Collection::Patients, "p1", fields(json!({ "name": "P" })))
    .await
    .unwrap();

  let all = s.get_all(Collection::Doctors).await.unwrap();
  let ids: Vec<_> = all.iter().map(|d| d.id.as_str()).collect();
  assert_eq!(ids, ["d1", "d2", "d3"]);
}

// ─── Live queries ────────────────────────────────────────────────────────────

#[tokio::test]
async fn live_query_delivers_initial_and_updated_snapshots() {
  let s = store().await;
  s.insert(Collection::Appointments, appointment("d1", "first")).await.unwrap();
  s.insert(Collection::Appointments, appointment("d2", "other doctor")).await.unwrap();

  let mut sub = s
    .subscribe_query(Collection::Appointments, FieldFilter::eq("doctorId", "d1"))
    .await
    .unwrap();

  let initial = sub.next().await.unwrap();
  assert_eq!(initial.len(), 1);
  assert_eq!(initial[0].fields["notes"], json!("first"));

  s.insert(Collection::Appointments, appointment("d1", "second")).await.unwrap();

  let updated = tokio::time::timeout(Duration::from_secs(5), sub.next())
    .await
    .expect("update within timeout")
    .unwrap();
  assert_eq!(updated.len(), 2);
  assert!(updated.iter().all(|d| d.fields["doctorId"] == json!("d1")));
}

#[tokio::test]
async fn live_query_ignores_other_collections() {
  let s = store().await;
  let mut sub = s
    .subscribe_query(Collection::Appointments, FieldFilter::eq("doctorId", "d1"))
    .await
    .unwrap();
  assert!(sub.next().await.unwrap().is_empty());

  s.upsert_merge(Collection::Doctors, "d1", fields(json!({ "doctorId": "d1" })))
    .await
    .unwrap();
  tokio::time::sleep(Duration::from_millis(50)).await;
  assert!(sub.try_next().is_none());
}

// ─── Identity ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn sign_up_then_sign_in() {
  let s = store().await;
  let identity = SqliteIdentity::new(&s);

  let account = identity
    .sign_up("grey", "hunter2", Role::Practitioner)
    .await
    .unwrap();
  assert!(identity.current().is_none());

  let signed_in = identity.sign_in("grey", "hunter2").await.unwrap();
  assert_eq!(signed_in, account);
  assert_eq!(identity.current(), Some(account.user_id.clone()));

  let role = identity.role_of(&account.user_id).await.unwrap();
  assert_eq!(role, Some(Role::Practitioner));
}

#[tokio::test]
async fn wrong_password_is_rejected() {
  let s = store().await;
  let identity = SqliteIdentity::new(&s);
  identity.sign_up("ada", "secret", Role::Client).await.unwrap();

  let result = identity.sign_in("ada", "wrong").await;
  assert!(matches!(result, Err(Error::InvalidCredentials)));
  assert!(identity.current().is_none());

  let unknown = identity.sign_in("nobody", "secret").await;
  assert!(matches!(unknown, Err(Error::InvalidCredentials)));
}

#[tokio::test]
async fn duplicate_username_is_rejected() {
  let s = store().await;
  let identity = SqliteIdentity::new(&s);
  identity.sign_up("ada", "one", Role::Client).await.unwrap();
  let again = identity.sign_up("ada", "two", Role::Practitioner).await;
  assert!(matches!(again, Err(Error::UsernameTaken(name)) if name == "ada"));
}

#[tokio::test]
async fn role_of_unknown_user_is_none() {
  let s = store().await;
  let identity = SqliteIdentity::new(&s);
  let role = identity.role_of(&UserId::from("ghost")).await.unwrap();
  assert!(role.is_none());
}

#[tokio::test]
async fn subscribers_observe_sign_in_and_out() {
  let s = store().await;
  let identity = SqliteIdentity::new(&s);
  identity.sign_up("ada", "secret", Role::Client).await.unwrap();

  let mut sub = identity.subscribe();
  assert_eq!(identity.subscriber_count(), 1);
  assert_eq!(sub.next().await, Some(None));

  let account = identity.sign_in("ada", "secret").await.unwrap();
  assert_eq!(sub.next().await, Some(Some(account.user_id)));

  identity.sign_out().await.unwrap();
  assert_eq!(sub.next().await, Some(None));

  sub.release();
  assert_eq!(identity.subscriber_count(), 0);
}
