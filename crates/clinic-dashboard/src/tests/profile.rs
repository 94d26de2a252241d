use clinic_core::{
  document::{Collection, to_fields},
  identity::UserId,
  profile::{ClientProfile, PractitionerProfile},
  store::DocumentStore,
};
use serde_json::json;

use super::{fakes::FailingStore, store};
use crate::{
  Error,
  profile::{ProfileManager, load_profile, save_profile},
};

#[tokio::test]
async fn missing_profile_loads_as_none() {
  let s = store().await;
  let loaded = load_profile::<ClientProfile, _>(&s, &UserId::from("p1"))
    .await
    .unwrap();
  assert!(loaded.is_none());
}

#[tokio::test]
async fn save_then_load_keeps_untouched_stored_fields() {
  let s = store().await;
  s.upsert_merge(
    Collection::Doctors,
    "d1",
    to_fields(&json!({ "name": "Old", "licence": "X-1" })).unwrap(),
  )
  .await
  .unwrap();

  let id = UserId::from("d1");
  let profile = PractitionerProfile {
    name:           "Dr. Grey".into(),
    specialization: "Surgery".into(),
  };
  save_profile(&s, &id, &profile).await.unwrap();

  let loaded = load_profile::<PractitionerProfile, _>(&s, &id).await.unwrap();
  assert_eq!(loaded, Some(profile));

  let raw = s.get_one(Collection::Doctors, "d1").await.unwrap().unwrap();
  assert_eq!(raw.fields["licence"], json!("X-1"));
}

#[tokio::test]
async fn empty_fields_are_persisted() {
  let s = store().await;
  let id = UserId::from("p1");
  save_profile(&s, &id, &ClientProfile::default()).await.unwrap();

  let raw = s.get_one(Collection::Patients, "p1").await.unwrap().unwrap();
  assert_eq!(raw.fields["name"], json!(""));
  assert_eq!(raw.fields["contactDetails"], json!(""));
}

#[tokio::test]
async fn manager_save_updates_snapshot_and_ends_editing() {
  let s = store().await;
  let mut manager = ProfileManager::<ClientProfile>::new(UserId::from("p1"));
  assert!(!manager.load(&s).await.unwrap());

  manager.begin_edit();
  manager.draft_mut().name = "Ada".into();
  manager.save(&s).await.unwrap();

  assert!(!manager.is_editing());
  assert_eq!(manager.profile().name, "Ada");

  let mut reloaded = ProfileManager::<ClientProfile>::new(UserId::from("p1"));
  assert!(reloaded.load(&s).await.unwrap());
  assert_eq!(reloaded.profile().name, "Ada");
}

#[tokio::test]
async fn cancel_edit_restores_last_snapshot() {
  let s = store().await;
  let mut manager = ProfileManager::<PractitionerProfile>::new(UserId::from("d1"));
  manager.begin_edit();
  manager.draft_mut().name = "Dr. Grey".into();
  manager.save(&s).await.unwrap();

  manager.begin_edit();
  manager.draft_mut().name = "typo".into();
  manager.cancel_edit();

  assert!(!manager.is_editing());
  assert_eq!(manager.draft().name, "Dr. Grey");
  assert_eq!(manager.profile().name, "Dr. Grey");
}

#[tokio::test]
async fn failed_save_keeps_draft_and_edit_mode() {
  let mut manager = ProfileManager::<ClientProfile>::new(UserId::from("p1"));
  manager.begin_edit();
  manager.draft_mut().medical_history = "asthma".into();

  let result = manager.save(&FailingStore).await;
  assert!(matches!(result, Err(Error::Storage(_))));
  assert!(manager.is_editing());
  assert_eq!(manager.draft().medical_history, "asthma");
  assert_eq!(manager.profile().medical_history, "");
}
