use std::time::Duration;

use crate::ViewLifetime;

#[tokio::test]
async fn guard_passes_result_through_while_alive() {
  let lifetime = ViewLifetime::new();
  let out = lifetime.token().guard(async { 7 }).await;
  assert_eq!(out, Some(7));
}

#[tokio::test]
async fn result_after_end_is_discarded() {
  let lifetime = ViewLifetime::new();
  let token = lifetime.token();

  let ender = lifetime.clone();
  tokio::spawn(async move {
    tokio::time::sleep(Duration::from_millis(10)).await;
    ender.end();
  });

  let out = token
    .guard(async {
      tokio::time::sleep(Duration::from_secs(5)).await;
      "late"
    })
    .await;
  assert_eq!(out, None);
  assert!(token.is_cancelled());
}

#[tokio::test]
async fn ended_lifetime_skips_work() {
  let lifetime = ViewLifetime::new();
  lifetime.end();
  lifetime.end();
  assert!(lifetime.is_ended());

  let mut ran = false;
  let out = lifetime.token().guard(async { ran = true }).await;
  assert!(out.is_none());
  assert!(!ran);
}

#[test]
fn dropped_lifetime_counts_as_cancelled() {
  let token = ViewLifetime::new().token();
  assert!(token.is_cancelled());
}
