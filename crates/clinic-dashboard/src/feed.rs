//! The practitioner's live appointment feed.

use clinic_core::{
  appointment::{Appointment, DOCTOR_ID_FIELD},
  document::{Collection, Document, FieldFilter},
  identity::UserId,
  store::DocumentStore,
  subscription::Subscription,
};

use crate::{Error, Result};

/// Appointments addressed to one practitioner, kept current by a live query.
///
/// Every update replaces the whole list. Entries are ordered by date/time,
/// then by id.
#[derive(Debug)]
pub struct AppointmentFeed {
  doctor:       UserId,
  subscription: Option<Subscription<Vec<Document>>>,
  appointments: Vec<Appointment>,
}

impl AppointmentFeed {
  /// Open the live query for `doctor` and apply its initial result.
  pub async fn open<S: DocumentStore>(store: &S, doctor: UserId) -> Result<Self> {
    let subscription = store
      .subscribe_query(
        Collection::Appointments,
        FieldFilter::eq(DOCTOR_ID_FIELD, doctor.as_str()),
      )
      .await
      .map_err(Error::storage)?;

    let mut feed = Self {
      doctor,
      subscription: Some(subscription),
      appointments: Vec::new(),
    };
    feed.poll();
    Ok(feed)
  }

  pub fn doctor(&self) -> &UserId { &self.doctor }

  pub fn appointments(&self) -> &[Appointment] { &self.appointments }

  pub fn is_live(&self) -> bool { self.subscription.is_some() }

  /// Apply a pending snapshot, if any. Returns whether the list changed.
  pub fn poll(&mut self) -> bool {
    let Some(docs) = self.subscription.as_mut().and_then(Subscription::try_next)
    else {
      return false;
    };
    self.replace(&docs);
    true
  }

  /// Wait for the next snapshot and apply it. Returns `false` once the feed
  /// is released or the store has gone away.
  pub async fn next_update(&mut self) -> bool {
    let Some(subscription) = self.subscription.as_mut() else {
      return false;
    };
    match subscription.next().await {
      Some(docs) => {
        self.replace(&docs);
        true
      }
      None => {
        self.subscription = None;
        false
      }
    }
  }

  fn replace(&mut self, docs: &[Document]) {
    let mut appointments: Vec<Appointment> = docs
      .iter()
      .filter_map(|doc| match Appointment::from_document(doc) {
        Ok(appt) => Some(appt),
        Err(e) => {
          tracing::warn!(doc_id = %doc.id, error = %e, "skipping malformed appointment");
          None
        }
      })
      .collect();
    appointments.sort_by(|a, b| a.date_time.cmp(&b.date_time).then_with(|| a.id.cmp(&b.id)));
    tracing::debug!(doctor = %self.doctor, count = appointments.len(), "appointment feed updated");
    self.appointments = appointments;
  }

  /// Stop listening. The list keeps its last contents but never changes
  /// again.
  pub fn release(&mut self) {
    if let Some(subscription) = self.subscription.take() {
      subscription.release();
    }
  }
}
