//! The practitioner (doctor) dashboard.

use std::sync::Arc;

use clinic_core::{
  appointment::Appointment,
  identity::UserId,
  profile::{PractitionerProfile, Profile},
  store::DocumentStore,
};

use crate::{
  Error, Notice, Result, ViewLifetime, feed::AppointmentFeed, profile::ProfileManager,
  slots::SlotManager,
};

/// The dashboard's tabs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Section {
  #[default]
  Details,
  Schedule,
  Appointments,
}

impl Section {
  pub const ALL: [Section; 3] = [Self::Details, Self::Schedule, Self::Appointments];

  pub fn title(&self) -> &'static str {
    match self {
      Self::Details => "Details",
      Self::Schedule => "Schedule",
      Self::Appointments => "Appointments",
    }
  }

  pub fn next(self) -> Self {
    match self {
      Self::Details => Self::Schedule,
      Self::Schedule => Self::Appointments,
      Self::Appointments => Self::Details,
    }
  }

  pub fn prev(self) -> Self {
    match self {
      Self::Details => Self::Appointments,
      Self::Schedule => Self::Details,
      Self::Appointments => Self::Schedule,
    }
  }
}

pub struct PractitionerDashboard<S> {
  store:       Arc<S>,
  lifetime:    ViewLifetime,
  pub section: Section,
  pub profile: ProfileManager<PractitionerProfile>,
  pub slots:   SlotManager,
  feed:        AppointmentFeed,
}

impl<S: DocumentStore> PractitionerDashboard<S> {
  /// Load the practitioner's profile and open their appointment feed.
  ///
  /// Fails with [`Error::Cancelled`] if `lifetime` ends first.
  pub async fn mount(store: Arc<S>, user: UserId, lifetime: ViewLifetime) -> Result<Self> {
    let token = lifetime.token();
    let mut profile = ProfileManager::new(user.clone());

    let loading = async {
      profile.load(store.as_ref()).await?;
      AppointmentFeed::open(store.as_ref(), user).await
    };
    let feed = token.guard(loading).await.ok_or(Error::Cancelled)??;

    Ok(Self {
      store,
      lifetime,
      section: Section::default(),
      profile,
      slots: SlotManager::new(),
      feed,
    })
  }

  pub fn user(&self) -> &UserId { self.profile.owner() }

  pub fn lifetime(&self) -> &ViewLifetime { &self.lifetime }

  pub fn appointments(&self) -> &[Appointment] { self.feed.appointments() }

  /// Save the profile draft. Returns `None` if the view was torn down
  /// while saving.
  pub async fn save_profile(&mut self) -> Option<Notice> {
    let token = self.lifetime.token();
    let result = token.guard(self.profile.save(self.store.as_ref())).await?;
    Some(match result {
      Ok(()) => Notice::info(format!(
        "{} details saved successfully.",
        PractitionerProfile::LABEL
      )),
      Err(e) => {
        tracing::warn!(error = %e, "saving doctor details failed");
        Notice::error(format!("Error saving details: {e}"))
      }
    })
  }

  /// Add a slot from the slot form.
  pub fn add_slot(&mut self) -> Notice {
    match self.slots.submit_form() {
      Ok(_) => Notice::info("Slot added successfully!"),
      Err(e) => Notice::error(e.user_message()),
    }
  }

  /// Apply a pending feed update without waiting.
  pub fn poll_appointments(&mut self) -> bool { self.feed.poll() }

  /// Wait for the next feed update.
  pub async fn next_appointments(&mut self) -> bool {
    let token = self.lifetime.token();
    token.guard(self.feed.next_update()).await.unwrap_or(false)
  }

  pub fn is_mounted(&self) -> bool { !self.lifetime.is_ended() }

  /// End the view: pending work is discarded and the feed is released.
  pub fn unmount(&mut self) {
    self.lifetime.end();
    self.feed.release();
  }
}
