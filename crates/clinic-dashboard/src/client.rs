//! The client (patient) dashboard.

use std::sync::Arc;

use clinic_core::{
  identity::UserId,
  profile::{ClientProfile, PractitionerProfile, Profile, StoredProfile},
  store::DocumentStore,
};

use crate::{
  Error, Notice, Result, ViewLifetime,
  booking::BookingFlow,
  profile::ProfileManager,
  roster::load_roster,
};

pub struct ClientDashboard<S> {
  store:       Arc<S>,
  lifetime:    ViewLifetime,
  pub profile: ProfileManager<ClientProfile>,
  pub booking: BookingFlow,
  roster:      Vec<StoredProfile<PractitionerProfile>>,
}

impl<S: DocumentStore> ClientDashboard<S> {
  /// Load the client's profile and a fresh practitioner roster.
  ///
  /// Fails with [`Error::Cancelled`] if `lifetime` ends first.
  pub async fn mount(store: Arc<S>, user: UserId, lifetime: ViewLifetime) -> Result<Self> {
    let token = lifetime.token();
    let mut profile = ProfileManager::new(user);

    let loading = async {
      profile.load(store.as_ref()).await?;
      load_roster(store.as_ref()).await
    };
    let roster = token.guard(loading).await.ok_or(Error::Cancelled)??;

    Ok(Self {
      store,
      lifetime,
      profile,
      booking: BookingFlow::new(),
      roster,
    })
  }

  pub fn user(&self) -> &UserId { self.profile.owner() }

  pub fn lifetime(&self) -> &ViewLifetime { &self.lifetime }

  pub fn roster(&self) -> &[StoredProfile<PractitionerProfile>] { &self.roster }

  pub async fn save_profile(&mut self) -> Option<Notice> {
    let token = self.lifetime.token();
    let result = token.guard(self.profile.save(self.store.as_ref())).await?;
    Some(match result {
      Ok(()) => {
        Notice::info(format!("{} details saved successfully.", ClientProfile::LABEL))
      }
      Err(e) => {
        tracing::warn!(error = %e, "saving patient details failed");
        Notice::error(format!("Error saving details: {e}"))
      }
    })
  }

  pub fn toggle_booking(&mut self) { self.booking.toggle(); }

  /// Submit the booking form. Returns `None` if the view was torn down
  /// while the write was in flight.
  pub async fn submit_booking(&mut self) -> Option<Notice> {
    let token = self.lifetime.token();
    let patient = self.profile.owner().clone();
    let result = token
      .guard(self.booking.submit(self.store.as_ref(), &patient))
      .await?;
    Some(match result {
      Ok(_) => Notice::info("Appointment booked successfully!"),
      Err(Error::Validation(v)) => Notice::error(v.user_message()),
      Err(e) => {
        tracing::warn!(error = %e, "booking failed");
        Notice::error(format!("Error booking appointment: {e}"))
      }
    })
  }

  pub fn is_mounted(&self) -> bool { !self.lifetime.is_ended() }

  pub fn unmount(&mut self) { self.lifetime.end(); }
}
