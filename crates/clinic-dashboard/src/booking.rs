//! Booking an appointment with a practitioner.
//!
//! Only presence and date/time parsing are checked. There is no conflict or
//! duplicate detection: two bookings for the same practitioner and time
//! both succeed.

use clinic_core::{
  appointment::{Appointment, NewAppointment, Timestamp, parse_date_time},
  document::Collection,
  identity::UserId,
  store::DocumentStore,
};

use crate::{Error, Result, ValidationError};

/// Validate and write one appointment for `patient`.
///
/// Nothing is written when validation fails. Storage failures are returned
/// as they are, without retry.
pub async fn submit_booking<S: DocumentStore>(
  store: &S,
  patient: &UserId,
  doctor_id: &str,
  date_time: &str,
  notes: &str,
) -> Result<Appointment> {
  if doctor_id.is_empty() || date_time.is_empty() {
    return Err(ValidationError::MissingSelection.into());
  }
  let when = parse_date_time(date_time).ok_or(ValidationError::InvalidDateTime)?;

  let new = NewAppointment {
    doctor_id:  UserId::new(doctor_id),
    patient_id: patient.clone(),
    date_time:  Timestamp::from(when),
    notes:      notes.to_owned(),
  };
  let id = store
    .insert(Collection::Appointments, new.to_fields()?)
    .await
    .map_err(Error::storage)?;

  tracing::info!(appointment_id = %id, doctor = %new.doctor_id, patient = %patient, "appointment booked");
  Ok(Appointment {
    id,
    doctor_id: new.doctor_id,
    patient_id: new.patient_id,
    date_time: new.date_time,
    notes: new.notes,
  })
}

// ─── Flow ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormState {
  #[default]
  Hidden,
  Visible,
}

/// The booking form fields as entered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingForm {
  pub doctor_id: String,
  pub date_time: String,
  pub notes:     String,
}

#[derive(Debug, Clone, Default)]
pub struct BookingFlow {
  state:    FormState,
  pub form: BookingForm,
}

impl BookingFlow {
  pub fn new() -> Self { Self::default() }

  pub fn state(&self) -> FormState { self.state }

  pub fn is_visible(&self) -> bool { self.state == FormState::Visible }

  /// Show or hide the form. The entered fields survive hiding.
  pub fn toggle(&mut self) {
    self.state = match self.state {
      FormState::Hidden => FormState::Visible,
      FormState::Visible => FormState::Hidden,
    };
  }

  /// Book from the current form. On success the fields are cleared and the
  /// form stays visible; on any failure they are left as entered.
  pub async fn submit<S: DocumentStore>(
    &mut self,
    store: &S,
    patient: &UserId,
  ) -> Result<Appointment> {
    let appt = submit_booking(
      store,
      patient,
      &self.form.doctor_id,
      &self.form.date_time,
      &self.form.notes,
    )
    .await?;
    self.form = BookingForm::default();
    Ok(appt)
  }
}
