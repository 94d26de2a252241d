//! The practitioner's session-local availability slots.

use clinic_core::slot::AvailabilitySlot;

use crate::ValidationError;

/// The "add slot" form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotForm {
  pub start_time: String,
  pub end_time:   String,
  pub available:  bool,
}

/// Slots in insertion order. Nothing here is persisted, sorted or checked
/// for overlap; the list is gone when the dashboard is.
#[derive(Debug, Clone, Default)]
pub struct SlotManager {
  pub form: SlotForm,
  slots:    Vec<AvailabilitySlot>,
}

impl SlotManager {
  pub fn new() -> Self { Self::default() }

  pub fn slots(&self) -> &[AvailabilitySlot] { &self.slots }

  /// Append a slot. Rejected, with nothing appended, if either time is
  /// empty.
  pub fn add_slot(
    &mut self,
    start_time: &str,
    end_time: &str,
    available: bool,
  ) -> Result<&AvailabilitySlot, ValidationError> {
    if start_time.is_empty() || end_time.is_empty() {
      return Err(ValidationError::MissingSlotTime);
    }
    self.slots.push(AvailabilitySlot {
      start_time: start_time.to_owned(),
      end_time: end_time.to_owned(),
      available,
    });
    Ok(&self.slots[self.slots.len() - 1])
  }

  /// Add a slot from the form, clearing the form on success.
  pub fn submit_form(&mut self) -> Result<&AvailabilitySlot, ValidationError> {
    let SlotForm { start_time, end_time, available } = self.form.clone();
    self.add_slot(&start_time, &end_time, available)?;
    self.form = SlotForm::default();
    Ok(&self.slots[self.slots.len() - 1])
  }
}
