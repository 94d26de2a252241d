use clinic_core::slot::AvailabilitySlot;

use crate::{
  ValidationError,
  slots::{SlotForm, SlotManager},
};

#[test]
fn empty_times_are_rejected() {
  let mut slots = SlotManager::new();
  assert_eq!(
    slots.add_slot("", "10:00", true).unwrap_err(),
    ValidationError::MissingSlotTime
  );
  assert_eq!(
    slots.add_slot("09:00", "", true).unwrap_err(),
    ValidationError::MissingSlotTime
  );
  assert!(slots.slots().is_empty());
}

#[test]
fn valid_slot_is_appended_as_entered() {
  let mut slots = SlotManager::new();
  let added = slots.add_slot("09:00", "17:00", true).unwrap().clone();
  assert_eq!(added, AvailabilitySlot {
    start_time: "09:00".into(),
    end_time:   "17:00".into(),
    available:  true,
  });
  assert_eq!(slots.slots(), [added]);
}

#[test]
fn valid_slots_append_in_order() {
  let mut slots = SlotManager::new();
  slots.add_slot("14:00", "15:00", false).unwrap();
  slots.add_slot("09:00", "10:00", true).unwrap();
  // Reversed ranges are accepted as entered.
  slots.add_slot("12:00", "11:00", true).unwrap();

  let starts: Vec<_> = slots.slots().iter().map(|s| s.start_time.as_str()).collect();
  assert_eq!(starts, ["14:00", "09:00", "12:00"]);
  assert_eq!(
    slots.slots()[1].to_string(),
    "Start: 09:00 | End: 10:00 | Available: Yes"
  );
}

#[test]
fn submitting_the_form_clears_it_only_on_success() {
  let mut slots = SlotManager::new();
  slots.form.start_time = "09:00".into();
  slots.form.available = true;
  assert!(slots.submit_form().is_err());
  assert_eq!(slots.form.start_time, "09:00");

  slots.form.end_time = "09:30".into();
  let added = slots.submit_form().unwrap().clone();
  assert!(added.available);
  assert_eq!(slots.form, SlotForm::default());
  assert_eq!(slots.slots().len(), 1);
}
