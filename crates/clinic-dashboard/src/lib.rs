//! The clinic's dashboards, expressed as plain state machines over the
//! collaborator traits in [`clinic_core`].
//!
//! Nothing here touches a terminal or a database directly. Each component
//! receives the store (and, for the session gate, the identity provider and
//! navigator) explicitly, so tests substitute fakes freely.

pub mod backend;
pub mod booking;
pub mod client;
pub mod error;
pub mod feed;
pub mod lifetime;
pub mod notice;
pub mod practitioner;
pub mod profile;
pub mod roster;
pub mod session;
pub mod slots;

pub use backend::Backend;
pub use client::ClientDashboard;
pub use error::{Error, Result, ValidationError};
pub use lifetime::{LifetimeToken, ViewLifetime};
pub use notice::Notice;
pub use practitioner::{PractitionerDashboard, Section};
pub use session::{SessionEvent, SessionGate};

#[cfg(test)]
mod tests;
