//! SQLite backend for the clinic document store and identity provider.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime.

mod encode;
mod schema;
mod store;

pub mod error;
pub mod identity;

pub use error::{Error, Result};
pub use identity::{Account, SqliteIdentity};
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
