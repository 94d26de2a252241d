//! Core types and trait definitions for the clinic booking system.
//!
//! This crate is deliberately free of database and terminal dependencies.
//! The identity provider, the document store and navigation are described
//! here as traits; concrete backends live in their own crates.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod appointment;
pub mod document;
pub mod error;
pub mod identity;
pub mod navigation;
pub mod profile;
pub mod slot;
pub mod store;
pub mod subscription;

pub use error::{Error, Result};
