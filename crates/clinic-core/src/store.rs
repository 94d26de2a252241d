//! The `DocumentStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `clinic-store-sqlite`).
//! Higher layers (`clinic-dashboard`, `clinic-cli`) depend on this
//! abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  document::{Collection, Document, FieldFilter, Fields},
  subscription::Subscription,
};

/// Abstraction over a schemaless document database.
///
/// There are no transactions across documents and no concurrency control:
/// concurrent writers race at the granularity of a single top-level field.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes.
pub trait DocumentStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Fetch a single document. Returns `None` if it does not exist.
  fn get_one<'a>(
    &'a self,
    collection: Collection,
    id: &'a str,
  ) -> impl Future<Output = Result<Option<Document>, Self::Error>> + Send + 'a;

  /// Create the document if absent; otherwise overlay only the given
  /// top-level fields, leaving every other stored field untouched.
  fn upsert_merge<'a>(
    &'a self,
    collection: Collection,
    id: &'a str,
    fields: Fields,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Insert a new document and return the id the store generated for it.
  fn insert(
    &self,
    collection: Collection,
    fields: Fields,
  ) -> impl Future<Output = Result<String, Self::Error>> + Send + '_;

  /// Every document in the collection, in unspecified order.
  fn get_all(
    &self,
    collection: Collection,
  ) -> impl Future<Output = Result<Vec<Document>, Self::Error>> + Send + '_;

  /// Open a live query over `collection` restricted by `filter`.
  ///
  /// The subscription yields the full matching set immediately and again
  /// after every change to the collection, until it is dropped.
  fn subscribe_query(
    &self,
    collection: Collection,
    filter: FieldFilter,
  ) -> impl Future<Output = Result<Subscription<Vec<Document>>, Self::Error>>
  + Send
  + '_;
}
