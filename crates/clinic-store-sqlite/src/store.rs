//! The SQLite implementation of [`DocumentStore`].

use std::path::Path;

use chrono::Utc;
use clinic_core::{
  document::{Collection, Document, FieldFilter, Fields},
  store::DocumentStore,
  subscription::Subscription,
};
use rusqlite::OptionalExtension as _;
use tokio::sync::{broadcast, watch};
use uuid::Uuid;

use crate::{
  Result,
  encode::{RawDocument, encode_dt, encode_fields, field_path},
  schema::SCHEMA,
};

/// Capacity of the change-notification channel. A live query that falls
/// further behind than this simply re-runs once it catches up.
const CHANGE_CHANNEL_CAPACITY: usize = 64;

// ─── Store ───────────────────────────────────────────────────────────────────

/// A clinic document store backed by a single SQLite file.
///
/// Cloning is cheap: the inner connection and the change channel are
/// reference-counted. Clones share live-query notifications.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
  changes:         broadcast::Sender<Collection>,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    Self::with_connection(conn).await
  }

  /// Open an in-memory store, as the tests do.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    Self::with_connection(conn).await
  }

  async fn with_connection(conn: tokio_rusqlite::Connection) -> Result<Self> {
    let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
    let store = Self { conn, changes };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Wake every live query watching `collection`.
  fn notify(&self, collection: Collection) {
    // An error only means no live query is open.
    let _ = self.changes.send(collection);
  }

  /// Run a filtered query once.
  async fn query(
    &self,
    collection: Collection,
    filter: &FieldFilter,
  ) -> Result<Vec<Document>> {
    let collection_str = collection.as_str();
    let path = field_path(&filter.field);
    let equals = filter.equals.clone();

    let raws: Vec<RawDocument> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT doc_id, fields_json FROM documents
           WHERE collection = ?1 AND json_extract(fields_json, ?2) = ?3
           ORDER BY rowid",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![collection_str, path, equals], |row| {
            Ok(RawDocument {
              doc_id:      row.get(0)?,
              fields_json: row.get(1)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawDocument::into_document).collect()
  }
}

// ─── DocumentStore impl ──────────────────────────────────────────────────────

impl DocumentStore for SqliteStore {
  type Error = crate::Error;

  async fn get_one(&self, collection: Collection, id: &str) -> Result<Option<Document>> {
    let collection_str = collection.as_str();
    let id_str = id.to_owned();

    let raw: Option<RawDocument> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT doc_id, fields_json FROM documents
               WHERE collection = ?1 AND doc_id = ?2",
              rusqlite::params![collection_str, id_str],
              |row| {
                Ok(RawDocument {
                  doc_id:      row.get(0)?,
                  fields_json: row.get(1)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawDocument::into_document).transpose()
  }

  /// Single-statement upsert; on conflict the stored object is patched with
  /// `json_patch`, so only the supplied keys change. Nested objects merge
  /// recursively and a `null` value removes its key.
  async fn upsert_merge(
    &self,
    collection: Collection,
    id: &str,
    fields: Fields,
  ) -> Result<()> {
    let collection_str = collection.as_str();
    let id_str = id.to_owned();
    let fields_json = encode_fields(&fields)?;
    let now_str = encode_dt(Utc::now());

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO documents (collection, doc_id, fields_json, created_at, updated_at)
           VALUES (?1, ?2, ?3, ?4, ?4)
           ON CONFLICT (collection, doc_id) DO UPDATE SET
             fields_json = json_patch(fields_json, excluded.fields_json),
             updated_at  = excluded.updated_at",
          rusqlite::params![collection_str, id_str, fields_json, now_str],
        )?;
        Ok(())
      })
      .await?;

    tracing::debug!(%collection, %id, "upserted document");
    self.notify(collection);
    Ok(())
  }

  async fn insert(&self, collection: Collection, fields: Fields) -> Result<String> {
    let id = Uuid::new_v4().simple().to_string();
    let collection_str = collection.as_str();
    let id_str = id.clone();
    let fields_json = encode_fields(&fields)?;
    let now_str = encode_dt(Utc::now());

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO documents (collection, doc_id, fields_json, created_at, updated_at)
           VALUES (?1, ?2, ?3, ?4, ?4)",
          rusqlite::params![collection_str, id_str, fields_json, now_str],
        )?;
        Ok(())
      })
      .await?;

    tracing::debug!(%collection, %id, "inserted document");
    self.notify(collection);
    Ok(id)
  }

  async fn get_all(&self, collection: Collection) -> Result<Vec<Document>> {
    let collection_str = collection.as_str();

    let raws: Vec<RawDocument> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT doc_id, fields_json FROM documents WHERE collection = ?1 ORDER BY rowid",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![collection_str], |row| {
            Ok(RawDocument {
              doc_id:      row.get(0)?,
              fields_json: row.get(1)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawDocument::into_document).collect()
  }

  /// Spawns one task per subscription. The task re-runs the query after
  /// every write to `collection` and exits once the subscriber is dropped.
  async fn subscribe_query(
    &self,
    collection: Collection,
    filter: FieldFilter,
  ) -> Result<Subscription<Vec<Document>>> {
    // Subscribe before the initial read so no write can slip between them.
    let mut changes = self.changes.subscribe();
    let initial = self.query(collection, &filter).await?;
    let (tx, rx) = watch::channel(initial);

    let store = self.clone();
    tokio::spawn(async move {
      loop {
        tokio::select! {
          _ = tx.closed() => break,
          changed = changes.recv() => match changed {
            Ok(c) if c != collection => continue,
            Ok(_) | Err(broadcast::error::RecvError::Lagged(_)) => {
              match store.query(collection, &filter).await {
                Ok(docs) => {
                  if tx.send(docs).is_err() {
                    break;
                  }
                }
                Err(e) => {
                  tracing::warn!(%collection, error = %e, "live query refresh failed");
                }
              }
            }
            Err(broadcast::error::RecvError::Closed) => break,
          },
        }
      }
      tracing::debug!(%collection, field = %filter.field, "live query released");
    });

    Ok(Subscription::new(rx))
  }
}
