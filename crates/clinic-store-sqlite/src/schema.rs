//! SQL schema for the clinic SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Schemaless documents, one row per (collection, id).
-- fields_json always holds a JSON object; the id is not repeated inside it.
CREATE TABLE IF NOT EXISTS documents (
    collection  TEXT NOT NULL,   -- 'doctors' | 'patients' | 'appointments'
    doc_id      TEXT NOT NULL,
    fields_json TEXT NOT NULL,
    created_at  TEXT NOT NULL,   -- ISO 8601 UTC
    updated_at  TEXT NOT NULL,   -- ISO 8601 UTC
    PRIMARY KEY (collection, doc_id)
);

-- Local accounts backing the identity provider.
CREATE TABLE IF NOT EXISTS accounts (
    user_id       TEXT PRIMARY KEY,
    username      TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,   -- argon2 PHC string
    role          TEXT NOT NULL,   -- 'practitioner' | 'client'
    created_at    TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS documents_collection_idx ON documents(collection);

PRAGMA user_version = 1;
";
