//! Password accounts stored next to the documents.
//!
//! Passwords are kept as argon2 PHC strings. The signed-in user is process
//! local: every subscriber observes sign-in and sign-out through a watch
//! channel.

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString,
};
use chrono::{DateTime, Utc};
use clinic_core::{
  identity::{IdentityProvider, Role, UserId},
  subscription::Subscription,
};
use rand_core::OsRng;
use rusqlite::OptionalExtension as _;
use tokio::sync::watch;
use uuid::Uuid;

use crate::{
  Error, Result, SqliteStore,
  encode::{RawAccount, encode_dt, encode_role},
};

/// A registered account. The password hash never leaves this module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
  pub user_id:    UserId,
  pub username:   String,
  pub role:       Role,
  pub created_at: DateTime<Utc>,
}

/// Identity provider backed by the `accounts` table of a [`SqliteStore`].
pub struct SqliteIdentity {
  conn:    tokio_rusqlite::Connection,
  session: watch::Sender<Option<UserId>>,
}

impl SqliteIdentity {
  /// Share `store`'s connection. Nobody is signed in initially.
  pub fn new(store: &SqliteStore) -> Self {
    let (session, _) = watch::channel(None);
    Self { conn: store.conn.clone(), session }
  }

  /// Register a new account and return it. Does not sign in.
  pub async fn sign_up(
    &self,
    username: &str,
    password: &str,
    role: Role,
  ) -> Result<Account> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
      .hash_password(password.as_bytes(), &salt)
      .map_err(|e| Error::PasswordHash(e.to_string()))?
      .to_string();

    let account = Account {
      user_id: UserId::new(Uuid::new_v4().simple().to_string()),
      username: username.to_owned(),
      role,
      created_at: Utc::now(),
    };

    let id_str = account.user_id.to_string();
    let name_str = account.username.clone();
    let role_str = encode_role(role);
    let at_str = encode_dt(account.created_at);

    let inserted: bool = self
      .conn
      .call(move |conn| {
        let taken = conn
          .query_row(
            "SELECT 1 FROM accounts WHERE username = ?1",
            rusqlite::params![name_str],
            |_| Ok(()),
          )
          .optional()?
          .is_some();
        if taken {
          return Ok(false);
        }
        conn.execute(
          "INSERT INTO accounts (user_id, username, password_hash, role, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![id_str, name_str, hash, role_str, at_str],
        )?;
        Ok(true)
      })
      .await?;

    if !inserted {
      return Err(Error::UsernameTaken(account.username));
    }

    tracing::info!(user_id = %account.user_id, role = role.as_str(), "account created");
    Ok(account)
  }

  /// Verify credentials and, on success, make the account the signed-in
  /// identity.
  pub async fn sign_in(&self, username: &str, password: &str) -> Result<Account> {
    let name_str = username.to_owned();

    let raw: Option<RawAccount> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT user_id, username, password_hash, role, created_at
               FROM accounts WHERE username = ?1",
              rusqlite::params![name_str],
              |row| {
                Ok(RawAccount {
                  user_id:       row.get(0)?,
                  username:      row.get(1)?,
                  password_hash: row.get(2)?,
                  role:          row.get(3)?,
                  created_at:    row.get(4)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    let raw = raw.ok_or(Error::InvalidCredentials)?;
    let parsed_hash =
      PasswordHash::new(&raw.password_hash).map_err(|_| Error::InvalidCredentials)?;
    Argon2::default()
      .verify_password(password.as_bytes(), &parsed_hash)
      .map_err(|_| Error::InvalidCredentials)?;

    let account = raw.into_account()?;
    self.session.send_replace(Some(account.user_id.clone()));
    tracing::info!(user_id = %account.user_id, "signed in");
    Ok(account)
  }

  /// The signed-in user, if any.
  pub fn current(&self) -> Option<UserId> { self.session.borrow().clone() }

  /// Number of live [`IdentityProvider::subscribe`] handles.
  pub fn subscriber_count(&self) -> usize { self.session.receiver_count() }
}

impl IdentityProvider for SqliteIdentity {
  type Error = Error;

  fn subscribe(&self) -> Subscription<Option<UserId>> {
    Subscription::new(self.session.subscribe())
  }

  async fn sign_out(&self) -> Result<()> {
    if let Some(previous) = self.session.send_replace(None) {
      tracing::info!(user_id = %previous, "signed out");
    }
    Ok(())
  }

  async fn role_of(&self, id: &UserId) -> Result<Option<Role>> {
    let id_str = id.to_string();

    let role: Option<String> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT role FROM accounts WHERE user_id = ?1",
              rusqlite::params![id_str],
              |row| row.get(0),
            )
            .optional()?,
        )
      })
      .await?;

    role.as_deref().map(crate::encode::decode_role).transpose()
  }
}
