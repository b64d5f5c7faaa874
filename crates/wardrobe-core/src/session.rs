//! The signed-in flag.
//!
//! Authentication is simulated: any non-empty email and password are
//! accepted. The only state is a flag in the same store as the wardrobe.

use thiserror::Error;

use crate::{StorageError, kv::KeyValueStore};

pub const AUTH_KEY: &str = "isAuthenticated";

#[derive(Debug, Error)]
pub enum SessionError {
  #[error("Please fill in all fields")]
  MissingFields,

  #[error(transparent)]
  Storage(#[from] StorageError),
}

#[derive(Debug, Clone, Default)]
pub struct Credentials {
  pub email:    String,
  pub password: String,
}

impl Credentials {
  fn check(&self) -> Result<(), SessionError> {
    if self.email.trim().is_empty() || self.password.is_empty() {
      return Err(SessionError::MissingFields);
    }
    Ok(())
  }
}

pub struct Session<S> {
  store: S,
}

impl<S: KeyValueStore> Session<S> {
  pub fn new(store: S) -> Self { Self { store } }

  /// `false` if the flag is absent, not `"true"`, or unreadable.
  pub fn is_authenticated(&self) -> bool {
    match self.store.read(AUTH_KEY) {
      Ok(flag) => flag.as_deref() == Some("true"),
      Err(e) => {
        tracing::warn!(key = AUTH_KEY, "auth flag read failed: {e}");
        false
      }
    }
  }

  pub fn log_in(&self, credentials: &Credentials) -> Result<(), SessionError> {
    credentials.check()?;
    tracing::info!(email = %credentials.email, "login");
    self.set_flag()
  }

  /// Registration is not persisted anywhere; it signs the user in.
  pub fn register(&self, credentials: &Credentials) -> Result<(), SessionError> {
    credentials.check()?;
    tracing::info!(email = %credentials.email, "register");
    self.set_flag()
  }

  pub fn log_out(&self) -> Result<(), SessionError> {
    self
      .store
      .remove(AUTH_KEY)
      .map_err(|e| SessionError::Storage(StorageError::backend(e)))
  }

  fn set_flag(&self) -> Result<(), SessionError> {
    self
      .store
      .write(AUTH_KEY, "true")
      .map_err(|e| SessionError::Storage(StorageError::backend(e)))
  }
}
