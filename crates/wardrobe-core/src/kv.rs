//! The storage port and an in-memory implementation of it.
//!
//! The port is intentionally tiny: whole-value reads and writes of UTF-8 text
//! under fixed keys. Collections are serialised by [`crate::Wardrobe`], never
//! by the backend.

use std::{
  collections::HashMap,
  sync::{
    Mutex, PoisonError,
    atomic::{AtomicBool, Ordering},
  },
};

use thiserror::Error;

// ─── Trait ───────────────────────────────────────────────────────────────────

/// A persistent, synchronous key-value store holding text values.
///
/// Implemented by `wardrobe-store-sqlite` and by [`MemoryStore`].
pub trait KeyValueStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Return the value stored under `key`, or `None` if the key is absent.
  fn read(&self, key: &str) -> Result<Option<String>, Self::Error>;

  /// Store `value` under `key`, replacing any previous value.
  fn write(&self, key: &str, value: &str) -> Result<(), Self::Error>;

  /// Delete `key`. Removing an absent key is not an error.
  fn remove(&self, key: &str) -> Result<(), Self::Error>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
  type Error = S::Error;

  fn read(&self, key: &str) -> Result<Option<String>, Self::Error> {
    (**self).read(key)
  }

  fn write(&self, key: &str, value: &str) -> Result<(), Self::Error> {
    (**self).write(key, value)
  }

  fn remove(&self, key: &str) -> Result<(), Self::Error> {
    (**self).remove(key)
  }
}

// ─── MemoryStore ─────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum MemoryError {
  #[error("quota exceeded: {needed} bytes needed, {quota} allowed")]
  QuotaExceeded { needed: usize, quota: usize },

  #[error("store unavailable")]
  Unavailable,
}

/// A process-local store. Nothing survives the process.
///
/// An optional quota caps the total size of all stored values, which lets
/// tests exercise the "store full" path. Reads can be switched to fail with
/// [`MemoryStore::fail_reads`].
#[derive(Debug, Default)]
pub struct MemoryStore {
  entries:    Mutex<HashMap<String, String>>,
  quota:      Option<usize>,
  fail_reads: AtomicBool,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }

  /// A store that refuses writes once the stored values would exceed
  /// `bytes` in total.
  pub fn with_quota(bytes: usize) -> Self {
    Self { quota: Some(bytes), ..Self::default() }
  }

  /// While `on`, every `read` fails with [`MemoryError::Unavailable`].
  /// Writes and removes are unaffected.
  pub fn fail_reads(&self, on: bool) { self.fail_reads.store(on, Ordering::SeqCst); }

  /// Put raw text under `key` without any checks. Used to simulate data left
  /// behind by other writers.
  pub fn seed(&self, key: &str, raw: &str) {
    self.lock().insert(key.to_owned(), raw.to_owned());
  }

  fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
    self.entries.lock().unwrap_or_else(PoisonError::into_inner)
  }
}

impl KeyValueStore for MemoryStore {
  type Error = MemoryError;

  fn read(&self, key: &str) -> Result<Option<String>, MemoryError> {
    if self.fail_reads.load(Ordering::SeqCst) {
      return Err(MemoryError::Unavailable);
    }
    Ok(self.lock().get(key).cloned())
  }

  fn write(&self, key: &str, value: &str) -> Result<(), MemoryError> {
    let mut entries = self.lock();
    if let Some(quota) = self.quota {
      let others: usize = entries
        .iter()
        .filter(|(k, _)| k.as_str() != key)
        .map(|(_, v)| v.len())
        .sum();
      let needed = others + value.len();
      if needed > quota {
        return Err(MemoryError::QuotaExceeded { needed, quota });
      }
    }
    entries.insert(key.to_owned(), value.to_owned());
    Ok(())
  }

  fn remove(&self, key: &str) -> Result<(), MemoryError> {
    self.lock().remove(key);
    Ok(())
  }
}
