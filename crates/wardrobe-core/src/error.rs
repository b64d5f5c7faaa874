//! Error types for `wardrobe-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unsupported image type for file {0:?}")]
  UnsupportedImage(String),

  #[error("not an inline image payload")]
  InvalidDataUrl,

  #[error("image payload is not valid base64: {0}")]
  Base64(#[from] base64::DecodeError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A failure at the storage boundary. Reads never return this directly (see
/// [`crate::Loaded`]); writes return it after logging.
#[derive(Debug, Error)]
pub enum StorageError {
  #[error("store backend error: {0}")]
  Backend(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("corrupt data under {key:?}: {source}")]
  Corrupt {
    key:    &'static str,
    #[source]
    source: serde_json::Error,
  },

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

impl StorageError {
  pub(crate) fn backend<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Backend(Box::new(err))
  }
}
