//! Inline image payloads.
//!
//! The store only holds text, so photos are kept as `data:` URLs alongside the
//! item metadata. There is no separate blob storage.

use std::path::Path;

use base64::{Engine as _, engine::general_purpose::STANDARD as B64};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A self-contained `data:<mime>;base64,<payload>` string. May be empty for
/// the optional back photo; a stored `null` reads as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub struct ImageData(String);

impl ImageData {
  pub fn empty() -> Self { Self::default() }

  /// Encode raw bytes under an explicit MIME type.
  pub fn from_bytes(mime: &str, bytes: &[u8]) -> Self {
    Self(format!("data:{mime};base64,{}", B64.encode(bytes)))
  }

  /// Encode the contents of an uploaded file, inferring the MIME type from
  /// its extension. Non-image extensions are rejected.
  pub fn from_file(file_name: &str, bytes: &[u8]) -> Result<Self> {
    let mime = mime_for(file_name)
      .ok_or_else(|| Error::UnsupportedImage(file_name.to_owned()))?;
    Ok(Self::from_bytes(mime, bytes))
  }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  pub fn as_str(&self) -> &str { &self.0 }

  /// The MIME type in the header, if this is a well-formed payload.
  pub fn mime_type(&self) -> Option<&str> {
    self.split().map(|(mime, _)| mime)
  }

  /// Decode back to `(mime, bytes)`.
  pub fn decode(&self) -> Result<(String, Vec<u8>)> {
    let (mime, payload) = self.split().ok_or(Error::InvalidDataUrl)?;
    Ok((mime.to_owned(), B64.decode(payload)?))
  }

  fn split(&self) -> Option<(&str, &str)> {
    let rest = self.0.strip_prefix("data:")?;
    let (header, payload) = rest.split_once(',')?;
    let mime = header.strip_suffix(";base64")?;
    Some((mime, payload))
  }
}

impl From<Option<String>> for ImageData {
  fn from(raw: Option<String>) -> Self { Self(raw.unwrap_or_default()) }
}

impl From<ImageData> for String {
  fn from(img: ImageData) -> Self { img.0 }
}

/// Map a file name to an image MIME type by extension.
pub fn mime_for(file_name: &str) -> Option<&'static str> {
  let ext = Path::new(file_name)
    .extension()?
    .to_str()?
    .to_ascii_lowercase();
  let mime = match ext.as_str() {
    "png" => "image/png",
    "jpg" | "jpeg" => "image/jpeg",
    "gif" => "image/gif",
    "webp" => "image/webp",
    "bmp" => "image/bmp",
    "svg" => "image/svg+xml",
    "heic" => "image/heic",
    "heif" => "image/heif",
    "avif" => "image/avif",
    _ => return None,
  };
  Some(mime)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn encodes_and_decodes_file_bytes() {
    let img = ImageData::from_file("Shirt.JPG", b"\xff\xd8\xff").unwrap();
    assert_eq!(img.as_str(), "data:image/jpeg;base64,/9j/");
    assert_eq!(img.mime_type(), Some("image/jpeg"));

    let (mime, bytes) = img.decode().unwrap();
    assert_eq!(mime, "image/jpeg");
    assert_eq!(bytes, b"\xff\xd8\xff");
  }

  #[test]
  fn rejects_non_image_files() {
    assert!(matches!(
      ImageData::from_file("notes.txt", b"hello"),
      Err(Error::UnsupportedImage(name)) if name == "notes.txt"
    ));
    assert!(ImageData::from_file("no_extension", b"").is_err());
  }

  #[test]
  fn empty_payload_does_not_decode() {
    let img = ImageData::empty();
    assert!(img.is_empty());
    assert!(img.mime_type().is_none());
    assert!(matches!(img.decode(), Err(Error::InvalidDataUrl)));
  }
}
