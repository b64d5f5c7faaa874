//! Reading picked image files into inline payloads.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use wardrobe_core::{image::ImageData, lifecycle::Upload};

fn file_name(path: &Path) -> String {
  path
    .file_name()
    .map(|n| n.to_string_lossy().into_owned())
    .unwrap_or_else(|| path.display().to_string())
}

/// Read `path` and encode it as an inline image.
pub async fn read_image(path: &Path) -> Result<ImageData> {
  let bytes = tokio::fs::read(path)
    .await
    .with_context(|| format!("reading image {}", path.display()))?;
  ImageData::from_file(&file_name(path), &bytes)
    .with_context(|| format!("encoding image {}", path.display()))
}

/// Read every file for a quick upload. Unreadable files are logged and left
/// out; conversion of the rest happens in the core.
pub async fn read_uploads(paths: &[PathBuf]) -> Vec<Upload> {
  let mut uploads = Vec::with_capacity(paths.len());
  for path in paths {
    match tokio::fs::read(path).await {
      Ok(bytes) => uploads.push(Upload { file_name: file_name(path), bytes }),
      Err(e) => tracing::error!(path = %path.display(), "file read failed: {e}"),
    }
  }
  uploads
}
