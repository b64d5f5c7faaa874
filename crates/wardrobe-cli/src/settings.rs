//! Runtime configuration, layered from an optional TOML file and `WARDROBE_*`
//! environment variables.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
  /// SQLite file holding the wardrobe. `~` is expanded.
  #[serde(default = "default_store_path")]
  pub store_path:    PathBuf,
  /// Pause after an item is saved, while "Saving..." is shown.
  #[serde(default = "default_save_delay_ms")]
  pub save_delay_ms: u64,
}

fn default_store_path() -> PathBuf { PathBuf::from("~/.local/share/wardrobe/wardrobe.db") }

fn default_save_delay_ms() -> u64 { 300 }

impl Settings {
  pub fn load(file: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(file).required(false))
      .add_source(config::Environment::with_prefix("WARDROBE"))
      .build()
      .context("failed to read config file")?;

    let mut settings: Settings = settings
      .try_deserialize()
      .context("failed to deserialise Settings")?;
    settings.store_path = expand_tilde(&settings.store_path);
    Ok(settings)
  }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
