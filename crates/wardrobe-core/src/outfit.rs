//! Outfits: frozen groupings of item snapshots.
//!
//! An outfit copies every selected [`ClothingItem`] at creation time instead
//! of referring to it by id. Editing or deleting an item later never changes
//! an outfit that was already saved.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::item::ClothingItem;

/// An outfit id of the form `outfit-<millis>-<suffix>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutfitId(String);

impl OutfitId {
  pub fn as_str(&self) -> &str { &self.0 }
}

impl From<String> for OutfitId {
  fn from(s: String) -> Self { Self(s) }
}

impl fmt::Display for OutfitId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

/// A saved outfit. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outfit {
  pub id:         OutfitId,
  pub created_at: DateTime<Utc>,
  /// Full copies of the items as they were when the outfit was created.
  pub items:      Vec<ClothingItem>,
}

impl Outfit {
  /// The first few items, as shown on an outfit tile.
  pub fn preview(&self, n: usize) -> &[ClothingItem] {
    &self.items[..self.items.len().min(n)]
  }
}
