//! Clothing items, the records that make up a wardrobe.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::image::ImageData;

// ─── Identifiers ─────────────────────────────────────────────────────────────

/// An item id of the form `local-<millis>-<suffix>`. Immutable once assigned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
  pub fn as_str(&self) -> &str { &self.0 }
}

impl From<String> for ItemId {
  fn from(s: String) -> Self { Self(s) }
}

impl From<&str> for ItemId {
  fn from(s: &str) -> Self { Self(s.to_owned()) }
}

impl fmt::Display for ItemId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

// ─── Category ────────────────────────────────────────────────────────────────

/// What kind of garment an item is.
///
/// Parsing is case-insensitive and never fails: a missing or blank label is
/// [`Category::Unspecified`], anything unrecognised is [`Category::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum Category {
  Top,
  Bottom,
  Dress,
  Accessory,
  Footwear,
  Other,
  #[default]
  Unspecified,
}

impl Category {
  /// The stored label. `Unspecified` is the empty string.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Top => "top",
      Self::Bottom => "bottom",
      Self::Dress => "dress",
      Self::Accessory => "accessory",
      Self::Footwear => "footwear",
      Self::Other => "other",
      Self::Unspecified => "",
    }
  }

  pub fn parse(label: &str) -> Self {
    match label.trim().to_ascii_lowercase().as_str() {
      "" => Self::Unspecified,
      "top" => Self::Top,
      "bottom" => Self::Bottom,
      "dress" => Self::Dress,
      "accessory" => Self::Accessory,
      "footwear" => Self::Footwear,
      _ => Self::Other,
    }
  }
}

impl From<Option<String>> for Category {
  fn from(label: Option<String>) -> Self {
    label.as_deref().map(Self::parse).unwrap_or_default()
  }
}

impl From<Category> for String {
  fn from(c: Category) -> Self { c.as_str().to_owned() }
}

impl fmt::Display for Category {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Unspecified => f.write_str("Unspecified"),
      other => f.write_str(other.as_str()),
    }
  }
}

// ─── Status ──────────────────────────────────────────────────────────────────

/// Care state of an item. Unknown or blank labels read as `Available`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum ItemStatus {
  #[default]
  Available,
  InWash,
  Ironed,
  Damaged,
}

impl ItemStatus {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Available => "available",
      Self::InWash => "in-wash",
      Self::Ironed => "ironed",
      Self::Damaged => "damaged",
    }
  }

  pub fn parse(label: &str) -> Self {
    match label.trim().to_ascii_lowercase().as_str() {
      "in-wash" => Self::InWash,
      "ironed" => Self::Ironed,
      "damaged" => Self::Damaged,
      _ => Self::Available,
    }
  }
}

impl From<Option<String>> for ItemStatus {
  fn from(label: Option<String>) -> Self {
    label.as_deref().map(Self::parse).unwrap_or_default()
  }
}

impl From<ItemStatus> for String {
  fn from(s: ItemStatus) -> Self { s.as_str().to_owned() }
}

impl fmt::Display for ItemStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

// ─── ClothingItem ────────────────────────────────────────────────────────────

/// One garment in the wardrobe.
///
/// Records written by older clients used `frontPreview`, `backPreview` and
/// `uploadedToServer`; those names are still accepted when reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClothingItem {
  pub id:            ItemId,
  pub name:          String,
  #[serde(default)]
  pub category:      Category,
  #[serde(default)]
  pub status:        ItemStatus,
  #[serde(alias = "frontPreview")]
  pub front_image:   ImageData,
  #[serde(default, alias = "backPreview")]
  pub back_image:    ImageData,
  pub created_at:    DateTime<Utc>,
  /// Reserved for server sync; always `false` for now.
  #[serde(default, alias = "uploadedToServer")]
  pub synced_remote: bool,
}
