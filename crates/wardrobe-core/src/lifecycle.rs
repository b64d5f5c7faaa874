//! Shaping raw input into records before they reach the store.
//!
//! Ids, timestamps and the required-field checks live here; persistence is
//! left to [`crate::Wardrobe`].

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rand_core::{OsRng, RngCore as _};
use thiserror::Error;

use crate::{
  Result,
  image::ImageData,
  item::{Category, ClothingItem, ItemId, ItemStatus},
  outfit::Outfit,
  validate::{OutfitRejection, check_outfit},
};

pub const ITEM_ID_PREFIX: &str = "local";
pub const OUTFIT_ID_PREFIX: &str = "outfit";

const SUFFIX_LEN: usize = 7;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

// ─── Ids ─────────────────────────────────────────────────────────────────────

/// `<prefix>-<unix millis>-<7 base-36 chars>`.
///
/// Collisions are unlikely but not ruled out; no check against existing ids
/// is made.
pub fn generate_id(prefix: &str, now: DateTime<Utc>) -> String {
  let mut n = OsRng.next_u64();
  let mut suffix = String::with_capacity(SUFFIX_LEN);
  for _ in 0..SUFFIX_LEN {
    suffix.push(char::from(BASE36[(n % 36) as usize]));
    n /= 36;
  }
  format!("{prefix}-{}-{suffix}", now.timestamp_millis())
}

// ─── Item submission ─────────────────────────────────────────────────────────

/// Why an add-item form was refused. Checked in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
  #[error("Please enter a name.")]
  MissingName,

  #[error("Please select a category.")]
  MissingCategory,

  #[error("Please add a front photo (required).")]
  MissingFrontImage,
}

/// The contents of the add-item form.
#[derive(Debug, Clone, Default)]
pub struct NewItem {
  pub name:        String,
  pub category:    Option<Category>,
  pub status:      ItemStatus,
  pub front_image: Option<ImageData>,
  pub back_image:  Option<ImageData>,
}

impl NewItem {
  pub fn new(name: impl Into<String>) -> Self {
    Self { name: name.into(), ..Self::default() }
  }

  /// Validate the form and build the record to persist.
  pub fn into_item(
    self,
    now: DateTime<Utc>,
  ) -> Result<ClothingItem, SubmissionError> {
    let name = self.name.trim();
    if name.is_empty() {
      return Err(SubmissionError::MissingName);
    }
    let category = match self.category {
      None | Some(Category::Unspecified) => {
        return Err(SubmissionError::MissingCategory);
      }
      Some(c) => c,
    };
    let front_image = match self.front_image {
      Some(img) if !img.is_empty() => img,
      _ => return Err(SubmissionError::MissingFrontImage),
    };

    Ok(ClothingItem {
      id: ItemId::from(generate_id(ITEM_ID_PREFIX, now)),
      name: name.to_owned(),
      category,
      status: self.status,
      front_image,
      back_image: self.back_image.unwrap_or_default(),
      created_at: now,
      synced_remote: false,
    })
  }
}

// ─── Quick upload ────────────────────────────────────────────────────────────

/// A raw file picked for quick upload.
#[derive(Debug, Clone)]
pub struct Upload {
  pub file_name: String,
  pub bytes:     Vec<u8>,
}

impl Upload {
  /// Turn the file into an uncategorised item named after the file.
  pub fn into_item(self, now: DateTime<Utc>) -> Result<ClothingItem> {
    let front_image = ImageData::from_file(&self.file_name, &self.bytes)?;
    Ok(ClothingItem {
      id: ItemId::from(generate_id(ITEM_ID_PREFIX, now)),
      name: self.file_name,
      category: Category::Unspecified,
      status: ItemStatus::Available,
      front_image,
      back_image: ImageData::empty(),
      created_at: now,
      synced_remote: false,
    })
  }
}

// ─── Outfit composition ──────────────────────────────────────────────────────

/// Build an outfit from the selected ids.
///
/// Items are taken from `wardrobe` in wardrobe order and copied whole. Ids
/// that match nothing are ignored, so a selection of only stale ids counts as
/// empty.
pub fn compose_outfit(
  selection: &[ItemId],
  wardrobe: &[ClothingItem],
  now: DateTime<Utc>,
) -> Result<Outfit, OutfitRejection> {
  let wanted: HashSet<&ItemId> = selection.iter().collect();
  let items: Vec<ClothingItem> = wardrobe
    .iter()
    .filter(|i| wanted.contains(&i.id))
    .cloned()
    .collect();

  check_outfit(&items)?;

  Ok(Outfit {
    id: generate_id(OUTFIT_ID_PREFIX, now).into(),
    created_at: now,
    items,
  })
}
