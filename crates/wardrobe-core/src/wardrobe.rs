//! [`Wardrobe`] — the storage adapter for items and outfits.
//!
//! Each collection lives as one JSON array under a fixed key. Every write is a
//! full read-modify-write of that array; there is no locking, so two writers
//! racing on the same backing store lose updates (last writer wins).

use chrono::Utc;
use serde::{Serialize, de::DeserializeOwned};

use crate::{
  StorageError,
  item::{ClothingItem, ItemId},
  kv::KeyValueStore,
  lifecycle::{Upload, compose_outfit},
  outfit::Outfit,
  validate::OutfitRejection,
};

pub const WARDROBE_KEY: &str = "localWardrobe";
pub const OUTFITS_KEY: &str = "localOutfits";

// ─── Read outcome ────────────────────────────────────────────────────────────

/// The result of reading a collection.
///
/// Reads never fail outright; this tells a caller *why* a collection came
/// back empty when it cares.
#[derive(Debug)]
pub enum Loaded<T> {
  /// The key held a parseable array (possibly empty).
  Found(Vec<T>),
  /// Nothing has been stored under the key yet.
  Absent,
  /// The backend failed or the stored text was not a valid collection.
  Unreadable(StorageError),
}

impl<T> Loaded<T> {
  /// The fail-soft view: whatever was found, or nothing.
  pub fn into_vec(self) -> Vec<T> {
    match self {
      Self::Found(v) => v,
      Self::Absent | Self::Unreadable(_) => Vec::new(),
    }
  }

  pub fn is_unreadable(&self) -> bool { matches!(self, Self::Unreadable(_)) }
}

// ─── Outfit creation errors ──────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum CreateOutfitError {
  #[error(transparent)]
  Rejected(#[from] OutfitRejection),

  #[error(transparent)]
  Storage(#[from] StorageError),
}

// ─── Wardrobe ────────────────────────────────────────────────────────────────

/// Item and outfit collections on top of any [`KeyValueStore`].
///
/// Callers only ever receive owned copies of stored records.
pub struct Wardrobe<S> {
  store: S,
}

impl<S: KeyValueStore> Wardrobe<S> {
  pub fn new(store: S) -> Self { Self { store } }

  // ── Items ─────────────────────────────────────────────────────────────────

  /// All items, newest first.
  pub fn load_items(&self) -> Loaded<ClothingItem> { self.load(WARDROBE_KEY) }

  /// Put `item` at the front of the collection. Ids are not checked for
  /// uniqueness here.
  pub fn save_item(&self, item: ClothingItem) -> Result<(), StorageError> {
    let mut items = self.load_for_write("save_item", WARDROBE_KEY)?;
    items.insert(0, item);
    self.persist("save_item", WARDROBE_KEY, &items)
  }

  /// Replace the whole collection with `items`, as given.
  pub fn save_items(&self, items: &[ClothingItem]) -> Result<(), StorageError> {
    self.persist("save_items", WARDROBE_KEY, items)
  }

  /// Drop every item whose id is `id`. Absent ids are a no-op.
  ///
  /// Saved outfits keep their own copies and are not touched.
  pub fn remove_item(&self, id: &ItemId) -> Result<(), StorageError> {
    let mut items = self.load_for_write("remove_item", WARDROBE_KEY)?;
    items.retain(|i: &ClothingItem| &i.id != id);
    self.persist("remove_item", WARDROBE_KEY, &items)
  }

  pub fn find_item(&self, id: &ItemId) -> Option<ClothingItem> {
    self.load_items().into_vec().into_iter().find(|i| &i.id == id)
  }

  pub fn item_count(&self) -> usize { self.load_items().into_vec().len() }

  /// Convert and add a batch of uploaded files.
  ///
  /// Files that cannot be converted are skipped. The new items go before the
  /// existing ones, in upload order. Returns the items that were added.
  pub fn quick_upload(
    &self,
    uploads: impl IntoIterator<Item = Upload>,
  ) -> Result<Vec<ClothingItem>, StorageError> {
    let uploads: Vec<Upload> = uploads.into_iter().collect();
    if uploads.is_empty() {
      return Ok(Vec::new());
    }

    let mut added = Vec::new();
    for upload in uploads {
      let file_name = upload.file_name.clone();
      match upload.into_item(Utc::now()) {
        Ok(item) => added.push(item),
        Err(e) => tracing::error!(file = %file_name, "file convert failed: {e}"),
      }
    }

    let existing = self.load_for_write("quick_upload", WARDROBE_KEY)?;
    let mut items = added.clone();
    items.extend(existing);
    self.save_items(&items)?;
    Ok(added)
  }

  // ── Outfits ───────────────────────────────────────────────────────────────

  /// All outfits, newest first.
  pub fn load_outfits(&self) -> Loaded<Outfit> { self.load(OUTFITS_KEY) }

  pub fn save_outfit(&self, outfit: Outfit) -> Result<(), StorageError> {
    let mut outfits = self.load_for_write("save_outfit", OUTFITS_KEY)?;
    outfits.insert(0, outfit);
    self.persist("save_outfit", OUTFITS_KEY, &outfits)
  }

  /// Validate the selected items and, if they form a complete outfit, save
  /// it. Nothing is written when validation fails.
  pub fn create_outfit(
    &self,
    selection: &[ItemId],
  ) -> Result<Outfit, CreateOutfitError> {
    let items = self.load_items().into_vec();
    let outfit = compose_outfit(selection, &items, Utc::now())?;
    self.save_outfit(outfit.clone())?;
    Ok(outfit)
  }

  // ── Plumbing ──────────────────────────────────────────────────────────────

  fn load<T: DeserializeOwned>(&self, key: &'static str) -> Loaded<T> {
    let raw = match self.store.read(key) {
      Ok(Some(raw)) => raw,
      Ok(None) => return Loaded::Absent,
      Err(e) => {
        tracing::warn!(key, "load failed: {e}");
        return Loaded::Unreadable(StorageError::backend(e));
      }
    };

    match serde_json::from_str(&raw) {
      Ok(values) => Loaded::Found(values),
      Err(source) => {
        tracing::warn!(key, "load failed: {source}");
        Loaded::Unreadable(StorageError::Corrupt { key, source })
      }
    }
  }

  /// The read half of a read-modify-write.
  ///
  /// Corrupt text is dropped and replaced by the coming write. A backend
  /// failure aborts the write and leaves the stored value as it was.
  fn load_for_write<T: DeserializeOwned>(
    &self,
    op: &'static str,
    key: &'static str,
  ) -> Result<Vec<T>, StorageError> {
    match self.load(key) {
      Loaded::Found(values) => Ok(values),
      Loaded::Absent | Loaded::Unreadable(StorageError::Corrupt { .. }) => {
        Ok(Vec::new())
      }
      Loaded::Unreadable(e) => {
        tracing::warn!(key, "{op} skipped: {e}");
        Err(e)
      }
    }
  }

  fn persist<T: Serialize>(
    &self,
    op: &'static str,
    key: &'static str,
    values: &[T],
  ) -> Result<(), StorageError> {
    let result = serde_json::to_string(values)
      .map_err(StorageError::from)
      .and_then(|json| {
        self.store.write(key, &json).map_err(StorageError::backend)
      });

    match &result {
      Ok(()) => tracing::debug!(key, count = values.len(), "{op} persisted"),
      Err(e) => tracing::warn!(key, "{op} failed: {e}"),
    }
    result
  }
}
