//! Tests for [`Wardrobe`] against the in-memory store.

use chrono::{Duration, Utc};

use crate::{
  Loaded, StorageError, Wardrobe,
  image::ImageData,
  item::{Category, ClothingItem, ItemId, ItemStatus},
  kv::{KeyValueStore, MemoryStore},
  lifecycle::Upload,
  outfit::Outfit,
  validate::{OutfitRejection, Requirement},
  wardrobe::{CreateOutfitError, OUTFITS_KEY, WARDROBE_KEY},
};

fn wardrobe() -> Wardrobe<MemoryStore> { Wardrobe::new(MemoryStore::new()) }

fn item(id: &str, category: Category) -> ClothingItem {
  ClothingItem {
    id:            id.into(),
    name:          format!("item {id}"),
    category,
    status:        ItemStatus::Available,
    front_image:   ImageData::from_bytes("image/png", id.as_bytes()),
    back_image:    ImageData::empty(),
    created_at:    Utc::now(),
    synced_remote: false,
  }
}

fn full_set() -> Vec<ClothingItem> {
  vec![
    item("shirt", Category::Top),
    item("jeans", Category::Bottom),
    item("belt", Category::Accessory),
    item("boots", Category::Footwear),
  ]
}

fn ids(items: &[ClothingItem]) -> Vec<&str> {
  items.iter().map(|i| i.id.as_str()).collect()
}

// ─── Items ───────────────────────────────────────────────────────────────────

#[test]
fn empty_store_reads_as_absent() {
  let w = wardrobe();
  assert!(matches!(w.load_items(), Loaded::Absent));
  assert!(matches!(w.load_outfits(), Loaded::Absent));
  assert!(w.load_items().into_vec().is_empty());
}

#[test]
fn save_item_prepends() {
  let w = wardrobe();
  for id in ["a", "b", "c"] {
    w.save_item(item(id, Category::Top)).unwrap();
  }
  assert_eq!(ids(&w.load_items().into_vec()), ["c", "b", "a"]);
  assert_eq!(w.item_count(), 3);
}

#[test]
fn save_item_does_not_check_for_duplicates() {
  let w = wardrobe();
  w.save_item(item("dup", Category::Top)).unwrap();
  w.save_item(item("dup", Category::Bottom)).unwrap();
  assert_eq!(ids(&w.load_items().into_vec()), ["dup", "dup"]);

  w.remove_item(&ItemId::from("dup")).unwrap();
  assert!(w.load_items().into_vec().is_empty());
}

#[test]
fn save_items_replaces_verbatim() {
  let w = wardrobe();
  w.save_item(item("old", Category::Dress)).unwrap();

  let replacement = vec![
    item("x", Category::Other),
    item("y", Category::Unspecified),
    item("z", Category::Footwear),
  ];
  w.save_items(&replacement).unwrap();

  match w.load_items() {
    Loaded::Found(items) => assert_eq!(items, replacement),
    other => panic!("expected Found, got {other:?}"),
  }
}

#[test]
fn remove_item_leaves_others_untouched() {
  let w = wardrobe();
  let mut before = full_set();
  before[1].status = ItemStatus::InWash;
  before[2].back_image = ImageData::from_bytes("image/jpeg", b"back");
  w.save_items(&before).unwrap();

  w.remove_item(&ItemId::from("jeans")).unwrap();

  let after = w.load_items().into_vec();
  assert!(after.iter().all(|i| i.id.as_str() != "jeans"));
  let expected: Vec<_> =
    before.into_iter().filter(|i| i.id.as_str() != "jeans").collect();
  assert_eq!(after, expected);
}

#[test]
fn remove_missing_id_is_a_no_op() {
  let w = wardrobe();
  let before = full_set();
  w.save_items(&before).unwrap();
  w.remove_item(&ItemId::from("nope")).unwrap();
  assert_eq!(w.load_items().into_vec(), before);
}

#[test]
fn find_item_by_id() {
  let w = wardrobe();
  w.save_items(&full_set()).unwrap();
  let belt = w.find_item(&ItemId::from("belt")).unwrap();
  assert_eq!(belt.category, Category::Accessory);
  assert!(w.find_item(&ItemId::from("hat")).is_none());
}

// ─── Fail-soft reads ─────────────────────────────────────────────────────────

#[test]
fn garbage_under_wardrobe_key_reads_empty() {
  let store = MemoryStore::new();
  store.seed(WARDROBE_KEY, "{not json at all");
  let w = Wardrobe::new(&store);

  let loaded = w.load_items();
  assert!(matches!(
    loaded,
    Loaded::Unreadable(StorageError::Corrupt { key: WARDROBE_KEY, .. })
  ));
  assert!(w.load_items().into_vec().is_empty());
}

#[test]
fn write_after_corrupt_read_starts_a_fresh_collection() {
  let store = MemoryStore::new();
  store.seed(OUTFITS_KEY, "garbage");
  let w = Wardrobe::new(&store);

  w.save_items(&full_set()).unwrap();
  let outfit = w
    .create_outfit(&full_set().iter().map(|i| i.id.clone()).collect::<Vec<_>>())
    .unwrap();

  let outfits = w.load_outfits().into_vec();
  assert_eq!(outfits.len(), 1);
  assert_eq!(outfits[0].id, outfit.id);
}

#[test]
fn backend_read_failure_reads_unreadable() {
  let store = MemoryStore::new();
  let w = Wardrobe::new(&store);
  w.save_items(&full_set()).unwrap();

  store.fail_reads(true);
  assert!(matches!(w.load_items(), Loaded::Unreadable(StorageError::Backend(_))));
  assert!(matches!(w.load_outfits(), Loaded::Unreadable(StorageError::Backend(_))));
  assert!(w.load_items().into_vec().is_empty());
}

#[test]
fn writes_after_backend_read_failure_leave_store_untouched() {
  let store = MemoryStore::new();
  let w = Wardrobe::new(&store);
  let before = full_set();
  w.save_items(&before).unwrap();
  let outfit = w
    .create_outfit(&before.iter().map(|i| i.id.clone()).collect::<Vec<_>>())
    .unwrap();

  store.fail_reads(true);
  assert!(matches!(
    w.remove_item(&ItemId::from("nope")),
    Err(StorageError::Backend(_))
  ));
  assert!(w.remove_item(&ItemId::from("jeans")).is_err());
  assert!(w.save_item(item("hat", Category::Accessory)).is_err());
  assert!(w.save_outfit(outfit.clone()).is_err());
  assert!(
    w.quick_upload([Upload { file_name: "cap.png".into(), bytes: vec![1] }])
      .is_err()
  );
  store.fail_reads(false);

  assert_eq!(w.load_items().into_vec(), before);
  assert_eq!(w.load_outfits().into_vec(), [outfit]);
}

#[test]
fn quota_failure_is_reported_and_keeps_previous_value() {
  let w = Wardrobe::new(MemoryStore::with_quota(600));
  w.save_item(item("a", Category::Top)).unwrap();

  let mut big = item("b", Category::Top);
  big.front_image = ImageData::from_bytes("image/png", &[0u8; 4096]);
  let err = w.save_item(big).unwrap_err();
  assert!(matches!(err, StorageError::Backend(_)));

  assert_eq!(ids(&w.load_items().into_vec()), ["a"]);
}

#[test]
fn reads_records_from_older_clients() {
  let store = MemoryStore::new();
  store.seed(
    WARDROBE_KEY,
    r#"[{
      "id": "local-1700000000000-abc1234",
      "name": "IMG_0001.jpg",
      "frontPreview": "data:image/jpeg;base64,/9j/",
      "backPreview": "",
      "category": "",
      "status": "",
      "createdAt": "2023-11-14T22:13:20.000Z",
      "uploadedToServer": false
    }, {
      "id": "local-1700000000001-def5678",
      "name": "Sandals",
      "frontPreview": "data:image/png;base64,iVBO",
      "category": "FOOTWEAR",
      "status": "in-wash",
      "createdAt": "2023-11-14T22:13:20.001Z"
    }]"#,
  );
  let items = Wardrobe::new(&store).load_items().into_vec();

  assert_eq!(items.len(), 2);
  assert_eq!(items[0].category, Category::Unspecified);
  assert_eq!(items[0].status, ItemStatus::Available);
  assert_eq!(items[0].front_image.mime_type(), Some("image/jpeg"));
  assert_eq!(items[1].category, Category::Footwear);
  assert_eq!(items[1].status, ItemStatus::InWash);
  assert!(items[1].back_image.is_empty());
}

#[test]
fn null_back_image_reads_as_empty() {
  let store = MemoryStore::new();
  store.seed(
    WARDROBE_KEY,
    r#"[{
      "id": "local-1700000000000-abc1234",
      "name": "Cardigan",
      "frontImage": "data:image/png;base64,iVBO",
      "backImage": null,
      "category": "top",
      "status": "available",
      "createdAt": "2023-11-14T22:13:20.000Z",
      "syncedRemote": false
    }]"#,
  );
  let w = Wardrobe::new(&store);

  let items = match w.load_items() {
    Loaded::Found(items) => items,
    other => panic!("expected Found, got {other:?}"),
  };
  assert_eq!(items.len(), 1);
  assert!(items[0].back_image.is_empty());

  // A later write keeps the record.
  w.save_item(item("scarf", Category::Accessory)).unwrap();
  assert_eq!(ids(&w.load_items().into_vec()), ["scarf", "local-1700000000000-abc1234"]);
}

#[test]
fn stored_json_uses_camel_case_fields() {
  let store = MemoryStore::new();
  Wardrobe::new(&store)
    .save_item(item("a", Category::Unspecified))
    .unwrap();

  let raw = store.read(WARDROBE_KEY).unwrap().unwrap();
  let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
  let first = &value[0];
  assert_eq!(first["category"], "");
  assert_eq!(first["status"], "available");
  assert_eq!(first["syncedRemote"], false);
  assert!(first["frontImage"].as_str().unwrap().starts_with("data:image/png"));
  assert!(first.get("createdAt").is_some());
}

// ─── Quick upload ────────────────────────────────────────────────────────────

#[test]
fn quick_upload_puts_new_items_first_in_upload_order() {
  let w = wardrobe();
  w.save_item(item("existing", Category::Top)).unwrap();

  let added = w
    .quick_upload([
      Upload { file_name: "one.png".into(), bytes: vec![1] },
      Upload { file_name: "readme.txt".into(), bytes: vec![2] },
      Upload { file_name: "two.jpg".into(), bytes: vec![3] },
    ])
    .unwrap();
  assert_eq!(added.len(), 2);

  let names: Vec<_> =
    w.load_items().into_vec().into_iter().map(|i| i.name).collect();
  assert_eq!(names, ["one.png", "two.jpg", "item existing"]);
}

#[test]
fn quick_upload_of_nothing_writes_nothing() {
  let w = wardrobe();
  assert!(w.quick_upload(Vec::new()).unwrap().is_empty());
  assert!(matches!(w.load_items(), Loaded::Absent));
}

// ─── Outfits ─────────────────────────────────────────────────────────────────

#[test]
fn create_outfit_saves_snapshots() {
  let w = wardrobe();
  w.save_items(&full_set()).unwrap();
  let stored = w.load_items().into_vec();
  let selection: Vec<ItemId> = stored.iter().map(|i| i.id.clone()).collect();

  let outfit = w.create_outfit(&selection).unwrap();
  assert_eq!(outfit.items, stored);

  // Deleting a source item leaves the outfit alone.
  w.remove_item(&ItemId::from("boots")).unwrap();
  let outfits = w.load_outfits().into_vec();
  assert_eq!(outfits.len(), 1);
  assert_eq!(outfits[0], outfit);
  assert_eq!(outfits[0].items, stored);
}

#[test]
fn incomplete_outfit_is_not_saved() {
  let w = wardrobe();
  w.save_items(&full_set()).unwrap();

  let err = w
    .create_outfit(&[ItemId::from("shirt"), ItemId::from("boots")])
    .unwrap_err();
  assert!(matches!(
    err,
    CreateOutfitError::Rejected(OutfitRejection::Incomplete(ref missing))
      if missing == &[Requirement::BottomOrDress, Requirement::Accessory]
  ));
  assert!(matches!(w.load_outfits(), Loaded::Absent));
}

#[test]
fn empty_selection_is_rejected() {
  let w = wardrobe();
  w.save_items(&full_set()).unwrap();
  assert!(matches!(
    w.create_outfit(&[]),
    Err(CreateOutfitError::Rejected(OutfitRejection::EmptySelection))
  ));
}

#[test]
fn outfits_round_trip_newest_first() {
  let w = wardrobe();
  let base = Utc::now();
  let older = Outfit {
    id:         "outfit-1-aaaaaaa".to_owned().into(),
    created_at: base - Duration::minutes(5),
    items:      full_set(),
  };
  let newer = Outfit {
    id:         "outfit-2-bbbbbbb".to_owned().into(),
    created_at: base,
    items:      vec![item("dress", Category::Dress)],
  };
  w.save_outfit(older.clone()).unwrap();
  w.save_outfit(newer.clone()).unwrap();

  assert_eq!(w.load_outfits().into_vec(), [newer, older]);
}
