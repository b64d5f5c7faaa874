//! The outfit completeness rule.
//!
//! A valid outfit has at least one top, at least one bottom or dress, at least
//! one accessory and at least one pair of footwear. Every unmet clause is
//! reported, not just the first.

use std::fmt;

use thiserror::Error;

use crate::item::{Category, ClothingItem};

/// One clause of the completeness rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
  Top,
  BottomOrDress,
  Accessory,
  Footwear,
}

impl Requirement {
  pub const ALL: [Requirement; 4] =
    [Self::Top, Self::BottomOrDress, Self::Accessory, Self::Footwear];

  /// User-facing label, e.g. `"1 Bottom or 1 Dress"`.
  pub fn label(self) -> &'static str {
    match self {
      Self::Top => "1 Top",
      Self::BottomOrDress => "1 Bottom or 1 Dress",
      Self::Accessory => "1 Accessory",
      Self::Footwear => "1 Shoes/Footwear",
    }
  }

  fn satisfied_by(self, category: Category) -> bool {
    match self {
      Self::Top => category == Category::Top,
      Self::BottomOrDress => matches!(category, Category::Bottom | Category::Dress),
      Self::Accessory => category == Category::Accessory,
      Self::Footwear => category == Category::Footwear,
    }
  }
}

impl fmt::Display for Requirement {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.label()) }
}

/// Why a candidate outfit was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OutfitRejection {
  #[error("Select items first.")]
  EmptySelection,

  #[error("Please add: {}", join_labels(.0))]
  Incomplete(Vec<Requirement>),
}

fn join_labels(missing: &[Requirement]) -> String {
  missing.iter().map(|r| r.label()).collect::<Vec<_>>().join(", ")
}

/// Every clause `items` fails to satisfy, in rule order.
pub fn missing_requirements(items: &[ClothingItem]) -> Vec<Requirement> {
  Requirement::ALL
    .into_iter()
    .filter(|req| !items.iter().any(|i| req.satisfied_by(i.category)))
    .collect()
}

/// Decide whether `items` may be saved as an outfit.
pub fn check_outfit(items: &[ClothingItem]) -> Result<(), OutfitRejection> {
  if items.is_empty() {
    return Err(OutfitRejection::EmptySelection);
  }
  let missing = missing_requirements(items);
  if missing.is_empty() {
    Ok(())
  } else {
    Err(OutfitRejection::Incomplete(missing))
  }
}
