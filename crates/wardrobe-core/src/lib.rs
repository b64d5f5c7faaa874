//! Core types and the persistence layer for the wardrobe catalog.
//!
//! Everything here is synchronous and backend-agnostic: collections are kept
//! as JSON text behind the [`kv::KeyValueStore`] port, which the SQLite crate
//! and the in-memory [`kv::MemoryStore`] both implement.

pub mod error;
pub mod image;
pub mod item;
pub mod kv;
pub mod lifecycle;
pub mod outfit;
pub mod session;
pub mod validate;
pub mod wardrobe;

pub use error::{Error, Result, StorageError};
pub use wardrobe::{Loaded, Wardrobe};

#[cfg(test)]
mod tests;
