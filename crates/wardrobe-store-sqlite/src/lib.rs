//! SQLite backend for the wardrobe store.
//!
//! Implements [`wardrobe_core::kv::KeyValueStore`] over a single `kv` table so
//! collections survive across runs of the CLI.

mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;
