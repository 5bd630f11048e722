//! Storage Module
//!
//! SQLite-based storage layer with:
//! - Decks and facts with ease-factor scheduling state
//! - Versioned schema migrations
//! - The [`FactStore`](crate::review::FactStore) contract used by review sessions

mod migrations;
mod sqlite;

pub use migrations::{Migration, MIGRATIONS};
pub use sqlite::{Result, Storage, StorageError};
