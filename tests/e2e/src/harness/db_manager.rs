//! Test Database Manager
//!
//! Provides isolated database instances for testing:
//! - Temporary databases that are automatically cleaned up
//! - Decks pre-seeded with facts due in the past, now, or later
//! - Reopening the same file to check durability

use std::path::PathBuf;

use chrono::{DateTime, Duration, Utc};
use pankito_core::{truncate_to_day, Deck, Fact, NewFact, Storage};
use tempfile::TempDir;

/// Manager for test databases
///
/// Creates isolated database instances for each test to prevent interference.
/// Automatically cleans up temporary databases when dropped.
///
/// # Example
///
/// ```rust,ignore
/// let db = TestDatabaseManager::new_temp();
/// let deck = db.create_deck("Capitals");
/// db.seed_due_today(&deck, 3);
/// // Database is deleted when `db` goes out of scope
/// ```
pub struct TestDatabaseManager {
    /// The storage instance
    pub storage: Storage,
    /// Temporary directory (kept alive to prevent premature deletion)
    _temp_dir: Option<TempDir>,
    /// Path to the database file
    db_path: PathBuf,
}

impl TestDatabaseManager {
    /// Create a new test database in a temporary directory
    pub fn new_temp() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test_pankito.db");

        let storage = Storage::new(Some(db_path.clone())).expect("Failed to create test storage");

        Self {
            storage,
            _temp_dir: Some(temp_dir),
            db_path,
        }
    }

    /// Get the database path
    pub fn path(&self) -> &PathBuf {
        &self.db_path
    }

    /// Close and reopen the same database file
    pub fn reopen(&mut self) {
        self.storage =
            Storage::new(Some(self.db_path.clone())).expect("Failed to reopen test storage");
    }

    /// Create a deck
    pub fn create_deck(&self, name: &str) -> Deck {
        self.storage.create_deck(name).expect("Failed to create deck")
    }

    /// Fetch a fact that must exist
    pub fn fact(&self, id: i64) -> Fact {
        self.storage
            .get_fact(id)
            .expect("Failed to read fact")
            .expect("Fact missing")
    }

    // ========================================================================
    // SEEDING METHODS
    // ========================================================================

    /// Seed facts due at an exact moment
    pub fn seed_due_at(
        &self,
        deck: &Deck,
        prefix: &str,
        due: DateTime<Utc>,
        count: usize,
    ) -> Vec<i64> {
        (1..=count)
            .map(|i| {
                let input = NewFact::new(
                    deck.id,
                    format!("{} Front {}", prefix, i),
                    format!("{} Back {}", prefix, i),
                )
                .due_at(due);
                self.storage.add_fact(input).expect("Failed to seed fact").id
            })
            .collect()
    }

    /// Facts due at midnight today
    pub fn seed_due_today(&self, deck: &Deck, count: usize) -> Vec<i64> {
        self.seed_due_at(deck, "Current", truncate_to_day(Utc::now()), count)
    }

    /// Facts due since midnight yesterday
    pub fn seed_due_in_past(&self, deck: &Deck, count: usize) -> Vec<i64> {
        self.seed_due_at(deck, "Past", truncate_to_day(Utc::now() - Duration::days(1)), count)
    }

    /// Facts not due until midnight tomorrow
    pub fn seed_due_in_future(&self, deck: &Deck, count: usize) -> Vec<i64> {
        self.seed_due_at(deck, "Future", truncate_to_day(Utc::now() + Duration::days(1)), count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_database_creation() {
        let db = TestDatabaseManager::new_temp();
        assert!(db.path().exists());
        assert!(db.storage.list_decks().unwrap().is_empty());
    }

    #[test]
    fn test_seed_helpers() {
        let db = TestDatabaseManager::new_temp();
        let deck = db.create_deck("Test Deck");

        assert_eq!(db.seed_due_today(&deck, 2).len(), 2);
        assert_eq!(db.seed_due_in_past(&deck, 1).len(), 1);
        assert_eq!(db.seed_due_in_future(&deck, 3).len(), 3);
        assert_eq!(db.storage.list_facts(deck.id).unwrap().len(), 6);
    }

    #[test]
    fn test_reopen_preserves_facts() {
        let mut db = TestDatabaseManager::new_temp();
        let deck = db.create_deck("Test Deck");
        let ids = db.seed_due_today(&deck, 2);

        db.reopen();

        assert_eq!(db.fact(ids[1]).front, "Current Front 2");
    }
}
