//! SQLite Storage Implementation
//!
//! Decks, facts, and their scheduling state in a single SQLite file.

use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Datelike, SecondsFormat, Utc};
use directories::ProjectDirs;
use rusqlite::{params, Connection, OptionalExtension};

use crate::fact::{Deck, Fact, NewFact};
use crate::review::{FactStore, ScheduleUpdate};
use crate::scheduling::latest_due;

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Storage error type
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
    /// Deck or fact not found
    #[error("Not found: {0}")]
    NotFound(String),
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Invalid timestamp
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
    /// Initialization error
    #[error("Initialization error: {0}")]
    Init(String),
    /// Rejected input
    #[error("Invalid input: {0}")]
    Invalid(String),
}

/// Storage result type
pub type Result<T> = std::result::Result<T, StorageError>;

/// Serialize a timestamp so that string order matches time order
///
/// Only four-digit years keep the fixed width; anything else is rejected.
pub(crate) fn format_timestamp(value: DateTime<Utc>) -> Result<String> {
    if !(0..=9999).contains(&value.year()) {
        return Err(StorageError::InvalidTimestamp(format!(
            "{} is outside years 0000-9999",
            value
        )));
    }
    Ok(value.to_rfc3339_opts(SecondsFormat::Micros, true))
}

/// A fact row whose due date has not been parsed yet
struct FactRow {
    id: i64,
    deck_id: i64,
    front: String,
    back: String,
    interval: u32,
    ease_factor: f64,
    repetition: u32,
    next_review: String,
}

impl FactRow {
    fn into_fact(self) -> Result<Fact> {
        let next_review = DateTime::parse_from_rfc3339(&self.next_review)
            .map_err(|e| {
                StorageError::InvalidTimestamp(format!(
                    "fact {} next_review '{}': {}",
                    self.id, self.next_review, e
                ))
            })?
            .with_timezone(&Utc);

        Ok(Fact {
            id: self.id,
            deck_id: self.deck_id,
            front: self.front,
            back: self.back,
            interval: self.interval,
            ease_factor: self.ease_factor,
            repetition: self.repetition,
            next_review,
        })
    }
}

// ============================================================================
// STORAGE
// ============================================================================

/// Fact and deck storage
///
/// All methods take `&self`; the connection sits behind a mutex so a
/// `Storage` can be shared by reference.
pub struct Storage {
    conn: Mutex<Connection>,
}

impl Storage {
    /// Apply PRAGMAs to a connection
    fn configure_connection(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA foreign_keys = ON;
             PRAGMA busy_timeout = 5000;",
        )?;

        Ok(())
    }

    /// Default database location in the platform data directory
    pub fn default_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "pankito", "pankito").ok_or_else(|| {
            StorageError::Init("Could not determine project directories".to_string())
        })?;
        Ok(proj_dirs.data_dir().join("pankito.db"))
    }

    /// Create new storage instance
    ///
    /// `None` opens the database in the platform data directory, creating it
    /// if needed.
    pub fn new(db_path: Option<PathBuf>) -> Result<Self> {
        let path = match db_path {
            Some(p) => {
                if p.as_os_str().to_string_lossy().trim().is_empty() {
                    return Err(StorageError::Init(
                        "cannot open a database with an empty/whitespace path".to_string(),
                    ));
                }
                p
            }
            None => {
                let path = Self::default_path()?;
                if let Some(data_dir) = path.parent() {
                    std::fs::create_dir_all(data_dir)?;
                    // Restrict directory permissions to owner-only on Unix
                    #[cfg(unix)]
                    {
                        use std::os::unix::fs::PermissionsExt;
                        let perms = std::fs::Permissions::from_mode(0o700);
                        let _ = std::fs::set_permissions(data_dir, perms);
                    }
                }
                path
            }
        };

        let conn = Connection::open(&path)?;

        // Restrict database file permissions to owner-only on Unix
        #[cfg(unix)]
        if path.exists() {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            let _ = std::fs::set_permissions(&path, perms);
        }

        Self::configure_connection(&conn)?;
        Self::from_connection(conn)
    }

    /// Throwaway in-memory database
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        let applied = super::migrations::apply_migrations(&conn)?;
        if applied > 0 {
            tracing::info!("Applied {} storage migrations", applied);
        }

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| StorageError::Init("Connection lock poisoned".into()))
    }

    /// Read a fact row; the due date is parsed by [`FactRow::into_fact`]
    fn row_to_fact(row: &rusqlite::Row) -> rusqlite::Result<FactRow> {
        Ok(FactRow {
            id: row.get("id")?,
            deck_id: row.get("deck_id")?,
            front: row.get("front")?,
            back: row.get("back")?,
            interval: row.get("interval_days")?,
            ease_factor: row.get("ease_factor")?,
            repetition: row.get("repetition")?,
            next_review: row.get("next_review")?,
        })
    }

    fn row_to_deck(row: &rusqlite::Row) -> rusqlite::Result<Deck> {
        Ok(Deck {
            id: row.get("id")?,
            name: row.get("name")?,
        })
    }

    // ========================================================================
    // DECKS
    // ========================================================================

    /// Create a deck
    pub fn create_deck(&self, name: &str) -> Result<Deck> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StorageError::Invalid("deck name cannot be blank".to_string()));
        }

        let conn = self.conn()?;
        conn.execute("INSERT INTO decks (name) VALUES (?1)", params![name])?;

        Ok(Deck {
            id: conn.last_insert_rowid(),
            name: name.to_string(),
        })
    }

    /// Get a deck by id
    pub fn get_deck(&self, id: i64) -> Result<Option<Deck>> {
        let conn = self.conn()?;
        let deck = conn
            .query_row(
                "SELECT id, name FROM decks WHERE id = ?1",
                params![id],
                Self::row_to_deck,
            )
            .optional()?;
        Ok(deck)
    }

    /// All decks, oldest first
    pub fn list_decks(&self) -> Result<Vec<Deck>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT id, name FROM decks ORDER BY id ASC")?;
        let decks = stmt.query_map([], Self::row_to_deck)?;

        let mut result = Vec::new();
        for deck in decks {
            result.push(deck?);
        }
        Ok(result)
    }

    // ========================================================================
    // FACTS
    // ========================================================================

    /// Add a fact with the initial schedule
    pub fn add_fact(&self, input: NewFact) -> Result<Fact> {
        if self.get_deck(input.deck_id)?.is_none() {
            return Err(StorageError::NotFound(format!("deck {}", input.deck_id)));
        }

        let now = Utc::now();
        let mut fact = Fact::new(input.deck_id, input.front, input.back);
        fact.next_review = input.due_at.unwrap_or(now);
        let due = format_timestamp(fact.next_review)?;
        let stamp = format_timestamp(now)?;

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO facts (
                deck_id, front, back, interval_days, ease_factor, repetition,
                next_review, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                fact.deck_id,
                fact.front,
                fact.back,
                fact.interval,
                fact.ease_factor,
                fact.repetition,
                due,
                stamp,
                stamp,
            ],
        )?;
        fact.id = conn.last_insert_rowid();

        tracing::debug!("Added fact {} to deck {}", fact.id, fact.deck_id);
        Ok(fact)
    }

    /// Get a fact by id
    pub fn get_fact(&self, id: i64) -> Result<Option<Fact>> {
        let conn = self.conn()?;
        let row = conn
            .query_row("SELECT * FROM facts WHERE id = ?1", params![id], |row| {
                Self::row_to_fact(row)
            })
            .optional()?;
        row.map(FactRow::into_fact).transpose()
    }

    /// Every fact in a deck, in authoring order
    pub fn list_facts(&self, deck_id: i64) -> Result<Vec<Fact>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT * FROM facts WHERE deck_id = ?1 ORDER BY id ASC")?;
        let rows = stmt.query_map(params![deck_id], |row| Self::row_to_fact(row))?;

        let mut result = Vec::new();
        for row in rows {
            result.push(row?.into_fact()?);
        }
        Ok(result)
    }

    /// Facts of a deck due at `now`, earliest first
    pub fn get_due_facts(&self, deck_id: i64, now: DateTime<Utc>) -> Result<Vec<Fact>> {
        let cutoff = format_timestamp(now.min(latest_due()))?;
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT * FROM facts
             WHERE deck_id = ?1 AND next_review <= ?2
             ORDER BY next_review ASC, id ASC",
        )?;

        let rows = stmt.query_map(params![deck_id, cutoff], |row| Self::row_to_fact(row))?;

        let mut result = Vec::new();
        for row in rows {
            result.push(row?.into_fact()?);
        }
        Ok(result)
    }

    /// Write back one review's schedule fields
    ///
    /// The due date is only touched when the update carries one.
    pub fn update_schedule(&self, update: &ScheduleUpdate) -> Result<()> {
        let now = format_timestamp(Utc::now())?;
        let next_review = update.next_review.map(format_timestamp).transpose()?;
        let conn = self.conn()?;

        let changed = match next_review {
            Some(next_review) => conn.execute(
                "UPDATE facts SET
                    repetition = ?1,
                    ease_factor = ?2,
                    interval_days = ?3,
                    next_review = ?4,
                    updated_at = ?5
                WHERE id = ?6",
                params![
                    update.repetition,
                    update.ease_factor,
                    update.interval,
                    next_review,
                    now,
                    update.fact_id,
                ],
            )?,
            None => conn.execute(
                "UPDATE facts SET
                    repetition = ?1,
                    ease_factor = ?2,
                    interval_days = ?3,
                    updated_at = ?4
                WHERE id = ?5",
                params![
                    update.repetition,
                    update.ease_factor,
                    update.interval,
                    now,
                    update.fact_id,
                ],
            )?,
        };

        if changed == 0 {
            return Err(StorageError::NotFound(format!("fact {}", update.fact_id)));
        }
        Ok(())
    }
}

impl FactStore for Storage {
    fn load_due(&self, deck_id: i64, now: DateTime<Utc>) -> Result<Vec<Fact>> {
        self.get_due_facts(deck_id, now)
    }

    fn save_schedule(&self, update: &ScheduleUpdate) -> Result<()> {
        self.update_schedule(update)
    }
}
