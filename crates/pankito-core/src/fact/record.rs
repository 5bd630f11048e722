//! Fact - The fundamental unit of review
//!
//! Each fact carries:
//! - Opaque display content (front and back)
//! - Ease-factor scheduling state
//! - The moment it next becomes due

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scheduling::{DEFAULT_EASE_FACTOR, MIN_EASE_FACTOR};

// ============================================================================
// FACT
// ============================================================================

/// A reviewable fact
///
/// Identity is owned by the storage layer: a fact that has never been saved
/// has `id == 0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fact {
    /// Storage identity (0 until first saved)
    pub id: i64,
    /// Owning deck, never interpreted by the scheduler
    pub deck_id: i64,
    /// Prompt side
    pub front: String,
    /// Answer side
    pub back: String,

    // ========== Scheduling state ==========
    /// Days until the next review
    pub interval: u32,
    /// Interval growth multiplier, never below 1.3 once updated
    pub ease_factor: f64,
    /// Consecutive successful recalls since the last failure
    pub repetition: u32,
    /// When the fact becomes due
    pub next_review: DateTime<Utc>,
}

impl Fact {
    /// Create an unsaved fact with the initial schedule, due immediately
    pub fn new(deck_id: i64, front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            id: 0,
            deck_id,
            front: front.into(),
            back: back.into(),
            interval: 0,
            ease_factor: DEFAULT_EASE_FACTOR,
            repetition: 0,
            next_review: Utc::now(),
        }
    }

    /// Check if the fact is due at the given moment
    pub fn is_due_at(&self, now: DateTime<Utc>) -> bool {
        self.next_review <= now
    }

    /// Whether the fact has been persisted yet
    pub fn is_saved(&self) -> bool {
        self.id != 0
    }

    /// Whether the ease factor respects the scheduler's floor
    pub fn has_valid_ease(&self) -> bool {
        self.ease_factor >= MIN_EASE_FACTOR
    }
}

// ============================================================================
// INPUT TYPES
// ============================================================================

/// Input for authoring a new fact
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFact {
    /// Deck to add the fact to
    pub deck_id: i64,
    /// Prompt side
    pub front: String,
    /// Answer side
    pub back: String,
    /// Override for the first due date (defaults to now)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_at: Option<DateTime<Utc>>,
}

impl NewFact {
    /// Build an input that is due immediately
    pub fn new(deck_id: i64, front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            deck_id,
            front: front.into(),
            back: back.into(),
            due_at: None,
        }
    }

    /// Schedule the first review for a specific moment
    pub fn due_at(mut self, due_at: DateTime<Utc>) -> Self {
        self.due_at = Some(due_at);
        self
    }
}
