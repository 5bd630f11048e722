//! Fact module - Core types for reviewable content
//!
//! - Facts with ease-factor scheduling state
//! - Decks grouping facts for a review session
//! - Authoring inputs

mod record;

pub use record::{Fact, NewFact};

use serde::{Deserialize, Serialize};

// ============================================================================
// DECKS
// ============================================================================

/// A named collection of facts, reviewed one deck at a time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    /// Storage identity
    pub id: i64,
    /// Display name (never blank)
    pub name: String,
}

impl std::fmt::Display for Deck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{} {}", self.id, self.name)
    }
}
