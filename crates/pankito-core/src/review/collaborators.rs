//! Collaborator contracts for review sessions
//!
//! The session never renders text or builds queries itself. It talks to a
//! [`Presenter`] for learner interaction and a [`FactStore`] for durability.

use std::io;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::fact::Fact;
use crate::scheduling::QualityError;
use crate::storage::StorageError;

// ============================================================================
// PERSISTENCE
// ============================================================================

/// Schedule fields written back after one review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleUpdate {
    /// Fact being updated
    pub fact_id: i64,
    /// New repetition count
    pub repetition: u32,
    /// New ease factor
    pub ease_factor: f64,
    /// New interval in days
    pub interval: u32,
    /// New due date; `None` leaves the stored value alone (failed recall)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_review: Option<DateTime<Utc>>,
}

impl ScheduleUpdate {
    /// Snapshot a fact's schedule, optionally including its due date
    pub fn from_fact(fact: &Fact, include_due: bool) -> Self {
        Self {
            fact_id: fact.id,
            repetition: fact.repetition,
            ease_factor: fact.ease_factor,
            interval: fact.interval,
            next_review: include_due.then_some(fact.next_review),
        }
    }
}

/// Durable home of facts
pub trait FactStore {
    /// Facts of one deck due at `now`, earliest due first
    fn load_due(&self, deck_id: i64, now: DateTime<Utc>) -> Result<Vec<Fact>, StorageError>;

    /// Persist the schedule fields of one fact
    fn save_schedule(&self, update: &ScheduleUpdate) -> Result<(), StorageError>;
}

impl<T: FactStore + ?Sized> FactStore for &T {
    fn load_due(&self, deck_id: i64, now: DateTime<Utc>) -> Result<Vec<Fact>, StorageError> {
        (**self).load_due(deck_id, now)
    }

    fn save_schedule(&self, update: &ScheduleUpdate) -> Result<(), StorageError> {
        (**self).save_schedule(update)
    }
}

// ============================================================================
// PRESENTATION
// ============================================================================

/// Learner-facing side of a session
///
/// Calls always arrive in the order front, reveal, back, quality.
pub trait Presenter {
    /// Show the prompt side
    fn show_front(&mut self, fact: &Fact) -> io::Result<()>;

    /// Block until the learner asks to see the answer
    fn await_reveal(&mut self) -> io::Result<()>;

    /// Show the answer side
    fn show_back(&mut self, fact: &Fact) -> io::Result<()>;

    /// Read a raw quality score
    fn collect_quality(&mut self) -> io::Result<String>;

    /// Tell the learner their score was unusable before asking again
    fn reject_quality(&mut self, _raw: &str, _reason: &QualityError) -> io::Result<()> {
        Ok(())
    }

    /// The queue is exhausted
    fn announce_session_complete(&mut self) -> io::Result<()>;
}

impl<P: Presenter + ?Sized> Presenter for &mut P {
    fn show_front(&mut self, fact: &Fact) -> io::Result<()> {
        (**self).show_front(fact)
    }

    fn await_reveal(&mut self) -> io::Result<()> {
        (**self).await_reveal()
    }

    fn show_back(&mut self, fact: &Fact) -> io::Result<()> {
        (**self).show_back(fact)
    }

    fn collect_quality(&mut self) -> io::Result<String> {
        (**self).collect_quality()
    }

    fn reject_quality(&mut self, raw: &str, reason: &QualityError) -> io::Result<()> {
        (**self).reject_quality(raw, reason)
    }

    fn announce_session_complete(&mut self) -> io::Result<()> {
        (**self).announce_session_complete()
    }
}
