//! Session-local review queue
//!
//! An ordered set of due facts. The head is presented next. Passing facts
//! leave the queue for good; failing facts go to the back and come round
//! again later in the same session. The queue never grows.

use std::collections::{HashSet, VecDeque};

use chrono::{DateTime, Utc};

use super::collaborators::FactStore;
use super::error::{ReviewError, Result};
use crate::fact::Fact;

/// Facts pending review in one session
#[derive(Debug, Clone, Default)]
pub struct ReviewQueue {
    facts: VecDeque<Fact>,
}

impl ReviewQueue {
    /// Build a queue, keeping the given order
    ///
    /// A fact whose id already appears earlier is dropped. Unsaved facts
    /// (id 0) have no identity yet and are all kept.
    pub fn new(facts: impl IntoIterator<Item = Fact>) -> Self {
        let mut seen = HashSet::new();
        let mut queue = VecDeque::new();

        for fact in facts {
            if fact.is_saved() && !seen.insert(fact.id) {
                tracing::debug!("Dropping duplicate fact {} from review queue", fact.id);
                continue;
            }
            queue.push_back(fact);
        }

        Self { facts: queue }
    }

    /// Load the due set of a deck from storage
    ///
    /// Facts the store returns that are not yet due at `now` are skipped.
    pub fn load_due<S: FactStore + ?Sized>(
        store: &S,
        deck_id: i64,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let loaded = store.load_due(deck_id, now)?;
        let due = loaded.into_iter().filter(|fact| {
            let due = fact.is_due_at(now);
            if !due {
                tracing::debug!("Skipping fact {}: not due until {}", fact.id, fact.next_review);
            }
            due
        });
        Ok(Self::new(due))
    }

    /// The fact to present next
    pub fn peek_head(&self) -> Result<&Fact> {
        self.facts.front().ok_or(ReviewError::EmptyQueue)
    }

    /// Mutable access to the head, for applying a review
    pub fn head_mut(&mut self) -> Result<&mut Fact> {
        self.facts.front_mut().ok_or(ReviewError::EmptyQueue)
    }

    /// Remove the head permanently
    pub fn advance(&mut self) -> Result<Fact> {
        self.facts.pop_front().ok_or(ReviewError::EmptyQueue)
    }

    /// Move the head to the tail
    ///
    /// With a single pending fact this leaves the head where it is.
    pub fn requeue(&mut self) -> Result<()> {
        if self.facts.is_empty() {
            return Err(ReviewError::EmptyQueue);
        }
        self.facts.rotate_left(1);
        Ok(())
    }

    /// Whether the session is finished
    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    /// Number of pending facts
    pub fn len(&self) -> usize {
        self.facts.len()
    }

    /// Pending facts in presentation order
    pub fn iter(&self) -> impl Iterator<Item = &Fact> {
        self.facts.iter()
    }

    /// Take the pending facts back out
    pub fn into_facts(self) -> Vec<Fact> {
        self.facts.into()
    }
}
