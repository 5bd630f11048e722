//! # Pankito Core
//!
//! Spaced repetition engine for flashcard-style facts:
//!
//! - **Ease-factor scheduling**: SuperMemo-2 style intervals (1 day, 6 days,
//!   then `previous * ease` with banker's rounding), ease floored at 1.3
//! - **Review queues**: due facts in order; failed facts come round again in
//!   the same session
//! - **Review sessions**: the present/grade/reschedule/save loop behind
//!   pluggable [`Presenter`] and [`FactStore`] collaborators
//! - **SQLite storage**: decks, facts, and schema migrations
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pankito_core::{NewFact, ReviewQueue, ReviewSession, Storage};
//!
//! let storage = Storage::new(None)?;
//! let deck = storage.create_deck("Capitals")?;
//! storage.add_fact(NewFact::new(deck.id, "Capital of Peru?", "Lima"))?;
//!
//! let queue = ReviewQueue::load_due(&storage, deck.id, chrono::Utc::now())?;
//! let summary = ReviewSession::new(queue, my_presenter, &storage).run()?;
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(rustdoc::missing_crate_level_docs)]

// ============================================================================
// MODULES
// ============================================================================

pub mod fact;
pub mod review;
pub mod scheduling;
pub mod storage;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Fact types
pub use fact::{Deck, Fact, NewFact};

// Scheduling arithmetic
pub use scheduling::{
    compute_ease_factor, compute_interval, latest_due, truncate_to_day, Clock, FixedClock,
    Quality, QualityError, SystemClock, DEFAULT_EASE_FACTOR, MAX_INTERVAL, MIN_EASE_FACTOR,
    PASS_THRESHOLD,
};

// Review flow
pub use review::{
    apply_review, FactStore, Presenter, ReviewError, ReviewOutcome, ReviewQueue, ReviewSession,
    ScheduleUpdate, SessionConfig, SessionSummary, Verdict,
};

// Storage layer
pub use storage::{Storage, StorageError};
