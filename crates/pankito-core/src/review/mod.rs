//! Review Module
//!
//! Session-level review flow:
//! - [`ReviewQueue`]: due facts in presentation order, with advance/requeue
//! - [`apply_review`]: how one graded recall changes a fact
//! - [`ReviewSession`]: the loop tying presenter, scheduler, and store together

mod collaborators;
mod error;
mod policy;
mod queue;
mod session;

pub use collaborators::{FactStore, Presenter, ScheduleUpdate};
pub use error::{Result, ReviewError};
pub use policy::{apply_review, ReviewOutcome, Verdict};
pub use queue::ReviewQueue;
pub use session::{ReviewSession, SessionConfig, SessionSummary, DEFAULT_MAX_QUALITY_ATTEMPTS};
