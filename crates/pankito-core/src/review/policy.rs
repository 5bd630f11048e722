//! Per-review update policy
//!
//! Decides how one graded recall changes a fact's schedule and whether the
//! fact leaves the session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::collaborators::ScheduleUpdate;
use crate::fact::Fact;
use crate::scheduling::{compute_ease_factor, compute_interval, next_review_after, Quality};

/// What happens to a fact after it is graded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// Recalled (quality > 3): rescheduled and removed from the session
    Pass,
    /// Not recalled: stays due and goes to the back of the queue
    Fail,
}

/// Result of grading one fact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewOutcome {
    /// The score the learner gave
    pub quality: Quality,
    /// Pass or fail
    pub verdict: Verdict,
    /// Fields to persist
    pub update: ScheduleUpdate,
}

impl ReviewOutcome {
    /// Whether the fact passed
    pub fn passed(&self) -> bool {
        self.verdict == Verdict::Pass
    }
}

/// Apply a graded recall to `fact` in place
///
/// On a pass the repetition count grows and the fact is due again
/// `interval` days after `now`, at midnight. On a fail the repetition count
/// resets and `next_review` is left as it was, so the fact stays due today.
/// The ease factor and interval are recomputed either way.
pub fn apply_review(fact: &mut Fact, quality: Quality, now: DateTime<Utc>) -> ReviewOutcome {
    let verdict = if quality.is_pass() {
        Verdict::Pass
    } else {
        Verdict::Fail
    };

    match verdict {
        Verdict::Pass => fact.repetition = fact.repetition.saturating_add(1),
        Verdict::Fail => fact.repetition = 0,
    }

    fact.ease_factor = compute_ease_factor(fact.ease_factor, quality.value());
    fact.interval = compute_interval(fact.repetition, fact.interval, fact.ease_factor);

    if verdict == Verdict::Pass {
        fact.next_review = next_review_after(now, fact.interval);
    }

    ReviewOutcome {
        quality,
        verdict,
        update: ScheduleUpdate::from_fact(fact, verdict == Verdict::Pass),
    }
}
