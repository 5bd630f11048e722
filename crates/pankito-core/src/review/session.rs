//! Review session driver
//!
//! Runs one pass over a [`ReviewQueue`] until it is empty:
//! present, grade, reschedule, persist, reorder, repeat.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::collaborators::{FactStore, Presenter};
use super::error::{ReviewError, Result};
use super::policy::{apply_review, ReviewOutcome, Verdict};
use super::queue::ReviewQueue;
use crate::scheduling::{Clock, Quality, SystemClock};

/// Default number of tries a learner gets to enter a usable score
pub const DEFAULT_MAX_QUALITY_ATTEMPTS: usize = 3;

/// Session tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionConfig {
    /// How many unusable scores are tolerated per fact before giving up
    #[serde(default = "default_max_quality_attempts")]
    pub max_quality_attempts: usize,
}

fn default_max_quality_attempts() -> usize {
    DEFAULT_MAX_QUALITY_ATTEMPTS
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_quality_attempts: DEFAULT_MAX_QUALITY_ATTEMPTS,
        }
    }
}

/// Tally of a finished (or interrupted) session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    /// Facts shown, counting every retry
    pub presented: usize,
    /// Reviews graded as passes
    pub passed: usize,
    /// Reviews graded as failures
    pub failed: usize,
    /// Schedule writes the store rejected
    pub save_failures: usize,
}

/// Drives a review queue to completion
pub struct ReviewSession<P, S, C = SystemClock> {
    queue: ReviewQueue,
    presenter: P,
    store: S,
    clock: C,
    config: SessionConfig,
    summary: SessionSummary,
}

impl<P: Presenter, S: FactStore> ReviewSession<P, S, SystemClock> {
    /// Create a session on the wall clock
    pub fn new(queue: ReviewQueue, presenter: P, store: S) -> Self {
        Self {
            queue,
            presenter,
            store,
            clock: SystemClock,
            config: SessionConfig::default(),
            summary: SessionSummary::default(),
        }
    }
}

impl<P: Presenter, S: FactStore, C: Clock> ReviewSession<P, S, C> {
    /// Swap the time source
    pub fn with_clock<C2: Clock>(self, clock: C2) -> ReviewSession<P, S, C2> {
        ReviewSession {
            queue: self.queue,
            presenter: self.presenter,
            store: self.store,
            clock,
            config: self.config,
            summary: self.summary,
        }
    }

    /// Replace the session tuning
    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Facts still pending
    pub fn queue(&self) -> &ReviewQueue {
        &self.queue
    }

    /// Progress so far
    pub fn summary(&self) -> SessionSummary {
        self.summary
    }

    /// Review facts until the queue is empty
    ///
    /// Save failures are logged and counted, never returned. Presenter I/O
    /// errors and exhausted quality retries end the session early with the
    /// current fact still at the head of the queue.
    pub fn run(&mut self) -> Result<SessionSummary> {
        info!("Review session started with {} due facts", self.queue.len());

        while self.review_next()?.is_some() {}

        info!(
            "Review session complete: {} presented, {} passed, {} failed",
            self.summary.presented, self.summary.passed, self.summary.failed
        );
        Ok(self.summary)
    }

    /// Review the head fact
    ///
    /// Returns `None` once the queue is empty, after announcing completion.
    pub fn review_next(&mut self) -> Result<Option<ReviewOutcome>> {
        if self.queue.is_empty() {
            self.presenter.announce_session_complete()?;
            return Ok(None);
        }

        {
            let fact = self.queue.peek_head()?;
            self.presenter.show_front(fact)?;
            self.summary.presented += 1;
            self.presenter.await_reveal()?;
            self.presenter.show_back(fact)?;
        }

        let quality = self.collect_quality()?;
        let now = self.clock.now();

        let fact = self.queue.head_mut()?;
        let outcome = apply_review(fact, quality, now);
        debug!(
            "Fact {} graded {} ({:?}): repetition={} ease={:.2} interval={}d",
            fact.id, quality, outcome.verdict, fact.repetition, fact.ease_factor, fact.interval
        );

        if let Err(e) = self.store.save_schedule(&outcome.update) {
            warn!("Failed to save schedule for fact {}: {}", outcome.update.fact_id, e);
            self.summary.save_failures += 1;
        }

        match outcome.verdict {
            Verdict::Pass => {
                self.queue.advance()?;
                self.summary.passed += 1;
            }
            Verdict::Fail => {
                self.queue.requeue()?;
                self.summary.failed += 1;
            }
        }

        Ok(Some(outcome))
    }

    /// Ask for a score until one parses or the attempts run out
    fn collect_quality(&mut self) -> Result<Quality> {
        let attempts = self.config.max_quality_attempts.max(1);
        let mut attempt = 1;

        loop {
            let raw = self.presenter.collect_quality()?;
            match Quality::parse(&raw) {
                Ok(quality) => return Ok(quality),
                Err(reason) if attempt < attempts => {
                    warn!("Rejected quality input {:?}: {}", raw.trim(), reason);
                    self.presenter.reject_quality(&raw, &reason)?;
                    attempt += 1;
                }
                Err(reason) => {
                    return Err(ReviewError::InvalidQualityInput {
                        input: raw.trim().to_string(),
                        reason,
                    });
                }
            }
        }
    }
}
