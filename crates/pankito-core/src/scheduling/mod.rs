//! Ease-Factor Scheduling Module
//!
//! Linear-interval spaced repetition in the SuperMemo-2 family:
//! - each fact carries an ease factor (starts at 2.5, floored at 1.3)
//! - the first two successful recalls are scheduled 1 and 6 days out
//! - later intervals grow by `previous * ease`, rounded half to even
//!
//! ## Core Formulas:
//! - Ease: EF' = EF + (0.1 - (5 - q) * (0.8 + (5 - q) * 0.02))
//! - Interval: I(n) = round_half_even(I(n-1) * EF) for n > 2

mod algorithm;
mod clock;
mod quality;

pub use algorithm::{
    // Core functions
    compute_ease_factor,
    compute_interval,
    latest_due,
    next_review_after,
    truncate_to_day,
    // Constants
    DEFAULT_EASE_FACTOR,
    FIRST_INTERVAL,
    MAX_INTERVAL,
    MIN_EASE_FACTOR,
    SECOND_INTERVAL,
};

pub use clock::{Clock, FixedClock, SystemClock};

pub use quality::{Quality, QualityError, MAX_QUALITY, MIN_QUALITY, PASS_THRESHOLD};
