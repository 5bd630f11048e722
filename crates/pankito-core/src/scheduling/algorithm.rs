//! Ease-factor interval arithmetic
//!
//! Pure functions only: no clock reads, no I/O. The third-and-later interval
//! uses banker's rounding.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

/// Minimum ease factor allowed
pub const MIN_EASE_FACTOR: f64 = 1.3;

/// Ease factor of a freshly authored fact
pub const DEFAULT_EASE_FACTOR: f64 = 2.5;

/// Interval after the first successful recall (and after any failure)
pub const FIRST_INTERVAL: u32 = 1;

/// Interval after the second consecutive successful recall
pub const SECOND_INTERVAL: u32 = 6;

/// Longest interval ever scheduled (about a century)
pub const MAX_INTERVAL: u32 = 36_500;

/// Compute the updated ease factor for a quality score
///
/// `EF' = EF + (0.1 - (5 - q) * (0.8 + (5 - q) * 0.02))`, floored at
/// [`MIN_EASE_FACTOR`]. The quality range is not validated here; callers feed
/// it a parsed [`Quality`](super::Quality).
pub fn compute_ease_factor(current_ease: f64, quality: f64) -> f64 {
    let miss = 5.0 - quality;
    let updated = current_ease + (0.1 - miss * (0.8 + miss * 0.02));

    if updated < MIN_EASE_FACTOR {
        MIN_EASE_FACTOR
    } else {
        updated
    }
}

/// Compute the next interval in whole days
///
/// - repetition 0 or 1: 1 day
/// - repetition 2: 6 days
/// - otherwise: `previous_interval * ease`, rounded half to even
///
/// The result never exceeds [`MAX_INTERVAL`].
pub fn compute_interval(repetition: u32, previous_interval: u32, ease: f64) -> u32 {
    match repetition {
        0 | 1 => FIRST_INTERVAL,
        2 => SECOND_INTERVAL,
        _ => {
            let scaled = (f64::from(previous_interval) * ease).round_ties_even();
            // Saturating float-to-int cast: negative ease clamps to 0
            scaled.min(f64::from(MAX_INTERVAL)) as u32
        }
    }
}

/// Midnight (UTC) of the calendar day containing `moment`
pub fn truncate_to_day(moment: DateTime<Utc>) -> DateTime<Utc> {
    moment
        .date_naive()
        .and_time(NaiveTime::MIN)
        .and_utc()
}

/// Latest due date a fact can carry: midnight on 9999-12-31
///
/// Later dates no longer fit the four-digit year of stored timestamps.
pub fn latest_due() -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(9999, 12, 31)
        .map_or(DateTime::<Utc>::MAX_UTC, |day| day.and_time(NaiveTime::MIN).and_utc())
}

/// Due date for a fact that passed at `now` with the given interval
///
/// Clamped to [`latest_due`].
pub fn next_review_after(now: DateTime<Utc>, interval: u32) -> DateTime<Utc> {
    let latest = latest_due();
    now.checked_add_signed(Duration::days(i64::from(interval)))
        .map_or(latest, |due| truncate_to_day(due).min(latest))
}
