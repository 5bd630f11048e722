//! Recall quality scores
//!
//! Learners grade each answer on a 0-5 scale:
//! - 0: Complete blackout, no recall
//! - 1: Incorrect, but upon seeing answer, remembered
//! - 2: Incorrect, but answer seemed easy to recall
//! - 3: Correct response with serious difficulty
//! - 4: Correct response after hesitation
//! - 5: Perfect response with no hesitation
//!
//! Only scores strictly above 3 count as a pass.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lowest accepted score
pub const MIN_QUALITY: f64 = 0.0;

/// Highest accepted score
pub const MAX_QUALITY: f64 = 5.0;

/// Scores above this value pass; this value itself fails
pub const PASS_THRESHOLD: f64 = 3.0;

/// Why a raw quality string was rejected
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QualityError {
    /// Nothing but whitespace was entered
    #[error("no score entered")]
    Empty,
    /// Input is not a number
    #[error("not a number")]
    NotNumeric,
    /// Parsed, but outside 0-5 (or NaN/infinite)
    #[error("score {0} is outside 0-5")]
    OutOfRange(f64),
}

/// A validated quality score in `[0, 5]`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Quality(f64);

impl Quality {
    /// Validate a numeric score
    pub fn new(value: f64) -> Result<Self, QualityError> {
        if value.is_finite() && (MIN_QUALITY..=MAX_QUALITY).contains(&value) {
            Ok(Self(value))
        } else {
            Err(QualityError::OutOfRange(value))
        }
    }

    /// Parse learner input, ignoring surrounding whitespace
    pub fn parse(raw: &str) -> Result<Self, QualityError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(QualityError::Empty);
        }
        let value: f64 = trimmed.parse().map_err(|_| QualityError::NotNumeric)?;
        Self::new(value)
    }

    /// The raw score
    pub fn value(self) -> f64 {
        self.0
    }

    /// Whether the recall counts as successful (strictly above 3)
    pub fn is_pass(self) -> bool {
        self.0 > PASS_THRESHOLD
    }
}

impl FromStr for Quality {
    type Err = QualityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<f64> for Quality {
    type Error = QualityError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quality> for f64 {
    fn from(quality: Quality) -> Self {
        quality.0
    }
}

impl std::fmt::Display for Quality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
