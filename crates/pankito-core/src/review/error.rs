//! Review error types

use crate::scheduling::QualityError;
use crate::storage::StorageError;

/// Review error type
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum ReviewError {
    /// Queue operation on an empty queue (a caller bug, never a runtime condition)
    #[error("Review queue is empty")]
    EmptyQueue,
    /// Learner input could not be used as a quality score
    #[error("Invalid quality input '{input}': {reason}")]
    InvalidQualityInput {
        /// What the presenter returned
        input: String,
        /// Why it was rejected
        #[source]
        reason: QualityError,
    },
    /// Presenter I/O failed
    #[error("Presentation error: {0}")]
    Presentation(#[from] std::io::Error),
    /// Storage failed while loading the due set
    #[error("Persistence error: {0}")]
    Persistence(#[from] StorageError),
}

/// Review result type
pub type Result<T> = std::result::Result<T, ReviewError>;
