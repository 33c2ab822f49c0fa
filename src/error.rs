//! Error type for queue operations

use std::fmt;

/// Error type for queue operations
///
/// Operations on empty queues are never errors: they are no-ops or return
/// an empty result (`None`, `0`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueError {
    /// Memory for a new element's value could not be reserved
    AllocationFailed,
    /// A parameter is outside the range the operation accepts
    InvalidArgument(&'static str),
}

impl fmt::Display for QueueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueueError::AllocationFailed => {
                write!(f, "could not allocate memory for a new element")
            }
            QueueError::InvalidArgument(what) => write!(f, "invalid argument: {what}"),
        }
    }
}

impl std::error::Error for QueueError {}
