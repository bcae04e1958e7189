//! Engine error types.

use std::fmt;

/// A failure absorbed at the engine boundary.
///
/// The engine never propagates failures past itself: they are recorded
/// as the queryable last-error state and logged. The retryable flag lets
/// the UI layer decide whether offering a retry makes sense.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// The directory lookup for a reload cycle failed. The POI store
    /// was left unchanged and the cycle was skipped.
    Fetch { message: String, retryable: bool },

    /// The location/heading sensor service reported a failure.
    Sensor(String),
}

impl EngineError {
    /// True if retrying the failed operation could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Fetch { retryable, .. } => *retryable,
            // Sensors generally recover on their own
            Self::Sensor(_) => true,
        }
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fetch { message, .. } => write!(f, "POI fetch failed: {}", message),
            Self::Sensor(message) => write!(f, "Sensor failure: {}", message),
        }
    }
}

impl std::error::Error for EngineError {}
