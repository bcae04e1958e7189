//! Business directory fetch client
//!
//! The engine consumes a [`DirectoryClient`]: given a position, it
//! asynchronously returns the nearby POIs. The engine calls it once per
//! triggered reload and does not retry on failure itself -
//! [`DirectoryError::is_retryable`] tells the UI layer whether a retry
//! could help.
//!
//! [`HttpDirectoryClient`] is the production implementation, decoding a
//! Yelp-style JSON search response over an injectable HTTP client.

mod http;

pub use http::{AsyncHttpClient, HttpDirectoryClient, ReqwestClient, DEFAULT_ENDPOINT};

use std::future::Future;
use std::sync::Arc;

use thiserror::Error;

use crate::geo::Coordinate;
use crate::poi::Poi;

/// Errors that can occur during a directory lookup.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DirectoryError {
    /// HTTP transport failed (connection refused, DNS, TLS, ...).
    #[error("Directory request failed: {0}")]
    Http(String),

    /// The request did not complete within the configured timeout.
    #[error("Directory request timed out after {0}s")]
    Timeout(u64),

    /// The directory returned a non-success HTTP status.
    #[error("Directory returned HTTP status {0}")]
    Status(u16),

    /// The response body could not be decoded.
    #[error("Invalid directory response: {0}")]
    InvalidResponse(String),
}

impl DirectoryError {
    /// True if a later retry of the same lookup could succeed.
    ///
    /// Transport failures, timeouts and server-side errors are
    /// retryable; client-side rejections and malformed bodies are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(_) | Self::Timeout(_) => true,
            Self::Status(status) => *status >= 500,
            Self::InvalidResponse(_) => false,
        }
    }
}

/// Trait for asynchronous business directory lookups.
///
/// Implementors return the POIs near a position. Lookups are
/// non-blocking; the engine awaits them off its callers' threads.
pub trait DirectoryClient: Send + Sync {
    /// Fetch the POIs near a position.
    fn fetch_nearby(
        &self,
        location: Coordinate,
    ) -> impl Future<Output = Result<Vec<Poi>, DirectoryError>> + Send;

    /// Returns the client's name for logging and identification.
    fn name(&self) -> &str;
}

/// Blanket implementation for Arc-wrapped directory clients.
///
/// Allows sharing a client across threads - or keeping an inspection
/// handle on one handed to the engine - while still satisfying
/// [`DirectoryClient`] by delegating to the inner client.
impl<T: DirectoryClient + ?Sized> DirectoryClient for Arc<T> {
    fn fetch_nearby(
        &self,
        location: Coordinate,
    ) -> impl Future<Output = Result<Vec<Poi>, DirectoryError>> + Send {
        (**self).fetch_nearby(location)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_errors_are_retryable() {
        assert!(DirectoryError::Http("connection refused".into()).is_retryable());
        assert!(DirectoryError::Timeout(10).is_retryable());
    }

    #[test]
    fn test_server_errors_are_retryable() {
        assert!(DirectoryError::Status(500).is_retryable());
        assert!(DirectoryError::Status(503).is_retryable());
    }

    #[test]
    fn test_client_errors_are_not_retryable() {
        assert!(!DirectoryError::Status(401).is_retryable());
        assert!(!DirectoryError::Status(404).is_retryable());
        assert!(!DirectoryError::InvalidResponse("truncated body".into()).is_retryable());
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            DirectoryError::Status(503).to_string(),
            "Directory returned HTTP status 503"
        );
        assert_eq!(
            DirectoryError::Timeout(10).to_string(),
            "Directory request timed out after 10s"
        );
    }
}
