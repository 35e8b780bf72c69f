//! Error types for search orchestration.

use thiserror::Error;

/// Errors that can occur while resolving a metadata fetch.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SearchError {
    /// The service answered with a negative result indicator.
    ///
    /// This is a valid response (zero matches or an invalid query), not a
    /// transport failure; `message` carries the service-supplied text.
    #[error("No matches: {message}")]
    NoMatches {
        /// Service-supplied error text
        message: String,
    },

    /// Network communication failed before a usable response arrived.
    #[error("Network error: {reason}")]
    Network {
        /// The reason for the network failure
        reason: String,
    },

    /// The response arrived but could not be decoded.
    #[error("Parse error: {reason}")]
    Parse {
        /// The reason for the parse failure
        reason: String,
    },

    /// The fetch did not settle within the configured deadline.
    #[error("Request timed out after {seconds}s")]
    Timeout {
        /// Deadline that elapsed
        seconds: u64,
    },

    /// The query controller actor is no longer running.
    #[error("Query controller has shut down")]
    ControllerShutdown,
}

impl SearchError {
    /// Returns a user-facing message suitable for the error banner.
    ///
    /// Transport-class failures collapse into one generic message; a
    /// negative result keeps the service's own text.
    pub fn user_message(&self) -> String {
        match self {
            SearchError::NoMatches { message } => message.clone(),
            SearchError::Network { .. }
            | SearchError::Parse { .. }
            | SearchError::Timeout { .. }
            | SearchError::ControllerShutdown => "Failed to fetch movies".to_string(),
        }
    }

    /// Default message for a negative result that carried no error text.
    pub fn no_results() -> Self {
        SearchError::NoMatches {
            message: "No results found".to_string(),
        }
    }
}
