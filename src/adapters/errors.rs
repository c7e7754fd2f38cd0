//! Venue adapter error types
//!
//! All venue-related errors are wrapped in ExchangeError enum
//! which implements thiserror for consistent error handling.
//! These never escape a `VenueAdapter::fetch()` call: the adapter
//! logs them and yields an empty snapshot instead.

use thiserror::Error;

/// Venue-specific error types for adapter operations
#[derive(Error, Debug)]
pub enum ExchangeError {
    /// Connection to venue failed (DNS, refused, proxy, TLS)
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Network operation timed out
    #[error("Network timeout after {0}ms")]
    NetworkTimeout(u64),

    /// Venue answered with a non-success HTTP status
    #[error("HTTP {status} from {endpoint}")]
    HttpStatus { endpoint: String, status: u16 },

    /// Invalid or unexpected response from venue
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ExchangeError {
    /// Classify a reqwest transport error, keeping timeouts distinct.
    pub fn from_transport(err: reqwest::Error, timeout_ms: u64) -> Self {
        if err.is_timeout() {
            ExchangeError::NetworkTimeout(timeout_ms)
        } else {
            ExchangeError::ConnectionFailed(err.to_string())
        }
    }
}

/// Result type alias for venue operations
pub type ExchangeResult<T> = std::result::Result<T, ExchangeError>;
