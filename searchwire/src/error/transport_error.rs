//! Transport-level failures.

use thiserror::Error;

/// The transport could not obtain a response.
///
/// A response with a non-success status is *not* a transport error; it is
/// handed back to the caller as data.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The HTTP client failed (connect, TLS, protocol, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The request's cancellation token fired before a response arrived.
    #[error("request cancelled")]
    Cancelled,

    /// A header name or value cannot be sent on the wire.
    #[error("invalid header: {name}")]
    InvalidHeader {
        /// The offending header name.
        name: String,
    },

    /// The request target could not be joined with the base URL.
    #[error("invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Reading the response body failed.
    #[error("response body error: {0}")]
    Body(String),

    /// Failure reported by a custom transport implementation.
    #[error(transparent)]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

impl TransportError {
    /// Wraps an arbitrary error from a custom transport.
    pub fn other(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Other(err.into())
    }

    /// Returns `true` if a caller-side retry has a chance of succeeding.
    ///
    /// The engine never retries; this is a hint for callers that do.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Request(e) => e.is_timeout() || e.is_connect(),
            Self::Body(_) => true,
            Self::Cancelled | Self::InvalidHeader { .. } | Self::InvalidUrl(_) | Self::Other(_) => {
                false
            }
        }
    }

    /// Returns `true` if the failure came from the cancellation token.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
