//! Top-level error type.

use super::{BuildError, ConfigError, TransportError, ValidationError};
use thiserror::Error;

/// Top-level error for endpoint operations.
///
/// A non-success HTTP status is never reported here by
/// [`perform`](crate::EndpointRequest::perform) or
/// [`is_success`](crate::EndpointRequest::is_success); only the typed
/// [`send`](crate::EndpointRequest::send) path turns it into [`ApiError::Status`].
///
/// ## Examples
///
/// ```rust,ignore
/// use searchwire::ApiError;
///
/// match request.perform().await {
///     Ok(response) => println!("status {}", response.status()),
///     Err(ApiError::Build(e)) => eprintln!("request never sent: {e}"),
///     Err(ApiError::Dispatch { endpoint, source }) => eprintln!("{endpoint}: {source}"),
///     Err(other) => eprintln!("{other}"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not be built; nothing was sent.
    #[error(transparent)]
    Build(#[from] BuildError),

    /// The transport failed to obtain a response.
    #[error("an error happened during the {endpoint} query execution")]
    Dispatch {
        /// Endpoint identity.
        endpoint: &'static str,
        /// The transport failure.
        #[source]
        source: TransportError,
    },

    /// Draining or closing the response body failed.
    #[error("could not release the {endpoint} response body")]
    Release {
        /// Endpoint identity.
        endpoint: &'static str,
        /// The body read failure.
        #[source]
        source: TransportError,
    },

    /// Non-success status on the typed decoding path.
    #[error("{endpoint} returned HTTP {status}: {body}")]
    Status {
        /// Endpoint identity.
        endpoint: &'static str,
        /// The HTTP status code.
        status: u16,
        /// Response text, lossily decoded.
        body: String,
    },

    /// The response body did not decode into the requested format.
    #[error(transparent)]
    Decode(#[from] ValidationError),

    /// Configuration error.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ApiError {
    /// Returns the endpoint identity attached to this error, if any.
    pub fn endpoint(&self) -> Option<&'static str> {
        match self {
            Self::Build(e) => Some(e.endpoint()),
            Self::Dispatch { endpoint, .. }
            | Self::Release { endpoint, .. }
            | Self::Status { endpoint, .. } => Some(*endpoint),
            Self::Decode(_) | Self::Config(_) => None,
        }
    }

    /// Returns the transport failure, if this error wraps one.
    pub fn transport_error(&self) -> Option<&TransportError> {
        match self {
            Self::Dispatch { source, .. } | Self::Release { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Returns the HTTP status for [`ApiError::Status`].
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
