//! Layered error types for the engine.
//!
//! - [`ApiError`] - Top-level error returned by dispatch operations
//! - [`BuildError`] - Request construction failures (path resolution, body serialization)
//! - [`TransportError`] - Failures to obtain a response at all
//! - [`ValidationError`] - Response and request-body decoding failures
//! - [`ConfigError`] - Descriptor and transport configuration errors

mod api_error;
mod build_error;
mod config_error;
mod transport_error;
mod validation_error;

pub use api_error::ApiError;
pub use build_error::BuildError;
pub use config_error::ConfigError;
pub use transport_error::TransportError;
pub use validation_error::ValidationError;
