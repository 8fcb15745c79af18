//! Request construction and dispatch for a search engine's REST API.
//!
//! Endpoints are data: each [`EndpointDescriptor`] is a closed table of path
//! variants (URL template plus HTTP method). One generic engine turns a
//! per-call [`EndpointRequest`] into a wire request and dispatches it through
//! a pluggable [`Transport`].
//!
//! ## Features
//!
//! - **Exact-match path resolution**: the variant whose parameters equal the
//!   supplied set is chosen, with values percent-escaped
//! - **Body precedence**: a raw override always beats a structured payload
//! - **Content negotiation**: versioned `Accept`/`Content-Type` unless set by the caller
//! - **Pluggable transport**: `reqwest` implementation included, with credentials,
//!   timeouts and cancellation
//! - **Result reduction**: `is_success()` for acknowledgement-only endpoints,
//!   `send::<F>()` for typed decoding
//!
//! ## Example
//!
//! ```rust,ignore
//! use searchwire::Client;
//! use searchwire_catalog::document::GET;
//!
//! let client = Client::from_env()?;
//!
//! let mut get = client.endpoint(&GET);
//! get.path_param("index", "logs").path_param("id", "1");
//! let response = get.perform().await?;
//! println!("status {}", response.status());
//! ```

pub mod auth;
pub mod body;
pub mod client;
pub mod endpoint;
pub mod endpoint_id;
pub mod error;
pub mod method;
pub mod negotiate;
pub mod params;
pub mod request;
pub mod response;
pub mod transport;

pub use auth::Credentials;
pub use body::JsonBody;
pub use client::Client;
pub use endpoint::{BodyKind, EndpointDescriptor, PathVariant, ResolvedPath, Segment};
pub use endpoint_id::{EndpointId, EndpointIdError};
pub use error::{ApiError, BuildError, ConfigError, TransportError, ValidationError};
pub use method::RestMethod;
pub use negotiate::COMPATIBLE_MEDIA_TYPE;
pub use params::{Headers, ParamSet, QueryParams, QueryValue};
pub use request::{EndpointRequest, HttpRequest};
pub use response::ResponseFormat;
pub use transport::{HttpResponse, ReqwestTransport, ReqwestTransportBuilder, ResponseBody, Transport};

pub use tokio_util::sync::CancellationToken;
