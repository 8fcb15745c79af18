//! The transport boundary.
//!
//! The engine hands a fully resolved [`HttpRequest`] to a [`Transport`] and
//! gets back an [`HttpResponse`] or a [`TransportError`]. Retries, pooling,
//! node selection and TLS all live behind this trait.

mod http;

use std::fmt;
use std::future::Future;

use bytes::{Bytes, BytesMut};
use futures::stream::BoxStream;
use futures::StreamExt;

use crate::error::TransportError;
use crate::params::Headers;
use crate::request::HttpRequest;

pub use http::{ReqwestTransport, ReqwestTransportBuilder};

/// Performs one HTTP request.
///
/// Implementations must be safe to share between tasks: many endpoint
/// requests dispatch through the same transport concurrently.
///
/// When `request.cancellation` is set, an implementation should abort the
/// in-flight operation once the token fires and return
/// [`TransportError::Cancelled`].
pub trait Transport: Send + Sync {
    fn perform(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;
}

/// Returns `true` for statuses in `[200, 300)`.
pub fn status_is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// A response obtained from a transport.
///
/// The body is owned by the response and released when it is drained or
/// dropped.
#[derive(Debug)]
pub struct HttpResponse {
    status: u16,
    headers: Headers,
    body: ResponseBody,
}

impl HttpResponse {
    pub fn new(status: u16, headers: Headers, body: ResponseBody) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn is_success(&self) -> bool {
        status_is_success(self.status)
    }

    pub fn body_mut(&mut self) -> &mut ResponseBody {
        &mut self.body
    }

    pub fn into_body(self) -> ResponseBody {
        self.body
    }
}

/// A response body, either already in memory or still on the wire.
pub enum ResponseBody {
    Buffered(Option<Bytes>),
    Streaming(BoxStream<'static, Result<Bytes, TransportError>>),
}

impl ResponseBody {
    pub fn empty() -> Self {
        Self::Buffered(None)
    }

    pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
        Self::Buffered(Some(bytes.into()))
    }

    pub fn from_stream(stream: BoxStream<'static, Result<Bytes, TransportError>>) -> Self {
        Self::Streaming(stream)
    }

    /// Reads the next chunk, or `None` once the body is exhausted.
    pub async fn chunk(&mut self) -> Result<Option<Bytes>, TransportError> {
        match self {
            Self::Buffered(bytes) => Ok(bytes.take().filter(|b| !b.is_empty())),
            Self::Streaming(stream) => stream.next().await.transpose(),
        }
    }

    /// Collects the remaining body into memory.
    pub async fn bytes(mut self) -> Result<Bytes, TransportError> {
        if let Self::Buffered(bytes) = &mut self {
            return Ok(bytes.take().unwrap_or_default());
        }

        let mut buf = BytesMut::new();
        while let Some(chunk) = self.chunk().await? {
            buf.extend_from_slice(&chunk);
        }
        Ok(buf.freeze())
    }

    /// Reads and discards the remaining body, returning the byte count.
    pub async fn drain(&mut self) -> Result<u64, TransportError> {
        let mut total = 0u64;
        while let Some(chunk) = self.chunk().await? {
            total += chunk.len() as u64;
        }
        Ok(total)
    }
}

impl fmt::Debug for ResponseBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buffered(bytes) => f
                .debug_tuple("Buffered")
                .field(&bytes.as_ref().map(Bytes::len))
                .finish(),
            Self::Streaming(_) => f.write_str("Streaming(..)"),
        }
    }
}
