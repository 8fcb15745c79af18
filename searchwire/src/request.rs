//! Per-call endpoint configuration, request construction and dispatch.
//!
//! An [`EndpointRequest`] accumulates path parameters, query values, headers
//! and a body for one [`EndpointDescriptor`]. Every call to
//! [`build`](EndpointRequest::build) resolves a fresh [`HttpRequest`] from the
//! current state:
//!
//! 1. the path variant matching exactly the supplied path parameters,
//!    with escaped values and the encoded query string,
//! 2. the body (raw override, else serialized payload, else empty),
//! 3. content negotiation headers the caller did not set.
//!
//! Dispatch hands the request to the [`Transport`]. A non-2xx status is
//! returned as data by [`perform`](EndpointRequest::perform) and reduced to
//! `false` by [`is_success`](EndpointRequest::is_success).

use std::fmt;
use std::sync::Arc;

use bytes::{Bytes, BytesMut};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, Span};
use url::Url;

use crate::body::{RequestBody, StructuredBody};
use crate::endpoint::EndpointDescriptor;
use crate::error::{ApiError, BuildError};
use crate::method::RestMethod;
use crate::negotiate::negotiate;
use crate::params::{Headers, ParamSet, QueryParams, QueryValue};
use crate::response::ResponseFormat;
use crate::transport::{status_is_success, HttpResponse, Transport};

/// A fully resolved request, ready for a transport.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// Identity of the endpoint that built this request.
    pub endpoint: &'static str,
    pub method: RestMethod,
    /// Absolute path with escaped parameter values, always starting with `/`.
    pub path: String,
    /// Encoded query string without the leading `?`; empty when there is none.
    pub query: String,
    pub headers: Headers,
    pub body: Bytes,
    pub cancellation: Option<CancellationToken>,
}

impl HttpRequest {
    /// The request target, e.g. `/logs/_search?size=10`.
    pub fn path_and_query(&self) -> String {
        if self.query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.query)
        }
    }

    /// Appends the request target to `base`, keeping any path prefix of `base`.
    ///
    /// ## Errors
    ///
    /// Returns an error if the joined string is not a valid URL.
    pub fn url(&self, base: &Url) -> Result<Url, url::ParseError> {
        let prefix = base.as_str().trim_end_matches('/');
        Url::parse(&format!("{prefix}{}", self.path_and_query()))
    }

    pub fn has_body(&self) -> bool {
        !self.body.is_empty()
    }
}

/// Configuration for a single call to one endpoint.
///
/// Setters record a value and return `&mut Self` so calls can be chained in
/// any order. Setting the same key twice keeps the last value. Nothing is
/// validated until [`build`](Self::build).
///
/// An instance is not meant to be mutated from several tasks at once; clone
/// it, or create one per call through [`Client::endpoint`](crate::Client::endpoint).
///
/// ## Examples
///
/// ```rust,ignore
/// use searchwire::response::JsonFormat;
///
/// let mut search = client.endpoint(&searchwire_catalog::search::SEARCH);
/// search
///     .path_param("index", "logs-*")
///     .query("size", 10)
///     .body(serde_json::json!({ "query": { "match_all": {} } }));
///
/// let hits: serde_json::Value = search.send::<JsonFormat<_>>().await?;
/// ```
pub struct EndpointRequest<T> {
    transport: Arc<T>,
    descriptor: &'static EndpointDescriptor,
    params: ParamSet,
    query: QueryParams,
    headers: Headers,
    body: RequestBody,
    cancellation: Option<CancellationToken>,
}

impl<T> EndpointRequest<T> {
    pub fn new(transport: Arc<T>, descriptor: &'static EndpointDescriptor) -> Self {
        Self {
            transport,
            descriptor,
            params: ParamSet::new(),
            query: QueryParams::new(),
            headers: Headers::new(),
            body: RequestBody::new(),
            cancellation: None,
        }
    }

    pub fn descriptor(&self) -> &'static EndpointDescriptor {
        self.descriptor
    }

    pub fn params(&self) -> &ParamSet {
        &self.params
    }

    pub fn query_params(&self) -> &QueryParams {
        &self.query
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn request_body(&self) -> &RequestBody {
        &self.body
    }

    /// Supplies a path parameter. The value is escaped when the path is built.
    pub fn path_param(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.params.set(name, value);
        self
    }

    /// Sets a query parameter.
    pub fn query(&mut self, name: impl Into<String>, value: impl QueryValue) -> &mut Self {
        self.query.set(name, value);
        self
    }

    /// Sets a request header. Negotiated headers never replace it.
    pub fn header(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.headers.set(name, value);
        self
    }

    /// Sets a raw body sent verbatim. It takes precedence over [`body`](Self::body).
    pub fn raw(&mut self, raw: impl Into<Bytes>) -> &mut Self {
        self.body.set_raw(raw);
        self
    }

    /// Sets a structured body, serialized to JSON when the request is built.
    pub fn body<B>(&mut self, body: B) -> &mut Self
    where
        B: Serialize + Send + Sync + 'static,
    {
        self.body.set_structured(StructuredBody::new(body));
        self
    }

    /// Attaches a cancellation token passed through to the transport.
    pub fn cancellation(&mut self, token: CancellationToken) -> &mut Self {
        self.cancellation = Some(token);
        self
    }

    /// Resolves the current configuration into an [`HttpRequest`].
    ///
    /// ## Errors
    ///
    /// - [`BuildError::PathResolution`] if no path variant matches the
    ///   supplied path parameters
    /// - [`BuildError::Serialize`] if the structured body fails to serialize
    pub fn build(&self) -> Result<HttpRequest, BuildError> {
        let resolved = self.descriptor.resolve(&self.params)?;
        let body = self.body.resolve(self.descriptor.name)?;

        let mut headers = self.headers.clone();
        negotiate(&mut headers, &body);

        Ok(HttpRequest {
            endpoint: self.descriptor.name,
            method: resolved.method,
            path: resolved.path,
            query: self.query.encode(),
            headers,
            body,
            cancellation: self.cancellation.clone(),
        })
    }
}

fn otel_status(status: u16) -> &'static str {
    if status_is_success(status) {
        "OK"
    } else if status >= 500 {
        "ERROR"
    } else {
        "UNSET"
    }
}

impl<T: Transport> EndpointRequest<T> {
    /// Builds the request and dispatches it through the transport.
    ///
    /// Any status code is a successful outcome here; inspect
    /// [`HttpResponse::status`]. The response body is released when the
    /// response is drained or dropped.
    ///
    /// ## Errors
    ///
    /// - [`ApiError::Build`] if the request cannot be built (nothing is sent)
    /// - [`ApiError::Dispatch`] if the transport fails, tagged with the endpoint
    #[instrument(
        name = "api_request",
        skip(self),
        fields(
            endpoint = self.descriptor.name,
            http.method = tracing::field::Empty,
            http.url = tracing::field::Empty,
            http.status_code = tracing::field::Empty,
            otel.kind = "client",
            otel.status_code = tracing::field::Empty,
        )
    )]
    pub async fn perform(&self) -> Result<HttpResponse, ApiError> {
        let request = self.build()?;

        let span = Span::current();
        span.record("http.method", request.method.as_str());
        span.record("http.url", request.path_and_query().as_str());

        match self.transport.perform(request).await {
            Ok(response) => {
                let status = response.status();
                span.record("http.status_code", status);
                span.record("otel.status_code", otel_status(status));
                debug!(status, "response received");
                Ok(response)
            }
            Err(source) => {
                span.record("otel.status_code", "ERROR");
                debug!(error = %source, "transport failed");
                Err(ApiError::Dispatch {
                    endpoint: self.descriptor.name,
                    source,
                })
            }
        }
    }

    /// Dispatches the request and reports whether the status was 2xx.
    ///
    /// The response body is always drained. A non-2xx status yields
    /// `Ok(false)`, never an error.
    ///
    /// ## Errors
    ///
    /// - [`ApiError::Build`] / [`ApiError::Dispatch`] as for [`perform`](Self::perform)
    /// - [`ApiError::Release`] if draining the body fails
    pub async fn is_success(&self) -> Result<bool, ApiError> {
        let mut response = self.perform().await?;
        let success = response.is_success();

        response
            .body_mut()
            .drain()
            .await
            .map_err(|source| ApiError::Release {
                endpoint: self.descriptor.name,
                source,
            })?;

        Ok(success)
    }

    /// Dispatches the request and decodes a 2xx body with `F`.
    ///
    /// ## Errors
    ///
    /// - [`ApiError::Build`] / [`ApiError::Dispatch`] as for [`perform`](Self::perform)
    /// - [`ApiError::Status`] for a non-2xx status, carrying whatever response
    ///   text could be read before the body ended or failed
    /// - [`ApiError::Dispatch`] if a 2xx body cannot be read
    /// - [`ApiError::Decode`] if `F` rejects the body
    pub async fn send<F: ResponseFormat>(&self) -> Result<F::Output, ApiError> {
        let endpoint = self.descriptor.name;
        let response = self.perform().await?;
        let status = response.status();
        let mut body = response.into_body();

        if !status_is_success(status) {
            let mut text = BytesMut::new();
            loop {
                match body.chunk().await {
                    Ok(Some(chunk)) => text.extend_from_slice(&chunk),
                    Ok(None) => break,
                    Err(error) => {
                        debug!(%error, status, "error response body cut short");
                        break;
                    }
                }
            }
            return Err(ApiError::Status {
                endpoint,
                status,
                body: String::from_utf8_lossy(&text).into_owned(),
            });
        }

        let body = body
            .bytes()
            .await
            .map_err(|source| ApiError::Dispatch { endpoint, source })?;
        Ok(F::parse(body).await?)
    }
}

impl<T> Clone for EndpointRequest<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            descriptor: self.descriptor,
            params: self.params.clone(),
            query: self.query.clone(),
            headers: self.headers.clone(),
            body: self.body.clone(),
            cancellation: self.cancellation.clone(),
        }
    }
}

impl<T> fmt::Debug for EndpointRequest<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EndpointRequest")
            .field("endpoint", &self.descriptor.name)
            .field("params", &self.params)
            .field("query", &self.query)
            .field("headers", &self.headers)
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}
