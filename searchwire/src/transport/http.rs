//! `reqwest` backed transport.

use std::time::Duration;

use futures::StreamExt;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::{debug, trace};
use url::Url;

use super::{HttpResponse, ResponseBody, Transport};
use crate::auth::Credentials;
use crate::error::{ConfigError, TransportError};
use crate::params::Headers;
use crate::request::HttpRequest;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

const ENV_URL: &str = "SEARCHWIRE_URL";
const ENV_API_KEY: &str = "SEARCHWIRE_API_KEY";
const ENV_USERNAME: &str = "SEARCHWIRE_USERNAME";
const ENV_PASSWORD: &str = "SEARCHWIRE_PASSWORD";
const ENV_TIMEOUT_SECS: &str = "SEARCHWIRE_TIMEOUT_SECS";

/// Builder for a [`ReqwestTransport`].
#[derive(Debug)]
pub struct ReqwestTransportBuilder {
    base_url: Url,
    timeout: Duration,
    default_headers: HeaderMap,
    credentials: Credentials,
}

impl ReqwestTransportBuilder {
    fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            default_headers: HeaderMap::new(),
            credentials: Credentials::None,
        }
    }

    /// Sets the overall request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Adds a header sent with every request.
    ///
    /// ## Examples
    ///
    /// ```rust,ignore
    /// let transport = ReqwestTransport::builder(base_url)
    ///     .default_header("X-Opaque-Id", "nightly-reindex")?
    ///     .build()?;
    /// ```
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::InvalidHeader`] if the name or value is not
    /// valid on the wire.
    pub fn default_header(
        mut self,
        name: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidHeader {
            name: name.as_ref().to_string(),
        };
        let header_name = HeaderName::try_from(name.as_ref()).map_err(|_| invalid())?;
        let header_value = HeaderValue::try_from(value.as_ref()).map_err(|_| invalid())?;
        self.default_headers.insert(header_name, header_value);
        Ok(self)
    }

    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    /// Builds the transport.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::Client`] if the HTTP client cannot be constructed.
    pub fn build(self) -> Result<ReqwestTransport, ConfigError> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .default_headers(self.default_headers)
            .pool_max_idle_per_host(10)
            .build()?;

        Ok(ReqwestTransport {
            client,
            base_url: self.base_url,
            credentials: self.credentials,
        })
    }
}

/// A [`Transport`] over a pooled `reqwest::Client`.
///
/// Request paths are appended to the base URL, so a base such as
/// `https://proxy.internal/search` keeps its `/search` prefix.
///
/// ## Examples
///
/// ```rust,ignore
/// use searchwire::{Credentials, ReqwestTransport};
/// use url::Url;
///
/// let transport = ReqwestTransport::builder(Url::parse("https://localhost:9200")?)
///     .credentials(Credentials::ApiKey(api_key))
///     .build()?;
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: Url,
    credentials: Credentials,
}

impl ReqwestTransport {
    pub fn builder(base_url: Url) -> ReqwestTransportBuilder {
        ReqwestTransportBuilder::new(base_url)
    }

    /// Creates a transport with default settings and no credentials.
    ///
    /// ## Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(base_url: Url) -> Result<Self, ConfigError> {
        Self::builder(base_url).build()
    }

    /// Configures a transport from `SEARCHWIRE_*` environment variables.
    ///
    /// - `SEARCHWIRE_URL` (required)
    /// - `SEARCHWIRE_API_KEY`, else `SEARCHWIRE_USERNAME` with `SEARCHWIRE_PASSWORD`
    /// - `SEARCHWIRE_TIMEOUT_SECS`
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::MissingField`] when the URL is unset, or when a
    /// username is given without a password.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) but reads variables through `lookup`.
    pub fn from_env_with<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let url = lookup(ENV_URL).ok_or_else(|| ConfigError::missing_field(ENV_URL))?;
        let mut builder = Self::builder(Url::parse(&url)?);

        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            let parsed = secs.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                field: ENV_TIMEOUT_SECS,
                value: secs.clone(),
            })?;
            builder = builder.timeout(Duration::from_secs(parsed));
        }

        let credentials = match (lookup(ENV_API_KEY), lookup(ENV_USERNAME)) {
            (Some(key), _) => Credentials::ApiKey(key),
            (None, Some(username)) => {
                let password =
                    lookup(ENV_PASSWORD).ok_or_else(|| ConfigError::missing_field(ENV_PASSWORD))?;
                Credentials::basic(username, password)
            }
            (None, None) => Credentials::None,
        };

        builder.credentials(credentials).build()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    fn to_reqwest(&self, request: HttpRequest) -> Result<reqwest::RequestBuilder, TransportError> {
        let url = request.url(&self.base_url)?;
        let mut builder = self.client.request(request.method.to_reqwest(), url);

        // Caller supplied Authorization overrides configured credentials.
        if !request.headers.contains("Authorization") {
            builder = self.credentials.apply(builder);
        }

        for (name, value) in request.headers.iter() {
            let invalid = || TransportError::InvalidHeader {
                name: name.to_string(),
            };
            let header_name = HeaderName::try_from(name).map_err(|_| invalid())?;
            let header_value = HeaderValue::try_from(value).map_err(|_| invalid())?;
            builder = builder.header(header_name, header_value);
        }

        if !request.body.is_empty() {
            builder = builder.body(request.body);
        }

        Ok(builder)
    }
}

impl Transport for ReqwestTransport {
    async fn perform(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        debug!(
            endpoint = request.endpoint,
            method = %request.method,
            target = %request.path_and_query(),
            body_len = request.body.len(),
            "sending request"
        );

        let cancellation = request.cancellation.clone();
        let send = self.to_reqwest(request)?.send();

        let response = match cancellation {
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => return Err(TransportError::Cancelled),
                response = send => response?,
            },
            None => send.await?,
        };

        let status = response.status().as_u16();
        trace!(status, "response received");

        let headers: Headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();

        let body = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(TransportError::Request))
            .boxed();

        Ok(HttpResponse::new(status, headers, ResponseBody::from_stream(body)))
    }
}
