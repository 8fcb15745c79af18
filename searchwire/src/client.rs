//! Endpoint factory sharing one transport.

use std::sync::Arc;

use url::Url;

use crate::endpoint::EndpointDescriptor;
use crate::error::ConfigError;
use crate::request::EndpointRequest;
use crate::transport::ReqwestTransport;

/// Creates [`EndpointRequest`]s that dispatch through a shared transport.
///
/// Cloning a client is cheap and every clone uses the same transport.
///
/// ## Examples
///
/// ```rust,ignore
/// use searchwire::Client;
/// use searchwire_catalog::ingest::GET_PIPELINE;
///
/// let client = Client::connect("http://localhost:9200".parse()?)?;
///
/// let mut get = client.endpoint(&GET_PIPELINE);
/// get.path_param("id", "logs-default");
/// let found = get.is_success().await?;
/// ```
#[derive(Debug)]
pub struct Client<T> {
    transport: Arc<T>,
}

impl<T> Client<T> {
    pub fn new(transport: T) -> Self {
        Self::from_shared(Arc::new(transport))
    }

    pub fn from_shared(transport: Arc<T>) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &Arc<T> {
        &self.transport
    }

    /// Starts a fresh configuration for `descriptor`.
    pub fn endpoint(&self, descriptor: &'static EndpointDescriptor) -> EndpointRequest<T> {
        EndpointRequest::new(Arc::clone(&self.transport), descriptor)
    }
}

impl<T> Clone for Client<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
        }
    }
}

impl Client<ReqwestTransport> {
    /// Client over a default [`ReqwestTransport`] without credentials.
    ///
    /// ## Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn connect(base_url: Url) -> Result<Self, ConfigError> {
        Ok(Self::new(ReqwestTransport::new(base_url)?))
    }

    /// Client over a transport configured by [`ReqwestTransport::from_env`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(ReqwestTransport::from_env()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::{BodyKind, PathVariant};
    use crate::method::RestMethod;

    static INFO: EndpointDescriptor = EndpointDescriptor {
        name: "info",
        description: "Cluster information",
        docs_url: None,
        variants: &[PathVariant::new(RestMethod::Get, &[])],
        query: &[],
        body: BodyKind::None,
    };

    #[test]
    fn endpoints_share_the_transport() {
        let client = Client::new(());
        let clone = client.clone();
        let _a = client.endpoint(&INFO);
        let _b = clone.endpoint(&INFO);
        assert_eq!(Arc::strong_count(client.transport()), 4);
    }

    #[test]
    fn each_endpoint_call_starts_fresh() {
        let client = Client::new(());
        let mut first = client.endpoint(&INFO);
        first.header("X-Opaque-Id", "one");
        let second = client.endpoint(&INFO);
        assert!(second.headers().is_empty());
        assert_eq!(second.build().unwrap().path, "/");
        assert_eq!(second.descriptor().name, "info");
    }

    #[test]
    fn connect_builds_reqwest_client() {
        let client = Client::connect(Url::parse("http://localhost:9200").unwrap()).unwrap();
        assert_eq!(client.transport().base_url().as_str(), "http://localhost:9200/");
    }
}
