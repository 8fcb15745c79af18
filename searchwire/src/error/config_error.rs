//! Descriptor and transport configuration errors.

use thiserror::Error;

use crate::endpoint_id::EndpointIdError;

/// Errors in endpoint descriptors or transport configuration.
///
/// These indicate programmer or deployment mistakes rather than runtime
/// conditions, and are raised before any request is built.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A required configuration field is missing.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// A configuration value could not be interpreted.
    #[error("Invalid value for {field}: {value}")]
    InvalidValue {
        /// The field being configured.
        field: &'static str,
        /// The rejected value.
        value: String,
    },

    /// A default header name or value is not valid on the wire.
    #[error("Invalid header: {name}")]
    InvalidHeader {
        /// The rejected header name.
        name: String,
    },

    /// The HTTP client could not be constructed.
    #[error("HTTP client construction failed: {0}")]
    Client(#[from] reqwest::Error),

    /// Endpoint identifier validation failed.
    #[error("Invalid endpoint ID: {0}")]
    InvalidEndpointId(#[from] EndpointIdError),

    /// A path template is malformed.
    #[error("Invalid path template for {endpoint}: {message}")]
    InvalidPathTemplate {
        /// The endpoint owning the template.
        endpoint: String,
        /// What is wrong with it.
        message: String,
    },

    /// Two path variants of one endpoint require the same parameter set.
    #[error("Ambiguous path variants for {endpoint}: parameter set [{}] appears more than once", .params.join(", "))]
    AmbiguousVariants {
        /// The endpoint owning the variants.
        endpoint: String,
        /// The duplicated parameter set, sorted.
        params: Vec<String>,
    },

    /// Two descriptors share an identifier.
    #[error("Duplicate endpoint ID: {id}")]
    DuplicateEndpoint {
        /// The duplicated identifier.
        id: String,
    },
}

impl ConfigError {
    /// Creates a missing field error.
    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    /// Creates an invalid path template error.
    pub fn invalid_path(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPathTemplate {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field() {
        let err = ConfigError::missing_field("SEARCHWIRE_URL");
        assert_eq!(err.to_string(), "Missing required field: SEARCHWIRE_URL");
    }

    #[test]
    fn invalid_url() {
        let url_err = url::Url::parse("not-a-url").unwrap_err();
        let err = ConfigError::InvalidUrl(url_err);
        assert!(err.to_string().contains("Invalid URL"));
    }

    #[test]
    fn invalid_path_template() {
        let err = ConfigError::invalid_path("ccr.unfollow", "empty literal segment");
        assert_eq!(
            err.to_string(),
            "Invalid path template for ccr.unfollow: empty literal segment"
        );
    }

    #[test]
    fn ambiguous_variants_lists_params() {
        let err = ConfigError::AmbiguousVariants {
            endpoint: "document.index".to_string(),
            params: vec!["id".to_string(), "index".to_string()],
        };
        assert!(err.to_string().contains("[id, index]"));
    }

    #[test]
    fn from_endpoint_id_error() {
        let err: ConfigError = EndpointIdError::Empty.into();
        assert!(matches!(err, ConfigError::InvalidEndpointId(EndpointIdError::Empty)));
    }
}
