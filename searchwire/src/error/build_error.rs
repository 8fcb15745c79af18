//! Request construction errors.

use thiserror::Error;

/// Errors raised while turning an endpoint configuration into a request.
///
/// Every variant is raised before anything reaches the transport.
#[derive(Debug, Error)]
pub enum BuildError {
    /// No path variant of the endpoint matches the supplied path parameters.
    #[error("cannot build path for {endpoint}, check for missing path parameters (supplied: [{}])", .supplied.join(", "))]
    PathResolution {
        /// Endpoint identity.
        endpoint: &'static str,
        /// Names of the path parameters that were set, sorted.
        supplied: Vec<String>,
    },

    /// A path parameter value would render as a `.` or `..` segment, which
    /// URL normalization collapses into a different path.
    #[error("path parameter {param} of {endpoint} cannot be {value:?}")]
    DotSegment {
        /// Endpoint identity.
        endpoint: &'static str,
        /// Name of the offending path parameter.
        param: &'static str,
        /// The rejected value, as supplied.
        value: String,
    },

    /// The structured payload could not be serialized to JSON.
    #[error("could not serialise request for {endpoint}")]
    Serialize {
        /// Endpoint identity.
        endpoint: &'static str,
        /// The underlying serializer error.
        #[source]
        source: serde_json::Error,
    },
}

impl BuildError {
    /// Returns the endpoint the failed build belonged to.
    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::PathResolution { endpoint, .. }
            | Self::DotSegment { endpoint, .. }
            | Self::Serialize { endpoint, .. } => *endpoint,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_resolution_display_lists_supplied_params() {
        let err = BuildError::PathResolution {
            endpoint: "ingest.get_pipeline",
            supplied: vec!["bogus".to_string(), "id".to_string()],
        };
        let display = err.to_string();
        assert!(display.contains("ingest.get_pipeline"));
        assert!(display.contains("[bogus, id]"));
        assert_eq!(err.endpoint(), "ingest.get_pipeline");
    }

    #[test]
    fn serialize_keeps_source() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = BuildError::Serialize {
            endpoint: "search.search",
            source: json_err,
        };
        assert_eq!(err.to_string(), "could not serialise request for search.search");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn dot_segment_names_param_and_value() {
        let err = BuildError::DotSegment {
            endpoint: "document.delete",
            param: "id",
            value: "..".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "path parameter id of document.delete cannot be \"..\""
        );
        assert_eq!(err.endpoint(), "document.delete");
    }
}
