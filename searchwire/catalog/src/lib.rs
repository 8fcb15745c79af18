//! Endpoint descriptors for the searchwire engine.
//!
//! Each endpoint is a `static` [`EndpointDescriptor`]; request-body types
//! live next to the endpoints that take them. Descriptors are grouped by API
//! namespace.
//!
//! ```rust,ignore
//! use searchwire::Client;
//! use searchwire_catalog::ccr::UNFOLLOW;
//!
//! let mut unfollow = client.endpoint(&UNFOLLOW);
//! unfollow.path_param("index", "follower-logs");
//! let done = unfollow.is_success().await?;
//! ```

use std::collections::BTreeSet;

use searchwire::{ConfigError, EndpointDescriptor};

pub mod ccr;
pub mod cluster;
pub mod document;
pub mod indices;
pub mod ingest;
pub mod ml;
pub mod search;

static ALL: &[&EndpointDescriptor] = &[
    &ccr::UNFOLLOW,
    &cluster::HEALTH,
    &cluster::INFO,
    &document::DELETE,
    &document::GET,
    &document::INDEX,
    &indices::EXISTS,
    &indices::PUT_TEMPLATE,
    &ingest::DELETE_PIPELINE,
    &ingest::GET_PIPELINE,
    &ingest::PUT_PIPELINE,
    &ml::REVERT_MODEL_SNAPSHOT,
    &search::CLOSE_POINT_IN_TIME,
    &search::OPEN_POINT_IN_TIME,
    &search::SEARCH,
];

/// Every descriptor in the catalog.
pub fn all() -> &'static [&'static EndpointDescriptor] {
    ALL
}

/// Looks up a descriptor by its dotted name, e.g. `ingest.get_pipeline`.
pub fn find(name: &str) -> Option<&'static EndpointDescriptor> {
    ALL.iter().copied().find(|descriptor| descriptor.name == name)
}

/// Validates every descriptor and checks that names are unique.
///
/// ## Errors
///
/// Returns the first malformed descriptor's error, or
/// [`ConfigError::DuplicateEndpoint`] for a repeated name.
pub fn validate_all() -> Result<(), ConfigError> {
    let mut seen = BTreeSet::new();
    for descriptor in ALL {
        descriptor.validate()?;
        if !seen.insert(descriptor.name) {
            return Err(ConfigError::DuplicateEndpoint {
                id: descriptor.name.to_string(),
            });
        }
    }
    Ok(())
}
