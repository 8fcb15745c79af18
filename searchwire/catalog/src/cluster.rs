//! Cluster-level endpoints.

use searchwire::endpoint::Segment::{Literal, Param};
use searchwire::{BodyKind, EndpointDescriptor, PathVariant, RestMethod};

/// `GET /`: cluster name and version.
pub static INFO: EndpointDescriptor = EndpointDescriptor {
    name: "info",
    description: "Returns basic information about the cluster.",
    docs_url: Some("https://www.elastic.co/guide/en/elasticsearch/reference/current/index.html"),
    variants: &[PathVariant::new(RestMethod::Get, &[])],
    query: &[],
    body: BodyKind::None,
};

pub static HEALTH: EndpointDescriptor = EndpointDescriptor {
    name: "cluster.health",
    description: "Returns the health status of a cluster.",
    docs_url: Some("https://www.elastic.co/guide/en/elasticsearch/reference/current/cluster-health.html"),
    variants: &[
        PathVariant::new(RestMethod::Get, &[Literal("_cluster"), Literal("health")]),
        PathVariant::new(
            RestMethod::Get,
            &[Literal("_cluster"), Literal("health"), Param("index")],
        ),
    ],
    query: &[
        "expand_wildcards",
        "level",
        "local",
        "master_timeout",
        "timeout",
        "wait_for_active_shards",
        "wait_for_status",
    ],
    body: BodyKind::None,
};
