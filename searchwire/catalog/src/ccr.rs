//! Cross-cluster replication.

use searchwire::endpoint::Segment::{Literal, Param};
use searchwire::{BodyKind, EndpointDescriptor, PathVariant, RestMethod};

/// Turns a follower index into a regular index. The follower must be paused
/// and closed first.
pub static UNFOLLOW: EndpointDescriptor = EndpointDescriptor {
    name: "ccr.unfollow",
    description: "Stops the following task associated with a follower index.",
    docs_url: Some("https://www.elastic.co/guide/en/elasticsearch/reference/current/ccr-post-unfollow.html"),
    variants: &[PathVariant::new(
        RestMethod::Post,
        &[Param("index"), Literal("_ccr"), Literal("unfollow")],
    )],
    query: &[],
    body: BodyKind::None,
};
