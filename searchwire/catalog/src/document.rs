//! Single-document APIs.

use searchwire::endpoint::Segment::{Literal, Param};
use searchwire::{BodyKind, EndpointDescriptor, PathVariant, RestMethod};

pub static GET: EndpointDescriptor = EndpointDescriptor {
    name: "get",
    description: "Returns a document.",
    docs_url: Some("https://www.elastic.co/guide/en/elasticsearch/reference/current/docs-get.html"),
    variants: &[PathVariant::new(
        RestMethod::Get,
        &[Param("index"), Literal("_doc"), Param("id")],
    )],
    query: &["preference", "realtime", "refresh", "routing", "_source", "version"],
    body: BodyKind::None,
};

/// Indexes a document. With an `id` the document is created or replaced
/// (`PUT`); without one an id is generated (`POST`).
pub static INDEX: EndpointDescriptor = EndpointDescriptor {
    name: "index",
    description: "Creates or updates a document in an index.",
    docs_url: Some("https://www.elastic.co/guide/en/elasticsearch/reference/current/docs-index_.html"),
    variants: &[
        PathVariant::new(
            RestMethod::Put,
            &[Param("index"), Literal("_doc"), Param("id")],
        ),
        PathVariant::new(RestMethod::Post, &[Param("index"), Literal("_doc")]),
    ],
    query: &["if_primary_term", "if_seq_no", "op_type", "pipeline", "refresh", "routing", "timeout"],
    body: BodyKind::Required,
};

pub static DELETE: EndpointDescriptor = EndpointDescriptor {
    name: "delete",
    description: "Removes a document from an index.",
    docs_url: Some("https://www.elastic.co/guide/en/elasticsearch/reference/current/docs-delete.html"),
    variants: &[PathVariant::new(
        RestMethod::Delete,
        &[Param("index"), Literal("_doc"), Param("id")],
    )],
    query: &["if_primary_term", "if_seq_no", "refresh", "routing", "timeout"],
    body: BodyKind::None,
};
