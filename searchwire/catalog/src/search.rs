//! Search and point-in-time endpoints.

use searchwire::endpoint::Segment::{Literal, Param};
use searchwire::{BodyKind, EndpointDescriptor, JsonBody, PathVariant, RestMethod};
use serde::{Deserialize, Serialize};

pub static SEARCH: EndpointDescriptor = EndpointDescriptor {
    name: "search",
    description: "Returns search hits that match the query defined in the request.",
    docs_url: Some("https://www.elastic.co/guide/en/elasticsearch/reference/current/search-search.html"),
    variants: &[
        PathVariant::new(RestMethod::Post, &[Literal("_search")]),
        PathVariant::new(RestMethod::Post, &[Param("index"), Literal("_search")]),
    ],
    query: &[
        "allow_no_indices",
        "expand_wildcards",
        "from",
        "ignore_unavailable",
        "q",
        "routing",
        "scroll",
        "size",
        "sort",
        "track_total_hits",
    ],
    body: BodyKind::Optional,
};

pub static OPEN_POINT_IN_TIME: EndpointDescriptor = EndpointDescriptor {
    name: "open_point_in_time",
    description: "Opens a point in time that can be used in subsequent searches.",
    docs_url: Some("https://www.elastic.co/guide/en/elasticsearch/reference/current/point-in-time-api.html"),
    variants: &[PathVariant::new(
        RestMethod::Post,
        &[Param("index"), Literal("_pit")],
    )],
    query: &["keep_alive", "ignore_unavailable", "preference", "routing", "expand_wildcards"],
    body: BodyKind::None,
};

/// Closing a point in time sends its id in a `DELETE` body.
pub static CLOSE_POINT_IN_TIME: EndpointDescriptor = EndpointDescriptor {
    name: "close_point_in_time",
    description: "Closes a point in time.",
    docs_url: Some("https://www.elastic.co/guide/en/elasticsearch/reference/current/point-in-time-api.html"),
    variants: &[PathVariant::new(RestMethod::Delete, &[Literal("_pit")])],
    query: &[],
    body: BodyKind::Required,
};

/// Body of [`SEARCH`]. Query DSL clauses are raw JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sort: Vec<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggs: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pit: Option<PointInTimeReference>,
}

impl JsonBody for SearchRequest {
    const TYPE_NAME: &'static str = "Search request";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointInTimeReference {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep_alive: Option<String>,
}

/// Body of [`CLOSE_POINT_IN_TIME`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosePointInTimeRequest {
    pub id: String,
}

impl JsonBody for ClosePointInTimeRequest {
    const TYPE_NAME: &'static str = "ClosePointInTime request";
}
