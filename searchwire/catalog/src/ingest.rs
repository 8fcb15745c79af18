//! Ingest pipeline management.

use searchwire::endpoint::Segment::{Literal, Param};
use searchwire::{BodyKind, EndpointDescriptor, JsonBody, PathVariant, RestMethod};
use serde::{Deserialize, Serialize};

/// Returns one pipeline, or all pipelines when no `id` is given.
pub static GET_PIPELINE: EndpointDescriptor = EndpointDescriptor {
    name: "ingest.get_pipeline",
    description: "Returns information about one or more ingest pipelines.",
    docs_url: Some("https://www.elastic.co/guide/en/elasticsearch/reference/current/get-pipeline-api.html"),
    variants: &[
        PathVariant::new(RestMethod::Get, &[Literal("_ingest"), Literal("pipeline")]),
        PathVariant::new(
            RestMethod::Get,
            &[Literal("_ingest"), Literal("pipeline"), Param("id")],
        ),
    ],
    query: &["master_timeout", "summary"],
    body: BodyKind::None,
};

pub static PUT_PIPELINE: EndpointDescriptor = EndpointDescriptor {
    name: "ingest.put_pipeline",
    description: "Creates or updates an ingest pipeline.",
    docs_url: Some("https://www.elastic.co/guide/en/elasticsearch/reference/current/put-pipeline-api.html"),
    variants: &[PathVariant::new(
        RestMethod::Put,
        &[Literal("_ingest"), Literal("pipeline"), Param("id")],
    )],
    query: &["master_timeout", "timeout", "if_version"],
    body: BodyKind::Required,
};

pub static DELETE_PIPELINE: EndpointDescriptor = EndpointDescriptor {
    name: "ingest.delete_pipeline",
    description: "Deletes one or more ingest pipelines.",
    docs_url: Some("https://www.elastic.co/guide/en/elasticsearch/reference/current/delete-pipeline-api.html"),
    variants: &[PathVariant::new(
        RestMethod::Delete,
        &[Literal("_ingest"), Literal("pipeline"), Param("id")],
    )],
    query: &["master_timeout", "timeout"],
    body: BodyKind::None,
};

/// Body of [`PUT_PIPELINE`].
///
/// Processors are kept as raw JSON; their schemas are open-ended.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PutPipelineRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub processors: Vec<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub on_failure: Vec<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
    #[serde(rename = "_meta", skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Map<String, serde_json::Value>>,
}

impl JsonBody for PutPipelineRequest {
    const TYPE_NAME: &'static str = "PutPipeline request";
}
