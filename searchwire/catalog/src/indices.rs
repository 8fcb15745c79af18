//! Index and template management.

use searchwire::endpoint::Segment::{Literal, Param};
use searchwire::{BodyKind, EndpointDescriptor, JsonBody, PathVariant, RestMethod};
use serde::{Deserialize, Serialize};

/// Existence check; use [`EndpointRequest::is_success`](searchwire::EndpointRequest::is_success).
pub static EXISTS: EndpointDescriptor = EndpointDescriptor {
    name: "indices.exists",
    description: "Checks if an index exists.",
    docs_url: Some("https://www.elastic.co/guide/en/elasticsearch/reference/current/indices-exists.html"),
    variants: &[PathVariant::new(RestMethod::Head, &[Param("index")])],
    query: &["allow_no_indices", "expand_wildcards", "ignore_unavailable", "local"],
    body: BodyKind::None,
};

pub static PUT_TEMPLATE: EndpointDescriptor = EndpointDescriptor {
    name: "indices.put_template",
    description: "Creates or updates a legacy index template.",
    docs_url: Some("https://www.elastic.co/guide/en/elasticsearch/reference/current/indices-templates-v1.html"),
    variants: &[PathVariant::new(
        RestMethod::Put,
        &[Literal("_template"), Param("name")],
    )],
    query: &["create", "master_timeout", "order", "cause"],
    body: BodyKind::Required,
};

/// Body of [`PUT_TEMPLATE`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PutTemplateRequest {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub index_patterns: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mappings: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aliases: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
}

impl JsonBody for PutTemplateRequest {
    const TYPE_NAME: &'static str = "PutTemplate request";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_body_from_json() {
        let body = PutTemplateRequest::from_json(
            r#"{
                "index_patterns": ["*"],
                "order": 0,
                "settings": { "number_of_shards": 1 },
                "version": 123
            }"#,
        )
        .unwrap();
        assert_eq!(body.index_patterns, vec!["*"]);
        assert_eq!(body.order, Some(0));
        assert_eq!(body.version, Some(123));
        assert_eq!(body.settings.unwrap()["number_of_shards"], 1);
    }
}
