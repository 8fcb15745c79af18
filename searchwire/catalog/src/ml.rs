//! Machine learning anomaly detection.

use searchwire::endpoint::Segment::{Literal, Param};
use searchwire::{BodyKind, EndpointDescriptor, JsonBody, PathVariant, RestMethod};
use serde::{Deserialize, Serialize};

pub static REVERT_MODEL_SNAPSHOT: EndpointDescriptor = EndpointDescriptor {
    name: "ml.revert_model_snapshot",
    description: "Reverts an anomaly detection job to a specific model snapshot.",
    docs_url: Some("https://www.elastic.co/guide/en/elasticsearch/reference/current/ml-revert-snapshot.html"),
    variants: &[PathVariant::new(
        RestMethod::Post,
        &[
            Literal("_ml"),
            Literal("anomaly_detectors"),
            Param("job_id"),
            Literal("model_snapshots"),
            Param("snapshot_id"),
            Literal("_revert"),
        ],
    )],
    query: &["delete_intervening_results"],
    body: BodyKind::Optional,
};

/// Body of [`REVERT_MODEL_SNAPSHOT`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RevertModelSnapshotRequest {
    /// Deletes results between the snapshot time and the latest result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete_intervening_results: Option<bool>,
}

impl JsonBody for RevertModelSnapshotRequest {
    const TYPE_NAME: &'static str = "RevertModelSnapshot request";
}
