use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One unit of analytic output attached to an upload. An upload owns zero
/// (not yet finished / failed) to many results, one per analysis kind run;
/// deleting the upload cascades to its results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingResult {
    pub upload_id: Uuid,
    /// Tag identifying the kind of analysis, e.g. "sentiment_analysis".
    pub result_type: String,
    /// Opaque structured payload produced by the analysis step.
    pub data: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl ProcessingResult {
    pub fn new(upload_id: Uuid, result_type: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            upload_id,
            result_type: result_type.into(),
            data,
            created_at: Utc::now(),
        }
    }
}
