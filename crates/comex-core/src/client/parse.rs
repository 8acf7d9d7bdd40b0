//! Wire-format structures for the export API replies.

use serde::Deserialize;
use serde_json::Value;

/// A single exported comment: an opaque field map from the service.
pub type CommentRecord = serde_json::Map<String, Value>;

/// Envelope around the submit reply (`PUT /api/v2/export`).
#[derive(Debug, Deserialize)]
pub struct SubmitEnvelope {
    pub data: SubmitData,
}

#[derive(Debug, Deserialize)]
pub struct SubmitData {
    #[serde(default)]
    pub guid: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    /// Status code embedded in a 200 body; 429 marks a rate limit.
    #[serde(default)]
    pub status_code: Option<u16>,
    #[serde(default)]
    pub seconds_to_wait: Option<u64>,
}

/// Envelope around the status reply (`GET /api/v2/export?guid=`).
#[derive(Debug, Deserialize)]
pub struct StatusEnvelope {
    pub data: Vec<StatusData>,
}

/// One job's status entry. `raw_url` is present once the job is done,
/// `error` once it has failed.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusData {
    pub status: String,
    #[serde(default, rename = "rawUrl")]
    pub raw_url: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}
