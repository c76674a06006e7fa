use serde::{Deserialize, Serialize};

/// One parsed release note pairing a pull request id with a technical and
/// a user-facing phrasing. The id is not cross-checked against fetched
/// records; an unmatched id is a valid degraded outcome.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NoteDraft {
    pub id: String,
    #[serde(rename = "developerNote")]
    pub developer_note: String,
    #[serde(rename = "marketingNote")]
    pub marketing_note: String,
}
