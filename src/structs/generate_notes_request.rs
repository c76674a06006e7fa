use serde::{Deserialize, Serialize};
use crate::structs::change_record::ChangeRecord;

/// Body of `POST /api/generate-notes`: the ordered records to summarize.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateNotesRequest {
    pub diffs: Vec<ChangeRecord>,
}
