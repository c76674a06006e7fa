use serde::{Deserialize, Serialize};
use crate::structs::change_record::ChangeRecord;

/// One page of merged pull requests plus the pagination cursor and the
/// rate-limit snapshot taken from the listing response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffsPage {
    pub diffs: Vec<ChangeRecord>,
    pub next_page: Option<u32>,
    pub current_page: u32,
    pub per_page: u32,
    pub rate_limit: RateLimitInfo,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RateLimitInfo {
    pub remaining: Option<u32>,
    pub reset: Option<i64>,
}
