use serde::Deserialize;

/// Query parameters accepted by `GET /api/diffs`. Anything missing falls
/// back to the configured defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiffsQuery {
    pub owner: Option<String>,
    pub repo: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}
