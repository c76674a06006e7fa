use serde::{Deserialize, Serialize};

/// One merged pull request with its unified diff. Immutable once fetched;
/// downstream stages only read it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChangeRecord {
    pub id: String,
    pub description: String,
    pub diff: String,
    #[serde(default)]
    pub url: String,
}
