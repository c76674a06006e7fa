use serde::{Deserialize, Serialize};
use crate::helpers::config_helper::ConfigHelper;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GithubConfig {
    #[serde(default = "ConfigHelper::default_owner")]
    pub owner: String,

    #[serde(default = "ConfigHelper::default_repo")]
    pub repo: String,

    #[serde(default = "ConfigHelper::default_per_page")]
    pub per_page: u32,

    #[serde(default = "ConfigHelper::default_token_env")]
    pub token_env: String,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            owner: ConfigHelper::default_owner(),
            repo: ConfigHelper::default_repo(),
            per_page: ConfigHelper::default_per_page(),
            token_env: ConfigHelper::default_token_env(),
        }
    }
}
