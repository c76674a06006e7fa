use serde::{Deserialize, Serialize};
use crate::helpers::config_helper::ConfigHelper;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AiConfig {
    #[serde(default = "ConfigHelper::default_model")]
    pub model: String,

    #[serde(default = "ConfigHelper::default_max_tokens")]
    pub max_tokens: u32,

    // Low randomness keeps the generated notes anchored to the diffs.
    #[serde(default = "ConfigHelper::default_temperature")]
    pub temperature: f32,

    #[serde(default = "ConfigHelper::default_batch_size")]
    pub batch_size: usize,

    #[serde(default = "ConfigHelper::default_api_key_env")]
    pub api_key_env: String,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            model: ConfigHelper::default_model(),
            max_tokens: ConfigHelper::default_max_tokens(),
            temperature: ConfigHelper::default_temperature(),
            batch_size: ConfigHelper::default_batch_size(),
            api_key_env: ConfigHelper::default_api_key_env(),
        }
    }
}
