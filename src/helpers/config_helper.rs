use crate::config::constants::{GITHUB_TOKEN_ENV, OPENAI_API_KEY_ENV};

pub struct ConfigHelper;

impl ConfigHelper {
    pub fn default_owner() -> String {
        "openai".to_string()
    }

    pub fn default_repo() -> String {
        "openai-node".to_string()
    }

    pub fn default_per_page() -> u32 {
        10
    }

    pub fn default_token_env() -> String {
        GITHUB_TOKEN_ENV.to_string()
    }

    pub fn default_model() -> String {
        "gpt-4o-mini".to_string()
    }

    pub fn default_max_tokens() -> u32 {
        4096
    }

    pub fn default_temperature() -> f32 {
        0.2
    }

    pub fn default_batch_size() -> usize {
        8
    }

    pub fn default_api_key_env() -> String {
        OPENAI_API_KEY_ENV.to_string()
    }

    pub fn default_request_timeout_secs() -> u64 {
        120
    }
}
