use serde::{Deserialize, Serialize};
use crate::helpers::config_helper::ConfigHelper;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    /// Fixed port for the web UI; when unset a free port is scanned for.
    #[serde(default)]
    pub port: Option<u16>,

    #[serde(default = "ConfigHelper::default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: None,
            request_timeout_secs: ConfigHelper::default_request_timeout_secs(),
        }
    }
}
