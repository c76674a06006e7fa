use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{RelnotesError, RelnotesResult};
use crate::structs::config::config::Config;

pub struct ConfigManager;

impl ConfigManager {
    pub fn load() -> RelnotesResult<Config> {
        let config_location = Self::config_path();

        if config_location.exists() {
            log::info!("📋 Loading config from: {}", config_location.display());
            return Self::load_from(&config_location);
        }

        Ok(Config::default())
    }

    pub fn load_from(path: &Path) -> RelnotesResult<Config> {
        let content = fs::read_to_string(path).map_err(|e| RelnotesError::ConfigurationFileError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| RelnotesError::ConfigurationFileError {
            path: path.display().to_string(),
            reason: e.message().to_string(),
        })?;

        Ok(config)
    }

    pub fn create_sample_config() -> RelnotesResult<PathBuf> {
        let sample_config = r#"# Relnotes Configuration

[github]
# Repository whose merged pull requests feed the release notes
owner = "openai"
repo = "openai-node"

# Merged PRs fetched per page
per_page = 10

# Environment variable holding the GitHub API token
token_env = "GITHUB_TOKEN"

[ai]
# Chat model used for note generation
model = "gpt-4o-mini"

# Low temperature keeps the notes close to the diffs
temperature = 0.2

max_tokens = 4096

# PRs sent to the model per request; bounds the prompt size
batch_size = 8

# Environment variable holding the OpenAI API key
api_key_env = "OPENAI_API_KEY"

[server]
# Leave unset to scan for a free port starting at 8080
# port = 8080

# Upstream request timeout in seconds
request_timeout_secs = 120
"#;

        let config_location = Self::config_path();

        if let Some(parent) = config_location.parent() {
            fs::create_dir_all(parent)?;
        }

        if config_location.exists() {
            return Err(RelnotesError::ConfigurationFileError {
                path: config_location.display().to_string(),
                reason: "configuration file already exists".to_string(),
            });
        }

        fs::write(&config_location, sample_config)?;
        Ok(config_location)
    }

    fn config_path() -> PathBuf {
        dirs::home_dir()
            .map(|d| d.join(".relnotes/config.toml"))
            .unwrap_or_default()
    }
}
