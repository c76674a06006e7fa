use std::io::Write;

use tempfile::NamedTempFile;

use relnotes::config::config_manager::ConfigManager;
use relnotes::errors::RelnotesError;
use relnotes::structs::config::config::Config;

#[test]
fn defaults_match_the_documented_contract() {
    let config = Config::default();

    assert_eq!(config.github.owner, "openai");
    assert_eq!(config.github.repo, "openai-node");
    assert_eq!(config.github.per_page, 10);
    assert_eq!(config.ai.model, "gpt-4o-mini");
    assert_eq!(config.ai.batch_size, 8);
    assert!((config.ai.temperature - 0.2).abs() < f32::EPSILON);
    assert_eq!(config.server.port, None);
    assert_eq!(config.server.request_timeout_secs, 120);
}

#[test]
fn partial_toml_keeps_defaults_for_missing_fields() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        "[github]\nowner = \"rust-lang\"\nrepo = \"cargo\"\n\n[ai]\nbatch_size = 3\n"
    )
    .unwrap();

    let config = ConfigManager::load_from(file.path()).unwrap();

    assert_eq!(config.github.owner, "rust-lang");
    assert_eq!(config.github.repo, "cargo");
    assert_eq!(config.github.per_page, 10);
    assert_eq!(config.ai.batch_size, 3);
    assert_eq!(config.ai.model, "gpt-4o-mini");
}

#[test]
fn invalid_toml_reports_a_configuration_file_error() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "[github\nowner = ").unwrap();

    let error = ConfigManager::load_from(file.path()).unwrap_err();
    assert!(matches!(error, RelnotesError::ConfigurationFileError { .. }));
}

#[test]
fn missing_file_reports_a_configuration_file_error() {
    let error = ConfigManager::load_from(std::path::Path::new("/nonexistent/config.toml")).unwrap_err();
    assert!(matches!(error, RelnotesError::ConfigurationFileError { .. }));
}
