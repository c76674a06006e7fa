pub mod batcher;
pub mod config_helper;
pub mod http_client;
pub mod prompt_generator;
