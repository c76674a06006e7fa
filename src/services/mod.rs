pub mod ai_providers;
pub mod github;
pub mod notes_parser;
pub mod stream_bridge;
