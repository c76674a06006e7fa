pub mod ai_provider_error;
pub mod commands;
pub mod notes_outcome;
