pub mod ai;
pub mod change_record;
pub mod cli;
pub mod config;
pub mod diffs_page;
pub mod diffs_query;
pub mod generate_notes_request;
pub mod note_draft;
pub mod stream_item;
