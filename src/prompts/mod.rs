pub mod release_notes_prompt;
