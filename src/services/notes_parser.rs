use crate::config::constants::{BATCH_BOUNDARY, DEVELOPER_NOTE_MARKER, MARKETING_NOTE_MARKER};
use crate::enums::notes_outcome::NotesOutcome;
use crate::structs::note_draft::NoteDraft;

/// Recovers structured notes from a fully drained generation stream.
pub struct NotesParser;

impl NotesParser {
    /// Reconciles the accumulated buffer into notes or a degraded state.
    ///
    /// The buffer is one JSON array per batch, separated by the batch
    /// boundary byte. Each segment may be wrapped in a code fence. A
    /// buffer without both expected field markers means the model ignored
    /// the output contract; a segment that will not strict-parse keeps
    /// the whole original buffer for raw display.
    pub fn reconcile(buffer: &str) -> NotesOutcome {
        if !buffer.contains(DEVELOPER_NOTE_MARKER) || !buffer.contains(MARKETING_NOTE_MARKER) {
            return NotesOutcome::MissingKeys;
        }

        let mut notes = Vec::new();

        for segment in buffer.split(BATCH_BOUNDARY) {
            let cleaned = Self::strip_code_fence(segment);
            if cleaned.is_empty() {
                // A batch whose stream ended before emitting anything.
                continue;
            }

            match serde_json::from_str::<Vec<NoteDraft>>(cleaned) {
                Ok(parsed) => notes.extend(parsed),
                Err(e) => {
                    log::warn!("⚠️ Notes segment failed to parse: {}", e);
                    return NotesOutcome::Malformed {
                        raw: buffer.to_string(),
                    };
                }
            }
        }

        NotesOutcome::Parsed(notes)
    }

    /// Strips one optional leading code-fence marker (optionally tagged
    /// `json`) and one optional trailing marker, plus surrounding
    /// whitespace.
    fn strip_code_fence(text: &str) -> &str {
        let mut cleaned = text.trim();

        if let Some(rest) = cleaned.strip_prefix("```") {
            let rest = rest
                .strip_prefix("json")
                .or_else(|| rest.strip_prefix("JSON"))
                .unwrap_or(rest);
            cleaned = rest.trim_start();
        }

        if let Some(rest) = cleaned.strip_suffix("```") {
            cleaned = rest.trim_end();
        }

        cleaned
    }
}
