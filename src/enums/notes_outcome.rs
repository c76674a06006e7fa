use crate::structs::note_draft::NoteDraft;

/// Result of reconciling a fully drained generation stream. The provider
/// output is free-form text with only a requested shape, so parsing is
/// fallible in two distinguishable ways.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotesOutcome {
    /// The buffer parsed into an ordered list of notes.
    Parsed(Vec<NoteDraft>),
    /// At least one expected field marker was absent; the model ignored
    /// the output contract. No raw fallback is kept in this mode.
    MissingKeys,
    /// The markers were present but the text failed strict parsing.
    /// Carries the accumulated buffer byte-for-byte for raw display.
    Malformed { raw: String },
}
