use relnotes::enums::notes_outcome::NotesOutcome;
use relnotes::services::notes_parser::NotesParser;
use relnotes::structs::note_draft::NoteDraft;

fn draft(id: &str, dev: &str, marketing: &str) -> NoteDraft {
    NoteDraft {
        id: id.to_string(),
        developer_note: dev.to_string(),
        marketing_note: marketing.to_string(),
    }
}

#[test]
fn fenced_json_parses_into_one_draft() {
    let buffer = "```json\n[{\"id\":\"1\",\"developerNote\":\"d\",\"marketingNote\":\"m\"}]\n```";

    let outcome = NotesParser::reconcile(buffer);
    assert_eq!(outcome, NotesOutcome::Parsed(vec![draft("1", "d", "m")]));
}

#[test]
fn unfenced_json_parses_too() {
    let buffer = "[{\"id\":\"7\",\"developerNote\":\"dev\",\"marketingNote\":\"mkt\"}]";

    let outcome = NotesParser::reconcile(buffer);
    assert_eq!(outcome, NotesOutcome::Parsed(vec![draft("7", "dev", "mkt")]));
}

#[test]
fn missing_markers_is_distinct_from_syntax_failure() {
    let outcome = NotesParser::reconcile("Sorry, I cannot help with that.");
    assert_eq!(outcome, NotesOutcome::MissingKeys);
}

#[test]
fn one_missing_marker_still_counts_as_missing_keys() {
    let buffer = "[{\"id\":\"1\",\"developerNote\":\"d\"}]";
    assert_eq!(NotesParser::reconcile(buffer), NotesOutcome::MissingKeys);
}

#[test]
fn truncated_json_with_markers_keeps_raw_buffer_verbatim() {
    // Mid-stream cutoff: markers present, syntax broken.
    let buffer = "[{\"id\":\"1\",\"developerNote\":\"d\",\"marketingNote\":\"m";

    match NotesParser::reconcile(buffer) {
        NotesOutcome::Malformed { raw } => assert_eq!(raw, buffer),
        other => panic!("expected Malformed, got {:?}", other),
    }
}

#[test]
fn batch_boundary_segments_are_merged_in_order() {
    let buffer = format!(
        "[{{\"id\":\"1\",\"developerNote\":\"d1\",\"marketingNote\":\"m1\"}}]{}```json\n[{{\"id\":\"2\",\"developerNote\":\"d2\",\"marketingNote\":\"m2\"}}]\n```",
        '\u{1E}'
    );

    let outcome = NotesParser::reconcile(&buffer);
    assert_eq!(
        outcome,
        NotesOutcome::Parsed(vec![draft("1", "d1", "m1"), draft("2", "d2", "m2")])
    );
}

#[test]
fn empty_segment_after_boundary_is_skipped() {
    // A later batch whose stream died before emitting anything.
    let buffer = format!(
        "[{{\"id\":\"1\",\"developerNote\":\"d\",\"marketingNote\":\"m\"}}]{}",
        '\u{1E}'
    );

    let outcome = NotesParser::reconcile(&buffer);
    assert_eq!(outcome, NotesOutcome::Parsed(vec![draft("1", "d", "m")]));
}

#[test]
fn malformed_segment_fails_the_whole_parse() {
    let buffer = format!(
        "[{{\"id\":\"1\",\"developerNote\":\"d\",\"marketingNote\":\"m\"}}]{}[{{\"id\":",
        '\u{1E}'
    );

    match NotesParser::reconcile(&buffer) {
        NotesOutcome::Malformed { raw } => assert_eq!(raw, buffer),
        other => panic!("expected Malformed, got {:?}", other),
    }
}
