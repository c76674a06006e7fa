pub const RELEASE_NOTES_SYSTEM_PROMPT: &str = "You generate dual-tone release notes.";

pub const RELEASE_NOTES_PREAMBLE: &str = "\
You are a dual-tone release-note generator.
Below are a list of PRs with their diffs.

PRs:
";

pub const RELEASE_NOTES_OUTPUT_CONTRACT: &str = r#"
Return a single JSON array where each element is an object with these keys:
{
  "id": string,
  "developerNote": string,   // concise & technical
  "marketingNote": string     // user-centric benefit
}

Example:
[ { "id": "123", "developerNote": "Refactored X…", "marketingNote": "X is now faster…" }, … ]
"#;
