use crate::prompts::release_notes_prompt::{RELEASE_NOTES_OUTPUT_CONTRACT, RELEASE_NOTES_PREAMBLE};
use crate::structs::change_record::ChangeRecord;

/// Renders one batch into the user prompt: preamble, a 1-indexed listing
/// of every record with its full diff fenced as a diff block, then the
/// output contract. Diff text is never truncated here; prompt size is
/// bounded entirely by the batcher.
pub fn generate_release_notes_prompt(batch: &[ChangeRecord]) -> String {
    let mut prompt = String::from(RELEASE_NOTES_PREAMBLE);

    for (index, record) in batch.iter().enumerate() {
        prompt.push_str(&format!(
            "{}. [#{}] {}\n```diff\n{}\n```\n",
            index + 1,
            record.id,
            record.description,
            record.diff
        ));
    }

    prompt.push_str(RELEASE_NOTES_OUTPUT_CONTRACT);
    prompt
}
