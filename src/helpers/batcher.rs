use crate::errors::{RelnotesError, RelnotesResult};
use crate::structs::change_record::ChangeRecord;

/// Splits an ordered record list into ⌈N/B⌉ groups of at most
/// `batch_size`, preserving order within and across groups. Concatenating
/// the result reproduces the input exactly once each. Empty input yields
/// zero batches; a zero batch size is a caller contract violation.
pub fn batch_records(
    records: Vec<ChangeRecord>,
    batch_size: usize,
) -> RelnotesResult<Vec<Vec<ChangeRecord>>> {
    if batch_size == 0 {
        return Err(RelnotesError::validation_error(
            "batch_size",
            "0",
            "must be greater than zero",
            Some("configure ai.batch_size with a positive value"),
        ));
    }

    let mut batches = Vec::with_capacity(records.len().div_ceil(batch_size));
    let mut batch = Vec::with_capacity(batch_size.min(records.len()));

    for record in records {
        batch.push(record);
        if batch.len() == batch_size {
            batches.push(std::mem::take(&mut batch));
        }
    }

    if !batch.is_empty() {
        batches.push(batch);
    }

    Ok(batches)
}
