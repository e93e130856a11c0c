use crate::commands::common::{RecordTarget, locate};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{RecordData, RecordRow};
use crate::entry::{RecordChanges, apply_changes};
use crate::store::{RecordStore, load_sorted};
use crate::{ClientError, ClientResult};

pub fn run<S: RecordStore + ?Sized>(
    store: &S,
    target: &RecordTarget,
    changes: &RecordChanges,
) -> ClientResult<SuccessEnvelope> {
    if changes.is_empty() {
        return Err(ClientError::invalid_argument_for_command(
            "Provide at least one field to change.",
            Some("edit"),
        ));
    }

    let mut records = load_sorted(store)?;
    let index = locate(&records, target)?;
    let edited = apply_changes(&records[index], changes)?;
    records[index] = edited.clone();
    store.rewrite(&records)?;
    tracing::info!(position = index + 1, "purchase edited");

    // The reload is a stable sort, so identical copies keep their relative order.
    let earlier_copies = records[..index]
        .iter()
        .filter(|stored| *stored == &edited)
        .count();
    let position = load_sorted(store)?
        .iter()
        .enumerate()
        .filter(|(_, stored)| *stored == &edited)
        .nth(earlier_copies)
        .map(|(index, _)| index + 1)
        .unwrap_or_default();

    success(
        "edit",
        RecordData {
            message: "Purchase updated.".to_string(),
            record: RecordRow::from_record(position, &edited),
        },
    )
}
