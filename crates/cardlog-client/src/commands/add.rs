use crate::ClientResult;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{RecordData, RecordRow};
use crate::entry::{NewPurchase, build_record};
use crate::store::{RecordStore, load_sorted};

/// Validates and appends one purchase. A rejected entry writes nothing.
pub fn run<S: RecordStore + ?Sized>(store: &S, input: NewPurchase) -> ClientResult<SuccessEnvelope> {
    let record = build_record(input)?;
    store.append(&record)?;
    tracing::info!(card = record.card(), date = record.date(), "purchase saved");

    let position = load_sorted(store)?
        .iter()
        .rposition(|stored| stored == &record)
        .map(|index| index + 1)
        .unwrap_or_default();

    success(
        "add",
        RecordData {
            message: "Purchase saved.".to_string(),
            record: RecordRow::from_record(position, &record),
        },
    )
}
