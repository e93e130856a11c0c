use crate::commands::common::{RecordTarget, locate};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{RecordData, RecordRow};
use crate::store::{RecordStore, load_sorted};
use crate::{ClientError, ClientResult};

pub fn run<S: RecordStore + ?Sized>(
    store: &S,
    target: &RecordTarget,
    confirmed: bool,
) -> ClientResult<SuccessEnvelope> {
    if !confirmed {
        return Err(ClientError::confirmation_required(
            "delete",
            "the purchase is removed from the file.",
        ));
    }

    let mut records = load_sorted(store)?;
    let index = locate(&records, target)?;
    let removed = records.remove(index);
    store.rewrite(&records)?;
    tracing::info!(position = index + 1, "purchase deleted");

    success(
        "delete",
        RecordData {
            message: "Purchase deleted.".to_string(),
            record: RecordRow::from_record(index + 1, &removed),
        },
    )
}
