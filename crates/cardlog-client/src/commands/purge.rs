use crate::batch::purge_plain;
use crate::commands::common::display_rows;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::PurgeData;
use crate::store::{RecordStore, load_sorted};
use crate::{ClientError, ClientResult};

/// Removes every non-installment purchase. There is no backup or undo.
pub fn run<S: RecordStore + ?Sized>(store: &S, confirmed: bool) -> ClientResult<SuccessEnvelope> {
    if !confirmed {
        return Err(ClientError::confirmation_required(
            "purge",
            "every purchase without installments is deleted.",
        ));
    }

    let records = load_sorted(store)?;
    let (kept, removed) = purge_plain(&records);
    store.rewrite(&kept)?;
    tracing::info!(removed, kept = kept.len(), "plain purchases purged");

    let reloaded = load_sorted(store)?;
    success(
        "purge",
        PurgeData {
            removed,
            rows: display_rows(&reloaded),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::run;
    use crate::record::Record;
    use crate::store::MemoryStore;

    #[test]
    fn purge_requires_confirmation_and_keeps_installments() {
        let store = MemoryStore::new(vec![
            Record::from_fields(["Visa", "10/02/2025", "TV (1/3)", "300", "Ana", "Em Análise"]),
            Record::from_fields(["Visa", "11/02/2025", "Pão", "7", "Ana", "Em Análise"]),
        ]);

        assert!(run(&store, false).is_err());
        assert_eq!(store.snapshot().len(), 2);

        let result = run(&store, true);
        assert!(result.is_ok());
        if let Ok(success) = result {
            assert_eq!(success.data["removed"], 1);
        }
        assert_eq!(store.snapshot().len(), 1);
    }

    #[test]
    fn purge_leaves_malformed_rows_in_the_store() {
        let half_written = Record::from_fields(["Visa", "02/01/2025", "half written row"]);
        let store = MemoryStore::new(vec![
            Record::from_fields(["Visa", "10/02/2025", "TV (1/3)", "300", "Ana", "Em Análise"]),
            half_written.clone(),
        ]);

        let result = run(&store, true);
        assert!(result.is_ok());
        if let Ok(success) = result {
            assert_eq!(success.data["removed"], 0);
            assert_eq!(success.data["rows"].as_array().map(Vec::len), Some(1));
        }
        assert!(store.snapshot().contains(&half_written));
        assert_eq!(store.snapshot().len(), 2);
    }
}
