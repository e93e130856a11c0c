use crate::ClientResult;
use crate::batch::advance_all_by;
use crate::commands::common::display_rows;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::AdvanceData;
use crate::store::{RecordStore, load_sorted};

/// Advances every installment purchase `months` periods and rewrites the file.
/// Nothing is written when any record fails to advance.
pub fn run<S: RecordStore + ?Sized>(store: &S, months: u32) -> ClientResult<SuccessEnvelope> {
    let records = load_sorted(store)?;
    let (next, summary) = advance_all_by(&records, months)?;
    store.rewrite(&next)?;
    tracing::info!(
        months,
        advanced = summary.advanced,
        removed = summary.removed,
        plain = summary.plain,
        "installments advanced"
    );

    let reloaded = load_sorted(store)?;
    success(
        "advance",
        AdvanceData {
            months,
            summary,
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
    fn failed_transform_leaves_store_untouched() {
        let original = vec![
            Record::from_fields(["Visa", "10/02/2025", "TV (1/3)", "300", "Ana", "Em Análise"]),
            Record::from_fields(["Visa", "11/02/2025", "Sofa (9/3)", "900", "Ana", "Em Análise"]),
        ];
        let store = MemoryStore::new(original.clone());

        let result = run(&store, 1);
        assert!(result.is_err());
        assert_eq!(store.snapshot(), original);
    }

    #[test]
    fn reports_summary_and_reloaded_rows() {
        let store = MemoryStore::new(vec![
            Record::from_fields(["Visa", "10/02/2025", "TV (3/3)", "300", "Ana", "Em Análise"]),
            Record::from_fields(["Visa", "11/02/2025", "Sofa (1/3)", "900", "Ana", "Em Análise"]),
            Record::from_fields(["Visa", "12/02/2025", "Pão", "7", "Ana", "Em Análise"]),
        ]);

        let result = run(&store, 1);
        assert!(result.is_ok());
        if let Ok(success) = result {
            assert_eq!(success.data["summary"]["advanced"], 1);
            assert_eq!(success.data["summary"]["removed"], 1);
            assert_eq!(success.data["summary"]["plain"], 1);
            assert_eq!(success.data["rows"][0]["description"], "Sofa (2/3)");
        }
        assert_eq!(store.snapshot().len(), 2);
    }
}
