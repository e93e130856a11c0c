use crate::ClientResult;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{ListData, RecordRow, TotalView};
use crate::store::{RecordStore, load_sorted};
use crate::view::{Predicates, view};

pub fn run<S: RecordStore + ?Sized>(
    store: &S,
    predicates: Predicates,
) -> ClientResult<SuccessEnvelope> {
    let records = load_sorted(store)?;
    let skipped_rows = records
        .iter()
        .filter(|record| !record.is_well_formed())
        .count();

    let filtered = view(&records, &predicates);
    let rows = filtered
        .positions
        .iter()
        .zip(&filtered.records)
        .map(|(index, record)| RecordRow::from_record(index + 1, record))
        .collect::<Vec<RecordRow>>();

    success(
        "list",
        ListData {
            filters: predicates,
            rows,
            total: TotalView::new(filtered.total),
            skipped_rows,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::run;
    use crate::record::{Record, Status};
    use crate::store::MemoryStore;
    use crate::view::Predicates;

    fn store() -> MemoryStore {
        MemoryStore::new(vec![
            Record::from_fields(["Visa", "20/01/2025", "Cinema", "40", "Mariana", Status::Approved.label()]),
            Record::from_fields(["Master", "05/01/2025", "Mercado", "1200,5", "Ana", Status::Approved.label()]),
            Record::from_fields(["Visa", "10/01/2025", "Pago", "99", "Carlos", Status::Settled.label()]),
            Record::from_fields(["Visa"]),
        ])
    }

    #[test]
    fn lists_sorted_rows_with_grouped_total() {
        let result = run(&store(), Predicates::default());
        assert!(result.is_ok());
        if let Ok(success) = result {
            let rows = success.data["rows"].as_array().cloned().unwrap_or_default();
            assert_eq!(rows.len(), 3);
            assert_eq!(rows[0]["description"], "Mercado");
            assert_eq!(success.data["total"]["amount"], 1240.5);
            assert_eq!(success.data["total"]["display"], "1.240,50");
            assert_eq!(success.data["skipped_rows"], 1);
        }
    }

    #[test]
    fn filtered_rows_keep_snapshot_positions() {
        let predicates = Predicates {
            payer: Some("ana".to_string()),
            ..Predicates::default()
        };
        let result = run(&store(), predicates);
        assert!(result.is_ok());
        if let Ok(success) = result {
            let positions = success.data["rows"]
                .as_array()
                .map(|rows| rows.iter().map(|row| row["position"].clone()).collect::<Vec<_>>())
                .unwrap_or_default();
            assert_eq!(positions, vec![serde_json::json!(2), serde_json::json!(4)]);
        }
    }
}
