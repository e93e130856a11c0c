use std::fs;
use std::path::Path;

use cardlog_client::commands::common::RecordTarget;
use cardlog_client::commands::{add, advance, edit, list, purge};
use cardlog_client::entry::{InstallmentInput, NewPurchase, RecordChanges};
use cardlog_client::installment::{self, Installment};
use cardlog_client::store::load_sorted;
use cardlog_client::view::Predicates;
use cardlog_client::{CsvFileStore, Record, Status};
use serde_json::Value;
use tempfile::tempdir;

fn purchase(description: &str, date: &str, installments: Option<(&str, &str)>) -> NewPurchase {
    NewPurchase {
        card: "Visa".to_string(),
        date: date.to_string(),
        description: description.to_string(),
        amount: "100,00".to_string(),
        payer: "Ana".to_string(),
        status: "approved".to_string(),
        installment: installments.map(|(current, total)| InstallmentInput {
            current: current.to_string(),
            total: total.to_string(),
        }),
    }
}

fn stored(store: &CsvFileStore) -> Vec<Record> {
    load_sorted(store).unwrap_or_default()
}

fn write_file(path: &Path, body: &str) {
    let result = fs::write(path, body);
    assert!(result.is_ok());
}

#[test]
fn installment_runs_to_completion_across_advances() {
    let dir = tempdir();
    assert!(dir.is_ok());
    if let Ok(dir) = dir {
        let store = CsvFileStore::new(dir.path().join("purchases.csv"));
        assert!(add::run(&store, purchase("Geladeira", "01/02/2025", Some(("2", "3")))).is_ok());
        assert!(add::run(&store, purchase("Padaria", "02/02/2025", None)).is_ok());

        let first = advance::run(&store, 1);
        assert!(first.is_ok());
        let records = stored(&store);
        assert_eq!(records.len(), 2);
        assert_eq!(installment::extract(&records[0]), Installment::new(3, 3));
        assert_eq!(records[0].description(), "Geladeira (3/3)");

        let second = advance::run(&store, 1);
        assert!(second.is_ok());
        if let Ok(success) = second {
            assert_eq!(success.data["summary"]["removed"], 1);
            assert_eq!(success.data["summary"]["plain"], 1);
        }
        let records = stored(&store);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].description(), "Padaria");
    }
}

#[test]
fn legacy_marker_rows_are_upgraded_on_advance() {
    let dir = tempdir();
    assert!(dir.is_ok());
    if let Ok(dir) = dir {
        let path = dir.path().join("purchases.csv");
        write_file(
            &path,
            "Visa,01/02/2025,Notebook (4/10),350,Ana,Compra Aprovada\n",
        );
        let store = CsvFileStore::new(&path);

        assert!(advance::run(&store, 2).is_ok());
        let contents = fs::read_to_string(&path).unwrap_or_default();
        assert_eq!(
            contents.trim_end(),
            "Visa,01/02/2025,Notebook (6/10),350,Ana,Compra Aprovada,6,10"
        );
    }
}

#[test]
fn purge_keeps_three_installments_of_eight() {
    let dir = tempdir();
    assert!(dir.is_ok());
    if let Ok(dir) = dir {
        let store = CsvFileStore::new(dir.path().join("purchases.csv"));
        for day in 1..=5 {
            let date = format!("{day:02}/03/2025");
            assert!(add::run(&store, purchase("Avulsa", &date, None)).is_ok());
        }
        for day in 6..=8 {
            let date = format!("{day:02}/03/2025");
            assert!(add::run(&store, purchase("Parcelada", &date, Some(("1", "4")))).is_ok());
        }

        let result = purge::run(&store, true);
        assert!(result.is_ok());
        if let Ok(success) = result {
            assert_eq!(success.data["removed"], 5);
            assert_eq!(success.data["rows"].as_array().map(Vec::len), Some(3));
        }
        assert_eq!(stored(&store).len(), 3);
    }
}

#[test]
fn list_filters_installments_and_flips_settled_total() {
    let dir = tempdir();
    assert!(dir.is_ok());
    if let Ok(dir) = dir {
        let store = CsvFileStore::new(dir.path().join("purchases.csv"));
        assert!(add::run(&store, purchase("TV", "01/04/2025", Some(("1", "5")))).is_ok());
        assert!(
            add::run(
                &store,
                NewPurchase {
                    amount: "20,00".to_string(),
                    status: Status::Settled.key().to_string(),
                    ..purchase("Gás", "02/04/2025", None)
                }
            )
            .is_ok()
        );

        let everything = list::run(&store, Predicates::default());
        assert!(everything.is_ok());
        if let Ok(success) = everything {
            assert_eq!(success.data["total"]["display"], "100,00");
        }

        let settled = list::run(
            &store,
            Predicates {
                status: Some(Status::Settled.label().to_string()),
                ..Predicates::default()
            },
        );
        assert!(settled.is_ok());
        if let Ok(success) = settled {
            assert_eq!(success.data["total"]["amount"], 20.0);
        }

        let only_installments = list::run(
            &store,
            Predicates {
                installment_only: true,
                ..Predicates::default()
            },
        );
        assert!(only_installments.is_ok());
        if let Ok(success) = only_installments {
            let descriptions = success.data["rows"]
                .as_array()
                .map(|rows| {
                    rows.iter()
                        .filter_map(|row| row["description"].as_str().map(str::to_string))
                        .collect::<Vec<String>>()
                })
                .unwrap_or_default();
            assert_eq!(descriptions, vec!["TV (1/5)".to_string()]);
        }
    }
}

#[test]
fn edit_of_stale_position_is_record_not_found() {
    let dir = tempdir();
    assert!(dir.is_ok());
    if let Ok(dir) = dir {
        let store = CsvFileStore::new(dir.path().join("purchases.csv"));
        assert!(add::run(&store, purchase("TV", "01/04/2025", None)).is_ok());

        let result = edit::run(
            &store,
            &RecordTarget::Position(4),
            &RecordChanges {
                payer: Some("Bia".to_string()),
                ..RecordChanges::default()
            },
        );
        assert!(result.is_err());
        if let Err(error) = result {
            assert_eq!(error.code, "record_not_found");
            assert_eq!(
                error.data.as_ref().and_then(|data| data.get("target")).and_then(Value::as_str),
                Some("position 4")
            );
        }
    }
}
