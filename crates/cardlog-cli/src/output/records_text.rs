use std::io;

use serde_json::Value;

use super::format::{Align, Column, key_value_rows, render_table};

const RECORD_COLUMNS: [Column<'static>; 8] = [
    Column {
        name: "#",
        align: Align::Right,
    },
    Column {
        name: "Card",
        align: Align::Left,
    },
    Column {
        name: "Date",
        align: Align::Left,
    },
    Column {
        name: "Description",
        align: Align::Left,
    },
    Column {
        name: "Amount",
        align: Align::Right,
    },
    Column {
        name: "Payer",
        align: Align::Left,
    },
    Column {
        name: "Status",
        align: Align::Left,
    },
    Column {
        name: "Installment",
        align: Align::Right,
    },
];

pub fn render_list(data: &Value) -> io::Result<String> {
    let rows = required_array(data, "rows", "list")?;
    let total = data
        .get("total")
        .and_then(|total| total.get("display"))
        .and_then(Value::as_str)
        .unwrap_or("0,00");

    let mut lines = Vec::new();
    if rows.is_empty() {
        lines.push("No purchases match.".to_string());
        lines.push(String::new());
        lines.push("Record one with `cardlog add --help`.".to_string());
    } else {
        lines.push("Purchases:".to_string());
        lines.extend(render_table(&RECORD_COLUMNS, &table_rows(rows)));
    }

    lines.push(String::new());
    lines.push(format!("Total: R$ {total}"));

    let skipped = data.get("skipped_rows").and_then(Value::as_u64).unwrap_or(0);
    if skipped > 0 {
        lines.push(format!(
            "Note: {skipped} malformed rows in the purchase file were skipped."
        ));
    }

    Ok(lines.join("\n"))
}

pub fn render_record_change(data: &Value) -> io::Result<String> {
    let message = data
        .get("message")
        .and_then(Value::as_str)
        .ok_or_else(|| io::Error::other("record output requires message"))?;
    let record = data
        .get("record")
        .ok_or_else(|| io::Error::other("record output requires record"))?;

    let mut lines = vec![message.to_string(), String::new()];
    lines.extend(render_table(&RECORD_COLUMNS, &table_rows(std::slice::from_ref(record))));
    Ok(lines.join("\n"))
}

pub fn render_advance(data: &Value) -> io::Result<String> {
    let summary = data
        .get("summary")
        .ok_or_else(|| io::Error::other("advance output requires summary"))?;
    let months = data.get("months").and_then(Value::as_u64).unwrap_or(1);
    let count = |key: &str| summary.get(key).and_then(Value::as_u64).unwrap_or(0).to_string();

    let mut lines = vec![format!("Installments advanced by {months} month(s)."), String::new()];
    lines.extend(key_value_rows(
        &[
            ("Advanced:", count("advanced")),
            ("Fully paid and removed:", count("removed")),
            ("Without installments:", count("plain")),
            ("Malformed, untouched:", count("skipped")),
        ],
        2,
    ));

    let rows = required_array(data, "rows", "advance")?;
    if !rows.is_empty() {
        lines.push(String::new());
        lines.push("Purchases:".to_string());
        lines.extend(render_table(&RECORD_COLUMNS, &table_rows(rows)));
    }

    Ok(lines.join("\n"))
}

pub fn render_purge(data: &Value) -> io::Result<String> {
    let removed = data.get("removed").and_then(Value::as_u64).unwrap_or(0);
    let rows = required_array(data, "rows", "purge")?;

    let mut lines = vec![format!(
        "Removed {removed} purchases without installments. {} remain.",
        rows.len()
    )];
    if !rows.is_empty() {
        lines.push(String::new());
        lines.extend(render_table(&RECORD_COLUMNS, &table_rows(rows)));
    }
    Ok(lines.join("\n"))
}

pub fn render_summary(data: &Value) -> io::Result<String> {
    let by_payer = required_array(data, "by_payer", "summary")?;
    let by_card = required_array(data, "by_card", "summary")?;
    let total = data
        .get("total")
        .and_then(|total| total.get("display"))
        .and_then(Value::as_str)
        .unwrap_or("0,00");

    let mut lines = vec!["By payer:".to_string()];
    lines.extend(render_entity_table("Payer", by_payer));
    lines.push(String::new());
    lines.push("By card:".to_string());
    lines.extend(render_entity_table("Card", by_card));
    lines.push(String::new());
    lines.push(format!("Total: R$ {total}"));
    Ok(lines.join("\n"))
}

fn render_entity_table(label: &str, entries: &[Value]) -> Vec<String> {
    if entries.is_empty() {
        return vec!["  (none)".to_string()];
    }

    let columns = [
        Column {
            name: label,
            align: Align::Left,
        },
        Column {
            name: "Purchases",
            align: Align::Right,
        },
        Column {
            name: "Total",
            align: Align::Right,
        },
    ];
    let rows = entries
        .iter()
        .map(|entry| {
            vec![
                text(entry, "name"),
                entry
                    .get("records")
                    .and_then(Value::as_u64)
                    .unwrap_or(0)
                    .to_string(),
                cardlog_client::view::format_grouped_amount(
                    entry.get("total").and_then(Value::as_f64).unwrap_or(0.0),
                ),
            ]
        })
        .collect::<Vec<Vec<String>>>();
    render_table(&columns, &rows)
}

fn table_rows(rows: &[Value]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| {
            let installment = match (
                row.pointer("/installment/current").and_then(Value::as_u64),
                row.pointer("/installment/total").and_then(Value::as_u64),
            ) {
                (Some(current), Some(total)) => format!("{current}/{total}"),
                _ => "-".to_string(),
            };
            vec![
                row.get("position")
                    .and_then(Value::as_u64)
                    .map(|position| position.to_string())
                    .unwrap_or_default(),
                text(row, "card"),
                text(row, "date"),
                text(row, "description"),
                text(row, "amount"),
                text(row, "payer"),
                text(row, "status"),
                installment,
            ]
        })
        .collect()
}

fn text(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string()
}

fn required_array<'a>(data: &'a Value, key: &str, command: &str) -> io::Result<&'a [Value]> {
    data.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .ok_or_else(|| io::Error::other(format!("{command} output requires {key}")))
}
