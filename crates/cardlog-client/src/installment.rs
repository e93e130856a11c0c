//! Installment metadata lives in two places: the trailing `current`/`total`
//! attributes and a `(current/total)` marker inside the description. Older rows
//! only carry the marker, so reads accept both and writes always update both.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::record::{
    DESCRIPTION, INSTALLMENT_CURRENT, INSTALLMENT_FIELDS, INSTALLMENT_TOTAL, MIN_FIELDS, Record,
};

static MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\(\s*(\d+)\s*/\s*(\d+)\s*\)").expect("hardcoded regex should be valid")
});

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Installment {
    pub current: Option<u32>,
    pub total: Option<u32>,
}

impl Installment {
    pub const fn new(current: u32, total: u32) -> Self {
        Self {
            current: Some(current),
            total: Some(total),
        }
    }

    pub fn is_installment(&self) -> bool {
        self.pair().is_some()
    }

    /// `(current, total)` when both are known and the total is positive.
    pub fn pair(&self) -> Option<(u32, u32)> {
        match (self.current, self.total) {
            (Some(current), Some(total)) if total > 0 => Some((current, total)),
            _ => None,
        }
    }
}

pub fn extract(record: &Record) -> Installment {
    extract_fields(record.fields())
}

pub fn extract_fields(fields: &[String]) -> Installment {
    if fields.len() >= INSTALLMENT_FIELDS
        && let (Some(current), Some(total)) = (
            parse_digits(&fields[INSTALLMENT_CURRENT]),
            parse_digits(&fields[INSTALLMENT_TOTAL]),
        )
    {
        return Installment::new(current, total);
    }

    if fields.len() > DESCRIPTION
        && let Some((current, total)) = find_marker(&fields[DESCRIPTION])
    {
        return Installment::new(current, total);
    }

    Installment::default()
}

pub fn is_installment(record: &Record) -> bool {
    extract(record).is_installment()
}

/// Removes the first `(x/y)` marker and any trailing whitespace left behind.
pub fn strip_marker(description: &str) -> String {
    MARKER.replacen(description, 1, "").trim_end().to_string()
}

pub fn inject_marker(description: &str, current: u32, total: u32) -> String {
    let base = strip_marker(description);
    if base.is_empty() {
        return format!("({current}/{total})");
    }
    format!("{base} ({current}/{total})")
}

/// Writes `current`/`total` into both encodings of the record.
pub fn inject(record: &mut Record, current: u32, total: u32) {
    let fields = record.fields_mut();
    if fields.len() < MIN_FIELDS {
        fields.resize(MIN_FIELDS, String::new());
    }

    fields[DESCRIPTION] = inject_marker(&fields[DESCRIPTION], current, total);

    let current_text = current.to_string();
    let total_text = total.to_string();
    match fields.len() {
        MIN_FIELDS => {
            fields.push(current_text);
            fields.push(total_text);
        }
        7 => {
            fields[INSTALLMENT_CURRENT] = current_text;
            fields.push(total_text);
        }
        _ => {
            fields[INSTALLMENT_CURRENT] = current_text;
            fields[INSTALLMENT_TOTAL] = total_text;
        }
    }
}

fn parse_digits(value: &str) -> Option<u32> {
    if value.is_empty() || !value.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    value.parse::<u32>().ok()
}

fn find_marker(description: &str) -> Option<(u32, u32)> {
    let captures = MARKER.captures(description)?;
    let current = captures.get(1)?.as_str().parse::<u32>().ok()?;
    let total = captures.get(2)?.as_str().parse::<u32>().ok()?;
    Some((current, total))
}

#[cfg(test)]
mod tests {
    use super::{Installment, extract, inject, inject_marker, is_installment, strip_marker};
    use crate::record::Record;

    fn row(description: &str, trailing: &[&str]) -> Record {
        let mut fields = vec!["Visa", "10/01/2025", description, "100,00", "Ana", "Em Análise"];
        fields.extend_from_slice(trailing);
        Record::from_fields(fields)
    }

    #[test]
    fn reads_marker_from_description() {
        assert_eq!(extract(&row("Geladeira (2/10)", &[])), Installment::new(2, 10));
        assert_eq!(extract(&row("Sofa ( 3 /  12 )", &[])), Installment::new(3, 12));
    }

    #[test]
    fn trailing_attributes_win_over_disagreeing_marker() {
        let record = row("Geladeira (2/10)", &["5", "12"]);
        assert_eq!(extract(&record), Installment::new(5, 12));
    }

    #[test]
    fn empty_or_non_numeric_trailing_attributes_fall_back_to_marker() {
        assert_eq!(
            extract(&row("TV (1/3)", &["", ""])),
            Installment::new(1, 3)
        );
        assert_eq!(
            extract(&row("TV (1/3)", &["x", "4"])),
            Installment::new(1, 3)
        );
        assert_eq!(extract(&row("TV", &["-1", "4"])), Installment::default());
    }

    #[test]
    fn short_rows_still_read_description_marker() {
        let record = Record::from_fields(["Visa", "10/01/2025", "Notebook (4/6)"]);
        assert_eq!(extract(&record), Installment::new(4, 6));

        let tiny = Record::from_fields(["Visa", "10/01/2025"]);
        assert_eq!(extract(&tiny), Installment::default());
    }

    #[test]
    fn zero_total_and_missing_metadata_are_not_installments() {
        assert!(!is_installment(&row("Curso (0/0)", &[])));
        assert!(!is_installment(&row("Curso", &["1", "0"])));
        assert!(!is_installment(&row("Curso", &[])));
        assert!(!is_installment(&row("Curso (a/b)", &[])));
        assert!(is_installment(&row("Curso (1/1)", &[])));
    }

    #[test]
    fn only_first_marker_is_parsed_and_replaced() {
        let record = row("Kit (1/2) combo (7/9)", &[]);
        assert_eq!(extract(&record), Installment::new(1, 2));
        assert_eq!(
            inject_marker("Kit (1/2) combo (7/9)", 2, 2),
            "Kit  combo (7/9) (2/2)"
        );
    }

    #[test]
    fn marker_round_trips_through_extract_and_inject() {
        for description in ["Geladeira (2/10)", "Passagem aerea (11/12)", "(1/3)"] {
            let installment = extract(&row(description, &[]));
            let pair = installment.pair();
            assert!(pair.is_some());
            if let Some((current, total)) = pair {
                assert_eq!(inject_marker(description, current, total), description);
            }
        }
    }

    #[test]
    fn strip_marker_trims_trailing_whitespace() {
        assert_eq!(strip_marker("Geladeira   (2/10)"), "Geladeira");
        assert_eq!(strip_marker("Geladeira"), "Geladeira");
    }

    #[test]
    fn inject_appends_trailing_attributes_when_absent() {
        let mut record = row("Geladeira (2/10)", &[]);
        inject(&mut record, 3, 10);
        assert_eq!(record.description(), "Geladeira (3/10)");
        assert_eq!(record.fields().len(), 8);
        assert_eq!(record.fields()[6], "3");
        assert_eq!(record.fields()[7], "10");
    }

    #[test]
    fn inject_overwrites_existing_trailing_attributes() {
        let mut record = row("Geladeira", &["1", "10"]);
        inject(&mut record, 2, 10);
        assert_eq!(record.description(), "Geladeira (2/10)");
        assert_eq!(record.fields().len(), 8);
        assert_eq!(record.fields()[6], "2");

        let mut partial = row("Geladeira (1/10)", &["1"]);
        inject(&mut partial, 2, 10);
        assert_eq!(partial.fields()[6..], ["2".to_string(), "10".to_string()]);
    }
}
