use std::collections::BTreeMap;

use num_format::{Locale, ToFormattedString};
use serde::Serialize;

use crate::installment;
use crate::record::{Record, Status};

/// Listing predicates. Absent or empty values match everything; the rest are
/// combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Predicates {
    pub payer: Option<String>,
    pub card: Option<String>,
    pub date: Option<String>,
    pub status: Option<String>,
    pub installment_only: bool,
}

impl Predicates {
    pub fn status_filter(&self) -> Option<&str> {
        active(&self.status)
    }

    pub fn matches(&self, record: &Record) -> bool {
        if !record.is_well_formed() {
            return false;
        }
        if let Some(payer) = active(&self.payer)
            && !contains_ignore_case(record.payer(), payer)
        {
            return false;
        }
        if let Some(card) = active(&self.card)
            && !contains_ignore_case(record.card(), card)
        {
            return false;
        }
        if let Some(date) = active(&self.date)
            && !record.date().contains(date)
        {
            return false;
        }
        if let Some(status) = active(&self.status)
            && record.status() != status
        {
            return false;
        }
        if self.installment_only && !installment::is_installment(record) {
            return false;
        }
        true
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilteredView {
    pub records: Vec<Record>,
    /// Index of each selected record in the input slice.
    pub positions: Vec<usize>,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityTotal {
    pub name: String,
    pub records: usize,
    pub total: f64,
}

pub fn filter(records: &[Record], predicates: &Predicates) -> Vec<Record> {
    records
        .iter()
        .filter(|record| predicates.matches(record))
        .cloned()
        .collect()
}

/// Settled purchases stay out of the total unless the caller is explicitly
/// looking at settled purchases only.
pub fn include_in_total(record: &Record, status_filter: Option<&str>) -> bool {
    let settled = Status::Settled.label();
    record.status() != settled || status_filter == Some(settled)
}

pub fn aggregate_total(records: &[Record], status_filter: Option<&str>) -> f64 {
    let sum = records
        .iter()
        .filter(|record| record.is_well_formed() && include_in_total(record, status_filter))
        .map(amount_or_zero)
        .sum::<f64>();
    round_cents(sum)
}

/// Filters and totals in one pass, using the status predicate as the total's
/// status filter.
pub fn view(records: &[Record], predicates: &Predicates) -> FilteredView {
    let status_filter = predicates.status_filter();
    let mut selected = Vec::new();
    let mut positions = Vec::new();
    let mut sum = 0.0;

    for (index, record) in records.iter().enumerate() {
        if !predicates.matches(record) {
            continue;
        }
        if include_in_total(record, status_filter) {
            sum += amount_or_zero(record);
        }
        selected.push(record.clone());
        positions.push(index);
    }

    FilteredView {
        records: selected,
        positions,
        total: round_cents(sum),
    }
}

pub fn totals_by_payer(records: &[Record], status_filter: Option<&str>) -> Vec<EntityTotal> {
    totals_by(records, status_filter, Record::payer)
}

pub fn totals_by_card(records: &[Record], status_filter: Option<&str>) -> Vec<EntityTotal> {
    totals_by(records, status_filter, Record::card)
}

fn totals_by(
    records: &[Record],
    status_filter: Option<&str>,
    key: fn(&Record) -> &str,
) -> Vec<EntityTotal> {
    let mut grouped: BTreeMap<String, (usize, f64)> = BTreeMap::new();
    for record in records {
        if !record.is_well_formed() || !include_in_total(record, status_filter) {
            continue;
        }
        let entry = grouped.entry(key(record).trim().to_string()).or_default();
        entry.0 += 1;
        entry.1 += amount_or_zero(record);
    }

    grouped
        .into_iter()
        .map(|(name, (count, sum))| EntityTotal {
            name,
            records: count,
            total: round_cents(sum),
        })
        .collect()
}

/// Accepts `,` or `.` as the fractional separator.
pub fn parse_amount(value: &str) -> Option<f64> {
    let normalized = value.trim().replace(',', ".");
    let parsed = normalized.parse::<f64>().ok()?;
    parsed.is_finite().then_some(parsed)
}

/// `1234.5` renders as `1.234,50`.
pub fn format_grouped_amount(amount: f64) -> String {
    let cents = (amount * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let magnitude = cents.unsigned_abs();
    let whole = (magnitude / 100).to_formatted_string(&Locale::de);
    format!("{sign}{whole},{:02}", magnitude % 100)
}

fn amount_or_zero(record: &Record) -> f64 {
    match parse_amount(record.amount()) {
        Some(amount) => amount,
        None => {
            tracing::debug!(amount = record.amount(), "unparseable amount counted as zero");
            0.0
        }
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn active(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|candidate| !candidate.is_empty())
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
