use chrono::NaiveDate;

use crate::contracts::types::EntryIssue;
use crate::installment;
use crate::record::{AMOUNT, CARD, DATE, DATE_FORMAT, DESCRIPTION, PAYER, Record, STATUS, Status};
use crate::view::parse_amount;
use crate::{ClientError, ClientResult};

/// Raw installment values as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallmentInput {
    pub current: String,
    pub total: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewPurchase {
    pub card: String,
    pub date: String,
    pub description: String,
    pub amount: String,
    pub payer: String,
    pub status: String,
    pub installment: Option<InstallmentInput>,
}

/// Field replacements for an existing record; `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordChanges {
    pub card: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
    pub amount: Option<String>,
    pub payer: Option<String>,
    pub status: Option<String>,
    pub installment: Option<InstallmentInput>,
}

impl RecordChanges {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Validates a new purchase and builds its stored record. Nothing partial is
/// returned: any field issue rejects the whole entry.
pub fn build_record(input: NewPurchase) -> ClientResult<Record> {
    let mut issues = Vec::new();

    let card = validate_required("card", &input.card, &mut issues);
    let date = validate_date(&input.date, &mut issues);
    let description = validate_required("description", &input.description, &mut issues);
    let amount = validate_amount(&input.amount, &mut issues);
    let payer = validate_required("payer", &input.payer, &mut issues);
    let status = validate_status(&input.status, &mut issues);

    if !issues.is_empty() {
        return Err(ClientError::invalid_record_input(issues));
    }

    let installment = match &input.installment {
        Some(raw) => Some(validate_installment(raw)?),
        None => None,
    };

    let mut record = Record::from_fields([
        card.unwrap_or_default(),
        date.unwrap_or_default(),
        description.unwrap_or_default(),
        amount.unwrap_or_default(),
        payer.unwrap_or_default(),
        status.map(Status::label).unwrap_or_default().to_string(),
    ]);
    if let Some((current, total)) = installment {
        installment::inject(&mut record, current, total);
    }

    Ok(record)
}

/// Applies validated changes to a copy of `record`.
///
/// A changed description keeps the record's installment marker, so both
/// encodings still agree after the edit.
pub fn apply_changes(record: &Record, changes: &RecordChanges) -> ClientResult<Record> {
    let mut issues = Vec::new();
    let mut next = record.clone();

    if let Some(value) = &changes.card
        && let Some(card) = validate_required("card", value, &mut issues)
    {
        next.set(CARD, card);
    }
    if let Some(value) = &changes.date
        && let Some(date) = validate_date(value, &mut issues)
    {
        next.set(DATE, date);
    }
    if let Some(value) = &changes.description
        && let Some(description) = validate_required("description", value, &mut issues)
    {
        next.set(DESCRIPTION, description);
    }
    if let Some(value) = &changes.amount
        && let Some(amount) = validate_amount(value, &mut issues)
    {
        next.set(AMOUNT, amount);
    }
    if let Some(value) = &changes.payer
        && let Some(payer) = validate_required("payer", value, &mut issues)
    {
        next.set(PAYER, payer);
    }
    if let Some(value) = &changes.status
        && let Some(status) = validate_status(value, &mut issues)
    {
        next.set(STATUS, status.label().to_string());
    }

    if !issues.is_empty() {
        return Err(ClientError::invalid_record_input(issues));
    }

    let target = match &changes.installment {
        Some(raw) => validate_installment(raw).map(Some)?,
        None => installment::extract(record).pair(),
    };
    if let Some((current, total)) = target {
        installment::inject(&mut next, current, total);
    }

    Ok(next)
}

pub fn validate_installment(input: &InstallmentInput) -> ClientResult<(u32, u32)> {
    let current_raw = input.current.trim();
    let total_raw = input.total.trim();

    let (Some(current), Some(total)) = (parse_count(current_raw), parse_count(total_raw)) else {
        return Err(ClientError::invalid_installment_input(
            current_raw,
            total_raw,
            "both values must be whole numbers.",
        ));
    };
    if total == 0 {
        return Err(ClientError::invalid_installment_input(
            current_raw,
            total_raw,
            "the total must be above zero.",
        ));
    }
    if current > total {
        return Err(ClientError::invalid_installment_input(
            current_raw,
            total_raw,
            "the current installment exceeds the total.",
        ));
    }

    Ok((current, total))
}

fn parse_count(value: &str) -> Option<u32> {
    if value.is_empty() || !value.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    value.parse::<u32>().ok()
}

fn validate_required(field: &str, value: &str, issues: &mut Vec<EntryIssue>) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        issues.push(EntryIssue {
            field: field.to_string(),
            code: "missing_required_field".to_string(),
            description: format!("{field} must be present and non-empty."),
            expected: Some("non-empty text".to_string()),
            received: Some(String::new()),
        });
        return None;
    }
    Some(trimmed.to_string())
}

fn validate_date(value: &str, issues: &mut Vec<EntryIssue>) -> Option<String> {
    let candidate = validate_required("date", value, issues)?;
    if NaiveDate::parse_from_str(&candidate, DATE_FORMAT).is_err() {
        issues.push(EntryIssue {
            field: "date".to_string(),
            code: "invalid_date".to_string(),
            description: format!("date must be dd/mm/yyyy; got \"{candidate}\""),
            expected: Some("dd/mm/yyyy".to_string()),
            received: Some(candidate),
        });
        return None;
    }
    Some(candidate)
}

fn validate_amount(value: &str, issues: &mut Vec<EntryIssue>) -> Option<String> {
    let candidate = validate_required("amount", value, issues)?;
    if parse_amount(&candidate).is_none() {
        issues.push(EntryIssue {
            field: "amount".to_string(),
            code: "invalid_number".to_string(),
            description: format!("amount must be numeric; got \"{candidate}\""),
            expected: Some("number (e.g. 42,15 or 42.15)".to_string()),
            received: Some(candidate),
        });
        return None;
    }
    Some(candidate)
}

fn validate_status(value: &str, issues: &mut Vec<EntryIssue>) -> Option<Status> {
    let candidate = validate_required("status", value, issues)?;
    let parsed = Status::parse(&candidate);
    if parsed.is_none() {
        let accepted = Status::ALL
            .iter()
            .map(|status| status.key())
            .collect::<Vec<&str>>()
            .join(", ");
        issues.push(EntryIssue {
            field: "status".to_string(),
            code: "unknown_status".to_string(),
            description: format!("status \"{candidate}\" is not a known situation."),
            expected: Some(accepted),
            received: Some(candidate),
        });
    }
    parsed
}
