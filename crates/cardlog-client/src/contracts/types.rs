use serde::Serialize;

use crate::batch::AdvanceSummary;
use crate::installment;
use crate::record::Record;
use crate::view::{EntityTotal, Predicates, format_grouped_amount};

#[derive(Debug, Clone, Serialize)]
pub struct RecordRow {
    /// 1-based position in the date-sorted snapshot.
    pub position: usize,
    pub card: String,
    pub date: String,
    pub description: String,
    pub amount: String,
    pub payer: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installment: Option<InstallmentView>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct InstallmentView {
    pub current: u32,
    pub total: u32,
}

impl RecordRow {
    pub fn from_record(position: usize, record: &Record) -> Self {
        let installment = installment::extract(record)
            .pair()
            .map(|(current, total)| InstallmentView { current, total });
        Self {
            position,
            card: record.card().to_string(),
            date: record.date().to_string(),
            description: record.description().to_string(),
            amount: record.amount().to_string(),
            payer: record.payer().to_string(),
            status: record.status().to_string(),
            installment,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TotalView {
    pub amount: f64,
    pub display: String,
}

impl TotalView {
    pub fn new(amount: f64) -> Self {
        Self {
            amount,
            display: format_grouped_amount(amount),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EntryIssue {
    pub field: String,
    pub code: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListData {
    pub filters: Predicates,
    pub rows: Vec<RecordRow>,
    pub total: TotalView,
    pub skipped_rows: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecordData {
    pub message: String,
    pub record: RecordRow,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdvanceData {
    pub months: u32,
    pub summary: AdvanceSummary,
    pub rows: Vec<RecordRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PurgeData {
    pub removed: usize,
    pub rows: Vec<RecordRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryData {
    pub status_filter: Option<String>,
    pub by_payer: Vec<EntityTotal>,
    pub by_card: Vec<EntityTotal>,
    pub total: TotalView,
}
