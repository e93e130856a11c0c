use crate::ClientResult;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{SummaryData, TotalView};
use crate::store::{RecordStore, load_sorted};
use crate::view::{aggregate_total, totals_by_card, totals_by_payer};

/// Per-payer and per-card sums under the same settled rule as `list`.
pub fn run<S: RecordStore + ?Sized>(
    store: &S,
    status_filter: Option<&str>,
) -> ClientResult<SuccessEnvelope> {
    let records = load_sorted(store)?;
    let records = match status_filter {
        Some(status) => records
            .into_iter()
            .filter(|record| record.status() == status)
            .collect(),
        None => records,
    };

    success(
        "summary",
        SummaryData {
            status_filter: status_filter.map(str::to_string),
            by_payer: totals_by_payer(&records, status_filter),
            by_card: totals_by_card(&records, status_filter),
            total: TotalView::new(aggregate_total(&records, status_filter)),
        },
    )
}
