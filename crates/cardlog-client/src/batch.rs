use serde::Serialize;

use crate::installment::{self, Installment};
use crate::record::Record;
use crate::{ClientError, ClientResult};

/// Outcome of advancing one installment record by a single period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Updated(Record),
    /// The last installment was already paid; the record leaves the set.
    Completed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AdvanceSummary {
    pub advanced: usize,
    pub removed: usize,
    pub plain: usize,
    pub skipped: usize,
}

impl AdvanceSummary {
    fn absorb(&mut self, pass: AdvanceSummary) {
        self.advanced += pass.advanced;
        self.removed += pass.removed;
        self.plain = pass.plain;
        self.skipped = pass.skipped;
    }
}

pub fn advance_installment(record: &Record, installment: Installment) -> ClientResult<Transition> {
    let Some((current, total)) = installment.pair() else {
        return Ok(Transition::Updated(record.clone()));
    };

    if current > total {
        return Err(ClientError::installment_out_of_range(
            record.description(),
            current,
            total,
        ));
    }
    if current == total {
        return Ok(Transition::Completed);
    }

    let mut next = record.clone();
    installment::inject(&mut next, current + 1, total);
    Ok(Transition::Updated(next))
}

/// Moves every installment record one period forward.
///
/// The whole set is transformed before anything is returned, so a single bad
/// record fails the call and the caller has nothing partial to write.
pub fn advance_all(records: &[Record]) -> ClientResult<(Vec<Record>, AdvanceSummary)> {
    let mut summary = AdvanceSummary::default();
    let mut next = Vec::with_capacity(records.len());

    for record in records {
        if !record.is_well_formed() {
            summary.skipped += 1;
            next.push(record.clone());
            continue;
        }

        let installment = installment::extract(record);
        if !installment.is_installment() {
            summary.plain += 1;
            next.push(record.clone());
            continue;
        }

        match advance_installment(record, installment)? {
            Transition::Updated(updated) => {
                summary.advanced += 1;
                next.push(updated);
            }
            Transition::Completed => summary.removed += 1,
        }
    }

    Ok((next, summary))
}

/// Runs the single-period advance `months` times.
pub fn advance_all_by(
    records: &[Record],
    months: u32,
) -> ClientResult<(Vec<Record>, AdvanceSummary)> {
    if months == 0 {
        return Err(ClientError::invalid_argument_for_command(
            "months must be at least 1.",
            Some("advance"),
        ));
    }

    let mut current = records.to_vec();
    let mut summary = AdvanceSummary::default();
    for _ in 0..months {
        let (next, pass) = advance_all(&current)?;
        summary.absorb(pass);
        current = next;
    }

    Ok((current, summary))
}

/// Drops every well-formed record that is not an installment record.
/// Malformed rows are kept as they are and never counted as removed.
pub fn purge_plain(records: &[Record]) -> (Vec<Record>, usize) {
    let kept = records
        .iter()
        .filter(|record| !record.is_well_formed() || installment::is_installment(record))
        .cloned()
        .collect::<Vec<Record>>();
    let removed = records.len() - kept.len();
    (kept, removed)
}
