use crate::contracts::types::RecordRow;
use crate::record::Record;
use crate::{ClientError, ClientResult};

/// Identifies one record in the date-sorted snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordTarget {
    /// 1-based position as shown by `list`.
    Position(usize),
    /// First record whose attributes equal these.
    Matching(Record),
}

impl RecordTarget {
    fn describe(&self) -> String {
        match self {
            Self::Position(position) => format!("position {position}"),
            Self::Matching(record) => format!("`{}`", record.fields().join(",")),
        }
    }
}

/// Index of the target in `records`. Malformed rows are never addressable.
pub(crate) fn locate(records: &[Record], target: &RecordTarget) -> ClientResult<usize> {
    let index = match target {
        RecordTarget::Position(position) => position
            .checked_sub(1)
            .filter(|index| *index < records.len()),
        RecordTarget::Matching(expected) => records.iter().position(|record| record == expected),
    };

    match index {
        Some(index) if records[index].is_well_formed() => Ok(index),
        _ => Err(ClientError::record_not_found(&target.describe())),
    }
}

/// Display rows for every well-formed record, keeping snapshot positions.
pub(crate) fn display_rows(records: &[Record]) -> Vec<RecordRow> {
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| record.is_well_formed())
        .map(|(index, record)| RecordRow::from_record(index + 1, record))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{RecordTarget, display_rows, locate};
    use crate::record::Record;

    fn records() -> Vec<Record> {
        vec![
            Record::from_fields(["Visa", "01/01/2025"]),
            Record::from_fields(["Visa", "02/01/2025", "Pão", "5", "Ana", "Em Análise"]),
        ]
    }

    #[test]
    fn positions_are_one_based_and_skip_malformed_rows() {
        let rows = records();
        assert_eq!(locate(&rows, &RecordTarget::Position(2)).ok(), Some(1));
        assert!(locate(&rows, &RecordTarget::Position(1)).is_err());
        assert!(locate(&rows, &RecordTarget::Position(0)).is_err());
        assert!(locate(&rows, &RecordTarget::Position(3)).is_err());
    }

    #[test]
    fn matching_target_finds_equal_record() {
        let rows = records();
        let target = RecordTarget::Matching(rows[1].clone());
        assert_eq!(locate(&rows, &target).ok(), Some(1));

        let missing = RecordTarget::Matching(Record::from_fields(["x"; 6]));
        let result = locate(&rows, &missing);
        assert!(result.is_err());
        if let Err(error) = result {
            assert_eq!(error.code, "record_not_found");
        }
    }

    #[test]
    fn display_rows_keep_snapshot_positions() {
        let rows = display_rows(&records());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].position, 2);
    }
}
