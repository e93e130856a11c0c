use std::cell::RefCell;
use std::fs::{self, File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::record::Record;
use crate::state::{StoreAccess, ensure_parent_directory, map_io_error};
use crate::{ClientError, ClientResult};

/// Whole-set persistence for purchase records.
///
/// There is no locking: every mutation is a full load, transform and rewrite,
/// so two interleaved writers can lose updates.
pub trait RecordStore {
    /// Every stored row in file order, malformed rows included.
    fn load(&self) -> ClientResult<Vec<Record>>;

    /// Replaces the stored set with `records`.
    fn rewrite(&self, records: &[Record]) -> ClientResult<()>;

    /// Adds one row without reading the rest of the set.
    fn append(&self, record: &Record) -> ClientResult<()>;
}

/// Loads every record ordered by purchase date.
///
/// Rows whose date does not parse sort first instead of being dropped. The
/// sort is stable, so rows on the same date keep their file order.
pub fn load_sorted<S: RecordStore + ?Sized>(store: &S) -> ClientResult<Vec<Record>> {
    let mut records = store.load()?;
    records.sort_by_key(sort_date);

    let malformed = records
        .iter()
        .filter(|record| !record.is_well_formed())
        .count();
    if malformed > 0 {
        tracing::warn!(malformed, "skipping rows with fewer than six fields");
    }
    tracing::debug!(records = records.len(), "loaded purchase records");

    Ok(records)
}

fn sort_date(record: &Record) -> NaiveDate {
    record.parsed_date().unwrap_or(NaiveDate::MIN)
}

/// Comma-delimited backing file without a header row.
#[derive(Debug, Clone)]
pub struct CsvFileStore {
    path: PathBuf,
}

impl CsvFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|value| value.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl RecordStore for CsvFileStore {
    fn load(&self) -> ClientResult<Vec<Record>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "purchase file missing, starting empty");
                return Ok(Vec::new());
            }
            Err(error) => return Err(map_io_error(&self.path, &error, StoreAccess::Read)),
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(file);

        let mut records = Vec::new();
        for row in reader.byte_records() {
            let row =
                row.map_err(|error| ClientError::store_read_failed(&self.path, &error.to_string()))?;
            records.push(decode_row(row));
        }

        Ok(records)
    }

    fn rewrite(&self, records: &[Record]) -> ClientResult<()> {
        ensure_parent_directory(&self.path)?;

        let staging = self.staging_path();
        let file = File::create(&staging)
            .map_err(|error| map_io_error(&staging, &error, StoreAccess::Write))?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_writer(file);

        for record in records {
            writer
                .write_record(record.fields())
                .map_err(|error| ClientError::store_write_failed(&staging, &error.to_string()))?;
        }
        writer
            .flush()
            .map_err(|error| map_io_error(&staging, &error, StoreAccess::Write))?;
        drop(writer);

        fs::rename(&staging, &self.path)
            .map_err(|error| map_io_error(&self.path, &error, StoreAccess::Write))?;
        tracing::debug!(records = records.len(), path = %self.path.display(), "rewrote purchase file");
        Ok(())
    }

    fn append(&self, record: &Record) -> ClientResult<()> {
        ensure_parent_directory(&self.path)?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|error| map_io_error(&self.path, &error, StoreAccess::Write))?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_writer(file);

        writer
            .write_record(record.fields())
            .map_err(|error| ClientError::store_write_failed(&self.path, &error.to_string()))?;
        writer
            .flush()
            .map_err(|error| map_io_error(&self.path, &error, StoreAccess::Write))
    }
}

/// Rows that are not UTF-8 are read as Latin-1, which maps every byte to a
/// char, so one legacy row never hides the rest of the file and a later
/// rewrite keeps its content.
fn decode_row(row: csv::ByteRecord) -> Record {
    let line = row.position().map(csv::Position::line).unwrap_or_default();
    match csv::StringRecord::from_byte_record(row) {
        Ok(decoded) => Record::from_fields(decoded.iter()),
        Err(error) => {
            tracing::warn!(line, "purchase row is not valid UTF-8, reading it as Latin-1");
            Record::from_fields(
                error
                    .into_byte_record()
                    .iter()
                    .map(|field| field.iter().copied().map(char::from).collect::<String>()),
            )
        }
    }
}

/// In-memory store for embedding and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RefCell<Vec<Record>>,
}

impl MemoryStore {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records: RefCell::new(records),
        }
    }

    pub fn snapshot(&self) -> Vec<Record> {
        self.records.borrow().clone()
    }
}

impl RecordStore for MemoryStore {
    fn load(&self) -> ClientResult<Vec<Record>> {
        Ok(self.snapshot())
    }

    fn rewrite(&self, records: &[Record]) -> ClientResult<()> {
        *self.records.borrow_mut() = records.to_vec();
        Ok(())
    }

    fn append(&self, record: &Record) -> ClientResult<()> {
        self.records.borrow_mut().push(record.clone());
        Ok(())
    }
}
