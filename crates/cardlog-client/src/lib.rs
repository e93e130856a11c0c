pub mod batch;
pub mod commands;
pub mod contracts;
pub mod entry;
pub mod error;
pub mod installment;
pub mod record;
pub mod state;
pub mod store;
pub mod view;

pub use contracts::envelope::{FailureEnvelope, SuccessEnvelope};
pub use error::{ClientError, ClientResult};
pub use record::{Record, Status};
pub use store::{CsvFileStore, MemoryStore, RecordStore};

pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");
