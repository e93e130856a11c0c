use std::path::PathBuf;

use cardlog_client::Status;
use cardlog_client::record::DATE_FORMAT;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

pub fn parse_purchase_date(value: &str) -> Result<String, String> {
    let trimmed = value.trim();
    if NaiveDate::parse_from_str(trimmed, DATE_FORMAT).is_err() {
        return Err("date must use dd/mm/yyyy format".to_string());
    }
    Ok(trimmed.to_string())
}

/// Accepts a status key (`settled`) or its stored label and yields the label.
pub fn parse_status_label(value: &str) -> Result<String, String> {
    match Status::parse(value) {
        Some(status) => Ok(status.label().to_string()),
        None => Err(format!("status must be one of: {}", status_keys())),
    }
}

fn status_keys() -> String {
    Status::ALL
        .iter()
        .map(|status| status.key())
        .collect::<Vec<&str>>()
        .join(", ")
}

pub const ADD_AFTER_HELP: &str = "\
Fields:
  card         Card used for the purchase (e.g. `Visa final 1234`)
  date         Purchase date, exactly dd/mm/yyyy
  description  Free text; an installment marker `(current/total)` is added for you
  amount       Decimal with `,` or `.` as the fractional separator (e.g. 129,90)
  payer        Person responsible for the purchase
  status       One of: awaiting-proof, invoice-attached, under-review, improper,
               approved, disputed, settled

Installments:
  Pass both --current and --total for a purchase split into payments.
  The pair is written to the description marker and to two trailing columns.

Example:
  cardlog add Visa 05/03/2025 Geladeira 3500,00 Ana approved --current 1 --total 10
";

#[derive(Debug, Parser)]
#[command(
    name = "cardlog",
    version,
    about = "credit card purchase and installment tracker",
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Purchase file (default: $CARDLOG_FILE, then ~/.cardlog/purchases.csv)
    #[arg(long, global = true)]
    pub file: Option<PathBuf>,
    /// Print debug logs to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Record a new purchase
    #[command(after_help = ADD_AFTER_HELP)]
    Add {
        card: String,
        #[arg(value_parser = parse_purchase_date)]
        date: String,
        description: String,
        amount: String,
        payer: String,
        #[arg(value_parser = parse_status_label)]
        status: String,
        /// Current installment number
        #[arg(long, requires = "total")]
        current: Option<String>,
        /// Total number of installments
        #[arg(long, requires = "current")]
        total: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// List purchases ordered by date, with the running total
    List {
        /// Payer substring (case-insensitive)
        #[arg(long)]
        payer: Option<String>,
        /// Card substring (case-insensitive)
        #[arg(long)]
        card: Option<String>,
        /// Date substring, e.g. `/03/2025`
        #[arg(long)]
        date: Option<String>,
        /// Exact status
        #[arg(long, value_parser = parse_status_label)]
        status: Option<String>,
        /// Only installment purchases
        #[arg(long)]
        installments: bool,
        #[arg(long)]
        json: bool,
    },
    /// Change fields of the purchase at a listed position
    #[command(arg_required_else_help = true)]
    Edit {
        /// Position shown by `cardlog list`
        position: usize,
        #[arg(long)]
        card: Option<String>,
        #[arg(long, value_parser = parse_purchase_date)]
        date: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        amount: Option<String>,
        #[arg(long)]
        payer: Option<String>,
        #[arg(long, value_parser = parse_status_label)]
        status: Option<String>,
        #[arg(long, requires = "total")]
        current: Option<String>,
        #[arg(long, requires = "current")]
        total: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Delete the purchase at a listed position
    #[command(arg_required_else_help = true)]
    Delete {
        position: usize,
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
        #[arg(long)]
        json: bool,
    },
    /// Move every installment purchase forward; fully paid ones are removed
    Advance {
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        months: u32,
        #[arg(long)]
        json: bool,
    },
    /// Delete every purchase without installments
    Purge {
        /// Confirm the purge
        #[arg(long)]
        yes: bool,
        #[arg(long)]
        json: bool,
    },
    /// Totals per payer and per card
    Summary {
        #[arg(long, value_parser = parse_status_label)]
        status: Option<String>,
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
pub fn parse_from<I, T>(itr: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(itr)
}
