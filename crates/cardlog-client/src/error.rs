use std::path::Path;

use serde_json::{Value, json};
use thiserror::Error;

use crate::contracts::types::EntryIssue;

pub(crate) const ADD_HELP_COMMAND: &str = "cardlog add --help";

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ClientError {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
    pub data: Option<Value>,
}

impl ClientError {
    pub fn new(code: &str, message: &str, recovery_steps: Vec<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            recovery_steps,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn invalid_argument_for_command(message: &str, command: Option<&str>) -> Self {
        let help_hint = match command {
            Some(cmd) => format!("Run `cardlog {cmd} --help` for usage."),
            None => "Run `cardlog --help` for usage.".to_string(),
        };
        let error = Self::new("invalid_argument", message, vec![help_hint]);
        if let Some(cmd) = command {
            return error.with_data(json!({
                "command_hint": cmd,
            }));
        }
        error
    }

    pub fn invalid_record_input(issues: Vec<EntryIssue>) -> Self {
        let issue_count = issues.len();
        Self::new(
            "invalid_record_input",
            &format!("Purchase entry has {issue_count} invalid fields. Nothing was written."),
            vec![
                "Fill in every required field: card, date, description, amount, payer, status."
                    .to_string(),
                "Use the dd/mm/yyyy date format.".to_string(),
                format!("Run `{ADD_HELP_COMMAND}` to review the accepted values."),
            ],
        )
        .with_data(json!({
            "issues": issues,
        }))
    }

    pub fn invalid_installment_input(current: &str, total: &str, detail: &str) -> Self {
        Self::new(
            "invalid_installment_input",
            &format!("Installment values `{current}` / `{total}` were rejected: {detail}"),
            vec![
                "Provide whole numbers for both the current installment and the total.".to_string(),
                "The current installment must not exceed the total, and the total must be above zero."
                    .to_string(),
            ],
        )
        .with_data(json!({
            "current": current,
            "total": total,
        }))
    }

    pub fn record_not_found(target: &str) -> Self {
        Self::new(
            "record_not_found",
            &format!("No purchase matches {target} in the current records."),
            vec![
                "Run `cardlog list` to see current record positions.".to_string(),
                "Retry with a position from the fresh listing.".to_string(),
            ],
        )
        .with_data(json!({
            "target": target,
        }))
    }

    pub fn confirmation_required(command: &str, detail: &str) -> Self {
        Self::new(
            "confirmation_required",
            &format!("`cardlog {command}` is irreversible: {detail}"),
            vec![format!("Rerun `cardlog {command}` with `--yes` to confirm.")],
        )
    }

    pub fn installment_out_of_range(description: &str, current: u32, total: u32) -> Self {
        Self::new(
            "installment_out_of_range",
            &format!(
                "Purchase `{description}` is at installment {current} of {total}. No records were changed."
            ),
            vec![
                "Edit the purchase so its current installment does not exceed the total."
                    .to_string(),
                "Then rerun `cardlog advance`.".to_string(),
            ],
        )
        .with_data(json!({
            "description": description,
            "current": current,
            "total": total,
        }))
    }

    pub fn internal_serialization(message: &str) -> Self {
        Self::new("internal_serialization_error", message, Vec::new())
    }

    pub fn store_permission_denied(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "store_permission_denied",
            &format!("Cannot access purchase file at `{location}`: {detail}"),
            vec![format!(
                "Grant access to `{location}` or set `CARDLOG_FILE` to a writable file."
            )],
        )
    }

    pub fn store_read_failed(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "store_read_failed",
            &format!("Reading purchase file `{location}` failed: {detail}"),
            vec![format!(
                "Check that `{location}` is a UTF-8 comma-delimited file."
            )],
        )
    }

    pub fn store_write_failed(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "store_write_failed",
            &format!("Writing purchase file `{location}` failed: {detail}"),
            Vec::new(),
        )
    }

    pub fn store_home_unresolved() -> Self {
        Self::new(
            "store_home_unresolved",
            "Could not resolve a home directory for the purchase file.",
            vec!["Pass `--file <path>` or set `CARDLOG_FILE`.".to_string()],
        )
    }

    pub fn is_internal(&self) -> bool {
        self.code.starts_with("internal_")
            || matches!(
                self.code.as_str(),
                "store_read_failed"
                    | "store_write_failed"
                    | "store_permission_denied"
                    | "store_home_unresolved"
            )
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::ClientError;

    #[test]
    fn store_errors_are_internal() {
        let error = ClientError::store_write_failed(std::path::Path::new("/tmp/x.csv"), "disk full");
        assert!(error.is_internal());
        assert!(!ClientError::record_not_found("position 3").is_internal());
    }

    #[test]
    fn invalid_argument_for_command_carries_hint() {
        let error = ClientError::invalid_argument_for_command("bad months", Some("advance"));
        assert_eq!(error.code, "invalid_argument");
        assert_eq!(
            error.recovery_steps,
            vec!["Run `cardlog advance --help` for usage.".to_string()]
        );
        assert_eq!(
            error.data.and_then(|data| data["command_hint"].as_str().map(str::to_string)),
            Some("advance".to_string())
        );
    }
}
