mod cli;
mod dispatch;
mod output;

use std::process::ExitCode;

use cardlog_client::ClientError;
use clap::{Parser, error::ErrorKind};
use output::write_stdout_line;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "CARDLOG_LOG";

const ROOT_HELP: &str = "cardlog - credit card purchase and installment tracker

Usage:
  cardlog <command>

Start here:
  cardlog add --help                 Record a purchase, optionally in installments
  cardlog list                       Purchases by date with the running total
  cardlog summary                    Totals per payer and per card

Monthly upkeep:
  cardlog advance                    Move every installment one month forward
  cardlog purge --yes                Drop purchases without installments

Run `cardlog <command> --help` for command usage.
";

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(code) => code,
    }
}

fn run() -> Result<ExitCode, ExitCode> {
    let raw_args = std::env::args().collect::<Vec<String>>();
    if raw_args.len() == 1 {
        if write_stdout_line(ROOT_HELP.trim_end()).is_err() {
            return Err(ExitCode::from(2));
        }
        return Ok(ExitCode::SUCCESS);
    }

    let cli = match cli::Cli::try_parse() {
        Ok(value) => value,
        Err(err) => {
            if matches!(
                err.kind(),
                ErrorKind::DisplayHelp
                    | ErrorKind::DisplayVersion
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) {
                if write_stdout_line(err.to_string().trim_end()).is_err() {
                    return Err(ExitCode::from(2));
                }
                return Ok(ExitCode::SUCCESS);
            }

            let command_hint = command_from_args(&raw_args);
            let clean_message = strip_clap_boilerplate(&err.to_string());
            let parse_error =
                ClientError::invalid_argument_for_command(&clean_message, command_hint.as_deref());
            let mode = infer_requested_output_mode(&raw_args);
            if output::print_failure(&parse_error, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            return Err(ExitCode::from(1));
        }
    };

    init_logging(cli.verbose);
    let mode = output::mode_for_command(&cli.command);

    match dispatch::dispatch(&cli) {
        Ok(success) => {
            if output::print_success(&success, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            tracing::debug!(code = %error.code, "command failed");
            if output::print_failure(&error, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Err(exit_code_for_error(&error))
        }
    }
}

/// Logs go to stderr so stdout stays clean for `--json` consumers.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Strips clap's trailing boilerplate (Usage line, "For more information" hint)
/// so our recovery steps are the single source of guidance.
fn strip_clap_boilerplate(message: &str) -> String {
    let trimmed = if let Some(pos) = message.find("\n\nUsage:") {
        &message[..pos]
    } else if let Some(pos) = message.find("\nFor more information") {
        &message[..pos]
    } else {
        message
    };
    trimmed.trim_end().to_string()
}

fn command_from_args(raw_args: &[String]) -> Option<String> {
    raw_args
        .iter()
        .skip(1)
        .find(|value| !value.starts_with('-'))
        .filter(|value| {
            matches!(
                value.as_str(),
                "add" | "list" | "edit" | "delete" | "advance" | "purge" | "summary"
            )
        })
        .cloned()
}

fn exit_code_for_error(error: &ClientError) -> ExitCode {
    if error.is_internal() {
        ExitCode::from(2)
    } else {
        ExitCode::from(1)
    }
}

fn infer_requested_output_mode(raw_args: &[String]) -> output::OutputMode {
    if raw_args.iter().skip(1).any(|value| value == "--json") {
        return output::OutputMode::Json;
    }
    output::OutputMode::Text
}

#[cfg(test)]
mod tests {
    use super::{command_from_args, infer_requested_output_mode, strip_clap_boilerplate};
    use crate::output::OutputMode;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn strips_usage_tail() {
        let message = "error: unexpected argument '--nope' found\n\nUsage: cardlog list [OPTIONS]\n\nFor more information, try '--help'.\n";
        assert_eq!(
            strip_clap_boilerplate(message),
            "error: unexpected argument '--nope' found"
        );
    }

    #[test]
    fn command_hint_only_names_known_commands() {
        assert_eq!(
            command_from_args(&args(&["cardlog", "--verbose", "edit", "3"])),
            Some("edit".to_string())
        );
        assert_eq!(command_from_args(&args(&["cardlog", "frobnicate"])), None);
    }

    #[test]
    fn json_flag_selects_json_for_parse_errors() {
        assert_eq!(
            infer_requested_output_mode(&args(&["cardlog", "list", "--bogus", "--json"])),
            OutputMode::Json
        );
        assert_eq!(
            infer_requested_output_mode(&args(&["cardlog", "list"])),
            OutputMode::Text
        );
    }
}
