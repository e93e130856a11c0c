use cardlog_client::commands::common::RecordTarget;
use cardlog_client::commands::{add, advance, delete, edit, list, purge, summary};
use cardlog_client::entry::{InstallmentInput, NewPurchase, RecordChanges};
use cardlog_client::state::resolve_store_path;
use cardlog_client::view::Predicates;
use cardlog_client::{ClientResult, CsvFileStore, SuccessEnvelope};

use crate::cli::{Cli, Commands};

pub fn dispatch(cli: &Cli) -> ClientResult<SuccessEnvelope> {
    let path = resolve_store_path(cli.file.as_deref())?;
    tracing::debug!(path = %path.display(), "using purchase file");
    let store = CsvFileStore::new(path);

    match &cli.command {
        Commands::Add {
            card,
            date,
            description,
            amount,
            payer,
            status,
            current,
            total,
            json: _,
        } => add::run(
            &store,
            NewPurchase {
                card: card.clone(),
                date: date.clone(),
                description: description.clone(),
                amount: amount.clone(),
                payer: payer.clone(),
                status: status.clone(),
                installment: installment_input(current.as_deref(), total.as_deref()),
            },
        ),
        Commands::List {
            payer,
            card,
            date,
            status,
            installments,
            json: _,
        } => list::run(
            &store,
            Predicates {
                payer: payer.clone(),
                card: card.clone(),
                date: date.clone(),
                status: status.clone(),
                installment_only: *installments,
            },
        ),
        Commands::Edit {
            position,
            card,
            date,
            description,
            amount,
            payer,
            status,
            current,
            total,
            json: _,
        } => edit::run(
            &store,
            &RecordTarget::Position(*position),
            &RecordChanges {
                card: card.clone(),
                date: date.clone(),
                description: description.clone(),
                amount: amount.clone(),
                payer: payer.clone(),
                status: status.clone(),
                installment: installment_input(current.as_deref(), total.as_deref()),
            },
        ),
        Commands::Delete { position, yes, .. } => {
            delete::run(&store, &RecordTarget::Position(*position), *yes)
        }
        Commands::Advance { months, .. } => advance::run(&store, *months),
        Commands::Purge { yes, .. } => purge::run(&store, *yes),
        Commands::Summary { status, .. } => summary::run(&store, status.as_deref()),
    }
}

fn installment_input(current: Option<&str>, total: Option<&str>) -> Option<InstallmentInput> {
    match (current, total) {
        (Some(current), Some(total)) => Some(InstallmentInput {
            current: current.to_string(),
            total: total.to_string(),
        }),
        _ => None,
    }
}
