mod bootstrap_helpers;
mod event_source;
mod startup_config;
mod workflow_commands;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, error, info};
use triage_cli::Cli;
use triage_github_issues::issue_event::EventDisposition;
use triage_github_issues::triage_decision::TriageOutcome;
use triage_github_issues_runtime::run_issue_triage;

use crate::bootstrap_helpers::init_tracing;
use crate::event_source::load_triage_event;
use crate::startup_config::build_runtime_config;
use crate::workflow_commands::render_error_command;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let outcome = match run(&cli).await {
        Ok(outcome) => outcome,
        Err(error) => TriageOutcome::Failed {
            detail: format!("{error:#}"),
        },
    };
    match outcome {
        TriageOutcome::Succeeded => ExitCode::SUCCESS,
        TriageOutcome::Failed { detail } => {
            error!("triage failed: {detail}");
            println!("{}", render_error_command(&detail));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> Result<TriageOutcome> {
    debug!(
        event_name = %cli.event_name,
        event_path = %cli.event_path.display(),
        only_if_label = cli.only_if_label.as_deref().unwrap_or_default(),
        ignore_label = cli.ignore_label.as_deref().unwrap_or_default(),
        message = %cli.message,
        raise_support_using_form_msg = %cli.raise_support_using_form_msg,
        "loaded action inputs"
    );

    let event = match load_triage_event(&cli.event_name, &cli.event_path, cli.repository.clone())? {
        EventDisposition::Triage(event) => event,
        EventDisposition::Ignored { reason } => {
            info!("nothing to triage: {reason}");
            return Ok(TriageOutcome::Succeeded);
        }
    };
    run_issue_triage(&build_runtime_config(cli), &event).await
}
