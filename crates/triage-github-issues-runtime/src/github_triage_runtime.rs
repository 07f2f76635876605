//! Per-event issue triage: gate, directive or membership routing, dispatch.

use anyhow::{Context, Result};
use tracing::{debug, info, warn};
use triage_github_issues::issue_event::TriageEvent;
use triage_github_issues::issue_filter::{evaluate_issue_gate, IssueGateConfig};
use triage_github_issues::label_directive::extract_label_directive;
use triage_github_issues::label_reconciliation::{
    decide_for_directive, reconcile_labels, RepositoryLabelSet, SUPPORT_LABEL,
};
use triage_github_issues::membership_routing::{
    classify_membership_signal, decide_for_membership, MembershipStatus,
};
use triage_github_issues::triage_decision::{FailureReport, TriageDecision, TriageOutcome};

mod action_dispatcher;
mod github_api_client;
mod github_transport_helpers;
mod issue_tracker;

use action_dispatcher::dispatch_triage_decision;
pub use github_api_client::GithubApiClient;
pub use issue_tracker::IssueTracker;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Messages and gate rules applied to every triaged issue.
pub struct TriageSettings {
    pub welcome_message: String,
    pub raise_support_using_form_msg: String,
    pub gate: IssueGateConfig,
}

#[derive(Debug, Clone)]
/// Transport and triage configuration for one invocation.
pub struct GithubTriageRuntimeConfig {
    pub api_base: String,
    pub token: String,
    pub request_timeout_ms: u64,
    pub retry_max_attempts: usize,
    pub retry_base_delay_ms: u64,
    pub settings: TriageSettings,
}

/// Builds a GitHub client for the event's repository and triages the issue.
pub async fn run_issue_triage(
    config: &GithubTriageRuntimeConfig,
    event: &TriageEvent,
) -> Result<TriageOutcome> {
    let client = GithubApiClient::new(
        config.api_base.clone(),
        config.token.clone(),
        event.repo.clone(),
        config.request_timeout_ms,
        config.retry_max_attempts,
        config.retry_base_delay_ms,
    )?;
    info!(
        repo = %client.repo().as_slug(),
        issue_number = event.issue.number,
        author = %event.issue.author_login,
        actor = event.actor.as_deref().unwrap_or_default(),
        "triaging opened issue"
    );
    triage_issue(&client, &config.settings, event).await
}

/// Decide and dispatch actions for one opened issue.
///
/// Rejected labels and failed dispatch calls are collected into the returned
/// outcome; only errors that prevent a decision (such as failing to list the
/// repository's labels) are returned as `Err`.
pub async fn triage_issue<T>(
    tracker: &T,
    settings: &TriageSettings,
    event: &TriageEvent,
) -> Result<TriageOutcome>
where
    T: IssueTracker + ?Sized,
{
    let issue = &event.issue;
    let gate = evaluate_issue_gate(issue.labels.iter().map(String::as_str), &settings.gate);
    if let Some(reason) = gate.reason() {
        info!(issue_number = issue.number, "ignoring issue: {reason}");
        return Ok(TriageOutcome::Succeeded);
    }

    let mut report = FailureReport::new();
    let decision = match extract_label_directive(&issue.body) {
        Some(directive) => {
            debug!(issue_number = issue.number, labels = ?directive.labels(), "found label directive");
            let repo_labels = tracker
                .list_repository_labels()
                .await
                .context("failed to list repository labels")?
                .into_iter()
                .collect::<RepositoryLabelSet>();
            debug!(count = repo_labels.len(), "loaded repository labels");

            let reconciliation = reconcile_labels(directive.labels(), &repo_labels);
            report.extend(reconciliation.diagnostics.iter().cloned());
            if !reconciliation.accepts_support() {
                info!(
                    issue_number = issue.number,
                    "\"{SUPPORT_LABEL}\" label not accepted; skipping welcome comment"
                );
            }
            decide_for_directive(&reconciliation, &settings.welcome_message)
        }
        None => route_by_membership(tracker, settings, event).await,
    };

    debug!(issue_number = issue.number, decision = %decision.summary(), "dispatching triage decision");
    let summary = dispatch_triage_decision(tracker, issue.number, &decision, &mut report).await;
    debug!(
        issue_number = issue.number,
        succeeded = summary.succeeded,
        failed = summary.failed,
        "dispatch complete"
    );
    Ok(report.into_outcome())
}

async fn route_by_membership<T>(
    tracker: &T,
    settings: &TriageSettings,
    event: &TriageEvent,
) -> TriageDecision
where
    T: IssueTracker + ?Sized,
{
    let issue = &event.issue;
    debug!(
        org = %event.repo.owner,
        username = %issue.author_login,
        "no label directive; checking organization membership"
    );
    let signal = tracker
        .check_membership(&event.repo.owner, &issue.author_login)
        .await;
    let status = classify_membership_signal(&signal);
    match status {
        MembershipStatus::Member => info!(
            issue_number = issue.number,
            "issue opened by organization member without label directive; no action taken"
        ),
        MembershipStatus::NonMember => info!(
            issue_number = issue.number,
            username = %issue.author_login,
            "submitter is not an organization member; redirecting to support form and closing"
        ),
        MembershipStatus::Indeterminate => warn!(
            issue_number = issue.number,
            response = %signal.describe(),
            "could not determine organization membership; no action taken"
        ),
    }
    decide_for_membership(status, &settings.raise_support_using_form_msg)
}
