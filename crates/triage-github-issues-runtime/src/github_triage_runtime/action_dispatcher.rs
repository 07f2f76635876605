use tracing::{info, warn};
use triage_github_issues::triage_decision::{FailureReport, TriageAction, TriageDecision};

use super::issue_tracker::IssueTracker;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(super) struct DispatchSummary {
    pub(super) succeeded: usize,
    pub(super) failed: usize,
}

/// Execute each action in order. A failed call is recorded in `report` and
/// does not prevent the remaining actions from being attempted.
pub(super) async fn dispatch_triage_decision<T>(
    tracker: &T,
    issue_number: u64,
    decision: &TriageDecision,
    report: &mut FailureReport,
) -> DispatchSummary
where
    T: IssueTracker + ?Sized,
{
    let mut summary = DispatchSummary::default();
    for action in decision.actions() {
        let result = match action {
            TriageAction::AttachLabels { labels } => {
                info!(issue_number, labels = %labels.join(", "), "attaching labels");
                tracker.add_labels(issue_number, labels).await
            }
            TriageAction::PostComment { body } => {
                info!(issue_number, "posting comment");
                tracker.create_comment(issue_number, body).await
            }
            TriageAction::CloseIssue => {
                info!(issue_number, "closing issue");
                tracker.close_issue(issue_number).await
            }
        };
        match result {
            Ok(()) => summary.succeeded = summary.succeeded.saturating_add(1),
            Err(error) => {
                warn!(issue_number, action = action.as_str(), error = %format!("{error:#}"), "dispatch failed");
                report.push(format!(
                    "failed to {} on issue #{issue_number}: {error:#}",
                    action.as_str()
                ));
                summary.failed = summary.failed.saturating_add(1);
            }
        }
    }
    summary
}
