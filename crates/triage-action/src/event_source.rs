use std::path::Path;

use anyhow::{Context, Result};
use triage_github_issues::issue_event::{
    classify_issue_event, parse_issues_event_payload, EventDisposition, RepoRef,
    ISSUES_EVENT_NAME,
};

/// Read the runner's webhook payload and decide whether it is an opened issue.
///
/// The payload file is only read for `issues` events.
pub(crate) fn load_triage_event(
    event_name: &str,
    event_path: &Path,
    repo_override: Option<RepoRef>,
) -> Result<EventDisposition> {
    if event_name.trim() != ISSUES_EVENT_NAME {
        return Ok(EventDisposition::Ignored {
            reason: format!("event `{}` is not `{ISSUES_EVENT_NAME}`", event_name.trim()),
        });
    }
    let raw = std::fs::read_to_string(event_path)
        .with_context(|| format!("failed to read event payload {}", event_path.display()))?;
    let payload = parse_issues_event_payload(&raw)
        .with_context(|| format!("invalid event payload {}", event_path.display()))?;
    Ok(classify_issue_event(event_name, payload, repo_override)?)
}
