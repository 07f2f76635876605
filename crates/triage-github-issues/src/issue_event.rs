use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ISSUES_EVENT_NAME: &str = "issues";
pub const ISSUE_OPENED_ACTION: &str = "opened";

#[derive(Debug, Error)]
/// Enumerates failures while turning a runner event into a `TriageEvent`.
pub enum TriageEventError {
    #[error("failed to decode issues event payload: {0}")]
    Payload(#[from] serde_json::Error),
    #[error("issues event payload is missing the `issue` object")]
    MissingIssue,
    #[error("event does not identify a repository; set GITHUB_REPOSITORY to owner/repo")]
    MissingRepository,
    #[error("invalid repository '{0}', expected owner/repo")]
    InvalidRepository(String),
}

#[derive(Debug, Clone, Deserialize, Serialize)]
/// Public struct `GithubUser` used across triage components.
pub struct GithubUser {
    pub login: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
/// Public struct `GithubIssueLabel` used across triage components.
pub struct GithubIssueLabel {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
/// Issue object as delivered inside an `issues` webhook payload.
pub struct GithubIssue {
    pub number: u64,
    #[serde(default)]
    pub body: Option<String>,
    pub user: GithubUser,
    #[serde(default)]
    pub labels: Vec<GithubIssueLabel>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GithubRepository {
    pub name: String,
    pub owner: GithubUser,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
/// Subset of the `issues` webhook payload read by the triage engine.
pub struct IssuesEventPayload {
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub issue: Option<GithubIssue>,
    #[serde(default)]
    pub repository: Option<GithubRepository>,
    #[serde(default)]
    pub sender: Option<GithubUser>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    pub fn parse(raw: &str) -> Result<Self, TriageEventError> {
        let trimmed = raw.trim();
        let (owner, name) = trimmed
            .split_once('/')
            .ok_or_else(|| TriageEventError::InvalidRepository(raw.to_string()))?;
        let owner = owner.trim();
        let name = name.trim();
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return Err(TriageEventError::InvalidRepository(raw.to_string()));
        }
        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    pub fn as_slug(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Immutable view of the opened issue for the duration of one invocation.
pub struct IssueSnapshot {
    pub number: u64,
    pub body: String,
    pub labels: Vec<String>,
    pub author_login: String,
}

impl From<GithubIssue> for IssueSnapshot {
    fn from(issue: GithubIssue) -> Self {
        Self {
            number: issue.number,
            body: issue.body.unwrap_or_default(),
            labels: issue.labels.into_iter().map(|label| label.name).collect(),
            author_login: issue.user.login,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriageEvent {
    pub repo: RepoRef,
    pub issue: IssueSnapshot,
    pub actor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Enumerates whether an incoming runner event should be triaged.
pub enum EventDisposition {
    Triage(TriageEvent),
    Ignored { reason: String },
}

pub fn parse_issues_event_payload(raw: &str) -> Result<IssuesEventPayload, TriageEventError> {
    Ok(serde_json::from_str(raw)?)
}

/// Accept only `issues`/`opened` events; every other event is a no-op.
///
/// `repo_override` (normally `GITHUB_REPOSITORY`) takes precedence over the
/// repository embedded in the payload.
pub fn classify_issue_event(
    event_name: &str,
    payload: IssuesEventPayload,
    repo_override: Option<RepoRef>,
) -> Result<EventDisposition, TriageEventError> {
    if event_name.trim() != ISSUES_EVENT_NAME {
        return Ok(EventDisposition::Ignored {
            reason: format!("event `{}` is not `{ISSUES_EVENT_NAME}`", event_name.trim()),
        });
    }
    let action = payload.action.as_deref().unwrap_or_default();
    if action != ISSUE_OPENED_ACTION {
        return Ok(EventDisposition::Ignored {
            reason: format!("issues action `{action}` is not `{ISSUE_OPENED_ACTION}`"),
        });
    }

    let issue = payload.issue.ok_or(TriageEventError::MissingIssue)?;
    let repo = match repo_override {
        Some(repo) => repo,
        None => payload
            .repository
            .map(|repository| RepoRef {
                owner: repository.owner.login,
                name: repository.name,
            })
            .ok_or(TriageEventError::MissingRepository)?,
    };
    Ok(EventDisposition::Triage(TriageEvent {
        repo,
        issue: IssueSnapshot::from(issue),
        actor: payload.sender.map(|sender| sender.login),
    }))
}
