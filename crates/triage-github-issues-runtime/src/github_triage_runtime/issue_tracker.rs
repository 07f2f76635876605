use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;
use triage_github_issues::membership_routing::MembershipSignal;

use super::github_api_client::GithubApiClient;

#[async_trait]
/// Remote issue-tracking operations the triage engine depends on.
///
/// Implementations are bound to a single repository; `check_membership` never
/// fails and instead reports the raw transport outcome.
pub trait IssueTracker: Send + Sync {
    async fn list_repository_labels(&self) -> Result<Vec<String>>;

    async fn add_labels(&self, issue_number: u64, labels: &[String]) -> Result<()>;

    async fn create_comment(&self, issue_number: u64, body: &str) -> Result<()>;

    async fn close_issue(&self, issue_number: u64) -> Result<()>;

    async fn check_membership(&self, org: &str, username: &str) -> MembershipSignal;
}

#[async_trait]
impl IssueTracker for GithubApiClient {
    async fn list_repository_labels(&self) -> Result<Vec<String>> {
        let labels = self.list_labels_for_repo().await?;
        Ok(labels.into_iter().map(|label| label.name).collect())
    }

    async fn add_labels(&self, issue_number: u64, labels: &[String]) -> Result<()> {
        let applied = self.add_issue_labels(issue_number, labels).await?;
        debug!(
            issue_number,
            applied = applied.len(),
            "github reported issue labels after attach"
        );
        Ok(())
    }

    async fn create_comment(&self, issue_number: u64, body: &str) -> Result<()> {
        let posted = self.create_issue_comment(issue_number, body).await?;
        debug!(
            issue_number,
            comment_id = posted.id,
            url = posted.html_url.as_deref().unwrap_or_default(),
            "posted issue comment"
        );
        Ok(())
    }

    async fn close_issue(&self, issue_number: u64) -> Result<()> {
        let updated = self.set_issue_closed(issue_number).await?;
        debug!(
            issue_number = updated.number,
            state = updated.state.as_str(),
            "updated issue state"
        );
        Ok(())
    }

    async fn check_membership(&self, org: &str, username: &str) -> MembershipSignal {
        self.check_org_membership(org, username).await
    }
}
