use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;
use triage_github_issues::issue_event::{GithubIssueLabel, RepoRef};
use triage_github_issues::membership_routing::MembershipSignal;

use super::github_transport_helpers::{
    github_error_message, parse_retry_after, truncate_for_error, RetryPolicy, RetryScope,
};

const LABELS_PAGE_SIZE: usize = 100;

#[derive(Debug, Clone, Deserialize)]
pub(super) struct GithubCommentCreateResponse {
    pub(super) id: u64,
    pub(super) html_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct GithubIssueStateResponse {
    pub(super) number: u64,
    pub(super) state: String,
}

#[derive(Clone)]
/// GitHub REST client bound to one repository.
pub struct GithubApiClient {
    http: reqwest::Client,
    membership_http: reqwest::Client,
    api_base: String,
    repo: RepoRef,
    retry: RetryPolicy,
}

fn build_http_client(
    token: &str,
    request_timeout_ms: u64,
    redirect: reqwest::redirect::Policy,
) -> Result<reqwest::Client> {
    let mut headers = reqwest::header::HeaderMap::new();
    headers.insert(
        reqwest::header::USER_AGENT,
        reqwest::header::HeaderValue::from_static("issue-triage-action"),
    );
    headers.insert(
        reqwest::header::ACCEPT,
        reqwest::header::HeaderValue::from_static("application/vnd.github+json"),
    );
    headers.insert(
        "x-github-api-version",
        reqwest::header::HeaderValue::from_static("2022-11-28"),
    );
    let auth_header = format!("Bearer {}", token.trim());
    headers.insert(
        reqwest::header::AUTHORIZATION,
        reqwest::header::HeaderValue::from_str(&auth_header)
            .context("invalid github authorization header")?,
    );

    reqwest::Client::builder()
        .default_headers(headers)
        .timeout(Duration::from_millis(request_timeout_ms.max(1)))
        .redirect(redirect)
        .build()
        .context("failed to create github api client")
}

impl GithubApiClient {
    pub fn new(
        api_base: String,
        token: String,
        repo: RepoRef,
        request_timeout_ms: u64,
        retry_max_attempts: usize,
        retry_base_delay_ms: u64,
    ) -> Result<Self> {
        let http = build_http_client(&token, request_timeout_ms, reqwest::redirect::Policy::default())?;
        // 302 from the membership endpoint means "requester is not an org member";
        // it must surface as-is rather than be followed.
        let membership_http =
            build_http_client(&token, request_timeout_ms, reqwest::redirect::Policy::none())?;
        Ok(Self {
            http,
            membership_http,
            api_base: api_base.trim_end_matches('/').to_string(),
            repo,
            retry: RetryPolicy::new(retry_max_attempts, retry_base_delay_ms),
        })
    }

    pub fn repo(&self) -> &RepoRef {
        &self.repo
    }

    pub(super) async fn list_labels_for_repo(&self) -> Result<Vec<GithubIssueLabel>> {
        let mut page = 1_u32;
        let mut rows = Vec::new();
        loop {
            let page_value = page.to_string();
            let per_page = LABELS_PAGE_SIZE.to_string();
            let chunk: Vec<GithubIssueLabel> = self
                .request_json("list repository labels", RetryScope::Idempotent, || {
                    self.http
                        .get(format!(
                            "{}/repos/{}/{}/labels",
                            self.api_base, self.repo.owner, self.repo.name
                        ))
                        .query(&[
                            ("per_page", per_page.as_str()),
                            ("page", page_value.as_str()),
                        ])
                })
                .await?;
            let chunk_len = chunk.len();
            rows.extend(chunk);
            if chunk_len < LABELS_PAGE_SIZE {
                break;
            }
            page = page.saturating_add(1);
        }
        Ok(rows)
    }

    /// GitHub merges the given names into the issue's existing label set.
    pub(super) async fn add_issue_labels(
        &self,
        issue_number: u64,
        labels: &[String],
    ) -> Result<Vec<GithubIssueLabel>> {
        let payload = json!({ "labels": labels });
        self.request_json("add issue labels", RetryScope::Idempotent, || {
            self.http
                .post(format!(
                    "{}/repos/{}/{}/issues/{}/labels",
                    self.api_base, self.repo.owner, self.repo.name, issue_number
                ))
                .json(&payload)
        })
        .await
    }

    /// Comment creation is not idempotent: a timed-out POST may already have
    /// been applied, so only explicit throttling is retried.
    pub(super) async fn create_issue_comment(
        &self,
        issue_number: u64,
        body: &str,
    ) -> Result<GithubCommentCreateResponse> {
        let payload = json!({ "body": body });
        self.request_json("create issue comment", RetryScope::ThrottledOnly, || {
            self.http
                .post(format!(
                    "{}/repos/{}/{}/issues/{}/comments",
                    self.api_base, self.repo.owner, self.repo.name, issue_number
                ))
                .json(&payload)
        })
        .await
    }

    pub(super) async fn set_issue_closed(&self, issue_number: u64) -> Result<GithubIssueStateResponse> {
        let payload = json!({ "state": "closed" });
        self.request_json("close issue", RetryScope::Idempotent, || {
            self.http
                .patch(format!(
                    "{}/repos/{}/{}/issues/{}",
                    self.api_base, self.repo.owner, self.repo.name, issue_number
                ))
                .json(&payload)
        })
        .await
    }

    /// Single unretried request; every outcome is reported as a signal.
    pub(super) async fn check_org_membership(&self, org: &str, username: &str) -> MembershipSignal {
        let response = self
            .membership_http
            .get(format!(
                "{}/orgs/{}/members/{}",
                self.api_base, org, username
            ))
            .send()
            .await;
        match response {
            Ok(response) => {
                let status = response.status().as_u16();
                let body = response.text().await.unwrap_or_default();
                let message = if body.trim().is_empty() {
                    String::new()
                } else {
                    github_error_message(&body)
                };
                MembershipSignal::HttpStatus { status, message }
            }
            Err(error) => MembershipSignal::Transport {
                message: error.to_string(),
            },
        }
    }

    async fn request_json<T, F>(
        &self,
        operation: &str,
        scope: RetryScope,
        mut request_builder: F,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        F: FnMut() -> reqwest::RequestBuilder,
    {
        let mut attempt = 0_usize;
        loop {
            attempt = attempt.saturating_add(1);
            let response = request_builder()
                .header(
                    "x-triage-retry-attempt",
                    attempt.saturating_sub(1).to_string(),
                )
                .send()
                .await;
            match response {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        let parsed = response
                            .json::<T>()
                            .await
                            .with_context(|| format!("failed to decode github {operation}"))?;
                        return Ok(parsed);
                    }

                    let retry_after = parse_retry_after(response.headers());
                    let body = response.text().await.unwrap_or_default();
                    if self.retry.allows_retry_after(attempt)
                        && scope.retries_status(status.as_u16())
                    {
                        let delay = self.retry.delay_for(attempt, retry_after);
                        debug!(
                            operation,
                            status = status.as_u16(),
                            attempt,
                            delay_ms = delay.as_millis() as u64,
                            "retrying github request"
                        );
                        tokio::time::sleep(delay).await;
                        continue;
                    }

                    bail!(
                        "github api {operation} failed with status {}: {}",
                        status.as_u16(),
                        truncate_for_error(&body, 800)
                    );
                }
                Err(error) => {
                    if self.retry.allows_retry_after(attempt) && scope.retries_transport_error(&error)
                    {
                        tokio::time::sleep(self.retry.delay_for(attempt, None)).await;
                        continue;
                    }
                    return Err(error)
                        .with_context(|| format!("github api {operation} request failed"));
                }
            }
        }
    }
}
