//! Runtime for the issue triage engine.
//!
//! Binds the pure decision logic in `triage-github-issues` to the GitHub REST
//! API: label listing, membership probing, and dispatch of the chosen actions.

mod github_triage_runtime;

pub use github_triage_runtime::{
    run_issue_triage, triage_issue, GithubApiClient, GithubTriageRuntimeConfig, IssueTracker,
    TriageSettings,
};
