use std::path::PathBuf;

use clap::{ArgAction, Parser};
use triage_github_issues::issue_event::RepoRef;

use crate::validation::{
    parse_input_flag, parse_non_blank, parse_positive_u64, parse_positive_usize, parse_repo_slug,
};

#[derive(Debug, Parser)]
#[command(
    name = "issue-triage",
    about = "Label, greet, or close newly opened GitHub issues",
    version
)]
/// Action inputs and runner context for one triage invocation.
pub struct Cli {
    #[arg(
        long,
        env = "INPUT_TOKEN",
        hide_env_values = true,
        value_parser = parse_non_blank,
        help = "GitHub token used for API access"
    )]
    pub token: String,

    #[arg(
        long,
        env = "INPUT_MESSAGE",
        default_value = "",
        help = "Comment body posted when the \"support\" label is attached"
    )]
    pub message: String,

    #[arg(
        long = "raise-support-using-form-msg",
        env = "INPUT_RAISE-SUPPORT-USING-FORM-MSG",
        default_value = "",
        help = "Comment body posted before closing an issue opened by a non-member without the issue form"
    )]
    pub raise_support_using_form_msg: String,

    #[arg(
        long = "ignore-label",
        env = "INPUT_IGNORE-LABEL",
        help = "Skip issues carrying this label"
    )]
    pub ignore_label: Option<String>,

    #[arg(
        long = "only-if-label",
        env = "INPUT_ONLY-IF-LABEL",
        help = "Only process issues carrying this label"
    )]
    pub only_if_label: Option<String>,

    #[arg(
        long,
        env = "INPUT_DEBUG",
        default_value_t = false,
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_parser = parse_input_flag,
        help = "Enable debug logging"
    )]
    pub debug: bool,

    #[arg(
        long = "event-name",
        env = "GITHUB_EVENT_NAME",
        help = "Name of the workflow event that triggered this run"
    )]
    pub event_name: String,

    #[arg(
        long = "event-path",
        env = "GITHUB_EVENT_PATH",
        help = "Path to the JSON webhook payload of the triggering event"
    )]
    pub event_path: PathBuf,

    #[arg(
        long,
        env = "GITHUB_REPOSITORY",
        value_parser = parse_repo_slug,
        help = "Repository in owner/repo format; defaults to the payload repository"
    )]
    pub repository: Option<RepoRef>,

    #[arg(
        long = "api-base",
        env = "GITHUB_API_URL",
        default_value = "https://api.github.com",
        help = "GitHub API base URL"
    )]
    pub api_base: String,

    #[arg(
        long = "request-timeout-ms",
        env = "TRIAGE_REQUEST_TIMEOUT_MS",
        default_value_t = 10_000,
        value_parser = parse_positive_u64,
        help = "Timeout for each GitHub API request in milliseconds"
    )]
    pub request_timeout_ms: u64,

    #[arg(
        long = "retry-max-attempts",
        env = "TRIAGE_RETRY_MAX_ATTEMPTS",
        default_value_t = 3,
        value_parser = parse_positive_usize,
        help = "Attempts for label, comment, and close calls on throttling or server errors"
    )]
    pub retry_max_attempts: usize,

    #[arg(
        long = "retry-base-delay-ms",
        env = "TRIAGE_RETRY_BASE_DELAY_MS",
        default_value_t = 500,
        value_parser = parse_positive_u64,
        help = "Base delay for exponential retry backoff in milliseconds"
    )]
    pub retry_base_delay_ms: u64,
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::Cli;

    const REQUIRED: [&str; 7] = [
        "issue-triage",
        "--token",
        "ghp_test",
        "--event-name",
        "issues",
        "--event-path",
        "/tmp/event.json",
    ];

    fn parse(extra: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(REQUIRED.iter().chain(extra.iter()).copied())
    }

    #[test]
    fn unit_cli_defaults_match_action_inputs() {
        let cli = parse(&[]).expect("parse");
        assert_eq!(cli.token, "ghp_test");
        assert_eq!(cli.message, "");
        assert_eq!(cli.raise_support_using_form_msg, "");
        assert_eq!(cli.api_base, "https://api.github.com");
        assert_eq!(cli.request_timeout_ms, 10_000);
        assert_eq!(cli.retry_max_attempts, 3);
        assert_eq!(cli.retry_base_delay_ms, 500);
        assert_eq!(cli.event_path.to_string_lossy(), "/tmp/event.json");
    }

    #[test]
    fn functional_cli_accepts_triage_inputs() {
        let cli = parse(&[
            "--message",
            "Welcome!",
            "--raise-support-using-form-msg",
            "Use the form",
            "--only-if-label",
            "triage",
            "--ignore-label",
            "wontfix",
            "--repository",
            "acme/widgets",
            "--debug",
        ])
        .expect("parse");
        assert_eq!(cli.message, "Welcome!");
        assert_eq!(cli.raise_support_using_form_msg, "Use the form");
        assert_eq!(cli.only_if_label.as_deref(), Some("triage"));
        assert_eq!(cli.ignore_label.as_deref(), Some("wontfix"));
        assert_eq!(
            cli.repository.map(|repo| repo.as_slug()).as_deref(),
            Some("acme/widgets")
        );
        assert!(cli.debug);
    }

    #[test]
    fn regression_cli_debug_flag_honors_explicit_false() {
        let cli = parse(&["--debug=false"]).expect("parse");
        assert!(!cli.debug);
    }

    #[test]
    fn regression_cli_rejects_blank_token_and_bad_repository() {
        let blank = Cli::try_parse_from([
            "issue-triage",
            "--token",
            "  ",
            "--event-name",
            "issues",
            "--event-path",
            "/tmp/event.json",
        ]);
        assert!(blank.is_err());
        assert!(parse(&["--repository", "not-a-slug"]).is_err());
        assert!(parse(&["--retry-max-attempts", "0"]).is_err());
    }
}
