use triage_cli::Cli;
use triage_github_issues::issue_filter::IssueGateConfig;
use triage_github_issues_runtime::{GithubTriageRuntimeConfig, TriageSettings};

pub(crate) fn build_triage_settings(cli: &Cli) -> TriageSettings {
    TriageSettings {
        welcome_message: cli.message.clone(),
        raise_support_using_form_msg: cli.raise_support_using_form_msg.clone(),
        gate: IssueGateConfig::new(cli.only_if_label.as_deref(), cli.ignore_label.as_deref()),
    }
}

pub(crate) fn build_runtime_config(cli: &Cli) -> GithubTriageRuntimeConfig {
    GithubTriageRuntimeConfig {
        api_base: cli.api_base.clone(),
        token: cli.token.clone(),
        request_timeout_ms: cli.request_timeout_ms,
        retry_max_attempts: cli.retry_max_attempts,
        retry_base_delay_ms: cli.retry_base_delay_ms,
        settings: build_triage_settings(cli),
    }
}
