use std::path::Path;

use assert_cmd::Command;
use httpmock::prelude::*;
use predicates::prelude::*;
use serde_json::{json, Value};
use tempfile::tempdir;

fn binary_command() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("issue-triage"));
    cmd.env_clear();
    cmd
}

fn opened_issue_payload(body: &str, labels: &[&str], author: &str) -> Value {
    json!({
        "action": "opened",
        "issue": {
            "number": 42,
            "body": body,
            "user": { "login": author },
            "labels": labels.iter().map(|name| json!({ "name": name })).collect::<Vec<_>>()
        },
        "repository": { "name": "widgets", "owner": { "login": "acme" } },
        "sender": { "login": author }
    })
}

fn write_event(dir: &Path, payload: &Value) -> String {
    let path = dir.join("event.json");
    std::fs::write(&path, payload.to_string()).expect("write event payload");
    path.to_str().expect("utf8 path").to_string()
}

fn action_command(server: &MockServer, event_name: &str, event_path: &str) -> Command {
    let mut cmd = binary_command();
    cmd.env("INPUT_TOKEN", "ghs_integration")
        .env("INPUT_MESSAGE", "Thanks for reaching out to support!")
        .env(
            "INPUT_RAISE-SUPPORT-USING-FORM-MSG",
            "Please open support requests through the issue form.",
        )
        .env("GITHUB_EVENT_NAME", event_name)
        .env("GITHUB_EVENT_PATH", event_path)
        .env("GITHUB_REPOSITORY", "acme/widgets")
        .env("GITHUB_API_URL", server.base_url())
        .env("TRIAGE_RETRY_BASE_DELAY_MS", "1");
    cmd
}

#[test]
fn help_hides_token_value() {
    let mut cmd = binary_command();
    cmd.arg("--help")
        .env("INPUT_TOKEN", "SUPER_SECRET_TRIAGE_TOKEN");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("INPUT_TOKEN"))
        .stdout(predicate::str::contains("SUPER_SECRET_TRIAGE_TOKEN").not());
}

#[test]
fn regression_missing_token_fails_before_any_api_call() {
    let mut cmd = binary_command();
    cmd.env("GITHUB_EVENT_NAME", "issues")
        .env("GITHUB_EVENT_PATH", "/nonexistent/event.json");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("--token"));
}

#[test]
fn functional_non_issue_event_is_a_successful_no_op() {
    let server = MockServer::start();
    let any_call = server.mock(|when, then| {
        when.path_includes("/");
        then.status(500);
    });

    let mut cmd = action_command(&server, "pull_request", "/nonexistent/event.json");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("::error::").not());
    any_call.assert_calls(0);
}

#[test]
fn integration_directive_with_unknown_label_attaches_known_ones_and_fails_run() {
    let temp = tempdir().expect("tempdir");
    let event_path = write_event(
        temp.path(),
        &opened_issue_payload("Broken build\n<!-- Issue Labels: bug, urgent -->", &[], "alice"),
    );
    let server = MockServer::start();
    let labels = server.mock(|when, then| {
        when.method(GET).path("/repos/acme/widgets/labels");
        then.status(200)
            .json_body(json!([{ "name": "bug" }, { "name": "support" }]));
    });
    let add_labels = server.mock(|when, then| {
        when.method(POST)
            .path("/repos/acme/widgets/issues/42/labels")
            .header("authorization", "Bearer ghs_integration")
            .body_includes("\"labels\":[\"bug\"]");
        then.status(200).json_body(json!([{ "name": "bug" }]));
    });
    let membership = server.mock(|when, then| {
        when.method(GET).path("/orgs/acme/members/alice");
        then.status(204);
    });

    let mut cmd = action_command(&server, "issues", &event_path);
    cmd.assert().failure().stdout(predicate::str::contains(
        "::error::Errors:%0Alabel \"urgent\" doesn't exist on repo",
    ));
    labels.assert_calls(1);
    add_labels.assert_calls(1);
    membership.assert_calls(0);
}

#[test]
fn integration_non_member_issue_is_redirected_and_closed() {
    let temp = tempdir().expect("tempdir");
    let event_path = write_event(
        temp.path(),
        &opened_issue_payload("How do I configure this?", &[], "mallory"),
    );
    let server = MockServer::start();
    let membership = server.mock(|when, then| {
        when.method(GET).path("/orgs/acme/members/mallory");
        then.status(404)
            .json_body(json!({ "message": "Not Found" }));
    });
    let comment = server.mock(|when, then| {
        when.method(POST)
            .path("/repos/acme/widgets/issues/42/comments")
            .body_includes("Please open support requests through the issue form.");
        then.status(201).json_body(json!({ "id": 1, "html_url": null }));
    });
    let close = server.mock(|when, then| {
        when.method(PATCH)
            .path("/repos/acme/widgets/issues/42")
            .body_includes("\"state\":\"closed\"");
        then.status(200)
            .json_body(json!({ "number": 42, "state": "closed" }));
    });

    let mut cmd = action_command(&server, "issues", &event_path);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("::error::").not());
    membership.assert_calls(1);
    comment.assert_calls(1);
    close.assert_calls(1);
}

#[test]
fn regression_rerun_with_label_already_present_succeeds() {
    let temp = tempdir().expect("tempdir");
    let event_path = write_event(
        temp.path(),
        &opened_issue_payload("<!-- Issue Labels: bug -->", &["bug"], "alice"),
    );
    let server = MockServer::start();
    let _labels = server.mock(|when, then| {
        when.method(GET).path("/repos/acme/widgets/labels");
        then.status(200).json_body(json!([{ "name": "bug" }]));
    });
    let add_labels = server.mock(|when, then| {
        when.method(POST).path("/repos/acme/widgets/issues/42/labels");
        then.status(200).json_body(json!([{ "name": "bug" }]));
    });

    for _ in 0..2 {
        let mut cmd = action_command(&server, "issues", &event_path);
        cmd.assert().success();
    }
    add_labels.assert_calls(2);
}

#[test]
fn functional_ignore_label_skips_issue_without_api_calls() {
    let temp = tempdir().expect("tempdir");
    let event_path = write_event(
        temp.path(),
        &opened_issue_payload("Please help", &["skip-triage"], "mallory"),
    );
    let server = MockServer::start();
    let any_call = server.mock(|when, then| {
        when.path_includes("/");
        then.status(500);
    });

    let mut cmd = action_command(&server, "issues", &event_path);
    cmd.env("INPUT_IGNORE-LABEL", "skip-triage");
    cmd.assert().success();
    any_call.assert_calls(0);
}
