//! GitHub Actions workflow command rendering.

/// Escape data for a workflow command so multi-line messages stay one command.
pub(crate) fn escape_workflow_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// The runner turns this into an error annotation on the job.
pub(crate) fn render_error_command(message: &str) -> String {
    format!("::error::{}", escape_workflow_data(message))
}

#[cfg(test)]
mod tests {
    use super::{escape_workflow_data, render_error_command};

    #[test]
    fn unit_escape_workflow_data_encodes_percent_before_newlines() {
        assert_eq!(escape_workflow_data("100%\r\ndone"), "100%25%0D%0Adone");
    }

    #[test]
    fn functional_render_error_command_keeps_multi_line_detail_on_one_line() {
        let rendered = render_error_command("Errors:\nlabel \"urgent\" doesn't exist on repo");
        assert_eq!(
            rendered,
            "::error::Errors:%0Alabel \"urgent\" doesn't exist on repo"
        );
        assert!(!rendered.contains('\n'));
    }
}
