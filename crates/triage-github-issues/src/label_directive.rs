use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// `<!-- Issue Labels: <csv> -->`, where the list holds ASCII word characters,
/// `-`, `:`, `,` and whitespace.
static LABEL_DIRECTIVE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<!-- Issue Labels: (?P<labels>[A-Za-z0-9_:,\s-]*) -->")
        .expect("label directive pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq)]
/// Ordered label names requested by an issue-form marker.
pub struct LabelDirective {
    labels: Vec<String>,
}

impl LabelDirective {
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn into_labels(self) -> Vec<String> {
        self.labels
    }
}

/// Split a marker's comma-separated list into trimmed, non-empty, first-seen names.
pub fn parse_label_csv(csv: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    csv.split(',')
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .filter(|label| seen.insert(*label))
        .map(ToOwned::to_owned)
        .collect()
}

/// Locate the first label directive in an issue body.
///
/// Returns `None` when the marker is absent or malformed, or when it lists no
/// usable names; this is a routing condition, never an error.
pub fn extract_label_directive(body: &str) -> Option<LabelDirective> {
    let captures = LABEL_DIRECTIVE_PATTERN.captures(body)?;
    let labels = parse_label_csv(captures.name("labels")?.as_str());
    if labels.is_empty() {
        return None;
    }
    Some(LabelDirective { labels })
}

#[cfg(test)]
mod tests {
    use super::{extract_label_directive, parse_label_csv};

    #[test]
    fn unit_parse_label_csv_trims_and_drops_empty_and_repeated_tokens() {
        assert_eq!(
            parse_label_csv(" bug ,, needs-repro , bug,  "),
            vec!["bug".to_string(), "needs-repro".to_string()]
        );
        assert!(parse_label_csv(" , ").is_empty());
    }

    #[test]
    fn functional_extract_label_directive_reads_marker_inside_prose() {
        let body = "Steps to reproduce...\n<!-- Issue Labels: bug, needs-repro -->\nThanks!";
        let directive = extract_label_directive(body).expect("directive");
        assert_eq!(
            directive.labels(),
            &["bug".to_string(), "needs-repro".to_string()]
        );
    }

    #[test]
    fn functional_extract_label_directive_keeps_scoped_label_names() {
        let body = "<!-- Issue Labels: support, type:question, area_docs -->";
        let directive = extract_label_directive(body).expect("directive");
        assert_eq!(
            directive.into_labels(),
            vec![
                "support".to_string(),
                "type:question".to_string(),
                "area_docs".to_string()
            ]
        );
    }

    #[test]
    fn integration_extract_label_directive_returns_none_without_marker() {
        assert!(extract_label_directive("plain issue text with no marker").is_none());
        assert!(extract_label_directive("").is_none());
    }

    #[test]
    fn regression_extract_label_directive_ignores_quoted_block_variant() {
        let body = "> Issue Labels: bug, support\n\nDetails";
        assert!(extract_label_directive(body).is_none());
    }

    #[test]
    fn regression_extract_label_directive_rejects_malformed_markers_without_panicking() {
        for body in [
            "<!-- Issue Labels: bug",
            "<!-- Issue Labels: bug; drop table -->",
            "<!-- Issue Labels: <script> -->",
            "<!--Issue Labels: bug -->",
            "<!-- Issue Labels:  -->",
            "<!-- Issue Labels: , , -->",
        ] {
            assert!(extract_label_directive(body).is_none(), "body: {body}");
        }
    }

    #[test]
    fn regression_extract_label_directive_uses_first_marker_only() {
        let body = "<!-- Issue Labels: bug -->\n<!-- Issue Labels: support -->";
        let directive = extract_label_directive(body).expect("directive");
        assert_eq!(directive.labels(), &["bug".to_string()]);
    }
}
