/// Normalize a configured gate label; blank values mean "not configured".
pub fn normalize_gate_label(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|label| !label.is_empty())
        .map(ToOwned::to_owned)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Inclusion/exclusion label rules evaluated before any network call.
pub struct IssueGateConfig {
    pub only_if_label: Option<String>,
    pub ignore_label: Option<String>,
}

impl IssueGateConfig {
    pub fn new(only_if_label: Option<&str>, ignore_label: Option<&str>) -> Self {
        Self {
            only_if_label: normalize_gate_label(only_if_label),
            ignore_label: normalize_gate_label(ignore_label),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Enumerates supported `GateDecision` values.
pub enum GateDecision {
    Proceed,
    SkipMissingRequiredLabel { label: String },
    SkipIgnoredLabel { label: String },
}

impl GateDecision {
    pub fn should_proceed(&self) -> bool {
        matches!(self, Self::Proceed)
    }

    pub fn reason(&self) -> Option<String> {
        match self {
            Self::Proceed => None,
            Self::SkipMissingRequiredLabel { label } => Some(format!(
                "only-if-label \"{label}\" is not present on issue"
            )),
            Self::SkipIgnoredLabel { label } => {
                Some(format!("ignore-label \"{label}\" is present on issue"))
            }
        }
    }
}

/// Return true when the issue carries a label with exactly this name.
pub fn issue_has_label<'a>(labels: impl IntoIterator<Item = &'a str>, wanted: &str) -> bool {
    labels.into_iter().any(|label| label == wanted)
}

/// `only_if_label` is checked first, then `ignore_label`.
pub fn evaluate_issue_gate<'a>(
    labels: impl IntoIterator<Item = &'a str> + Clone,
    config: &IssueGateConfig,
) -> GateDecision {
    if let Some(required) = config.only_if_label.as_deref() {
        if !issue_has_label(labels.clone(), required) {
            return GateDecision::SkipMissingRequiredLabel {
                label: required.to_string(),
            };
        }
    }
    if let Some(ignored) = config.ignore_label.as_deref() {
        if issue_has_label(labels, ignored) {
            return GateDecision::SkipIgnoredLabel {
                label: ignored.to_string(),
            };
        }
    }
    GateDecision::Proceed
}
