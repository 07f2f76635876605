use std::collections::HashSet;

use crate::triage_decision::{TriageAction, TriageDecision};

pub const SUPPORT_LABEL: &str = "support";

/// Label names that exist on the repository at invocation time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositoryLabelSet {
    names: HashSet<String>,
}

impl RepositoryLabelSet {
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for RepositoryLabelSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconciliationResult {
    pub accepted: Vec<String>,
    pub rejected: Vec<String>,
    pub diagnostics: Vec<String>,
}

impl ReconciliationResult {
    pub fn accepts_support(&self) -> bool {
        self.accepted.iter().any(|label| label == SUPPORT_LABEL)
    }
}

pub fn rejected_label_diagnostic(label: &str) -> String {
    format!("label \"{label}\" doesn't exist on repo. Skipping adding {label} label.")
}

/// Partition requested names into those present on the repository and those
/// that are not, preserving input order on both sides.
pub fn reconcile_labels(
    candidates: &[String],
    repo_labels: &RepositoryLabelSet,
) -> ReconciliationResult {
    let mut result = ReconciliationResult::default();
    for label in candidates {
        if repo_labels.contains(label) {
            result.accepted.push(label.clone());
        } else {
            result.diagnostics.push(rejected_label_diagnostic(label));
            result.rejected.push(label.clone());
        }
    }
    result
}

/// Attach accepted labels, then greet support requests with `welcome_message`.
pub fn decide_for_directive(
    reconciliation: &ReconciliationResult,
    welcome_message: &str,
) -> TriageDecision {
    let mut actions = Vec::new();
    if !reconciliation.accepted.is_empty() {
        actions.push(TriageAction::AttachLabels {
            labels: reconciliation.accepted.clone(),
        });
    }
    if reconciliation.accepts_support() {
        actions.push(TriageAction::PostComment {
            body: welcome_message.to_string(),
        });
    }
    TriageDecision::from_actions(actions)
}
