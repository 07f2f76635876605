#[derive(Debug, Clone, PartialEq, Eq)]
/// Enumerates side effects the dispatcher may perform on an issue.
pub enum TriageAction {
    AttachLabels { labels: Vec<String> },
    PostComment { body: String },
    CloseIssue,
}

impl TriageAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AttachLabels { .. } => "attach labels",
            Self::PostComment { .. } => "post comment",
            Self::CloseIssue => "close issue",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Ordered actions chosen for one issue event. Built once by the reconciler or
/// membership router and never mutated afterwards.
pub struct TriageDecision {
    actions: Vec<TriageAction>,
}

impl TriageDecision {
    pub fn no_action() -> Self {
        Self::default()
    }

    pub(crate) fn from_actions(actions: Vec<TriageAction>) -> Self {
        Self { actions }
    }

    pub fn actions(&self) -> &[TriageAction] {
        &self.actions
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn posts_comment(&self) -> bool {
        self.actions
            .iter()
            .any(|action| matches!(action, TriageAction::PostComment { .. }))
    }

    pub fn closes_issue(&self) -> bool {
        self.actions
            .iter()
            .any(|action| matches!(action, TriageAction::CloseIssue))
    }

    pub fn summary(&self) -> String {
        if self.actions.is_empty() {
            return "no action".to_string();
        }
        self.actions
            .iter()
            .map(TriageAction::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Ordered diagnostics collected during one invocation.
pub struct FailureReport {
    diagnostics: Vec<String>,
}

impl FailureReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: impl Into<String>) {
        self.diagnostics.push(diagnostic.into());
    }

    pub fn diagnostics(&self) -> &[String] {
        &self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn into_outcome(self) -> TriageOutcome {
        if self.diagnostics.is_empty() {
            return TriageOutcome::Succeeded;
        }
        TriageOutcome::Failed {
            detail: format!("Errors:\n{}", self.diagnostics.join("\n")),
        }
    }
}

impl Extend<String> for FailureReport {
    fn extend<T: IntoIterator<Item = String>>(&mut self, iter: T) {
        self.diagnostics.extend(iter);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Enumerates terminal invocation results.
pub enum TriageOutcome {
    Succeeded,
    Failed { detail: String },
}

impl TriageOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }

    pub fn failure_detail(&self) -> Option<&str> {
        match self {
            Self::Succeeded => None,
            Self::Failed { detail } => Some(detail.as_str()),
        }
    }
}
