//! Organization-membership routing for issues opened without a label directive.
//!
//! Transport-level results of the membership check are captured as a
//! [`MembershipSignal`] and classified exactly once by
//! [`classify_membership_signal`]. Routing only ever sees the resulting
//! [`MembershipStatus`].

use crate::triage_decision::{TriageAction, TriageDecision};

/// GitHub answers `204 No Content` when the user belongs to the organization.
pub const MEMBERSHIP_CONFIRMED_STATUS: u16 = 204;
/// GitHub answers `404 Not Found` when the user is not a member.
pub const MEMBERSHIP_DENIED_STATUS: u16 = 404;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Raw outcome of the organization-membership request.
pub enum MembershipSignal {
    HttpStatus { status: u16, message: String },
    Transport { message: String },
}

impl MembershipSignal {
    pub fn describe(&self) -> String {
        match self {
            Self::HttpStatus { status, message } if message.trim().is_empty() => {
                format!("status {status}")
            }
            Self::HttpStatus { status, message } => format!("status {status}: {message}"),
            Self::Transport { message } => format!("transport error: {message}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Enumerates supported `MembershipStatus` values.
pub enum MembershipStatus {
    Member,
    NonMember,
    Indeterminate,
}

impl MembershipStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::NonMember => "non-member",
            Self::Indeterminate => "indeterminate",
        }
    }
}

/// Classify the raw membership response: 204 is a member, 404 a non-member,
/// and every other status or transport failure is indeterminate.
///
/// A 302 is not followed. GitHub answers 302 when the requesting token cannot
/// read the organization's private membership, which is the usual case for
/// the default workflow `GITHUB_TOKEN`. Such runs are indeterminate and never
/// close issues; the non-member path needs a token with organization
/// members read access.
pub fn classify_membership_signal(signal: &MembershipSignal) -> MembershipStatus {
    match signal {
        MembershipSignal::HttpStatus { status, .. } if *status == MEMBERSHIP_CONFIRMED_STATUS => {
            MembershipStatus::Member
        }
        MembershipSignal::HttpStatus { status, .. } if *status == MEMBERSHIP_DENIED_STATUS => {
            MembershipStatus::NonMember
        }
        MembershipSignal::HttpStatus { .. } | MembershipSignal::Transport { .. } => {
            MembershipStatus::Indeterminate
        }
    }
}

/// Non-members are redirected to the support form and their issue is closed;
/// members and undetermined users are left alone.
pub fn decide_for_membership(
    status: MembershipStatus,
    raise_support_using_form_msg: &str,
) -> TriageDecision {
    match status {
        MembershipStatus::NonMember => TriageDecision::from_actions(vec![
            TriageAction::PostComment {
                body: raise_support_using_form_msg.to_string(),
            },
            TriageAction::CloseIssue,
        ]),
        MembershipStatus::Member | MembershipStatus::Indeterminate => TriageDecision::no_action(),
    }
}
