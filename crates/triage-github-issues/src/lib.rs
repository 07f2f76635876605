//! Decision logic for the issue triage engine.
//! This crate owns the event payload model, gate filtering, label directive
//! extraction, label reconciliation, and membership routing. It performs no
//! network I/O; runtime crates feed it remote state and dispatch its decisions.

pub mod issue_event;
pub mod issue_filter;
pub mod label_directive;
pub mod label_reconciliation;
pub mod membership_routing;
pub mod triage_decision;
