//! Opt-in semantic checks for a [`PromptFlow`].
//!
//! Construction and rendering accept any structurally valid flow. This module
//! is the stricter mode: it reports problems but never changes or rejects the
//! flow itself. Callers decide what to do with the issues.

use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;

use crate::model::PromptFlow;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    EmptyFlow,
    DuplicateState,
    UnknownInitialState,
    UnknownFinalState,
    DanglingTransition,
    UnreachableState,
}

impl IssueKind {
    pub fn severity(self) -> Severity {
        match self {
            IssueKind::EmptyFlow | IssueKind::UnknownInitialState => Severity::Error,
            _ => Severity::Warning,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            IssueKind::EmptyFlow => "empty-flow",
            IssueKind::DuplicateState => "duplicate-state",
            IssueKind::UnknownInitialState => "unknown-initial-state",
            IssueKind::UnknownFinalState => "unknown-final-state",
            IssueKind::DanglingTransition => "dangling-transition",
            IssueKind::UnreachableState => "unreachable-state",
        }
    }
}

#[derive(Debug, Clone)]
pub struct LintIssue {
    pub kind: IssueKind,
    pub severity: Severity,
    pub message: String,
}

impl LintIssue {
    fn new(kind: IssueKind, message: String) -> Self {
        Self {
            kind,
            severity: kind.severity(),
            message,
        }
    }
}

impl fmt::Display for LintIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] {}", self.severity, self.kind.as_str(), self.message)
    }
}

/// Runs every check against `flow`. Issues come back in a stable order.
pub fn check(flow: &PromptFlow) -> Vec<LintIssue> {
    let mut issues = Vec::new();

    if flow.states_description.is_empty() {
        issues.push(LintIssue::new(
            IssueKind::EmptyFlow,
            format!("workflow '{}' declares no states", flow.workflow_name),
        ));
    }

    // Declaration counts, keyed by id; order of first appearance kept separately.
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();
    for id in flow.state_ids() {
        let count = counts.entry(id).or_insert(0);
        if *count == 0 {
            order.push(id);
        }
        *count += 1;
    }
    for id in &order {
        if counts[id] > 1 {
            issues.push(LintIssue::new(
                IssueKind::DuplicateState,
                format!("state '{}' is declared {} times", id, counts[id]),
            ));
        }
    }

    let declared = |id: &str| counts.contains_key(id);

    if !flow.states_description.is_empty() && !declared(flow.initial_state.as_str()) {
        issues.push(LintIssue::new(
            IssueKind::UnknownInitialState,
            format!("initialState '{}' is not a declared state", flow.initial_state),
        ));
    }
    if !declared(flow.final_state.as_str()) {
        issues.push(LintIssue::new(
            IssueKind::UnknownFinalState,
            format!("finalState '{}' is not a declared state", flow.final_state),
        ));
    }

    for (i, t) in flow.transitions.iter().enumerate() {
        for endpoint in [&t.current_state, &t.next_state] {
            if !declared(endpoint.as_str()) {
                issues.push(LintIssue::new(
                    IssueKind::DanglingTransition,
                    format!(
                        "transition #{} ({} -> {}) references undeclared state '{}'",
                        i, t.current_state, t.next_state, endpoint
                    ),
                ));
            }
        }
    }

    if declared(flow.initial_state.as_str()) {
        let reachable = reachable_from(flow, &flow.initial_state);
        for id in &order {
            if !reachable.contains(id) {
                issues.push(LintIssue::new(
                    IssueKind::UnreachableState,
                    format!(
                        "state '{}' cannot be reached from '{}'",
                        id, flow.initial_state
                    ),
                ));
            }
        }
    }

    issues
}

/// Breadth-first walk over transitions starting at `start`.
fn reachable_from<'a>(flow: &'a PromptFlow, start: &'a str) -> HashSet<&'a str> {
    let mut edges: HashMap<&str, Vec<&str>> = HashMap::new();
    for t in &flow.transitions {
        edges
            .entry(t.current_state.as_str())
            .or_default()
            .push(t.next_state.as_str());
    }

    let mut seen = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);
    while let Some(state) = queue.pop_front() {
        for next in edges.get(state).into_iter().flatten() {
            if seen.insert(*next) {
                queue.push_back(*next);
            }
        }
    }
    seen
}

pub fn error_count(issues: &[LintIssue]) -> usize {
    issues
        .iter()
        .filter(|i| i.severity == Severity::Error)
        .count()
}
