//! Structural validation findings.

use crate::model::{MachineId, StateId, TransitionId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How severe a finding is. Errors reject a build; warnings never do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
}

/// The tree node a diagnostic points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeRef {
    /// The document itself (e.g. it has no root machine).
    Model,
    Machine(MachineId),
    State(StateId),
    Transition(TransitionId),
}

/// A single validation finding: severity, human-readable message, and the
/// offending node. Findings are accumulated, never thrown one at a time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub node: NodeRef,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>, node: NodeRef) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            node,
        }
    }

    pub fn warning(message: impl Into<String>, node: NodeRef) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
            node,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {}", tag, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_tags_severity() {
        let d = Diagnostic::error("no state machine defined", NodeRef::Model);
        assert_eq!(d.to_string(), "error: no state machine defined");
        assert!(d.is_error());

        let w = Diagnostic::warning("dead transition", NodeRef::Model);
        assert_eq!(w.to_string(), "warning: dead transition");
        assert!(!w.is_error());
    }

    #[test]
    fn diagnostics_serialize() {
        let d = Diagnostic::warning("shadowed", NodeRef::Model);
        let json = serde_json::to_string(&d).unwrap();
        let back: Diagnostic = serde_json::from_str(&json).unwrap();
        assert_eq!(d, back);
    }
}
