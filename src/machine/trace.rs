//! Transition trace for a running instance.
//!
//! An instance records every applied transition into an immutable trace —
//! `record` returns a new trace rather than mutating in place. The trace is
//! reporting data (qualified names, not handles) so drivers can print or
//! serialize it directly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Record of one applied transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// Qualified name of the leaf the instance left.
    pub from: String,
    /// Qualified name of the leaf the instance landed on.
    pub to: String,
    /// The event that fired.
    pub event: String,
    /// The action the transition named, if any.
    pub action: Option<String>,
    /// When the transition was applied.
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of applied transitions.
///
/// # Example
///
/// ```rust
/// use chrono::Utc;
/// use hfsm::machine::{TransitionRecord, TransitionTrace};
///
/// let trace = TransitionTrace::new().record(TransitionRecord {
///     from: "A.A1".into(),
///     to: "A.A2".into(),
///     event: "x".into(),
///     action: None,
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(trace.entries().len(), 1);
/// assert_eq!(trace.path(), ["A.A1", "A.A2"]);
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TransitionTrace {
    entries: Vec<TransitionRecord>,
}

impl TransitionTrace {
    /// Create an empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record, returning a new trace. The original is unchanged.
    pub fn record(&self, record: TransitionRecord) -> Self {
        let mut entries = self.entries.clone();
        entries.push(record);
        Self { entries }
    }

    /// All records, oldest first.
    pub fn entries(&self) -> &[TransitionRecord] {
        &self.entries
    }

    /// The sequence of leaves visited: the first record's source followed by
    /// every record's destination. Empty when nothing has been applied.
    pub fn path(&self) -> Vec<&str> {
        let Some(first) = self.entries.first() else {
            return Vec::new();
        };

        let mut path = vec![first.from.as_str()];
        path.extend(self.entries.iter().map(|e| e.to.as_str()));
        path
    }

    /// The action names fired so far, in order.
    pub fn actions(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter_map(|e| e.action.as_deref())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(from: &str, to: &str, event: &str, action: Option<&str>) -> TransitionRecord {
        TransitionRecord {
            from: from.into(),
            to: to.into(),
            event: event.into(),
            action: action.map(String::from),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn trace_preserves_order() {
        let trace = TransitionTrace::new()
            .record(record("A.A1", "A.A2", "x", None))
            .record(record("A.A2", "B", "y", Some("logY")));

        assert_eq!(trace.path(), ["A.A1", "A.A2", "B"]);
        assert_eq!(trace.actions(), ["logY"]);
    }

    #[test]
    fn record_leaves_the_original_untouched() {
        let empty = TransitionTrace::new();
        let one = empty.record(record("A", "B", "go", None));

        assert!(empty.entries().is_empty());
        assert_eq!(one.entries().len(), 1);
    }

    #[test]
    fn empty_trace_has_empty_path() {
        let trace = TransitionTrace::new();
        assert!(trace.path().is_empty());
        assert!(trace.actions().is_empty());
    }

    #[test]
    fn trace_serializes() {
        let trace = TransitionTrace::new().record(record("A", "B", "go", Some("fire")));
        let json = serde_json::to_string(&trace).unwrap();
        let back: TransitionTrace = serde_json::from_str(&json).unwrap();
        assert_eq!(back.entries(), trace.entries());
    }
}
