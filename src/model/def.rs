//! Machine description documents.
//!
//! These are the nested, serde-facing types an external front end hands in:
//! a machine owns states, a state may own a nested machine, and transitions
//! reference their target state by qualified name. The document is plain
//! data — all derived structure (parent links, leaf sets, name tables) is
//! computed by [`Model`](super::Model).

use serde::{Deserialize, Serialize};

/// Top-level description document.
///
/// A document without a root machine is representable (the validator reports
/// it as an error) so that structural problems surface as diagnostics rather
/// than deserialization failures.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ModelDef {
    /// The root machine, if the document defines one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub machine: Option<MachineDef>,
}

impl ModelDef {
    /// Wrap a root machine into a document.
    pub fn with_root(machine: MachineDef) -> Self {
        Self {
            machine: Some(machine),
        }
    }
}

/// An ordered set of states and the transitions declared at this nesting
/// level.
///
/// Declaration order is preserved but carries no meaning beyond the order in
/// which leaves are enumerated.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MachineDef {
    #[serde(default)]
    pub states: Vec<StateDef>,
    #[serde(default)]
    pub transitions: Vec<TransitionDef>,
}

impl MachineDef {
    /// Create an empty machine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a state, preserving declaration order.
    pub fn state(mut self, state: StateDef) -> Self {
        self.states.push(state);
        self
    }

    /// Append a transition declared at this machine level.
    pub fn transition(mut self, transition: TransitionDef) -> Self {
        self.transitions.push(transition);
        self
    }
}

/// A named state, optionally owning a nested machine.
///
/// A state whose nested machine has at least one state is *composite*; all
/// other states are leaves, and only leaves are ever occupied at runtime.
///
/// # Example
///
/// ```rust
/// use hfsm::model::{MachineDef, StateDef, TransitionDef};
///
/// let door = StateDef::new("Door").initial().machine(
///     MachineDef::new()
///         .state(StateDef::new("Closed").initial())
///         .state(StateDef::new("Open"))
///         .transition(TransitionDef::new("open", "Door.Open")),
/// );
/// assert_eq!(door.name, "Door");
/// assert!(door.initial);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StateDef {
    pub name: String,
    #[serde(default)]
    pub initial: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub machine: Option<MachineDef>,
}

impl StateDef {
    /// Create a leaf state.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            initial: false,
            machine: None,
        }
    }

    /// Flag this state as its machine's initial state.
    pub fn initial(mut self) -> Self {
        self.initial = true;
        self
    }

    /// Attach a nested machine, making this state composite.
    pub fn machine(mut self, machine: MachineDef) -> Self {
        self.machine = Some(machine);
        self
    }
}

/// A transition declared at some machine level.
///
/// `target` is the referenced state's qualified name — the dot-joined path
/// of ancestor state names, e.g. `"Door.Open"` — resolved against the whole
/// tree. An optional action name is invoked between the exit and enter
/// phases when the transition fires.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransitionDef {
    pub event: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    pub target: String,
}

impl TransitionDef {
    /// Create a transition for `event` targeting the state named `target`.
    pub fn new(event: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            action: None,
            target: target.into(),
        }
    }

    /// Name the action to run when this transition fires.
    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fluent_api_builds_nested_documents() {
        let def = ModelDef::with_root(
            MachineDef::new()
                .state(
                    StateDef::new("A").initial().machine(
                        MachineDef::new()
                            .state(StateDef::new("A1").initial())
                            .state(StateDef::new("A2"))
                            .transition(TransitionDef::new("x", "A.A2")),
                    ),
                )
                .state(StateDef::new("B"))
                .transition(TransitionDef::new("y", "B").action("logY")),
        );

        let root = def.machine.expect("root machine");
        assert_eq!(root.states.len(), 2);
        assert_eq!(root.transitions.len(), 1);
        assert_eq!(root.transitions[0].action.as_deref(), Some("logY"));

        let nested = root.states[0].machine.as_ref().expect("nested machine");
        assert_eq!(nested.states.len(), 2);
        assert!(nested.states[0].initial);
    }

    #[test]
    fn document_deserializes_from_json() {
        let json = r#"{
            "machine": {
                "states": [
                    {"name": "On", "initial": true},
                    {"name": "Off"}
                ],
                "transitions": [
                    {"event": "toggle", "target": "Off"}
                ]
            }
        }"#;

        let def: ModelDef = serde_json::from_str(json).unwrap();
        let root = def.machine.unwrap();
        assert_eq!(root.states[0].name, "On");
        assert!(root.states[0].initial);
        assert!(root.states[0].machine.is_none());
        assert_eq!(root.transitions[0].event, "toggle");
        assert_eq!(root.transitions[0].action, None);
    }

    #[test]
    fn missing_root_is_representable() {
        let def: ModelDef = serde_json::from_str("{}").unwrap();
        assert!(def.machine.is_none());
    }

    #[test]
    fn document_round_trips_through_json() {
        let def = ModelDef::with_root(
            MachineDef::new()
                .state(StateDef::new("Idle").initial())
                .state(StateDef::new("Busy"))
                .transition(TransitionDef::new("work", "Busy").action("spin")),
        );

        let json = serde_json::to_string(&def).unwrap();
        let back: ModelDef = serde_json::from_str(&json).unwrap();
        let root = back.machine.unwrap();
        assert_eq!(root.states.len(), 2);
        assert_eq!(root.transitions[0].action.as_deref(), Some("spin"));
    }
}
