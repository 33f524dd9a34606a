//! Arena representation of the machine tree.
//!
//! The nested document is lowered once into flat node vectors indexed by
//! typed handles, with explicit parent links in both directions (state →
//! owning machine, machine → owning state). Handles avoid reference cycles
//! by construction and make the tree trivially shareable read-only. Nothing
//! here mutates after [`Model::from_def`] returns.

use super::def::{MachineDef, ModelDef, StateDef};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Handle to a machine node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MachineId(usize);

/// Handle to a state node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateId(usize);

/// Handle to a transition node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransitionId(usize);

/// A machine level: its states and transitions in declaration order, plus
/// the composite state owning it (`None` for the root machine).
#[derive(Clone, Debug)]
pub struct MachineNode {
    pub owner: Option<StateId>,
    pub states: Vec<StateId>,
    pub transitions: Vec<TransitionId>,
}

/// A state: its name, initial flag, owning machine, and nested machine if
/// the document declared one.
#[derive(Clone, Debug)]
pub struct StateNode {
    pub name: String,
    pub initial: bool,
    pub parent: MachineId,
    pub machine: Option<MachineId>,
}

/// A transition: event, optional action, the machine level declaring it,
/// and its target. `target` is `None` when the document's target name did
/// not resolve; the validator reports that, and nothing downstream of a
/// successful build ever observes it.
#[derive(Clone, Debug)]
pub struct TransitionNode {
    pub event: String,
    pub action: Option<String>,
    pub owner: MachineId,
    pub target: Option<StateId>,
    pub target_name: String,
}

/// The lowered tree. Read-only after construction.
///
/// # Example
///
/// ```rust
/// use hfsm::model::{MachineDef, Model, ModelDef, StateDef, TransitionDef};
///
/// let def = ModelDef::with_root(
///     MachineDef::new()
///         .state(StateDef::new("On").initial())
///         .state(StateDef::new("Off"))
///         .transition(TransitionDef::new("toggle", "Off")),
/// );
/// let model = Model::from_def(&def);
///
/// let root = model.root().unwrap();
/// assert_eq!(model.machine(root).states.len(), 2);
/// let on = model.machine(root).states[0];
/// assert_eq!(model.qualified_name(on), "On");
/// ```
#[derive(Clone, Debug, Default)]
pub struct Model {
    machines: Vec<MachineNode>,
    states: Vec<StateNode>,
    transitions: Vec<TransitionNode>,
    root: Option<MachineId>,
}

impl Model {
    /// Lower a document into the arena and resolve transition targets.
    ///
    /// Lowering never fails: structural problems (including unresolved
    /// targets) are left in place for the validator to report.
    pub fn from_def(def: &ModelDef) -> Self {
        let mut model = Model::default();

        if let Some(machine) = &def.machine {
            let root = model.lower_machine(machine, None);
            model.root = Some(root);
        }

        model.resolve_targets();
        model
    }

    fn lower_machine(&mut self, def: &MachineDef, owner: Option<StateId>) -> MachineId {
        let id = MachineId(self.machines.len());
        self.machines.push(MachineNode {
            owner,
            states: Vec::new(),
            transitions: Vec::new(),
        });

        for state_def in &def.states {
            let state = self.lower_state(state_def, id);
            self.machines[id.0].states.push(state);
        }

        for transition_def in &def.transitions {
            let transition = TransitionId(self.transitions.len());
            self.transitions.push(TransitionNode {
                event: transition_def.event.clone(),
                action: transition_def.action.clone(),
                owner: id,
                target: None,
                target_name: transition_def.target.clone(),
            });
            self.machines[id.0].transitions.push(transition);
        }

        id
    }

    fn lower_state(&mut self, def: &StateDef, parent: MachineId) -> StateId {
        let id = StateId(self.states.len());
        self.states.push(StateNode {
            name: def.name.clone(),
            initial: def.initial,
            parent,
            machine: None,
        });

        if let Some(machine_def) = &def.machine {
            let machine = self.lower_machine(machine_def, Some(id));
            self.states[id.0].machine = Some(machine);
        }

        id
    }

    /// Targets are written as qualified names and resolved against the whole
    /// tree, the way the document's authoring scope exposes every state
    /// under its qualified name.
    fn resolve_targets(&mut self) {
        let mut by_name: HashMap<String, StateId> = HashMap::new();
        for id in self.state_ids() {
            by_name.insert(self.qualified_name(id), id);
        }

        for node in &mut self.transitions {
            node.target = by_name.get(&node.target_name).copied();
        }
    }

    /// The root machine, if the document declared one.
    pub fn root(&self) -> Option<MachineId> {
        self.root
    }

    pub fn machine(&self, id: MachineId) -> &MachineNode {
        &self.machines[id.0]
    }

    pub fn state(&self, id: StateId) -> &StateNode {
        &self.states[id.0]
    }

    pub fn transition(&self, id: TransitionId) -> &TransitionNode {
        &self.transitions[id.0]
    }

    /// Every machine in the tree, root first, in lowering order.
    pub fn machine_ids(&self) -> impl Iterator<Item = MachineId> {
        (0..self.machines.len()).map(MachineId)
    }

    /// Every state in the tree, in lowering order.
    pub fn state_ids(&self) -> impl Iterator<Item = StateId> {
        (0..self.states.len()).map(StateId)
    }

    /// Every transition in the tree, in lowering order.
    pub fn transition_ids(&self) -> impl Iterator<Item = TransitionId> {
        (0..self.transitions.len()).map(TransitionId)
    }

    /// A state is composite iff it owns a machine with at least one state.
    pub fn is_composite(&self, id: StateId) -> bool {
        match self.state(id).machine {
            Some(machine) => !self.machine(machine).states.is_empty(),
            None => false,
        }
    }

    /// Leaves are the only states a running instance ever occupies.
    pub fn is_leaf(&self, id: StateId) -> bool {
        !self.is_composite(id)
    }

    /// The ancestor chain from `id` outward to its root-level state,
    /// inclusive of `id` itself. Machine wrappers are not part of the chain.
    pub fn ancestors(&self, id: StateId) -> Vec<StateId> {
        let mut chain = vec![id];
        let mut current = id;

        while let Some(owner) = self.machine(self.state(current).parent).owner {
            chain.push(owner);
            current = owner;
        }

        chain
    }

    /// Dot-joined ancestor names, outermost first. Root-level states have
    /// no prefix.
    pub fn qualified_name(&self, id: StateId) -> String {
        let mut chain = self.ancestors(id);
        chain.reverse();
        chain
            .iter()
            .map(|&state| self.state(state).name.as_str())
            .collect::<Vec<_>>()
            .join(".")
    }
}
