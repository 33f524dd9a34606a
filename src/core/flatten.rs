//! Leaf enumeration and initial-state descent.
//!
//! Pure functions of the tree, computed once per build. The tree is assumed
//! structurally well-formed here; the validator is the gate for that.

use crate::model::{MachineId, Model, StateId};

/// All leaf states reachable under `machine`, in declaration order.
///
/// Composite states are descended into; a state is emitted iff its nested
/// machine is absent or empty.
pub fn leaves(model: &Model, machine: MachineId) -> Vec<StateId> {
    let mut out = Vec::new();
    collect_leaves(model, machine, &mut out);
    out
}

fn collect_leaves(model: &Model, machine: MachineId, out: &mut Vec<StateId>) {
    for &state in &model.machine(machine).states {
        if model.is_composite(state) {
            if let Some(nested) = model.state(state).machine {
                collect_leaves(model, nested, out);
            }
        } else {
            out.push(state);
        }
    }
}

/// The chain of states entered when `machine` starts: its initial state,
/// then that state's nested machine's initial state, and so on down to a
/// leaf. Outermost first.
///
/// Returns an empty chain when the machine has no states, and stops early
/// if some non-empty machine on the way lacks an initial flag — a validated
/// tree never does.
pub fn initial_chain(model: &Model, machine: MachineId) -> Vec<StateId> {
    let mut chain = Vec::new();
    let mut current = Some(machine);

    while let Some(machine) = current {
        let Some(&initial) = model
            .machine(machine)
            .states
            .iter()
            .find(|&&s| model.state(s).initial)
        else {
            break;
        };

        chain.push(initial);
        current = match model.state(initial).machine {
            Some(nested) if !model.machine(nested).states.is_empty() => Some(nested),
            _ => None,
        };
    }

    chain
}

/// The leaf a machine occupies when it starts.
pub fn initial_leaf(model: &Model, machine: MachineId) -> Option<StateId> {
    initial_chain(model, machine).last().copied()
}

/// Every event name declared anywhere in the tree, sorted and deduplicated.
pub fn all_events(model: &Model) -> Vec<String> {
    let mut events: Vec<String> = model
        .transition_ids()
        .map(|t| model.transition(t).event.clone())
        .collect();
    events.sort();
    events.dedup();
    events
}

/// Every action name declared anywhere in the tree, sorted and deduplicated.
pub fn all_actions(model: &Model) -> Vec<String> {
    let mut actions: Vec<String> = model
        .transition_ids()
        .filter_map(|t| model.transition(t).action.clone())
        .collect();
    actions.sort();
    actions.dedup();
    actions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MachineDef, ModelDef, StateDef, TransitionDef};

    fn deep_def() -> ModelDef {
        ModelDef::with_root(
            MachineDef::new()
                .state(
                    StateDef::new("A").initial().machine(
                        MachineDef::new()
                            .state(
                                StateDef::new("A1").initial().machine(
                                    MachineDef::new()
                                        .state(StateDef::new("A1a").initial())
                                        .state(StateDef::new("A1b")),
                                ),
                            )
                            .state(StateDef::new("A2"))
                            .transition(TransitionDef::new("x", "A.A2").action("innerX")),
                    ),
                )
                .state(StateDef::new("B"))
                .transition(TransitionDef::new("y", "B").action("outerY")),
        )
    }

    fn names(model: &Model, states: &[StateId]) -> Vec<String> {
        states.iter().map(|&s| model.qualified_name(s)).collect()
    }

    #[test]
    fn leaves_descend_composites_in_declaration_order() {
        let model = Model::from_def(&deep_def());
        let found = leaves(&model, model.root().unwrap());
        assert_eq!(names(&model, &found), ["A.A1.A1a", "A.A1.A1b", "A.A2", "B"]);
    }

    #[test]
    fn empty_nested_machine_makes_a_leaf() {
        let def = ModelDef::with_root(
            MachineDef::new().state(StateDef::new("Solo").initial().machine(MachineDef::new())),
        );
        let model = Model::from_def(&def);
        let found = leaves(&model, model.root().unwrap());
        assert_eq!(names(&model, &found), ["Solo"]);
    }

    #[test]
    fn initial_chain_recurses_to_a_leaf() {
        let model = Model::from_def(&deep_def());
        let chain = initial_chain(&model, model.root().unwrap());
        assert_eq!(names(&model, &chain), ["A", "A.A1", "A.A1.A1a"]);

        let leaf = initial_leaf(&model, model.root().unwrap()).unwrap();
        assert!(model.is_leaf(leaf));
        assert_eq!(model.qualified_name(leaf), "A.A1.A1a");
    }

    #[test]
    fn initial_chain_of_empty_machine_is_empty() {
        let model = Model::from_def(&ModelDef::with_root(MachineDef::new()));
        assert!(initial_chain(&model, model.root().unwrap()).is_empty());
        assert_eq!(initial_leaf(&model, model.root().unwrap()), None);
    }

    #[test]
    fn event_and_action_collection_is_sorted_and_deduplicated() {
        let model = Model::from_def(&deep_def());
        assert_eq!(all_events(&model), ["x", "y"]);
        assert_eq!(all_actions(&model), ["innerX", "outerY"]);
    }
}
