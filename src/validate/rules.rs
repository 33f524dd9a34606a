//! The individual structural checks.
//!
//! Each check appends to the shared diagnostics list; none of them stops at
//! the first finding, so a caller always sees everything that is wrong in
//! one pass.

use super::diagnostic::{Diagnostic, NodeRef};
use crate::model::{MachineId, Model};
use std::collections::HashSet;

/// The document must declare a root machine at all.
pub fn check_root_machine(model: &Model, out: &mut Vec<Diagnostic>) {
    if model.root().is_none() {
        out.push(Diagnostic::error("No state machine defined.", NodeRef::Model));
    }
}

/// Every non-empty machine has exactly one state flagged initial. Zero is
/// reported on the machine; for more than one, every flagged state beyond
/// the first is reported individually.
pub fn check_initial_states(model: &Model, machine: MachineId, out: &mut Vec<Diagnostic>) {
    let states = &model.machine(machine).states;
    if states.is_empty() {
        return;
    }

    let initial: Vec<_> = states
        .iter()
        .copied()
        .filter(|&s| model.state(s).initial)
        .collect();

    if initial.is_empty() {
        out.push(Diagnostic::error(
            "Machine must have exactly one initial state.",
            NodeRef::Machine(machine),
        ));
    } else {
        for &extra in &initial[1..] {
            out.push(Diagnostic::error(
                "Machine must have only one initial state.",
                NodeRef::State(extra),
            ));
        }
    }
}

/// State names are unique among siblings within one machine.
pub fn check_unique_state_names(model: &Model, machine: MachineId, out: &mut Vec<Diagnostic>) {
    let mut seen = HashSet::new();

    for &state in &model.machine(machine).states {
        let name = &model.state(state).name;
        if !seen.insert(name.clone()) {
            out.push(Diagnostic::error(
                format!("State with name '{name}' is already defined."),
                NodeRef::State(state),
            ));
        }
    }
}

/// Event names are unique among one machine's own transitions. Uniqueness
/// is per machine level, not global.
pub fn check_unique_events(model: &Model, machine: MachineId, out: &mut Vec<Diagnostic>) {
    let mut seen = HashSet::new();

    for &transition in &model.machine(machine).transitions {
        let event = &model.transition(transition).event;
        if !seen.insert(event.clone()) {
            out.push(Diagnostic::error(
                format!("Transition for event '{event}' is already defined."),
                NodeRef::Transition(transition),
            ));
        }
    }
}

/// Every transition target must have resolved to a state in the tree.
pub fn check_targets(model: &Model, out: &mut Vec<Diagnostic>) {
    for transition in model.transition_ids() {
        let node = model.transition(transition);
        if node.target.is_none() {
            out.push(Diagnostic::error(
                format!("Target state '{}' does not exist.", node.target_name),
                NodeRef::Transition(transition),
            ));
        }
    }
}

/// A transition at machine level `M` is dead when every immediate child of
/// `M` is composite and its subtree intercepts the event before it could
/// bubble up — the innermost-wins rule then makes the parent handler
/// unreachable from every leaf under `M`.
pub fn check_unreachable_transitions(model: &Model, machine: MachineId, out: &mut Vec<Diagnostic>) {
    let states = &model.machine(machine).states;
    if states.is_empty() {
        return;
    }

    for &transition in &model.machine(machine).transitions {
        let event = &model.transition(transition).event;

        let all_children_intercept = states.iter().all(|&state| {
            model.is_composite(state)
                && model
                    .state(state)
                    .machine
                    .is_some_and(|nested| machine_handles(model, nested, event))
        });

        if all_children_intercept {
            out.push(Diagnostic::warning(
                format!(
                    "Transition for event '{event}' will never be reached \
                     because all child states handle this event."
                ),
                NodeRef::Transition(transition),
            ));
        }
    }
}

/// Bottom-up definition: a machine handles an event if it declares a
/// transition for it directly, or it has children, all of them composite,
/// whose nested machines all handle it.
fn machine_handles(model: &Model, machine: MachineId, event: &str) -> bool {
    let node = model.machine(machine);

    if node
        .transitions
        .iter()
        .any(|&t| model.transition(t).event == event)
    {
        return true;
    }

    !node.states.is_empty()
        && node.states.iter().all(|&state| {
            model.is_composite(state)
                && model
                    .state(state)
                    .machine
                    .is_some_and(|nested| machine_handles(model, nested, event))
        })
}
