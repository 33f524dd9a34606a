//! Hierarchy-aware transition planning.
//!
//! A transition that crosses state-nesting boundaries must exit every state
//! from the current leaf up to (but not including) the least common
//! ancestor, run its action, then enter every state from the LCA's child
//! down to the destination leaf. This module computes those sequences; both
//! the emitter and the simulator consume them rather than re-deriving any
//! of this.

use super::flatten;
use crate::model::{Model, StateId, TransitionId};
use std::collections::HashSet;

/// The exact steps a transition performs.
///
/// `exit` runs innermost→outermost, then `action` (if any), then `enter`
/// outermost→innermost, landing on `destination`. For a self-transition
/// both sequences are empty but the action still fires.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Plan {
    /// States exited, innermost first. Empty for a self-transition.
    pub exit: Vec<StateId>,
    /// Action to run between the last exit and the first enter.
    pub action: Option<String>,
    /// States entered, outermost first. Empty for a self-transition.
    pub enter: Vec<StateId>,
    /// The leaf occupied once the plan has been applied.
    pub destination: StateId,
}

/// Compute the plan for firing `transition` while the machine occupies
/// `current` (a leaf).
///
/// A composite target is descended through its initial-state chain until a
/// leaf is reached. Returns `None` if the transition's target never
/// resolved or descends into a machine with no initial state — a validated
/// tree never produces either.
pub fn plan(model: &Model, current: StateId, transition: TransitionId) -> Option<Plan> {
    let node = model.transition(transition);
    let target = node.target?;

    let destination = if model.is_composite(target) {
        let nested = model.state(target).machine?;
        flatten::initial_leaf(model, nested)?
    } else {
        target
    };

    let current_chain = model.ancestors(current);
    let destination_chain = model.ancestors(destination);

    let current_set: HashSet<StateId> = current_chain.iter().copied().collect();
    let lca = destination_chain
        .iter()
        .copied()
        .find(|id| current_set.contains(id));

    let exit: Vec<StateId> = current_chain
        .iter()
        .copied()
        .take_while(|&s| Some(s) != lca)
        .collect();

    let mut enter: Vec<StateId> = destination_chain
        .iter()
        .copied()
        .take_while(|&s| Some(s) != lca)
        .collect();
    enter.reverse();

    Some(Plan {
        exit,
        action: node.action.clone(),
        enter,
        destination,
    })
}

/// The plan that starts a machine instance: no current state, so nothing is
/// exited and no shared ancestor exists — the enter sequence is the root's
/// initial-state chain down to the first leaf.
///
/// `None` when the tree has no root machine or the root machine is empty.
pub fn initial_plan(model: &Model) -> Option<Plan> {
    let root = model.root()?;
    let enter = flatten::initial_chain(model, root);
    let destination = *enter.last()?;

    Some(Plan {
        exit: Vec::new(),
        action: None,
        enter,
        destination,
    })
}
