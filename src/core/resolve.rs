//! Event resolution: the outward search for a matching transition.
//!
//! A transition declared inside a nested machine shadows a same-named event
//! handled further out — innermost declaration wins. Each machine level has
//! unique event names, so at most one level can match first and the result
//! is single-valued.

use crate::model::{Model, StateId, TransitionId};

/// Find the transition that applies when `event` fires while the machine
/// occupies `state`.
///
/// The search starts at `state`'s own nested machine if `state` is
/// composite, otherwise at the machine that directly owns it, and hops
/// outward one nesting level at a time. `None` means no machine on the
/// chain handles the event.
pub fn resolve(model: &Model, state: StateId, event: &str) -> Option<TransitionId> {
    let mut scope = if model.is_composite(state) {
        model.state(state).machine
    } else {
        Some(model.state(state).parent)
    };

    while let Some(machine) = scope {
        for &transition in &model.machine(machine).transitions {
            if model.transition(transition).event == event {
                return Some(transition);
            }
        }

        scope = model
            .machine(machine)
            .owner
            .map(|owner| model.state(owner).parent);
    }

    None
}
