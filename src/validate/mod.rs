//! Structural validation of the machine tree.
//!
//! Validation runs independently of any runtime walk and accumulates ALL
//! findings instead of stopping at the first one — a user fixing a
//! description should see everything wrong with it in a single pass.
//! Errors gate the build; warnings ride along with a successful one.
//!
//! # Example
//!
//! ```rust
//! use hfsm::model::{MachineDef, Model, ModelDef, StateDef};
//! use hfsm::validate::{validate, Severity};
//!
//! // Two initial states: one error for the extra flag.
//! let def = ModelDef::with_root(
//!     MachineDef::new()
//!         .state(StateDef::new("A").initial())
//!         .state(StateDef::new("B").initial()),
//! );
//! let diagnostics = validate(&Model::from_def(&def));
//!
//! assert_eq!(diagnostics.len(), 1);
//! assert_eq!(diagnostics[0].severity, Severity::Error);
//! ```

mod diagnostic;
mod rules;

pub use diagnostic::{Diagnostic, NodeRef, Severity};

use crate::model::Model;

/// Run every structural check over the whole tree.
///
/// Per-machine checks visit every machine, root first; the unreachable
/// check recurses the same way, so nested dead transitions are found too.
pub fn validate(model: &Model) -> Vec<Diagnostic> {
    let mut out = Vec::new();

    rules::check_root_machine(model, &mut out);

    for machine in model.machine_ids() {
        rules::check_initial_states(model, machine, &mut out);
        rules::check_unique_state_names(model, machine, &mut out);
        rules::check_unique_events(model, machine, &mut out);
    }

    rules::check_targets(model, &mut out);

    for machine in model.machine_ids() {
        rules::check_unreachable_transitions(model, machine, &mut out);
    }

    out
}

/// Whether any finding is severe enough to reject a build.
pub fn has_errors(diagnostics: &[Diagnostic]) -> bool {
    diagnostics.iter().any(Diagnostic::is_error)
}
