//! The build gate and the shared runtime facade.
//!
//! [`CompiledMachine::build`] validates a description and, when no
//! error-severity diagnostic exists, freezes the tree together with its
//! derived data (leaves, qualified names). Both the emitter and the
//! simulator work exclusively through this type, so they cannot diverge on
//! resolution or planning semantics. A [`MachineInstance`] adds the single
//! piece of mutable runtime state — the current leaf — plus a transition
//! trace.

mod trace;

pub use trace::{TransitionRecord, TransitionTrace};

use crate::core::{self, Plan};
use crate::model::{Model, ModelDef, StateId};
use crate::validate::{self, Diagnostic};
use chrono::Utc;
use std::collections::HashMap;
use thiserror::Error;

/// A description rejected by the validator. Carries every diagnostic, not
/// just the errors, so a caller can show the full picture at once.
#[derive(Debug, Error)]
#[error("machine description is invalid ({} diagnostics)", .diagnostics.len())]
pub struct BuildRejected {
    pub diagnostics: Vec<Diagnostic>,
}

/// A validated tree plus its derived data, ready for code generation or
/// simulation. Immutable and shareable read-only across threads.
///
/// # Example
///
/// ```rust
/// use hfsm::machine::CompiledMachine;
/// use hfsm::model::{MachineDef, ModelDef, StateDef, TransitionDef};
///
/// let def = ModelDef::with_root(
///     MachineDef::new()
///         .state(StateDef::new("On").initial())
///         .state(StateDef::new("Off"))
///         .transition(TransitionDef::new("toggle", "Off")),
/// );
/// let compiled = CompiledMachine::build(&def).unwrap();
///
/// let mut instance = compiled.start().unwrap();
/// assert_eq!(instance.current_name(), "On");
/// instance.handle("toggle").unwrap();
/// assert_eq!(instance.current_name(), "Off");
/// ```
#[derive(Debug)]
pub struct CompiledMachine {
    model: Model,
    leaves: Vec<StateId>,
    qualified_names: HashMap<StateId, String>,
    ancestor_chains: HashMap<StateId, Vec<StateId>>,
    warnings: Vec<Diagnostic>,
}

impl CompiledMachine {
    /// Validate `def` and build the derived structures.
    ///
    /// Any error-severity diagnostic rejects the build; warnings ride along
    /// on the compiled machine via [`warnings`](Self::warnings).
    pub fn build(def: &ModelDef) -> Result<Self, BuildRejected> {
        let model = Model::from_def(def);
        let diagnostics = validate::validate(&model);

        if validate::has_errors(&diagnostics) {
            return Err(BuildRejected { diagnostics });
        }

        let leaves = model
            .root()
            .map(|root| core::flatten::leaves(&model, root))
            .unwrap_or_default();
        let qualified_names = model
            .state_ids()
            .map(|s| (s, model.qualified_name(s)))
            .collect();
        let ancestor_chains = model.state_ids().map(|s| (s, model.ancestors(s))).collect();

        Ok(Self {
            model,
            leaves,
            qualified_names,
            ancestor_chains,
            warnings: diagnostics,
        })
    }

    /// The read-only tree.
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Leaf states in declaration order.
    pub fn leaves(&self) -> &[StateId] {
        &self.leaves
    }

    /// Warnings that accompanied a successful build.
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    /// Precomputed qualified name of any state in the tree.
    pub fn qualified_name(&self, state: StateId) -> &str {
        self.qualified_names
            .get(&state)
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Precomputed ancestor chain of any state, itself included, innermost
    /// to outermost.
    pub fn ancestors(&self, state: StateId) -> &[StateId] {
        self.ancestor_chains
            .get(&state)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// The plan that starts an instance. `None` when the root machine has
    /// no states.
    pub fn initial_plan(&self) -> Option<Plan> {
        core::initial_plan(&self.model)
    }

    /// Resolve `event` from `current` and plan the resulting transition.
    /// `None` means no machine on the ancestor chain handles the event —
    /// a normal outcome, not a failure.
    pub fn resolve_and_plan(&self, current: StateId, event: &str) -> Option<Plan> {
        let transition = core::resolve(&self.model, current, event)?;
        core::plan(&self.model, current, transition)
    }

    /// Start a fresh instance at the initial leaf. `None` when the root
    /// machine has no states.
    pub fn start(&self) -> Option<MachineInstance<'_>> {
        let plan = self.initial_plan()?;
        Some(MachineInstance {
            machine: self,
            current: plan.destination,
            trace: TransitionTrace::new(),
        })
    }
}

/// One running instance: the compiled machine plus the only mutable value
/// in the system, its current leaf. Resolve → plan → apply is a single
/// synchronous operation with no suspension points.
#[derive(Debug)]
pub struct MachineInstance<'a> {
    machine: &'a CompiledMachine,
    current: StateId,
    trace: TransitionTrace,
}

impl MachineInstance<'_> {
    /// The leaf currently occupied.
    pub fn current(&self) -> StateId {
        self.current
    }

    /// Qualified name of the current leaf.
    pub fn current_name(&self) -> &str {
        self.machine.qualified_name(self.current)
    }

    /// Fire `event`: resolve, plan, and apply in one step.
    ///
    /// On a hit the current leaf advances and the trace grows by one
    /// record; the returned plan carries the exit/enter sequences for the
    /// driver to report. `None` leaves the instance untouched.
    pub fn handle(&mut self, event: &str) -> Option<Plan> {
        let plan = self.machine.resolve_and_plan(self.current, event)?;

        let record = TransitionRecord {
            from: self.machine.qualified_name(self.current).to_string(),
            to: self.machine.qualified_name(plan.destination).to_string(),
            event: event.to_string(),
            action: plan.action.clone(),
            timestamp: Utc::now(),
        };
        self.trace = self.trace.record(record);
        self.current = plan.destination;

        Some(plan)
    }

    /// Everything applied so far.
    pub fn trace(&self) -> &TransitionTrace {
        &self.trace
    }
}
