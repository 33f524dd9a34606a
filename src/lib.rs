//! Hfsm: hierarchical state machine semantics, shared by a compiler and a
//! simulator.
//!
//! A machine description is a tree of states where any state may contain a
//! nested sub-machine. This crate turns that tree into well-defined runtime
//! behavior: which leaf state is occupied, which transition an event
//! selects (searching outward through ancestor machines, innermost
//! declaration winning), and the exact exit/enter sequences a transition
//! performs when it crosses nesting boundaries. The Java emitter and the
//! interactive simulator both consume this one core, so their observable
//! behavior is identical by construction.
//!
//! # Core Concepts
//!
//! - **Model**: the read-only arena form of the description tree
//! - **Validation**: structural diagnostics, accumulated in one pass
//! - **CompiledMachine**: the build gate plus resolution and planning
//! - **Plan**: the ordered exit states, optional action, and enter states
//!   of one transition
//!
//! # Example
//!
//! ```rust
//! use hfsm::machine::CompiledMachine;
//! use hfsm::model::{MachineDef, ModelDef, StateDef, TransitionDef};
//!
//! // A composite Door with two inner states, and an alarm one level up.
//! let def = ModelDef::with_root(
//!     MachineDef::new()
//!         .state(
//!             StateDef::new("Door").initial().machine(
//!                 MachineDef::new()
//!                     .state(StateDef::new("Closed").initial())
//!                     .state(StateDef::new("Open"))
//!                     .transition(TransitionDef::new("open", "Door.Open")),
//!             ),
//!         )
//!         .state(StateDef::new("Alarm"))
//!         .transition(TransitionDef::new("breach", "Alarm").action("siren")),
//! );
//!
//! let compiled = CompiledMachine::build(&def).unwrap();
//! let mut instance = compiled.start().unwrap();
//! assert_eq!(instance.current_name(), "Door.Closed");
//!
//! // `open` is handled inside Door; `breach` bubbles up to the root.
//! instance.handle("open").unwrap();
//! assert_eq!(instance.current_name(), "Door.Open");
//!
//! let plan = instance.handle("breach").unwrap();
//! assert_eq!(plan.action.as_deref(), Some("siren"));
//! assert_eq!(instance.current_name(), "Alarm");
//! ```

pub mod cli;
pub mod core;
pub mod emit;
pub mod inspect;
pub mod machine;
pub mod model;
pub mod sim;
pub mod validate;

// Re-export commonly used types
pub use core::Plan;
pub use machine::{BuildRejected, CompiledMachine, MachineInstance};
pub use model::{MachineDef, Model, ModelDef, StateDef, TransitionDef};
pub use validate::{Diagnostic, Severity};
