//! The machine tree: description documents and their arena form.
//!
//! A front end hands in a nested [`ModelDef`] document (deserialized from
//! JSON or built with the fluent API). [`Model::from_def`] lowers it once
//! into an arena of handle-indexed nodes with explicit parent links, which
//! everything else in the crate treats as read-only.

mod arena;
mod def;

pub use arena::{MachineId, MachineNode, Model, StateId, StateNode, TransitionId, TransitionNode};
pub use def::{MachineDef, ModelDef, StateDef, TransitionDef};
