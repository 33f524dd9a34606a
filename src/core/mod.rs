//! The pure core: flattening, event resolution, and transition planning.
//!
//! Everything here is a pure function of the read-only tree — no side
//! effects, no mutation, O(depth) per operation. The compiler (emitter) and
//! the interactive walker (simulator) both consume these and only these,
//! which is what keeps their observable behavior identical.

pub mod flatten;
pub mod plan;
pub mod resolve;

pub use plan::{initial_plan, plan, Plan};
pub use resolve::resolve;
