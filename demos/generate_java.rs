//! Java Code Generation
//!
//! Compiles a small hierarchical description and prints the generated Java
//! class. The transition tables in the output are produced through the same
//! resolver the simulator uses.
//!
//! Run with: cargo run --example generate_java

use hfsm::emit::generate_java;
use hfsm::machine::CompiledMachine;
use hfsm::model::{MachineDef, ModelDef, StateDef, TransitionDef};

fn main() {
    let def = ModelDef::with_root(
        MachineDef::new()
            .state(
                StateDef::new("Door").initial().machine(
                    MachineDef::new()
                        .state(StateDef::new("Closed").initial())
                        .state(StateDef::new("Open"))
                        .transition(TransitionDef::new("open", "Door.Open").action("unlatch"))
                        .transition(TransitionDef::new("close", "Door.Closed")),
                ),
            )
            .state(StateDef::new("Alarm"))
            .transition(TransitionDef::new("breach", "Alarm").action("siren")),
    );

    let compiled = CompiledMachine::build(&def).expect("description is valid");
    print!("{}", generate_java(&compiled, "door_alarm"));
}
