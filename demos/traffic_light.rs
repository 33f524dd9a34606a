//! Traffic Light With a Nested Fault Mode
//!
//! This example demonstrates a two-level machine:
//! - A composite `Running` state cycling Red -> Green -> Yellow
//! - A root-level `fault` event that exits the whole composite
//! - Event bubbling: `fault` is not handled inside `Running`
//!
//! Run with: cargo run --example traffic_light

use hfsm::machine::CompiledMachine;
use hfsm::model::{MachineDef, ModelDef, StateDef, TransitionDef};

fn main() {
    println!("=== Traffic Light With Fault Mode ===\n");

    let def = ModelDef::with_root(
        MachineDef::new()
            .state(
                StateDef::new("Running").initial().machine(
                    MachineDef::new()
                        .state(StateDef::new("Red").initial())
                        .state(StateDef::new("Green"))
                        .state(StateDef::new("Yellow"))
                        .transition(TransitionDef::new("tick", "Running.Green")),
                ),
            )
            .state(StateDef::new("FlashingRed"))
            .transition(TransitionDef::new("fault", "FlashingRed").action("alertOperator")),
    );

    let compiled = CompiledMachine::build(&def).expect("description is valid");
    let mut instance = compiled.start().expect("machine has states");

    println!("Initial state: {}\n", instance.current_name());

    for event in ["tick", "fault"] {
        match instance.handle(event) {
            Some(plan) => {
                println!("Event '{event}':");
                for &state in &plan.exit {
                    println!("  exit  {}", compiled.qualified_name(state));
                }
                if let Some(action) = &plan.action {
                    println!("  run   {action}");
                }
                for &state in &plan.enter {
                    println!("  enter {}", compiled.qualified_name(state));
                }
            }
            None => println!("Event '{event}': no transition"),
        }
        println!("Now in: {}\n", instance.current_name());
    }

    println!("Visited: {}", instance.trace().path().join(" -> "));
    println!("\n=== Example Complete ===");
}
