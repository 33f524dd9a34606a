//! Indented dump of the machine tree, for debugging descriptions.

use crate::model::{MachineId, Model};
use std::fmt::Write as _;

const INDENT: &str = "    ";

/// Render the whole tree as an indented listing. Unresolved targets print
/// their written name, so the dump works on invalid documents too.
pub fn inspect(model: &Model) -> String {
    match model.root() {
        Some(root) => machine_to_string(model, root, ""),
        None => String::new(),
    }
}

fn machine_to_string(model: &Model, machine: MachineId, indent: &str) -> String {
    let node = model.machine(machine);
    let mut out = String::new();

    if !node.states.is_empty() {
        let _ = writeln!(out, "{indent}States:");
        for &state in &node.states {
            let _ = writeln!(out, "{indent}{INDENT}State:");
            let state_node = model.state(state);
            let inner = format!("{indent}{INDENT}{INDENT}");
            let _ = writeln!(out, "{inner}Name: {}", state_node.name);
            let _ = writeln!(out, "{inner}Initial: {}", state_node.initial);
            if let Some(nested) = state_node.machine {
                let _ = writeln!(out, "{inner}Machine:");
                out.push_str(&machine_to_string(model, nested, &format!("{inner}{INDENT}")));
            }
        }
    }

    if !node.transitions.is_empty() {
        let _ = writeln!(out, "{indent}Transitions:");
        for &transition in &node.transitions {
            let _ = writeln!(out, "{indent}{INDENT}Transition:");
            let t = model.transition(transition);
            let inner = format!("{indent}{INDENT}{INDENT}");
            let _ = writeln!(out, "{inner}Event: {}", t.event);
            let _ = writeln!(out, "{inner}Action: {}", t.action.as_deref().unwrap_or("none"));
            let _ = writeln!(out, "{inner}Target: {}", t.target_name);
        }
    }

    out
}
