//! Java source generation.
//!
//! The emitter renders a compiled machine into a single self-contained Java
//! class: one concrete state class per leaf, an event enum, action method
//! stubs, and per-leaf transition/action tables. The tables are computed
//! through [`CompiledMachine::resolve_and_plan`] — the emitter never walks
//! the hierarchy itself, so the generated artifact and the simulator cannot
//! disagree on which transition an event selects.

use crate::core::flatten;
use crate::machine::CompiledMachine;
use heck::{ToLowerCamelCase, ToShoutySnakeCase, ToUpperCamelCase};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from the file-writing wrapper. Pure generation never fails.
#[derive(Debug, Error)]
pub enum EmitError {
    #[error("failed to write generated source: {0}")]
    Io(#[from] std::io::Error),

    #[error("source path has no file name")]
    NoFileName,
}

/// Generate Java source for `compiled`, naming the class after `base`
/// (typically the description file's stem).
pub fn generate_java(compiled: &CompiledMachine, base: &str) -> String {
    let class = class_name(base);
    let model = compiled.model();

    let mut state_classes = String::new();
    for &leaf in compiled.leaves() {
        let name = state_class_name(compiled.qualified_name(leaf));
        let _ = write!(
            state_classes,
            r#"
    private class {name} extends State {{
        {name}({class} stateMachine) {{
            super(stateMachine);
        }}

        @Override
        protected void enter() {{
            System.out.println("Entering {name}");
        }}

        @Override
        protected void exit() {{
            System.out.println("Exiting {name}");
        }}
    }}
"#
        );
    }

    let mut action_methods = String::new();
    for action in flatten::all_actions(model) {
        let method = action_method(&action);
        let _ = write!(
            action_methods,
            r#"
    public void {method}() {{
        System.out.println("Executing action: {method}");
    }}
"#
        );
    }

    let events = flatten::all_events(model);
    let event_list = events
        .iter()
        .map(|e| format!("        {}", event_constant(e)))
        .collect::<Vec<_>>()
        .join(",\n");

    let mut declarations = String::new();
    for &leaf in compiled.leaves() {
        let qualified = compiled.qualified_name(leaf);
        let _ = writeln!(
            declarations,
            "    private final {} {} = new {}(this);",
            state_class_name(qualified),
            instance_name(qualified),
            state_class_name(qualified),
        );
    }

    // Transition and action tables, one row per leaf. Every (leaf, event)
    // pair goes through the shared resolver and planner.
    let mut setup = String::new();
    for &leaf in compiled.leaves() {
        let instance = instance_name(compiled.qualified_name(leaf));
        let _ = writeln!(setup, "        transitions.put({instance}, new java.util.HashMap<>());");
        let _ = writeln!(setup, "        actions.put({instance}, new java.util.HashMap<>());");

        for event in &events {
            let Some(plan) = compiled.resolve_and_plan(leaf, event) else {
                continue;
            };

            let target = instance_name(compiled.qualified_name(plan.destination));
            let constant = event_constant(event);
            let _ = writeln!(
                setup,
                "        transitions.get({instance}).put(Event.{constant}, {target});"
            );
            if let Some(action) = &plan.action {
                let _ = writeln!(
                    setup,
                    "        actions.get({instance}).put(Event.{constant}, () -> this.{}());",
                    action_method(action)
                );
            }
        }
    }

    // A stateless (but valid) machine has nothing to enter.
    let startup = match compiled.initial_plan() {
        Some(plan) => format!(
            "        this.currentState = this.{};\n        this.currentState.enter();",
            instance_name(compiled.qualified_name(plan.destination))
        ),
        None => "        this.currentState = null;".to_string(),
    };

    format!(
        r#"// Auto-generated from {base}. Edit the state bodies and actions above
// the marker; the tables below are regenerated on every run.

public class {class} {{
{state_classes}
{action_methods}
    abstract class State {{
        protected final {class} stateMachine;

        protected State({class} stateMachine) {{
            this.stateMachine = stateMachine;
        }}

        protected abstract void enter();

        protected abstract void exit();
    }}

    // ---- generated runtime below this line ----

    enum Event {{
{event_list}
    }}

    private final java.util.Map<State, java.util.Map<Event, State>> transitions = new java.util.HashMap<>();
    private final java.util.Map<State, java.util.Map<Event, Runnable>> actions = new java.util.HashMap<>();

{declarations}
    private State currentState;

    public {class}() {{
{setup}
{startup}
    }}

    public void event(Event event) {{
        State nextState = transitions.get(currentState).get(event);
        if (nextState != null) {{
            currentState.exit();

            Runnable action = actions.get(currentState).get(event);
            if (action != null) {{
                action.run();
            }}

            currentState = nextState;
            currentState.enter();
        }}
    }}

    public State current() {{
        return currentState;
    }}
}}
"#
    )
}

/// Generate and write `<ClassName>.java` next to `source` or under
/// `destination` when given, creating the directory if needed.
pub fn write_java(
    compiled: &CompiledMachine,
    source: &Path,
    destination: Option<&Path>,
) -> Result<PathBuf, EmitError> {
    let base = source
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or(EmitError::NoFileName)?;

    let file_name = format!("{}.java", class_name(base));
    let path = match destination {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            dir.join(file_name)
        }
        None => source.with_file_name(file_name),
    };

    fs::write(&path, generate_java(compiled, base))?;
    Ok(path)
}

fn class_name(base: &str) -> String {
    format!("{}StateMachine", base.to_upper_camel_case())
}

fn state_class_name(qualified: &str) -> String {
    format!("{}State", qualified.replace('.', "_").to_upper_camel_case())
}

fn instance_name(qualified: &str) -> String {
    format!("{}State", qualified.replace('.', "_").to_lower_camel_case())
}

fn event_constant(event: &str) -> String {
    event.to_shouty_snake_case()
}

fn action_method(action: &str) -> String {
    action.to_lower_camel_case()
}
