//! Interactive walker over a compiled machine.
//!
//! Two modes, both driving one [`MachineInstance`]: query mode consumes a
//! whitespace-separated event string in one shot; interactive mode reads
//! one event per input line until `:q`. An event no machine level handles
//! is reported as a no-op and the walk continues — it never aborts the
//! session.

use crate::machine::CompiledMachine;
use std::io::{BufRead, Write};

/// Run a whitespace-separated event sequence and return one report line
/// per step (plus the starting state).
pub fn run_query(compiled: &CompiledMachine, query: &str) -> Vec<String> {
    let Some(mut instance) = compiled.start() else {
        return vec!["machine has no states".to_string()];
    };

    let mut lines = vec![format!("start: {}", instance.current_name())];

    for event in query.split_whitespace() {
        let from = instance.current_name().to_string();
        match instance.handle(event) {
            Some(plan) => {
                let mut line = format!("{event}: {from} -> {}", instance.current_name());
                if let Some(action) = &plan.action {
                    line.push_str(&format!(" [action {action}]"));
                }
                lines.push(line);
            }
            None => lines.push(format!("{event}: no transition (still {from})")),
        }
    }

    lines
}

/// Drive the machine from `input`, one event per line, writing reports to
/// `output`. `:q` (or end of input) ends the session.
///
/// Generic over reader and writer so tests can run it against byte
/// buffers; the CLI passes stdin and stdout.
pub fn run_interactive<R: BufRead, W: Write>(
    compiled: &CompiledMachine,
    input: R,
    mut output: W,
) -> std::io::Result<()> {
    let Some(mut instance) = compiled.start() else {
        writeln!(output, "machine has no states")?;
        return Ok(());
    };

    writeln!(output, "Current state: {}", instance.current_name())?;
    write!(output, "> ")?;
    output.flush()?;

    for line in input.lines() {
        let line = line?;
        let event = line.trim();

        if event.eq_ignore_ascii_case(":q") {
            break;
        }

        if event.is_empty() {
            write!(output, "> ")?;
            output.flush()?;
            continue;
        }

        match instance.handle(event) {
            Some(plan) => {
                writeln!(output, "Running event: {event}")?;
                if let Some(action) = &plan.action {
                    writeln!(output, "Executing action: {action}")?;
                }
            }
            None => writeln!(output, "no transition for this event")?,
        }

        writeln!(output, "Current state: {}", instance.current_name())?;
        write!(output, "> ")?;
        output.flush()?;
    }

    writeln!(output)?;
    Ok(())
}
