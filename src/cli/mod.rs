//! CLI subcommands — generate, inspect, interact, validate.

use crate::emit::{self, EmitError};
use crate::inspect;
use crate::machine::CompiledMachine;
use crate::model::{Model, ModelDef};
use crate::sim;
use crate::validate::{self, Severity};
use clap::Subcommand;
use colored::Colorize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate Java code for a machine that matches the given description
    Generate {
        /// Machine description (JSON)
        file: PathBuf,

        /// Destination directory for the generated source
        #[arg(short, long)]
        destination: Option<PathBuf>,
    },

    /// Print the machine tree for description debugging purposes
    Inspect {
        /// Machine description (JSON)
        file: PathBuf,

        /// Dump the parsed document as JSON instead of the indented listing
        #[arg(long)]
        json: bool,
    },

    /// Walk the machine interactively, or over a one-shot event query
    Interact {
        /// Machine description (JSON)
        file: PathBuf,

        /// Whitespace-separated event sequence to run instead of a REPL
        #[arg(short, long)]
        query: Option<String>,
    },

    /// Validate a machine description and print every diagnostic
    Validate {
        /// Machine description (JSON)
        file: PathBuf,
    },
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid machine description: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("machine description failed validation")]
    Invalid,

    #[error(transparent)]
    Emit(#[from] EmitError),

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub fn dispatch(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Generate { file, destination } => {
            let compiled = build_or_report(&load_def(&file)?)?;
            let path = emit::write_java(&compiled, &file, destination.as_deref())?;
            println!(
                "{}",
                format!("Java code generated successfully: {}", path.display()).green()
            );
            Ok(())
        }

        Commands::Inspect { file, json } => {
            let def = load_def(&file)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&def)?);
            } else {
                print!("{}", inspect::inspect(&Model::from_def(&def)));
            }
            Ok(())
        }

        Commands::Interact { file, query } => {
            let compiled = build_or_report(&load_def(&file)?)?;
            match query {
                Some(query) => {
                    for line in sim::run_query(&compiled, &query) {
                        println!("{line}");
                    }
                }
                None => {
                    let stdin = io::stdin();
                    sim::run_interactive(&compiled, stdin.lock(), io::stdout())?;
                }
            }
            Ok(())
        }

        Commands::Validate { file } => {
            let model = Model::from_def(&load_def(&file)?);
            let diagnostics = validate::validate(&model);

            for diagnostic in &diagnostics {
                print_diagnostic(diagnostic.severity, &diagnostic.message);
            }

            if validate::has_errors(&diagnostics) {
                Err(CliError::Invalid)
            } else {
                println!("{}", "Machine description is valid.".green());
                Ok(())
            }
        }
    }
}

fn load_def(path: &Path) -> Result<ModelDef, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&text)?)
}

/// Build, printing every diagnostic; warnings are shown even on success.
fn build_or_report(def: &ModelDef) -> Result<CompiledMachine, CliError> {
    match CompiledMachine::build(def) {
        Ok(compiled) => {
            for warning in compiled.warnings() {
                print_diagnostic(warning.severity, &warning.message);
            }
            Ok(compiled)
        }
        Err(rejected) => {
            for diagnostic in &rejected.diagnostics {
                print_diagnostic(diagnostic.severity, &diagnostic.message);
            }
            Err(CliError::Invalid)
        }
    }
}

fn print_diagnostic(severity: Severity, message: &str) {
    match severity {
        Severity::Error => eprintln!("{} {message}", "error:".red()),
        Severity::Warning => eprintln!("{} {message}", "warning:".yellow()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn load_def_parses_a_document_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"machine": {{"states": [{{"name": "On", "initial": true}}]}}}}"#
        )
        .unwrap();

        let def = load_def(file.path()).unwrap();
        assert_eq!(def.machine.unwrap().states[0].name, "On");
    }

    #[test]
    fn load_def_reports_the_missing_path() {
        let err = load_def(Path::new("no/such/file.json")).unwrap_err();
        assert!(matches!(err, CliError::Read { .. }));
        assert!(err.to_string().contains("no/such/file.json"));
    }

    #[test]
    fn build_or_report_rejects_invalid_documents() {
        let def = ModelDef::with_root(
            crate::model::MachineDef::new().state(crate::model::StateDef::new("A")),
        );
        assert!(matches!(build_or_report(&def), Err(CliError::Invalid)));
    }
}
