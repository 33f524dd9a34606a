//! hfsm CLI — compile, inspect, and walk hierarchical state machines.

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "hfsm",
    version,
    about = "Hierarchical state machine compiler and interactive simulator"
)]
struct Cli {
    #[command(subcommand)]
    command: hfsm::cli::Commands,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = hfsm::cli::dispatch(cli.command) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
