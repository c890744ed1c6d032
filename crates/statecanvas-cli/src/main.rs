//! Statecanvas CLI - replay automaton editing sessions and export diagrams

mod cli;
mod session;

use clap::Parser;
use statecanvas::core::logging::init_logging;

fn main() {
    let cli_args = cli::Cli::parse();

    // The global subscriber can only be set once, so resolve flags and
    // environment here before anything logs
    let (level, format) = cli_args.logging();
    if let Err(e) = init_logging(Some(level.as_str()), Some(format.as_str())) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    let app = cli::StatecanvasApp::new();

    if let Err(e) = app.run(cli_args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
