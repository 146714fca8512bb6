//! Hailstone CLI - Explore Collatz-style sequences in the terminal

mod chart;
mod cli;
mod colorizer;

use clap::Parser;

fn main() {
    let cli_args = cli::Cli::parse();

    // Logging is initialized exactly once, inside `run`, where the CLI
    // flags are available.
    let app = cli::HailstoneApp::new();

    if let Err(e) = app.run(cli_args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
