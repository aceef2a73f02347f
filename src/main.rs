//! runconf - resolve end-to-end test run configuration
//!
//! Loads a project's run configuration, applies defaults and environment
//! overrides, and prints the result the test engine would receive.

use clap::Parser;
use runconf::{cli, commands::Commands, common::logging};

#[derive(Parser)]
#[command(name = "runconf", about = "Resolve end-to-end test run configuration")]
#[command(version, long_about = None)]
struct Cli {
    /// Log resolution steps to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();
    logging::init_cli(cli.verbose);

    if let Err(e) = cli::dispatch(cli.command) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
