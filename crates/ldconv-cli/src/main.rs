//! ldconv CLI - extract dictionary entries to plaintext, SQLite or SQLCipher
//!
//! This is the command-line interface for ldconv. It resolves flags and the
//! optional config file into a request and hands it to the core library.

mod app;
mod cli;
mod config;
mod constants;
mod logging;

use clap::{CommandFactory, Parser};
use clap_complete::generate;

use crate::cli::Cli;
use crate::constants::exit_codes;

fn main() {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        let mut command = Cli::command();
        generate(shell, &mut command, "ldconv", &mut std::io::stdout());
        return;
    }

    logging::init(cli.quiet, cli.verbose);

    if let Err(e) = app::run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(exit_codes::FAILURE);
    }
}
