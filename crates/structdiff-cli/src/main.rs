//! structdiff CLI
//!
//! Compares two JSON documents and prints the structural differences.

use clap::Parser;
use structdiff_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "structdiff")]
#[command(about = "Path-addressed structural diff of two JSON documents", long_about = None)]
struct Cli {
    #[command(flatten)]
    diff: commands::diff::DiffArgs,

    /// Emit JSON structured logs on stderr
    #[arg(long)]
    log_json: bool,

    /// Emit human-readable debug logs on stderr
    #[arg(short, long)]
    verbose: bool,
}

const EXIT_NO_DIFFERENCES: i32 = 0;
const EXIT_DIFFERENCES: i32 = 1;
const EXIT_ERROR: i32 = 2;

fn main() {
    let cli = Cli::parse();

    if cli.log_json {
        init(Profile::Production);
    } else if cli.verbose {
        init(Profile::Development);
    }

    let code = match commands::diff::execute(&cli.diff) {
        Ok(outcome) => {
            print!("{}", outcome.summary);
            if outcome.difference_count == 0 {
                EXIT_NO_DIFFERENCES
            } else {
                EXIT_DIFFERENCES
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            EXIT_ERROR
        }
    };

    std::process::exit(code);
}
