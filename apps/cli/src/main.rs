//! # Layerline Entry Point
//!
//! ## Startup Sequence
//! 1. Parse arguments (usage errors exit with status 2)
//! 2. Initialize tracing (stderr)
//! 3. Run the command
//! 4. Print text or `--json` to stdout; errors to stderr with the
//!    code's exit status

use std::process::ExitCode;

use clap::Parser;
use layerline_cli::cli::Cli;
use layerline_cli::{init_tracing, run};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    let json = cli.json;
    match run(cli) {
        Ok(output) => {
            println!("{}", output.render(json));
            ExitCode::SUCCESS
        }
        Err(err) => {
            match serde_json::to_string(&err) {
                Ok(body) if json => eprintln!("{}", body),
                _ => eprintln!("error: {}", err),
            }
            ExitCode::from(err.code.exit_code())
        }
    }
}
