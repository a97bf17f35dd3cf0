//! mpris-ctrl - MPRIS player switcher and remote
//!
//! Prints one status line per invocation, nothing when no player is active.

use clap::Parser;
use mpris_ctrl::{Args, display, logging};
use std::io;
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose);

    match mpris_ctrl::run(&args).await {
        Ok(Some(state)) => match display::write_status(&mut io::stdout().lock(), &state) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("error: write status: {e}");
                ExitCode::FAILURE
            }
        },
        Ok(None) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e.report());
            ExitCode::FAILURE
        }
    }
}
