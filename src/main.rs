//! Binary entrypoint for the `taskcal` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    match taskcal::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
