//! Core library entry for the `taskcal` CLI.

pub mod adapters;
pub mod aggregate;
pub mod cli;
pub mod commands;
pub mod context;
pub mod dates;
pub mod ports;
pub mod recur;
pub mod refresh;
pub mod schema;
pub mod session;
pub mod task;
pub mod transform;

use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err)
            if matches!(
                err.kind(),
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion
            ) =>
        {
            print!("{err}");
            return Ok(());
        }
        Err(err) => return Err(err.to_string()),
    };
    commands::dispatch(&cli.command)
}

#[cfg(test)]
mod tests {
    use super::run;

    #[test]
    fn run_errors_on_unknown_subcommand() {
        let result = run(["taskcal", "unknown"]);
        assert!(result.is_err());
    }

    #[test]
    fn run_errors_without_arguments() {
        assert!(run(["taskcal"]).is_err());
    }

    #[test]
    fn run_prints_help_successfully() {
        assert!(run(["taskcal", "--help"]).is_ok());
    }
}
