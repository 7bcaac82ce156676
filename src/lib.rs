//! Core library entry for the `encyclopedia` CLI.
//!
//! Generates a Markdown summary and a JSON sidecar for each file in a list,
//! mirrored under `<workspace>/docs/codebase/`.

pub mod adapters;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod generator;
pub mod layout;
pub mod metadata;
pub mod ports;
pub mod prompt;

#[cfg(test)]
pub(crate) mod testing;

use clap::error::ErrorKind;
use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// `--help` and `--version` print their output and succeed.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or the run cannot
/// start (no API key, unreadable or empty file list).
pub async fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.print().map_err(|e| e.to_string())?;
            return Ok(());
        }
        Err(err) => return Err(err.to_string()),
    };
    commands::summarize::run(&cli).await
}
