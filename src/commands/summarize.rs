//! The summarize command: resolve configuration, then run the generator.

use std::env;

use crate::cli::Cli;
use crate::config::{self, RunSettings, API_KEY_ENV};
use crate::context::ServiceContext;
use crate::generator::{RunReport, SummaryGenerator};

/// Execute a summary run for the parsed CLI arguments against live adapters.
///
/// # Errors
///
/// Returns an error string if no API key is available, or if the file list is
/// unreadable or empty.
pub async fn run(cli: &Cli) -> Result<(), String> {
    run_with(cli, env::var(API_KEY_ENV).ok(), ServiceContext::live).await
}

/// Execute a summary run, building the context from the resolved API key.
///
/// The API key is checked before anything is read, and the file list is
/// checked before any completion is requested.
///
/// # Errors
///
/// Returns an error string if no API key is available, or if the file list is
/// unreadable or empty.
pub async fn run_with<F>(cli: &Cli, env_api_key: Option<String>, make_ctx: F) -> Result<(), String>
where
    F: FnOnce(&str) -> ServiceContext,
{
    let api_key = config::resolve_api_key(cli.api_key.as_deref(), env_api_key)?;
    let ctx = make_ctx(&api_key);

    let files = config::load_file_list(ctx.fs.as_ref(), &cli.files)?;
    tracing::info!(count = files.len(), workspace = %cli.workspace.display(), "file list loaded");

    let settings = RunSettings {
        model: cli.model.clone(),
        max_tokens: cli.max_tokens,
        ..RunSettings::default()
    };
    let generator = SummaryGenerator::new(&ctx, &cli.workspace, settings);
    let report = generator.generate_summaries(&files).await?;

    print_report(&report, generator.docs_root());
    Ok(())
}

fn print_report(report: &RunReport, docs_root: &std::path::Path) {
    println!();
    if report.failures.is_empty() {
        println!("Successfully generated {} summaries", report.succeeded);
    } else {
        println!(
            "Generated {} of {} summaries ({} failed)",
            report.succeeded,
            report.total,
            report.failures.len()
        );
    }
    println!("Output location: {}", docs_root.display());
}
