//! `dockwright env`: reconcile `.env` against the topology without touching
//! the docker files.

use std::path::Path;

use tracing::{instrument, warn};

use dockwright_core::{application::EnvReport, domain::Topology, error::DockwrightError};

use super::{env_service, scaffold_service, selection};
use crate::{
    cli::EnvArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// What to do when `.env`/`.env.example` is missing or unparseable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFailure {
    /// Print the error and carry on; the run still succeeds.
    Report,
    /// Fail the command.
    Fail,
}

#[instrument(skip_all, fields(dir = %args.dir.display()))]
pub fn execute(args: EnvArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let selection = selection::resolve(&args.selection, &args.dir, &config.defaults)?;
    let topology = scaffold_service().plan(&selection)?;

    if args.dry_run {
        let report = env_service().preview(&topology, &args.dir)?;
        output.info(&format!(
            "Dry run: {} would contain (from {}):",
            report.destination.display(),
            report.source.display()
        ))?;
        output.print(report.rendered().trim_end_matches('\n'))?;
        return Ok(());
    }

    reconcile_reporting(&topology, &args.dir, &output, SourceFailure::Fail)
}

/// Reconcile and write `.env`, then summarise what changed.
pub fn reconcile_reporting(
    topology: &Topology,
    dir: &Path,
    output: &OutputManager,
    on_source_failure: SourceFailure,
) -> CliResult<()> {
    match env_service().reconcile(topology, dir) {
        Ok(report) => summarise(&report, output),
        Err(err) if err.is_env_source_error() && on_source_failure == SourceFailure::Report => {
            report_source_failure(&err, output)
        }
        Err(err) => Err(err.into()),
    }
}

/// Dry-run listing of the keys a reconciliation would touch.
pub fn preview_keys(topology: &Topology, dir: &Path, output: &OutputManager) -> CliResult<()> {
    let report = match env_service().preview(topology, dir) {
        Ok(report) => report,
        Err(err) if err.is_env_source_error() => return report_source_failure(&err, output),
        Err(err) => return Err(err.into()),
    };

    let reconciliation = &report.reconciliation;
    output.info(&format!(
        "Would write {} from {}",
        report.destination.display(),
        report.source.display()
    ))?;
    if !reconciliation.introduced.is_empty() {
        output.print(&format!("  new keys: {}", reconciliation.introduced.join(", ")))?;
    }
    if !reconciliation.rewritten.is_empty() {
        output.print(&format!("  updated keys: {}", reconciliation.rewritten.join(", ")))?;
    }
    if !reconciliation.secrets.is_empty() {
        output.print(&format!(
            "  generated secrets: {}",
            reconciliation.secrets.keys().join(", ")
        ))?;
    }
    Ok(())
}

fn summarise(report: &EnvReport, output: &OutputManager) -> CliResult<()> {
    let reconciliation = &report.reconciliation;

    output.success(&format!(
        "Wrote {} (from {})",
        report.destination.display(),
        report.source.display()
    ))?;
    if !reconciliation.secrets.is_empty() {
        output.info(&format!(
            "Generated secrets: {}",
            reconciliation.secrets.keys().join(", ")
        ))?;
    }
    if !reconciliation.introduced.is_empty() {
        output.info(&format!("Added: {}", reconciliation.introduced.join(", ")))?;
    }
    if !reconciliation.rewritten.is_empty() {
        output.info(&format!("Updated: {}", reconciliation.rewritten.join(", ")))?;
    }
    Ok(())
}

fn report_source_failure(err: &DockwrightError, output: &OutputManager) -> CliResult<()> {
    warn!(error = %err, ".env was not written");
    output.error(&format!(".env was not written: {err}"))?;
    for suggestion in CliError::Core(err.clone()).suggestions() {
        output.warning(&suggestion)?;
    }
    Ok(())
}
