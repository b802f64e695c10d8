//! `dockwright generate`: write the docker files, then reconcile `.env`.

use tracing::{info, instrument};

use dockwright_core::{application::ScaffoldService, domain::Topology};

use super::selection::SelectionDraft;
use crate::{
    cli::GenerateArgs,
    commands::{env, scaffold_service},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Dispatch sequence:
/// 1. Resolve the selection (flags > config > defaults, optionally prompted)
/// 2. Compose the topology
/// 3. Write every generated file, overwriting existing ones
/// 4. Reconcile `.env` unless `--skip-env`; a missing or broken env source
///    is reported but does not fail the run
#[instrument(skip_all, fields(dir = %args.dir.display()))]
pub fn execute(args: GenerateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let draft = SelectionDraft::resolve(&args.selection, &args.dir, &config.defaults)?;
    let draft = if args.interactive { ask(draft)? } else { draft };
    let selection = draft.build()?;

    let scaffold = scaffold_service();
    let topology = scaffold.plan(&selection)?;

    if args.dry_run {
        return dry_run(&scaffold, &topology, &args, &output);
    }

    output.header(&format!(
        "Generating '{}' in {}",
        topology.name(),
        args.dir.display()
    ))?;

    let report = scaffold.generate(&topology, &args.dir)?;
    for file in &report.files {
        output.print(&format!("  {}", file.display()))?;
    }
    output.success(&format!("Wrote {} files", report.files.len()))?;
    info!(files = report.files.len(), "Docker files written");

    if args.skip_env {
        output.info("Skipped .env (--skip-env)")?;
        return Ok(());
    }

    env::reconcile_reporting(&topology, &args.dir, &output, env::SourceFailure::Report)?;

    if !output.is_quiet() {
        output.print("")?;
        output.print("Next steps:")?;
        output.print("  . ./dc-aliases")?;
        output.print("  dcup")?;
    }
    Ok(())
}

fn dry_run(
    scaffold: &ScaffoldService,
    topology: &Topology,
    args: &GenerateArgs,
    output: &OutputManager,
) -> CliResult<()> {
    let structure = scaffold.dry_run(topology, &args.dir)?;

    output.info(&format!(
        "Dry run: would write '{}' into {}",
        topology.name(),
        args.dir.display()
    ))?;
    for dir in structure.directories() {
        output.print(&format!("  {}/", dir.path.display()))?;
    }
    for file in structure.files() {
        output.print(&format!("  {}", file.path.display()))?;
    }

    if !args.skip_env {
        env::preview_keys(topology, &args.dir, output)?;
    }
    Ok(())
}

#[cfg(feature = "interactive")]
fn ask(draft: SelectionDraft) -> CliResult<SelectionDraft> {
    super::prompt::ask(draft)
}

#[cfg(not(feature = "interactive"))]
fn ask(_draft: SelectionDraft) -> CliResult<SelectionDraft> {
    Err(crate::error::CliError::FeatureNotAvailable {
        feature: "interactive",
    })
}
