//! `dockwright plan`: print the composed topology.

use dockwright_core::domain::Topology;

use super::{scaffold_service, selection};
use crate::{cli::PlanArgs, config::AppConfig, error::CliResult, output::OutputManager};

pub fn execute(args: PlanArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let selection = selection::resolve(&args.selection, &args.dir, &config.defaults)?;
    let topology = scaffold_service().plan(&selection)?;

    if output.is_json() {
        output.json(&topology)?;
        return Ok(());
    }

    for line in table(&topology) {
        output.print(&line)?;
    }
    Ok(())
}

/// Human-readable rendering, one line per entry.
fn table(topology: &Topology) -> Vec<String> {
    let mut lines = vec![
        format!(
            "Topology '{}' (database: {})",
            topology.name(),
            topology.database()
        ),
        String::new(),
        format!("  {:<22} {:<12} {}", "SERVICE", "PORT", "MEMORY"),
    ];

    for service in topology.services() {
        let port = service
            .port
            .map(|p| p.to_string())
            .unwrap_or_else(|| "-".into());
        lines.push(format!(
            "  {:<22} {:<12} {}",
            service.compose_name(),
            port,
            service.memory_limit
        ));
    }

    lines.push(String::new());
    let links: Vec<String> = topology.links().iter().map(|l| l.to_string()).collect();
    lines.push(format!("Links:   {}", links.join(", ")));
    lines.push(format!("Daemons: {}", topology.daemons_joined()));
    lines
}
