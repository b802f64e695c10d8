//! # Dockwright CLI
//!
//! Generates a Docker Compose development environment for a project and
//! keeps its `.env` in step with the chosen services.
//!
//! ## Startup sequence
//!
//! 1. Load a `.env` from the working directory, if any, into the process
//!    environment (for `DOCKWRIGHT_*` overrides).
//! 2. Parse CLI arguments (clap handles `--help` / `--version`).
//! 3. Initialise the tracing subscriber.
//! 4. Load configuration (defaults, file, environment).
//! 5. Build the [`OutputManager`] and dispatch.
//! 6. Translate any [`CliError`] into a message and exit code.
//!
//! ## Exit codes
//!
//! | Code | Meaning                 |
//! |------|-------------------------|
//! |  0   | Success                 |
//! |  1   | Internal / system error |
//! |  2   | User / input error      |
//! |  3   | Resource not found      |
//! |  4   | Configuration error     |

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info, instrument};

use crate::{
    cli::{Cli, Commands},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version come through here too and exit 0.
            let _ = e.print();
            return ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(2));
        }
    };

    if let Err(e) = init_logging(&cli.global) {
        eprintln!("Failed to initialise logging: {e}");
        return ExitCode::from(1);
    }

    let verbose = cli.global.verbose > 0;
    debug!(
        verbose = cli.global.verbose,
        quiet = cli.global.quiet,
        no_color = cli.global.no_color,
        "CLI started"
    );

    match run(cli) {
        Ok(()) => {
            info!("dockwright completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => handle_error(e, verbose),
    }
}

/// Dispatch to the command handler. `init` and `completions` never read
/// configuration: `init` creates the file `--config` points at.
#[instrument(skip_all)]
fn run(cli: Cli) -> CliResult<()> {
    let global = cli.global;
    let load = || -> CliResult<(AppConfig, OutputManager)> {
        let config = AppConfig::load(global.config.as_ref())
            .with_cli_context(|| "Failed to load configuration")?;
        let output = OutputManager::new(&global, &config);
        Ok((config, output))
    };

    match cli.command {
        Commands::Generate(args) => {
            let (config, output) = load()?;
            commands::generate::execute(args, config, output)
        }
        Commands::Plan(args) => {
            let (config, output) = load()?;
            commands::plan::execute(args, config, output)
        }
        Commands::Env(args) => {
            let (config, output) = load()?;
            commands::env::execute(args, config, output)
        }
        Commands::Config(cmd) => {
            let (config, output) = load()?;
            commands::config::execute(cmd, &global, config, output)
        }
        Commands::Init(args) => {
            let output = OutputManager::new(&global, &AppConfig::default());
            commands::init::execute(args, &global, output)
        }
        Commands::Completions(args) => commands::completions::execute(args),
    }
}

/// The single place structured errors become stderr text and an exit code.
fn handle_error(err: CliError, verbose: bool) -> ExitCode {
    err.log();

    let msg = if std::io::IsTerminal::is_terminal(&std::io::stderr()) {
        err.format_colored(verbose)
    } else {
        err.format_plain(verbose)
    };
    eprint!("{msg}");

    ExitCode::from(err.exit_code())
}
