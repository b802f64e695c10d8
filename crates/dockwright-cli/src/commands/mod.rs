//! Command handlers. Each translates parsed arguments into calls on the core
//! services and renders the result; no business logic lives here.

pub mod completions;
pub mod config;
pub mod env;
pub mod generate;
pub mod init;
pub mod plan;
pub mod selection;

#[cfg(feature = "interactive")]
mod prompt;

use dockwright_adapters::{ComposeRenderer, DotenvParser, LocalFilesystem, RandomSecretGenerator};
use dockwright_core::application::{EnvService, ScaffoldService};

/// Scaffold service wired to the real filesystem.
pub(crate) fn scaffold_service() -> ScaffoldService {
    ScaffoldService::new(Box::new(ComposeRenderer::new()), Box::new(LocalFilesystem::new()))
}

/// Env service wired to the real filesystem, dotenv parser and OS randomness.
pub(crate) fn env_service() -> EnvService {
    EnvService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(DotenvParser::new()),
        Box::new(RandomSecretGenerator::new()),
    )
}
