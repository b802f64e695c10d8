//! Turning flags, config defaults and the project directory into a
//! [`ServiceSelection`].

use std::path::Path;

use tracing::debug;

use dockwright_core::domain::{DatabaseVariant, Extra, ServiceSelection, naming::to_kebab_case};

use crate::{
    cli::SelectionArgs,
    config::Defaults,
    error::{CliError, CliResult, IntoCli},
};

/// Fully-resolved selection values, before domain validation.
///
/// Kept separate from [`ServiceSelection`] so the interactive prompts can
/// offer these values as defaults and edit them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionDraft {
    pub name: String,
    pub nginx_port: u16,
    pub database: DatabaseVariant,
    pub extras: Vec<Extra>,
    pub notifications_port: u16,
    pub notifications_path: String,
    pub adminer_port: u16,
}

impl SelectionDraft {
    /// Flags win over config defaults; the name falls back to the project
    /// directory.
    pub fn resolve(args: &SelectionArgs, dir: &Path, defaults: &Defaults) -> CliResult<Self> {
        let name = match args.name.as_ref().or(defaults.name.as_ref()) {
            Some(name) => name.clone(),
            None => default_name(dir)?,
        };

        let extras = if args.no_extras {
            Vec::new()
        } else if args.extras.is_empty() {
            defaults.extras.clone()
        } else {
            args.extras.iter().map(|&e| Extra::from(e)).collect()
        };

        let draft = Self {
            name,
            nginx_port: args.nginx_port.unwrap_or(defaults.nginx_port),
            database: args
                .database
                .map(DatabaseVariant::from)
                .unwrap_or(defaults.database),
            extras,
            notifications_port: args
                .notifications_port
                .unwrap_or(defaults.notifications_port),
            notifications_path: args
                .notifications_path
                .clone()
                .unwrap_or_else(|| defaults.notifications_path.clone()),
            adminer_port: args.adminer_port.unwrap_or(defaults.adminer_port),
        };
        debug!(?draft, "Selection resolved");
        Ok(draft)
    }

    pub fn build(self) -> CliResult<ServiceSelection> {
        ServiceSelection::builder()
            .name(self.name)
            .nginx_port(self.nginx_port)
            .database(self.database)
            .extras(self.extras)
            .notifications_port(self.notifications_port)
            .notifications_path(self.notifications_path)
            .adminer_port(self.adminer_port)
            .build()
            .map_err(|e| CliError::Core(e.into()))
    }
}

/// Resolve flags and defaults straight into a validated selection.
pub fn resolve(args: &SelectionArgs, dir: &Path, defaults: &Defaults) -> CliResult<ServiceSelection> {
    SelectionDraft::resolve(args, dir, defaults)?.build()
}

/// Kebab-case of the project directory's own name.
///
/// The directory does not have to exist yet.
pub fn default_name(dir: &Path) -> CliResult<String> {
    let absolute = match dir.canonicalize() {
        Ok(path) => path,
        Err(_) => std::path::absolute(dir)
            .with_cli_context(|| format!("Failed to resolve '{}'", dir.display()))?,
    };

    let leaf = absolute
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| CliError::UnnamedProject {
            dir: dir.to_path_buf(),
            reason: "path has no final component".into(),
        })?;

    let name = to_kebab_case(leaf);
    if name.is_empty() {
        return Err(CliError::UnnamedProject {
            dir: dir.to_path_buf(),
            reason: "directory name has no letters or digits".into(),
        });
    }
    Ok(name)
}
