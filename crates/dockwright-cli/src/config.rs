//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `DOCKWRIGHT_*` environment variables, `__` between sections
//!    (`DOCKWRIGHT_DEFAULTS__NGINX_PORT=8000`)
//! 3. TOML config file (`--config`, or the platform config directory)
//! 4. Built-in defaults

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use ::config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use dockwright_core::domain::{
    DatabaseVariant, Extra,
    entities::selection::{
        DEFAULT_ADMINER_PORT, DEFAULT_NGINX_PORT, DEFAULT_NOTIFICATIONS_PATH,
        DEFAULT_NOTIFICATIONS_PORT,
    },
};

const ENV_PREFIX: &str = "DOCKWRIGHT";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Selection values used when a flag is not given.
    #[serde(default)]
    pub defaults: Defaults,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// Base name; derived from the project directory when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub nginx_port: u16,
    pub database: DatabaseVariant,
    pub extras: Vec<Extra>,
    pub notifications_port: u16,
    pub notifications_path: String,
    pub adminer_port: u16,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            name: None,
            nginx_port: DEFAULT_NGINX_PORT,
            database: DatabaseVariant::default(),
            extras: Extra::ALL.to_vec(),
            notifications_port: DEFAULT_NOTIFICATIONS_PORT,
            notifications_path: DEFAULT_NOTIFICATIONS_PATH.to_string(),
            adminer_port: DEFAULT_ADMINER_PORT,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl AppConfig {
    /// Load configuration from defaults, the config file and the environment.
    ///
    /// An explicit `config_file` must exist; the default location is optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::config_path(), false),
        };

        let defaults = Config::try_from(&Self::default())
            .context("Failed to seed built-in configuration defaults")?;

        Config::builder()
            .add_source(defaults)
            .add_source(File::from(path.as_path()).format(FileFormat::Toml).required(required))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("defaults.extras"),
            )
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Path to the default configuration file.
    ///
    /// Falls back to `.dockwright.toml` in the current directory when the
    /// platform has no config directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "dockwright", "dockwright")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".dockwright.toml"))
    }

    /// The file this run reads, given the `--config` flag.
    pub fn active_path(config_file: Option<&Path>) -> PathBuf {
        config_file
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::config_path)
    }

    pub fn to_toml(&self) -> anyhow::Result<String> {
        toml::to_string_pretty(self).context("Failed to serialise configuration")
    }
}
