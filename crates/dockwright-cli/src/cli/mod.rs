//! CLI argument definitions using the clap derive API.
//!
//! This module is the only place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use dockwright_core::domain::{DatabaseVariant, Extra};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(
    name    = "dockwright",
    bin_name = "dockwright",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Docker topology and .env scaffolding for Laravel projects",
    long_about = "dockwright composes an nginx + mysql docker-compose setup with \
                  optional redis, queue, notifications and adminer containers, \
                  and keeps the project's .env in sync with it.",
    after_help = "EXAMPLES:\n\
        \x20 dockwright generate\n\
        \x20 dockwright generate ./shop --extra queue --database small\n\
        \x20 dockwright plan --output-format json\n\
        \x20 dockwright completions bash > /usr/share/bash-completion/completions/dockwright",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Write the docker files and reconcile `.env`.
    #[command(
        visible_alias = "g",
        about = "Generate docker-compose files and reconcile .env",
        after_help = "EXAMPLES:\n\
            \x20 dockwright generate\n\
            \x20 dockwright generate ../shop --name shop --no-extras\n\
            \x20 dockwright generate --extra queue --extra adminer --nginx-port 8000\n\
            \x20 dockwright generate --dry-run"
    )]
    Generate(GenerateArgs),

    /// Show the composed topology without writing anything.
    #[command(
        about = "Show the composed service topology",
        after_help = "EXAMPLES:\n\
            \x20 dockwright plan\n\
            \x20 dockwright plan --extra notifications --output-format json"
    )]
    Plan(PlanArgs),

    /// Reconcile `.env` against the topology, leaving docker files alone.
    #[command(
        about = "Reconcile .env only",
        after_help = "EXAMPLES:\n\
            \x20 dockwright env\n\
            \x20 dockwright env --dry-run"
    )]
    Env(EnvArgs),

    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 dockwright init\n\
            \x20 dockwright init --force\n\
            \x20 dockwright --config ./dockwright.toml init"
    )]
    Init(InitArgs),

    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 dockwright completions bash > ~/.local/share/bash-completion/completions/dockwright\n\
            \x20 dockwright completions zsh  > ~/.zfunc/_dockwright\n\
            \x20 dockwright completions fish > ~/.config/fish/completions/dockwright.fish"
    )]
    Completions(CompletionsArgs),

    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 dockwright config get defaults.nginx_port\n\
            \x20 dockwright config list\n\
            \x20 dockwright config path"
    )]
    Config(ConfigCommands),
}

// ── selection ─────────────────────────────────────────────────────────────────

/// Service selection flags. Unset flags fall back to the config file, then
/// the built-in defaults.
#[derive(Debug, Clone, Default, Args)]
pub struct SelectionArgs {
    /// Base name for containers and the database.
    #[arg(
        long = "name",
        value_name = "NAME",
        help = "Base name (default: kebab-case of the project directory)"
    )]
    pub name: Option<String>,

    #[arg(long = "nginx-port", value_name = "PORT", help = "Host port for nginx")]
    pub nginx_port: Option<u16>,

    #[arg(
        long = "database",
        value_name = "PROFILE",
        value_enum,
        help = "MySQL configuration profile"
    )]
    pub database: Option<DatabaseArg>,

    /// Optional services. Repeat to select several.
    #[arg(
        long = "extra",
        value_name = "EXTRA",
        value_enum,
        action = clap::ArgAction::Append,
        conflicts_with = "no_extras",
        help = "Optional service to include (repeatable)"
    )]
    pub extras: Vec<ExtraArg>,

    #[arg(long = "no-extras", help = "Include no optional services")]
    pub no_extras: bool,

    #[arg(
        long = "notifications-port",
        value_name = "PORT",
        help = "Host port for the notifications daemon"
    )]
    pub notifications_port: Option<u16>,

    #[arg(
        long = "notifications-path",
        value_name = "PATH",
        help = "Where the notifications node app lives, relative to the project"
    )]
    pub notifications_path: Option<String>,

    #[arg(long = "adminer-port", value_name = "PORT", help = "Host port for adminer")]
    pub adminer_port: Option<u16>,
}

// ── generate ──────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Project directory. Created if missing.
    #[arg(value_name = "DIR", default_value = ".", help = "Project directory")]
    pub dir: PathBuf,

    #[command(flatten)]
    pub selection: SelectionArgs,

    #[arg(long = "dry-run", help = "Show what would be written without writing")]
    pub dry_run: bool,

    #[arg(long = "skip-env", help = "Do not touch .env")]
    pub skip_env: bool,

    #[arg(
        short = 'i',
        long = "interactive",
        help = "Prompt for each selection value"
    )]
    pub interactive: bool,
}

// ── plan ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct PlanArgs {
    #[arg(value_name = "DIR", default_value = ".", help = "Project directory")]
    pub dir: PathBuf,

    #[command(flatten)]
    pub selection: SelectionArgs,
}

// ── env ───────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct EnvArgs {
    #[arg(value_name = "DIR", default_value = ".", help = "Project directory")]
    pub dir: PathBuf,

    #[command(flatten)]
    pub selection: SelectionArgs,

    #[arg(long = "dry-run", help = "Print the reconciled .env instead of writing it")]
    pub dry_run: bool,
}

// ── init ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct InitArgs {
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.nginx_port`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── value enums ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum DatabaseArg {
    Minimal,
    Small,
}

impl From<DatabaseArg> for DatabaseVariant {
    fn from(arg: DatabaseArg) -> Self {
        match arg {
            DatabaseArg::Minimal => Self::Minimal,
            DatabaseArg::Small => Self::Small,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum ExtraArg {
    #[value(alias = "queue-daemon")]
    Queue,
    #[value(alias = "notifications-daemon")]
    Notifications,
    Adminer,
}

impl From<ExtraArg> for Extra {
    fn from(arg: ExtraArg) -> Self {
        match arg {
            ExtraArg::Queue => Self::Queue,
            ExtraArg::Notifications => Self::Notifications,
            ExtraArg::Adminer => Self::Adminer,
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
