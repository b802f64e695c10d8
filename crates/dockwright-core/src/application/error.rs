//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Neither `.env` nor `.env.example` exists.
    #[error("No environment file found (searched: {})", display_paths(searched))]
    ConfigSourceMissing { searched: Vec<PathBuf> },

    /// An environment file exists but is not valid dotenv text.
    #[error("Could not parse {path}: {detail}")]
    ConfigParseError { path: PathBuf, detail: String },

    /// Rendering the topology into files failed.
    #[error("Rendering failed: {reason}")]
    RenderingFailed { reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Shared adapter state was poisoned.
    #[error("Adapter state lock poisoned")]
    StoreLockError,
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ConfigSourceMissing { searched } => vec![
                format!("Looked for: {}", display_paths(searched)),
                "Create a .env.example (a fresh Laravel install ships one)".into(),
                "Or run with --skip-env to generate only the docker files".into(),
            ],
            Self::ConfigParseError { path, .. } => vec![
                format!("Fix the syntax in {}", path.display()),
                "Each line must be KEY=value, a comment, or blank".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::StoreLockError => vec![
                "A previous operation panicked while holding a lock".into(),
                "Try again in a moment".into(),
            ],
            Self::RenderingFailed { .. } => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigSourceMissing { .. } | Self::ConfigParseError { .. } => {
                ErrorCategory::Configuration
            }
            Self::FilesystemError { .. } | Self::StoreLockError | Self::RenderingFailed { .. } => {
                ErrorCategory::Internal
            }
        }
    }
}
