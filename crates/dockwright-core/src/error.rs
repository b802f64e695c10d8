//! Unified error handling for dockwright-core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for dockwright-core operations.
#[derive(Debug, Error, Clone)]
pub enum DockwrightError {
    /// Errors from the domain layer (invalid selections, bad paths).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (env sources, filesystem).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl DockwrightError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check your setup and try again".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in dockwright".into(),
                "Re-run with -vvv and include the log when reporting it".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Whether this error only aborts the env step of a run.
    ///
    /// Files generated earlier in the same run are kept.
    pub fn is_env_source_error(&self) -> bool {
        matches!(
            self,
            Self::Application(
                ApplicationError::ConfigSourceMissing { .. }
                    | ApplicationError::ConfigParseError { .. }
            )
        )
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Application(ApplicationError::StoreLockError))
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type DockwrightResult<T> = Result<T, DockwrightError>;

/// Extension trait for adding context to errors.
pub trait Context<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> DockwrightResult<T>;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: impl Into<String>) -> DockwrightResult<T> {
        self.map_err(|e| DockwrightError::Internal {
            message: format!("{}: {}", msg.into(), e),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn env_source_errors_are_recognised() {
        let missing: DockwrightError = ApplicationError::ConfigSourceMissing {
            searched: vec![PathBuf::from(".env"), PathBuf::from(".env.example")],
        }
        .into();

        assert!(missing.is_env_source_error());
        assert_eq!(missing.category(), ErrorCategory::Configuration);

        let invalid: DockwrightError = DomainError::UnknownExtra {
            value: "redis".into(),
        }
        .into();
        assert!(!invalid.is_env_source_error());
        assert_eq!(invalid.category(), ErrorCategory::NotFound);
    }

    #[test]
    fn context_wraps_as_internal() {
        let result: Result<(), std::fmt::Error> = Err(std::fmt::Error);
        let err = result.context("formatting topology").unwrap_err();

        assert!(matches!(err, DockwrightError::Internal { .. }));
        assert!(err.to_string().contains("formatting topology"));
    }
}
