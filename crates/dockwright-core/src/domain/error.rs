// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (so reports can carry them)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("Invalid base name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("Invalid port for {service}: {port}")]
    InvalidPort { service: &'static str, port: u16 },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Path leaves the project root: {path}")]
    PathEscapesRoot { path: String },

    #[error("Duplicate path in project structure: {path}")]
    DuplicatePath { path: String },

    #[error("Project structure is empty")]
    EmptyStructure,

    // ========================================================================
    // Unknown Values
    // ========================================================================
    #[error("Unknown database variant: {value}")]
    UnknownDatabaseVariant { value: String },

    #[error("Unknown extra service: {value}")]
    UnknownExtra { value: String },

    // ========================================================================
    // Constraint Violations
    // ========================================================================
    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidName { name, reason } => vec![
                format!("Base name '{}' is invalid: {}", name, reason),
                "The base name prefixes every container, e.g. my-app-db".into(),
                "Use ASCII letters, digits, '.', '-' and '_'".into(),
            ],
            Self::InvalidPort { service, .. } => vec![
                format!("Pick a host port between 1 and 65535 for {}", service),
            ],
            Self::UnknownDatabaseVariant { value } => vec![
                format!("'{}' is not a database variant", value),
                "Supported variants:".into(),
                "  • minimal  - MySQL with a minimal memory profile".into(),
                "  • small    - MySQL with a small-server profile".into(),
            ],
            Self::UnknownExtra { value } => vec![
                format!("'{}' is not an optional service", value),
                "Supported extras: queue, notifications, adminer".into(),
                "redis is added automatically when queue or notifications is selected".into(),
            ],
            Self::AbsolutePathNotAllowed { path } => vec![
                format!("'{}' must be relative to the project root", path),
            ],
            Self::PathEscapesRoot { path } => vec![
                format!("'{}' may not contain '..'", path),
                "Generated files must stay inside the project directory".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidSelection(_)
            | Self::InvalidName { .. }
            | Self::InvalidPort { .. }
            | Self::AbsolutePathNotAllowed { .. }
            | Self::PathEscapesRoot { .. }
            | Self::MissingRequiredField { .. } => ErrorCategory::Validation,
            Self::UnknownDatabaseVariant { .. } | Self::UnknownExtra { .. } => {
                ErrorCategory::NotFound
            }
            Self::DuplicatePath { .. } | Self::EmptyStructure => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}
