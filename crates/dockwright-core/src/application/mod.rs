//! Application layer for dockwright.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ScaffoldService, EnvService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    EnvReport, EnvService, GenerationReport, LoadedEnv, ScaffoldService, env_service,
};

pub use ports::{EnvParser, Filesystem, SecretGenerator, TopologyRenderer};

pub use error::ApplicationError;
