//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "generate the docker files" or "reconcile .env".

pub mod env_service;
pub mod scaffold_service;

pub use env_service::{EnvReport, EnvService, LoadedEnv};
pub use scaffold_service::{GenerationReport, ScaffoldService};
