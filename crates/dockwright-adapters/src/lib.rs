//! Infrastructure adapters for dockwright.
//!
//! This crate implements the ports defined in `dockwright-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod builtin_templates;
pub mod env_parser;
pub mod filesystem;
pub mod renderer;
pub mod secrets;

// Re-export commonly used adapters
pub use env_parser::DotenvParser;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use renderer::ComposeRenderer;
pub use secrets::RandomSecretGenerator;
