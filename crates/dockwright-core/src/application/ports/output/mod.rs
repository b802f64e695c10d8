//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `dockwright-adapters` crate provides implementations.

use std::path::Path;

use crate::domain::{ProjectStructure, Topology};
use crate::error::DockwrightResult;

pub use crate::domain::SecretGenerator;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `dockwright_adapters::filesystem::LocalFilesystem` (production)
/// - `dockwright_adapters::filesystem::MemoryFilesystem` (testing)
///
/// ## Design Notes
///
/// - `write_file` replaces the whole file; readers never see a partial write
/// - Permissions are capability-based, not Unix-specific
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> DockwrightResult<()>;

    /// Write content to a file, replacing any previous content.
    fn write_file(&self, path: &Path, content: &str) -> DockwrightResult<()>;

    /// Read a whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> DockwrightResult<String>;

    /// Set file permissions.
    fn set_permissions(&self, path: &Path, executable: bool) -> DockwrightResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Port for turning a topology into files.
///
/// Implemented by:
/// - `dockwright_adapters::renderer::ComposeRenderer` (built-in templates)
#[cfg_attr(test, mockall::automock)]
pub trait TopologyRenderer: Send + Sync {
    /// Render every file the topology needs, relative to `output_root`.
    fn render(&self, topology: &Topology, output_root: &Path) -> DockwrightResult<ProjectStructure>;
}

/// Port for dotenv syntax checking and value resolution.
///
/// Implemented by:
/// - `dockwright_adapters::env_parser::DotenvParser`
#[cfg_attr(test, mockall::automock)]
pub trait EnvParser: Send + Sync {
    /// Parse `text` into resolved `(key, value)` pairs, in file order.
    ///
    /// Returns the parser's error message when `text` is not valid dotenv.
    fn parse(&self, text: &str) -> Result<Vec<(String, String)>, String>;
}
