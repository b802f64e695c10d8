//! Scaffold Service - main application orchestrator.
//!
//! This service coordinates the file-generation workflow:
//! 1. Validate the selection and compose the topology
//! 2. Render the topology into a project structure
//! 3. Write to filesystem
//!
//! Reconciling `.env` is a separate step owned by `EnvService`.

use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

use crate::{
    application::ports::{Filesystem, TopologyRenderer},
    domain::{DomainValidator as validator, FsEntry, ProjectStructure, ServiceSelection, Topology, compose},
    error::{DockwrightError, DockwrightResult},
};

/// What a `generate` run wrote, relative to `root`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub root: PathBuf,
    pub directories: Vec<PathBuf>,
    pub files: Vec<PathBuf>,
}

/// Main scaffolding service.
pub struct ScaffoldService {
    renderer: Box<dyn TopologyRenderer>,
    filesystem: Box<dyn Filesystem>,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use dockwright_core::application::ScaffoldService;
    ///
    /// let service = ScaffoldService::new(
    ///     renderer,   // impl TopologyRenderer
    ///     filesystem, // impl Filesystem
    /// );
    /// ```
    pub fn new(renderer: Box<dyn TopologyRenderer>, filesystem: Box<dyn Filesystem>) -> Self {
        Self {
            renderer,
            filesystem,
        }
    }

    /// Compose the topology for a selection.
    #[instrument(skip_all, fields(name = %selection.name()))]
    pub fn plan(&self, selection: &ServiceSelection) -> DockwrightResult<Topology> {
        validator::validate_selection(selection).map_err(DockwrightError::Domain)?;

        let topology = compose(selection);
        info!(
            services = topology.services().len(),
            daemons = %topology.daemons_joined(),
            "Topology composed"
        );
        Ok(topology)
    }

    /// Render the topology without touching the filesystem.
    #[instrument(skip_all, fields(topology = %topology, root = %root.as_ref().display()))]
    pub fn dry_run(
        &self,
        topology: &Topology,
        root: impl AsRef<Path>,
    ) -> DockwrightResult<ProjectStructure> {
        let structure = self.renderer.render(topology, root.as_ref())?;
        validator::validate_project_structure(&structure).map_err(DockwrightError::Domain)?;

        debug!(entries = structure.entry_count(), "Topology rendered");
        Ok(structure)
    }

    /// Render the topology and write every file.
    ///
    /// Existing files at the same paths are overwritten.
    #[instrument(skip_all, fields(topology = %topology, root = %root.as_ref().display()))]
    pub fn generate(
        &self,
        topology: &Topology,
        root: impl AsRef<Path>,
    ) -> DockwrightResult<GenerationReport> {
        let structure = self.dry_run(topology, root)?;
        let report = self.write_all(&structure)?;

        info!(
            files = report.files.len(),
            directories = report.directories.len(),
            "Generation completed successfully"
        );
        Ok(report)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Write all entries in the structure.
    fn write_all(&self, structure: &ProjectStructure) -> DockwrightResult<GenerationReport> {
        let root = structure.root();
        let mut report = GenerationReport {
            root: root.to_path_buf(),
            directories: Vec::new(),
            files: Vec::new(),
        };

        self.filesystem.create_dir_all(root)?;

        for entry in structure.entries() {
            match entry {
                FsEntry::Directory(dir) => {
                    self.filesystem.create_dir_all(&root.join(&dir.path))?;
                    report.directories.push(dir.path.clone());
                }
                FsEntry::File(file) => {
                    let path = root.join(&file.path);

                    if let Some(parent) = path.parent() {
                        self.filesystem.create_dir_all(parent)?;
                    }

                    if self.filesystem.exists(&path) {
                        debug!(path = %file.path.display(), "Overwriting existing file");
                    }
                    self.filesystem.write_file(&path, &file.content)?;

                    if file.permissions.executable_flag() {
                        self.filesystem.set_permissions(&path, true)?;
                    }
                    report.files.push(file.path.clone());
                }
            }
        }

        Ok(report)
    }
}
