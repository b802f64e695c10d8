pub mod common;
pub mod project_structure;
pub mod render_context;
pub mod selection;
pub mod topology;

pub use crate::domain::DomainError;
pub use project_structure::ProjectStructure;
pub use render_context::RenderContext;
pub use selection::ServiceSelection;
pub use topology::Topology;
