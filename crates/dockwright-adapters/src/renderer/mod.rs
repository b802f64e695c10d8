//! Topology renderers.

mod compose;

pub use compose::ComposeRenderer;
