//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `dockwright-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `TopologyRenderer`: Topology → files
//!   - `EnvParser`: dotenv syntax
//!   - `SecretGenerator`: credential strings (declared in the domain)
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{EnvParser, Filesystem, SecretGenerator, TopologyRenderer};
