//! dockwright Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the dockwright
//! docker-compose scaffolder, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          dockwright-cli (CLI)           │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │      (ScaffoldService, EnvService)      │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Application Ports (Traits)       │
//! │ (Filesystem, Renderer, Parser, Secrets) │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    dockwright-adapters (Infrastructure) │
//! │ (LocalFilesystem, ComposeRenderer, etc) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (ServiceSelection, Topology, EnvStore)  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dockwright_core::prelude::*;
//!
//! // 1. Build a selection
//! let selection = ServiceSelection::builder()
//!     .name("foobar")
//!     .extra(Extra::Queue)
//!     .build()
//!     .unwrap();
//!
//! // 2. Use application services (with injected adapters)
//! let topology = scaffold.plan(&selection).unwrap();
//! scaffold.generate(&topology, "./my-app").unwrap();
//! env.reconcile(&topology, "./my-app").unwrap();
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        EnvReport, EnvService, GenerationReport, ScaffoldService,
        ports::{EnvParser, Filesystem, SecretGenerator, TopologyRenderer},
    };
    pub use crate::domain::{
        DatabaseVariant, EnvStore, Extra, InitState, ProjectStructure, Reconciliation,
        RenderContext, SecretSpec, ServiceKind, ServiceSelection, Topology, compose, reconcile,
    };
    pub use crate::error::{DockwrightError, DockwrightResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
