//! Environment store and its reconciliation against a topology.

pub mod reconciler;
pub mod secret;
pub mod store;

pub use reconciler::{GeneratedSecrets, InitState, Reconciliation, SENTINEL_KEY, reconcile};
pub use secret::{Charset, SecretGenerator, SecretSpec};
pub use store::{EnvLine, EnvStore, SetOutcome};
