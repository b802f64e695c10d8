//! Random secret generation.

use dockwright_core::domain::{SecretGenerator, SecretSpec};
use rand::Rng;
use tracing::warn;

/// Draws each character uniformly from the spec's alphabet using the
/// thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSecretGenerator;

impl RandomSecretGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl SecretGenerator for RandomSecretGenerator {
    fn generate(&self, spec: SecretSpec) -> String {
        let alphabet = spec.charset.alphabet();
        if alphabet.is_empty() {
            warn!(length = spec.length, "empty charset, generating empty secret");
            return String::new();
        }

        let mut rng = rand::rng();
        (0..spec.length)
            .map(|_| char::from(alphabet[rng.random_range(0..alphabet.len())]))
            .collect()
    }
}
