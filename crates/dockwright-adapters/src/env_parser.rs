//! dotenv syntax checking backed by `dotenvy`.

use dockwright_core::application::ports::EnvParser;
use tracing::debug;

/// Parses with the same rules the application will later load `.env` with:
/// quoting, `export` prefixes, multi-line values and `${VAR}` substitution.
#[derive(Debug, Clone, Copy, Default)]
pub struct DotenvParser;

impl DotenvParser {
    pub fn new() -> Self {
        Self
    }
}

impl EnvParser for DotenvParser {
    fn parse(&self, text: &str) -> Result<Vec<(String, String)>, String> {
        let pairs = dotenvy::from_read_iter(text.as_bytes())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| e.to_string())?;

        debug!(keys = pairs.len(), "dotenv parsed");
        Ok(pairs)
    }
}
