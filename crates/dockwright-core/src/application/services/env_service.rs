//! Env Service - loads, reconciles and writes the project's `.env`.
//!
//! Search order is `.env` then `.env.example`; the result always goes to
//! `.env`. A missing or unparseable source aborts the step before anything
//! is written.

use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{EnvParser, Filesystem, SecretGenerator},
    },
    domain::{EnvStore, Reconciliation, Topology, reconcile},
    error::DockwrightResult,
};

pub const PRIMARY_ENV_FILE: &str = ".env";
pub const FALLBACK_ENV_FILE: &str = ".env.example";

/// A store together with the file it was read from.
#[derive(Debug, Clone)]
pub struct LoadedEnv {
    pub source: PathBuf,
    pub store: EnvStore,
}

/// Outcome of one reconciliation step.
#[derive(Debug, Clone)]
pub struct EnvReport {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub reconciliation: Reconciliation,
    /// False for previews.
    pub written: bool,
}

impl EnvReport {
    pub fn rendered(&self) -> String {
        self.reconciliation.render()
    }
}

pub struct EnvService {
    filesystem: Box<dyn Filesystem>,
    parser: Box<dyn EnvParser>,
    secrets: Box<dyn SecretGenerator>,
}

impl EnvService {
    pub fn new(
        filesystem: Box<dyn Filesystem>,
        parser: Box<dyn EnvParser>,
        secrets: Box<dyn SecretGenerator>,
    ) -> Self {
        Self {
            filesystem,
            parser,
            secrets,
        }
    }

    /// Candidate sources under `root`, in search order.
    pub fn candidates(root: &Path) -> [PathBuf; 2] {
        [root.join(PRIMARY_ENV_FILE), root.join(FALLBACK_ENV_FILE)]
    }

    /// Load the first existing candidate.
    #[instrument(skip_all, fields(root = %root.as_ref().display()))]
    pub fn load(&self, root: impl AsRef<Path>) -> DockwrightResult<LoadedEnv> {
        let candidates = Self::candidates(root.as_ref());

        let Some(source) = candidates.iter().find(|p| self.filesystem.exists(p)) else {
            warn!("No environment file found");
            return Err(ApplicationError::ConfigSourceMissing {
                searched: candidates.to_vec(),
            }
            .into());
        };

        let text = self.filesystem.read_to_string(source)?;
        let values = self
            .parser
            .parse(&text)
            .map_err(|detail| ApplicationError::ConfigParseError {
                path: source.clone(),
                detail,
            })?;

        debug!(source = %source.display(), keys = values.len(), "Environment loaded");
        Ok(LoadedEnv {
            source: source.clone(),
            store: EnvStore::parse(&text).with_values(values),
        })
    }

    /// Reconcile without writing.
    pub fn preview(&self, topology: &Topology, root: impl AsRef<Path>) -> DockwrightResult<EnvReport> {
        let root = root.as_ref();
        let loaded = self.load(root)?;

        Ok(EnvReport {
            source: loaded.source,
            destination: root.join(PRIMARY_ENV_FILE),
            reconciliation: reconcile(topology, loaded.store, self.secrets.as_ref()),
            written: false,
        })
    }

    /// Reconcile and write the result to `.env` as a whole file.
    #[instrument(skip_all, fields(topology = %topology, root = %root.as_ref().display()))]
    pub fn reconcile(&self, topology: &Topology, root: impl AsRef<Path>) -> DockwrightResult<EnvReport> {
        let mut report = self.preview(topology, root)?;

        self.filesystem
            .write_file(&report.destination, &report.rendered())?;
        report.written = true;

        let reconciliation = &report.reconciliation;
        info!(
            source = %report.source.display(),
            state = ?reconciliation.state,
            introduced = reconciliation.introduced.len(),
            rewritten = reconciliation.rewritten.len(),
            secrets = reconciliation.secrets.keys().len(),
            "Environment reconciled"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::application::ports::output::MockEnvParser;
    use crate::domain::{Extra, InitState, SecretSpec, ServiceSelection, compose};
    use crate::error::DockwrightError;

    /// Minimal shared in-memory filesystem for service tests.
    #[derive(Clone, Default)]
    struct Files(Arc<Mutex<HashMap<PathBuf, String>>>);

    impl Files {
        fn with(self, path: &str, content: &str) -> Self {
            self.0.lock().unwrap().insert(path.into(), content.into());
            self
        }

        fn get(&self, path: &str) -> Option<String> {
            self.0.lock().unwrap().get(Path::new(path)).cloned()
        }
    }

    impl Filesystem for Files {
        fn create_dir_all(&self, _: &Path) -> DockwrightResult<()> {
            Ok(())
        }
        fn write_file(&self, path: &Path, content: &str) -> DockwrightResult<()> {
            self.0.lock().unwrap().insert(path.into(), content.into());
            Ok(())
        }
        fn read_to_string(&self, path: &Path) -> DockwrightResult<String> {
            self.0.lock().unwrap().get(path).cloned().ok_or_else(|| {
                ApplicationError::FilesystemError {
                    path: path.into(),
                    reason: "not found".into(),
                }
                .into()
            })
        }
        fn set_permissions(&self, _: &Path, _: bool) -> DockwrightResult<()> {
            Ok(())
        }
        fn exists(&self, path: &Path) -> bool {
            self.0.lock().unwrap().contains_key(path)
        }
    }

    struct Fixed;

    impl SecretGenerator for Fixed {
        fn generate(&self, spec: SecretSpec) -> String {
            "x".repeat(spec.length)
        }
    }

    fn accepting_parser() -> Box<MockEnvParser> {
        let mut parser = MockEnvParser::new();
        parser.expect_parse().returning(|_| Ok(Vec::new()));
        Box::new(parser)
    }

    fn service(files: &Files, parser: Box<MockEnvParser>) -> EnvService {
        EnvService::new(Box::new(files.clone()), parser, Box::new(Fixed))
    }

    fn topology() -> Topology {
        let selection = ServiceSelection::builder()
            .name("foobar")
            .extras([Extra::Queue])
            .build()
            .unwrap();
        compose(&selection)
    }

    #[test]
    fn example_file_is_used_and_env_is_written() {
        let files = Files::default().with("/app/.env.example", "APP_ENV=local\n");
        let report = service(&files, accepting_parser())
            .reconcile(&topology(), "/app")
            .unwrap();

        assert_eq!(report.source, PathBuf::from("/app/.env.example"));
        assert!(report.written);
        let written = files.get("/app/.env").unwrap();
        assert!(written.starts_with("APP_NAME=foobar\n"));
        assert!(written.ends_with("\n\nAPP_ENV=local\n"));
        assert_eq!(files.get("/app/.env.example").unwrap(), "APP_ENV=local\n");
    }

    #[test]
    fn primary_file_wins_over_example() {
        let files = Files::default()
            .with("/app/.env", "APP_NAME=kept\n")
            .with("/app/.env.example", "APP_ENV=local\n");
        let report = service(&files, accepting_parser())
            .reconcile(&topology(), "/app")
            .unwrap();

        assert_eq!(report.source, PathBuf::from("/app/.env"));
        assert_eq!(report.reconciliation.state, InitState::Initialized);
    }

    #[test]
    fn missing_sources_write_nothing() {
        let files = Files::default();
        let err = service(&files, accepting_parser())
            .reconcile(&topology(), "/app")
            .unwrap_err();

        match err {
            DockwrightError::Application(ApplicationError::ConfigSourceMissing { searched }) => {
                assert_eq!(
                    searched,
                    [PathBuf::from("/app/.env"), PathBuf::from("/app/.env.example")]
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(files.get("/app/.env").is_none());
    }

    #[test]
    fn parse_error_writes_nothing() {
        let files = Files::default().with("/app/.env", "BROKEN='\n");
        let mut parser = MockEnvParser::new();
        parser
            .expect_parse()
            .returning(|_| Err("unterminated quote".into()));

        let err = service(&files, Box::new(parser))
            .reconcile(&topology(), "/app")
            .unwrap_err();

        assert!(err.is_env_source_error());
        assert!(err.to_string().contains("unterminated quote"));
        assert_eq!(files.get("/app/.env").unwrap(), "BROKEN='\n");
    }

    #[test]
    fn preview_does_not_write() {
        let files = Files::default().with("/app/.env.example", "");
        let report = service(&files, accepting_parser())
            .preview(&topology(), "/app")
            .unwrap();

        assert!(!report.written);
        assert!(report.rendered().contains("QUEUE_DRIVER=redis"));
        assert!(files.get("/app/.env").is_none());
    }

    #[test]
    fn parser_values_feed_the_sentinel_check() {
        let files = Files::default().with("/app/.env", "export APP_NAME=quoted\n");
        let mut parser = MockEnvParser::new();
        parser
            .expect_parse()
            .returning(|_| Ok(vec![("APP_NAME".into(), "quoted".into())]));

        let report = service(&files, Box::new(parser))
            .preview(&topology(), "/app")
            .unwrap();

        assert_eq!(report.reconciliation.state, InitState::Initialized);
    }
}
