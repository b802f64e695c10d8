//! Core domain layer for dockwright.
//!
//! Pure logic only: turning a [`ServiceSelection`] into a [`Topology`] and
//! merging the keys that topology needs into an [`EnvStore`]. All I/O,
//! randomness and rendering live behind ports in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **No logging**: tracing starts at the application layer
//! - **Value in, value out**: `compose` and `reconcile` own their outputs
//!
//! ```text
//! ServiceSelection ──compose──▶ Topology ──reconcile(EnvStore)──▶ Reconciliation
//! ```

pub mod composer;
pub mod entities;
pub mod env;
pub mod error;
pub mod naming;
pub mod value_objects;

mod validation;

pub use composer::compose;
pub use entities::{
    common::{Permissions, RelativePath},
    project_structure::{DirectoryToCreate, FileToWrite, FsEntry, ProjectStructure},
    render_context::RenderContext,
    selection::{HasName, NoName, SelectionBuilder, ServiceSelection},
    topology::{Link, NotificationsParams, PortMapping, QueueParams, ServiceDescriptor, ServiceParams, Topology},
};
pub use env::{
    EnvLine, EnvStore, GeneratedSecrets, InitState, Reconciliation, SecretGenerator, SecretSpec,
    reconcile,
};
pub use error::{DomainError, ErrorCategory};
pub use validation::DomainValidator;
pub use value_objects::{DatabaseVariant, Extra, MemoryLimit, ServiceKind};

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    struct Fixed;

    impl SecretGenerator for Fixed {
        fn generate(&self, spec: SecretSpec) -> String {
            "s".repeat(spec.length)
        }
    }

    // ========================================================================
    // Pipeline Tests
    // ========================================================================

    #[test]
    fn selection_to_env_pipeline() {
        let selection = ServiceSelection::builder()
            .name("foobar")
            .database(DatabaseVariant::from_str("minimal").unwrap())
            .no_extras()
            .build()
            .unwrap();

        let topology = compose(&selection);
        let result = reconcile(&topology, EnvStore::default(), &Fixed);

        assert_eq!(
            result.render(),
            "APP_NAME=foobar\n\
             DB_PASSWORD=ssssssssssssssss\n\
             MYSQL_ROOT_PASSWORD=ssssssssssssssss\n\
             DB_HOST=foobar-db\n\
             DB_DATABASE=foobar\n\
             DB_USERNAME=docker\n\
             DB_CONNECTION=mysql\n\n"
        );
    }

    #[test]
    fn changing_selection_after_init_only_moves_drivers() {
        let base = ServiceSelection::builder().name("foobar").no_extras().build().unwrap();
        let first = reconcile(&compose(&base), EnvStore::default(), &Fixed).render();

        let grown = ServiceSelection::builder()
            .name("renamed")
            .extra(Extra::Queue)
            .build()
            .unwrap();
        let second = reconcile(&compose(&grown), EnvStore::parse(&first), &Fixed);

        assert_eq!(second.state, InitState::Initialized);
        assert_eq!(second.introduced, ["QUEUE_DRIVER"]);
        assert_eq!(second.store.get("APP_NAME"), Some("foobar"));
        assert!(second.store.get("REDIS_PASSWORD").is_none());
    }

    // ========================================================================
    // Validation Tests
    // ========================================================================

    #[test]
    fn validator_delegates_to_entities() {
        let structure = ProjectStructure::new("/tmp/test");
        assert_eq!(
            DomainValidator::validate_project_structure(&structure),
            Err(DomainError::EmptyStructure)
        );

        let selection = ServiceSelection::builder().name("foobar").build().unwrap();
        assert!(DomainValidator::validate_selection(&selection).is_ok());
    }

    #[test]
    fn project_structure_validates_duplicates() {
        let structure = ProjectStructure::new("/tmp/test")
            .with_file("dc-aliases", "".into(), Permissions::executable())
            .with_file("dc-aliases", "".into(), Permissions::read_write());

        assert!(matches!(
            structure.validate(),
            Err(DomainError::DuplicatePath { .. })
        ));
    }

    #[test]
    fn project_structure_rejects_paths_leaving_root() {
        let structure = ProjectStructure::new("/tmp/test").with_file(
            "../outside/package.json",
            "{}".into(),
            Permissions::read_write(),
        );

        assert!(matches!(
            structure.validate(),
            Err(DomainError::PathEscapesRoot { .. })
        ));
    }

    #[test]
    fn project_structure_lookup() {
        let structure = ProjectStructure::new("/tmp/test")
            .with_directory("docker/mysql", Permissions::read_write())
            .with_file("docker/mysql/.gitignore", "db\n".into(), Permissions::read_write());

        assert_eq!(structure.entry_count(), 2);
        assert_eq!(structure.directories().count(), 1);
        assert_eq!(
            structure.file("docker/mysql/.gitignore").map(|f| f.content.as_str()),
            Some("db\n")
        );
    }

    #[test]
    fn topology_serializes_for_json_output() {
        let selection = ServiceSelection::builder()
            .name("foobar")
            .extras([Extra::Notifications])
            .build()
            .unwrap();
        let json = serde_json::to_value(compose(&selection)).unwrap();

        assert_eq!(json["name"], "foobar");
        assert_eq!(json["database"], "minimal");
        assert_eq!(json["services"][0]["kind"], "nginx");
        assert_eq!(json["services"][0]["memory_limit"], "100m");
        assert_eq!(json["services"][0]["port"]["host"], 8888);
        assert_eq!(json["daemons"][1], "redis");
        assert_eq!(
            json["services"][3]["params"]["path"],
            "nodejs-apps/notifications"
        );
    }
}
