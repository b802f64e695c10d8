//! Env reconciliation: `(Topology, EnvStore)` → `EnvStore`.
//!
//! Identity and secret keys are written once, gated on the `APP_NAME`
//! sentinel. Driver keys follow the current topology on every run.

use crate::domain::{
    entities::topology::Topology,
    env::{
        secret::{SecretGenerator, SecretSpec},
        store::{EnvStore, SetOutcome},
    },
    naming::to_snake_case,
    value_objects::ServiceKind,
};

pub const SENTINEL_KEY: &str = "APP_NAME";
pub const DB_USERNAME: &str = "docker";
pub const DB_PASSWORD_LENGTH: usize = 16;
pub const REDIS_PASSWORD_LENGTH: usize = 8;

/// Whether a store has been through a first reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitState {
    Uninitialized,
    Initialized,
}

impl InitState {
    pub fn of(store: &EnvStore) -> Self {
        if store.contains_key(SENTINEL_KEY) {
            Self::Initialized
        } else {
            Self::Uninitialized
        }
    }
}

/// Secrets created by this run. Empty when the store was already initialized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedSecrets {
    pub db_password: Option<String>,
    pub mysql_root_password: Option<String>,
    pub redis_password: Option<String>,
}

impl GeneratedSecrets {
    pub fn is_empty(&self) -> bool {
        self.db_password.is_none()
            && self.mysql_root_password.is_none()
            && self.redis_password.is_none()
    }

    /// Names of the keys that received a fresh secret.
    pub fn keys(&self) -> Vec<&'static str> {
        [
            ("DB_PASSWORD", &self.db_password),
            ("MYSQL_ROOT_PASSWORD", &self.mysql_root_password),
            ("REDIS_PASSWORD", &self.redis_password),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_some())
        .map(|(key, _)| key)
        .collect()
    }
}

#[derive(Debug, Clone)]
pub struct Reconciliation {
    pub store: EnvStore,
    pub secrets: GeneratedSecrets,
    /// State observed before this run.
    pub state: InitState,
    /// Keys added to the header block, in order.
    pub introduced: Vec<String>,
    /// Keys whose existing lines were rewritten.
    pub rewritten: Vec<String>,
}

impl Reconciliation {
    pub fn render(&self) -> String {
        self.store.render()
    }
}

struct Writer {
    store: EnvStore,
    introduced: Vec<String>,
    rewritten: Vec<String>,
}

impl Writer {
    fn set(&mut self, key: &str, value: impl Into<String>) {
        match self.store.set(key, value) {
            SetOutcome::Introduced => self.introduced.push(key.to_string()),
            SetOutcome::Rewritten if !self.rewritten.iter().any(|k| k == key) => {
                self.rewritten.push(key.to_string())
            }
            SetOutcome::Rewritten | SetOutcome::Updated => {}
        }
    }
}

/// Merge the keys `topology` needs into `store`.
pub fn reconcile(
    topology: &Topology,
    store: EnvStore,
    secrets: &dyn SecretGenerator,
) -> Reconciliation {
    let state = InitState::of(&store);
    let has_mysql = topology.has(ServiceKind::Mysql);
    let has_redis = topology.has(ServiceKind::Redis);
    let name = topology.name();

    let mut writer = Writer {
        store,
        introduced: Vec::new(),
        rewritten: Vec::new(),
    };
    let mut generated = GeneratedSecrets::default();

    if state == InitState::Uninitialized {
        writer.set(SENTINEL_KEY, name);

        let db_password = secrets.generate(SecretSpec::alphanumeric(DB_PASSWORD_LENGTH));
        writer.set("DB_PASSWORD", db_password.as_str());
        generated.db_password = Some(db_password);

        if has_mysql {
            let root = secrets.generate(SecretSpec::alphanumeric(DB_PASSWORD_LENGTH));
            writer.set("MYSQL_ROOT_PASSWORD", root.as_str());
            generated.mysql_root_password = Some(root);
        }

        if has_redis {
            let redis = secrets.generate(SecretSpec::alphanumeric(REDIS_PASSWORD_LENGTH));
            writer.set("REDIS_PASSWORD", redis.as_str());
            generated.redis_password = Some(redis);
        }

        writer.set("DB_HOST", format!("{name}-db"));
        writer.set("DB_DATABASE", to_snake_case(name));
        writer.set("DB_USERNAME", DB_USERNAME);

        if has_redis {
            writer.set("REDIS_HOST", format!("{name}-redis"));
        }
    }

    if has_mysql {
        writer.set("DB_CONNECTION", "mysql");
    }
    if topology.has(ServiceKind::Queue) {
        writer.set("QUEUE_DRIVER", "redis");
    }
    if topology.has(ServiceKind::Notifications) {
        writer.set("BROADCAST_DRIVER", "redis");
    }

    Reconciliation {
        store: writer.store,
        secrets: generated,
        state,
        introduced: writer.introduced,
        rewritten: writer.rewritten,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::domain::{
        composer::compose,
        entities::selection::ServiceSelection,
        value_objects::Extra,
    };

    /// Zero-padded counter: "0000000000000001", "0000000000000002", ...
    #[derive(Default)]
    struct CountingSecrets(AtomicUsize);

    impl SecretGenerator for CountingSecrets {
        fn generate(&self, spec: SecretSpec) -> String {
            let n = self.0.fetch_add(1, Ordering::SeqCst) + 1;
            format!("{n:0>width$}", width = spec.length)
        }
    }

    fn topology(name: &str, extras: &[Extra]) -> Topology {
        let selection = ServiceSelection::builder()
            .name(name)
            .extras(extras.iter().copied())
            .build()
            .unwrap();
        compose(&selection)
    }

    fn fresh(topology: &Topology, source: &str) -> Reconciliation {
        reconcile(topology, EnvStore::parse(source), &CountingSecrets::default())
    }

    #[test]
    fn fresh_store_without_extras() {
        let result = fresh(&topology("foobar", &[]), "");
        let store = &result.store;

        assert_eq!(result.state, InitState::Uninitialized);
        assert_eq!(store.get("APP_NAME"), Some("foobar"));
        assert_eq!(store.get("DB_HOST"), Some("foobar-db"));
        assert_eq!(store.get("DB_DATABASE"), Some("foobar"));
        assert_eq!(store.get("DB_USERNAME"), Some("docker"));
        assert_eq!(store.get("DB_CONNECTION"), Some("mysql"));
        assert_eq!(store.get("DB_PASSWORD").map(str::len), Some(16));
        assert!(store.get("REDIS_HOST").is_none());
        assert!(store.get("REDIS_PASSWORD").is_none());
        assert!(store.get("QUEUE_DRIVER").is_none());
    }

    #[test]
    fn fresh_store_with_queue() {
        let result = fresh(&topology("foobar", &[Extra::Queue]), "");
        let store = &result.store;

        assert_eq!(store.get("REDIS_HOST"), Some("foobar-redis"));
        assert_eq!(store.get("REDIS_PASSWORD").map(str::len), Some(8));
        assert_eq!(store.get("QUEUE_DRIVER"), Some("redis"));
        assert!(store.get("BROADCAST_DRIVER").is_none());
    }

    #[test]
    fn introduced_keys_follow_fixed_order() {
        let result = fresh(&topology("foobar", &Extra::ALL), "");

        assert_eq!(
            result.introduced,
            [
                "APP_NAME",
                "DB_PASSWORD",
                "MYSQL_ROOT_PASSWORD",
                "REDIS_PASSWORD",
                "DB_HOST",
                "DB_DATABASE",
                "DB_USERNAME",
                "REDIS_HOST",
                "DB_CONNECTION",
                "QUEUE_DRIVER",
                "BROADCAST_DRIVER",
            ]
        );
        assert_eq!(
            result.secrets.keys(),
            ["DB_PASSWORD", "MYSQL_ROOT_PASSWORD", "REDIS_PASSWORD"]
        );
    }

    #[test]
    fn database_name_is_snake_cased() {
        let result = fresh(&topology("shop-backend", &[]), "");
        assert_eq!(result.store.get("DB_DATABASE"), Some("shop_backend"));
        assert_eq!(result.store.get("DB_HOST"), Some("shop-backend-db"));
    }

    #[test]
    fn header_precedes_body_and_example_lines_are_rewritten() {
        let example = "APP_ENV=local\nDB_HOST=127.0.0.1\n# queue\nQUEUE_DRIVER=sync\n";
        let result = fresh(&topology("foobar", &[Extra::Queue]), example);
        let rendered = result.render();

        let (header, body) = rendered.split_once("\n\n").unwrap();
        assert!(header.starts_with("APP_NAME=foobar\n"));
        assert!(!header.contains("DB_HOST"));
        assert!(!header.contains("QUEUE_DRIVER"));
        assert_eq!(
            body,
            "APP_ENV=local\nDB_HOST=foobar-db\n# queue\nQUEUE_DRIVER=redis\n"
        );
        assert_eq!(result.rewritten, ["DB_HOST", "QUEUE_DRIVER"]);
    }

    #[test]
    fn second_run_is_byte_identical() {
        let topology = topology("foobar", &Extra::ALL);
        let first = fresh(&topology, "APP_ENV=local\n# keep me\n").render();

        let second = reconcile(&topology, EnvStore::parse(&first), &CountingSecrets::default());

        assert_eq!(second.state, InitState::Initialized);
        assert!(second.secrets.is_empty());
        assert!(second.introduced.is_empty());
        assert_eq!(second.render(), first);
    }

    #[test]
    fn initialized_store_keeps_identity_and_secrets() {
        let existing = "APP_NAME=app1\nDB_PASSWORD=db-pass\nMYSQL_ROOT_PASSWORD=db-root-pass\nREDIS_PASSWORD=redis-pass\n";
        let result = fresh(&topology("something-else", &Extra::ALL), existing);
        let store = &result.store;

        assert_eq!(store.get("APP_NAME"), Some("app1"));
        assert_eq!(store.get("DB_PASSWORD"), Some("db-pass"));
        assert_eq!(store.get("MYSQL_ROOT_PASSWORD"), Some("db-root-pass"));
        assert_eq!(store.get("REDIS_PASSWORD"), Some("redis-pass"));
        assert!(store.get("DB_HOST").is_none());
        assert!(result.secrets.is_empty());
    }

    #[test]
    fn drivers_follow_topology_even_when_initialized() {
        let existing = "APP_NAME=app1\nQUEUE_DRIVER=sync\n";
        let result = fresh(&topology("app1", &[Extra::Queue, Extra::Notifications]), existing);

        assert_eq!(
            result.render(),
            "DB_CONNECTION=mysql\nBROADCAST_DRIVER=redis\n\nAPP_NAME=app1\nQUEUE_DRIVER=redis\n"
        );
    }

    #[test]
    fn secrets_come_from_the_generator() {
        let result = fresh(&topology("foobar", &[Extra::Notifications]), "");

        assert_eq!(result.store.get("DB_PASSWORD"), Some("0000000000000001"));
        assert_eq!(result.store.get("MYSQL_ROOT_PASSWORD"), Some("0000000000000002"));
        assert_eq!(result.store.get("REDIS_PASSWORD"), Some("00000003"));
    }
}
