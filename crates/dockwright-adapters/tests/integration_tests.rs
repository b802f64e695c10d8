//! End-to-end runs of the core services over the real adapters.

use std::fs;
use std::path::Path;

use dockwright_adapters::{
    ComposeRenderer, DotenvParser, LocalFilesystem, MemoryFilesystem, RandomSecretGenerator,
};
use dockwright_core::prelude::*;
use tempfile::TempDir;

fn local_services() -> (ScaffoldService, EnvService) {
    (
        ScaffoldService::new(Box::new(ComposeRenderer::new()), Box::new(LocalFilesystem::new())),
        EnvService::new(
            Box::new(LocalFilesystem::new()),
            Box::new(DotenvParser::new()),
            Box::new(RandomSecretGenerator::new()),
        ),
    )
}

fn env_value(text: &str, key: &str) -> Option<String> {
    text.lines()
        .find_map(|line| line.strip_prefix(&format!("{key}=")))
        .map(str::to_string)
}

#[test]
fn generates_a_full_project_on_disk() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    fs::write(root.join(".env.example"), "APP_ENV=local\nDB_HOST=127.0.0.1\n").unwrap();

    let (scaffold, env) = local_services();
    let selection = ServiceSelection::builder()
        .name("foobar")
        .extras(Extra::ALL)
        .build()
        .unwrap();
    let topology = scaffold.plan(&selection).unwrap();
    scaffold.generate(&topology, root).unwrap();
    env.reconcile(&topology, root).unwrap();

    for path in [
        "docker-compose.yml",
        "dc-aliases",
        "docker/nginx/sites/nginx.dev",
        "docker/mysql/conf/my.cnf",
        "docker/redis/.gitignore",
        "docker/queue/queue.dockerfile",
        "nodejs-apps/notifications/redis-pusher.js",
        "docker/adminer/sites/adminer.dev",
    ] {
        assert!(root.join(path).is_file(), "{path} missing");
    }
    assert!(root.join("docker/nginx/logs").is_dir());
    assert!(root.join("docker/mysql/db").is_dir());

    let written = fs::read_to_string(root.join(".env")).unwrap();
    assert_eq!(env_value(&written, "DB_HOST").as_deref(), Some("foobar-db"));
    assert_eq!(env_value(&written, "BROADCAST_DRIVER").as_deref(), Some("redis"));
    assert_eq!(env_value(&written, "DB_PASSWORD").map(|v| v.len()), Some(16));
    assert_eq!(env_value(&written, "REDIS_PASSWORD").map(|v| v.len()), Some(8));
    assert!(written.ends_with("\n\nAPP_ENV=local\nDB_HOST=foobar-db\n"));
    assert_eq!(
        fs::read_to_string(root.join(".env.example")).unwrap(),
        "APP_ENV=local\nDB_HOST=127.0.0.1\n"
    );
}

#[cfg(unix)]
#[test]
fn notifications_script_is_executable() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let (scaffold, _) = local_services();
    let selection = ServiceSelection::builder()
        .name("foobar")
        .extras([Extra::Notifications])
        .build()
        .unwrap();
    scaffold
        .generate(&scaffold.plan(&selection).unwrap(), dir.path())
        .unwrap();

    let mode = fs::metadata(dir.path().join("update-notifications-service.sh"))
        .unwrap()
        .permissions()
        .mode();
    assert_ne!(mode & 0o111, 0);
}

#[test]
fn second_run_keeps_generated_secrets() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    fs::write(root.join(".env.example"), "").unwrap();
    let (scaffold, env) = local_services();

    let selection = ServiceSelection::builder()
        .name("foobar")
        .extras([Extra::Queue])
        .build()
        .unwrap();
    let topology = scaffold.plan(&selection).unwrap();

    env.reconcile(&topology, root).unwrap();
    let first = fs::read_to_string(root.join(".env")).unwrap();
    let report = env.reconcile(&topology, root).unwrap();
    let second = fs::read_to_string(root.join(".env")).unwrap();

    assert_eq!(report.reconciliation.state, InitState::Initialized);
    assert!(report.reconciliation.secrets.is_empty());
    assert_eq!(first, second);
}

#[test]
fn dry_run_touches_nothing() {
    let fs = MemoryFilesystem::new();
    let scaffold = ScaffoldService::new(Box::new(ComposeRenderer::new()), Box::new(fs.clone()));
    let selection = ServiceSelection::builder().name("foobar").build().unwrap();

    let structure = scaffold
        .dry_run(&scaffold.plan(&selection).unwrap(), "/app")
        .unwrap();

    assert!(structure.file("docker-compose.yml").is_some());
    assert!(fs.list_files().is_empty());
    assert!(fs.read_file(Path::new("/app/docker-compose.yml")).is_none());
}

#[test]
fn reconciled_env_parses_for_every_accepted_name() {
    let parser = DotenvParser::new();
    let secrets = RandomSecretGenerator::new();

    for name in ["foobar", "my.app", "Shop_2-beta"] {
        let selection = ServiceSelection::builder().name(name).build().unwrap();
        let topology = compose(&selection);

        let first = reconcile(&topology, EnvStore::parse("APP_ENV=local\n"), &secrets).render();
        let pairs = parser
            .parse(&first)
            .unwrap_or_else(|e| panic!("{name}: {e}"));
        assert!(pairs.iter().any(|(k, v)| k == "APP_NAME" && v == name));

        let store = EnvStore::parse(&first).with_values(pairs);
        let second = reconcile(&topology, store, &secrets).render();
        assert_eq!(first, second, "{name}");
    }
}

#[test]
fn quote_in_name_never_reaches_env() {
    assert!(ServiceSelection::builder().name("o'neil").build().is_err());
}
