//! End-to-end integration test for the migration pipeline
//!
//! Exercises the complete flow against an in-memory host: discovery ->
//! validation -> migrator chain -> classification -> publication.

use async_trait::async_trait;
use rtd_content::{Document, Value};
use rtd_core::{AcceptAll, Assistant, MigrationRequest, Outcome};
use rtd_hosting::MemoryHost;
use rtd_migrate::{Migration, Migrator, MigratorRegistry, UseBuildTools};
use rtd_test_utils::fixtures;
use rtd_test_utils::host::FORK_OWNER;

/// Adds `formats: all` when no formats are configured
struct AllFormats;

#[async_trait]
impl Migrator for AllFormats {
    fn name(&self) -> &str {
        "all-formats"
    }

    fn description(&self) -> &str {
        "Build every downloadable format"
    }

    async fn migrate(&self, document: &Document) -> rtd_migrate::Result<Migration> {
        if document.contains(&["formats"]) {
            return Ok(Migration::not_applied(document.deep_copy()));
        }
        let mut working = document.deep_copy();
        working.insert("formats", "all");
        Ok(Migration::applied(working))
    }
}

fn registry() -> MigratorRegistry {
    let mut registry = MigratorRegistry::new();
    registry
        .register(UseBuildTools::NAME, || Box::new(UseBuildTools::new()))
        .unwrap();
    registry
        .register("all-formats", || Box::new(AllFormats))
        .unwrap();
    registry
}

fn host() -> MemoryHost {
    MemoryHost::new(FORK_OWNER)
        .with_repository("pandas-dev", "pandas", [(".readthedocs.yml", fixtures::PYTHON_VERSION)])
        .with_repository("pallets", "flask", [("readthedocs.yaml", fixtures::MIGRATED)])
        .with_repository("psf", "requests", [("README.md", "# requests\n")])
}

fn request(owner: &str, repo: &str) -> MigrationRequest {
    MigrationRequest::new(
        owner,
        repo,
        vec!["use-build-tools".to_string(), "all-formats".to_string()],
    )
    .publish(true)
}

#[tokio::test]
async fn test_migrator_chain_publishes_combined_change() {
    let host = host();
    let registry = registry();
    let assistant = Assistant::new(&host, &registry, &AcceptAll);

    let report = assistant
        .migrate_config(&request("pandas-dev", "pandas"))
        .await
        .unwrap();

    assert_eq!(report.applied, vec![true, true]);
    let written = host
        .file("readthedocs-assistant/pandas", "assistant-update-config", ".readthedocs.yml")
        .await
        .unwrap();
    let written = Document::parse_yaml(std::str::from_utf8(&written).unwrap()).unwrap();

    assert_eq!(written.get(&["formats"]), Some(&Value::from("all")));
    assert_eq!(
        written.get(&["build", "tools", "python"]),
        Some(&Value::from("3.8"))
    );
    assert!(!written.contains(&["python"]));
}

#[tokio::test]
async fn test_shared_registry_serves_concurrent_repositories() {
    let host = host();
    let registry = registry();
    let assistant = Assistant::new(&host, &registry, &AcceptAll);

    let pandas = request("pandas-dev", "pandas");
    let flask = request("pallets", "flask");
    let requests = request("psf", "requests");
    let (pandas, flask, requests) = tokio::join!(
        assistant.migrate_config(&pandas),
        assistant.migrate_config(&flask),
        assistant.migrate_config(&requests),
    );

    assert!(pandas.unwrap().published.is_some());

    // build.tools is already there, only formats changes
    let flask = flask.unwrap();
    assert_eq!(flask.applied, vec![false, true]);
    assert!(matches!(flask.outcome, Outcome::Changed { .. }));

    assert!(matches!(
        requests.unwrap_err(),
        rtd_core::Error::ConfigNotFound { .. }
    ));

    assert_eq!(host.writes().await.len(), 2);
}
