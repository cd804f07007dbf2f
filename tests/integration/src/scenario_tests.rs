//! Reference scenarios for the use-build-tools migrator, expressed as JSON
//! documents the way Read the Docs stores parsed configurations.

use rtd_content::Document;
use rtd_migrate::{MigratorRegistry, apply_migrators};
use serde_json::{Value, json};

async fn migrate(input: Value) -> (Value, bool) {
    let registry = MigratorRegistry::with_builtins().unwrap();
    let migrators = registry.resolve_all(&["use-build-tools"]).unwrap();
    let document = Document::from_json(&input).unwrap();

    let (migrated, applied) = apply_migrators(&document, &migrators).await.unwrap();
    assert_eq!(document.to_json(), input, "input document was modified");
    (migrated.to_json(), applied[0])
}

#[tokio::test]
async fn test_version_only() {
    let (output, applied) = migrate(json!({"version": 2})).await;

    assert!(applied);
    assert_eq!(
        output,
        json!({"version": 2, "build": {"os": "ubuntu-20.04", "tools": {"python": "3.7"}}})
    );
}

#[tokio::test]
async fn test_python_version() {
    let (output, applied) = migrate(json!({"version": 2, "python": {"version": "3.8"}})).await;

    assert!(applied);
    assert_eq!(
        output,
        json!({"version": 2, "build": {"os": "ubuntu-20.04", "tools": {"python": "3.8"}}})
    );
}

#[tokio::test]
async fn test_python_version_with_install() {
    let (output, applied) = migrate(json!({
        "version": 2,
        "python": {"version": "3.8", "install": [{"requirements": "requirements.txt"}]}
    }))
    .await;

    assert!(applied);
    assert_eq!(
        output,
        json!({
            "version": 2,
            "build": {"os": "ubuntu-20.04", "tools": {"python": "3.8"}},
            "python": {"install": [{"requirements": "requirements.txt"}]}
        })
    );
}

#[tokio::test]
async fn test_install_without_version_stays_under_python() {
    let (output, _) = migrate(json!({
        "version": 2,
        "python": {"install": [{"method": "pip", "path": "."}]}
    }))
    .await;

    assert_eq!(output["python"], json!({"install": [{"method": "pip", "path": "."}]}));
    assert_eq!(output["build"]["tools"]["python"], json!("3.7"));
}
