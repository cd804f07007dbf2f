//! Move the legacy `python.version` declaration into `build.tools.python`.
//!
//! See <https://docs.readthedocs.io/en/stable/config-file/v2.html#build>.

use async_trait::async_trait;
use rtd_content::{Document, Mapping, Value};
use tracing::{debug, info};

use crate::migrator::{Migration, Migrator};
use crate::{Error, Result};

/// Keys an existing `build` section may hold before migration
const LEGACY_BUILD_KEYS: &[&str] = &["image", "apt_packages"];

/// Consolidates `python.version` into a `build.os` / `build.tools` section
#[derive(Debug, Clone, Default)]
pub struct UseBuildTools;

impl UseBuildTools {
    pub const NAME: &'static str = "use-build-tools";

    pub const DEFAULT_OS: &'static str = "ubuntu-20.04";

    /// Python version of the build images that predate `build.tools`
    pub const DEFAULT_PYTHON_VERSION: &'static str = "3.7";

    pub fn new() -> Self {
        Self
    }

    fn precondition(&self, reason: impl Into<String>) -> Error {
        Error::precondition(Self::NAME, reason)
    }

    /// Classify a `build` section that exists before migration.
    fn legacy_build(&self, build: &Value) -> Result<LegacyBuild> {
        let build = build.as_mapping().ok_or_else(|| {
            self.precondition(format!("`build` must be a mapping, found {}", build.kind()))
        })?;

        if build.contains_key("tools") {
            return Ok(LegacyBuild::AlreadyMigrated);
        }

        if let Some(key) = build
            .keys()
            .find(|key| !LEGACY_BUILD_KEYS.contains(&key.as_str()))
        {
            return Err(self.precondition(format!(
                "existing `build.{key}` cannot be combined with `build.tools`"
            )));
        }

        Ok(LegacyBuild::Replace {
            apt_packages: build.get("apt_packages").cloned(),
        })
    }
}

enum LegacyBuild {
    AlreadyMigrated,
    Replace { apt_packages: Option<Value> },
}

#[async_trait]
impl Migrator for UseBuildTools {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "Move python.version into build.tools.python and pin build.os"
    }

    async fn migrate(&self, document: &Document) -> Result<Migration> {
        match document.version() {
            Some(2) => {}
            Some(version) => {
                return Err(self.precondition(format!(
                    "configuration version {version} is not supported, migrate to version 2 first"
                )));
            }
            None => {
                return Err(self.precondition(
                    "configuration has no integer `version`, migrate to version 2 first",
                ));
            }
        }

        let python = match document.get(&["python"]) {
            None => None,
            Some(Value::Mapping(python)) => Some(python),
            Some(other) => {
                return Err(self.precondition(format!(
                    "`python` must be a mapping, found {}",
                    other.kind()
                )));
            }
        };
        let declared_version = python.and_then(|python| python.get("version"));

        let mut apt_packages = None;
        if let Some(build) = document.get(&["build"]) {
            match self.legacy_build(build)? {
                LegacyBuild::AlreadyMigrated if declared_version.is_some() => {
                    return Err(self.precondition(
                        "both `python.version` and `build.tools` are declared",
                    ));
                }
                LegacyBuild::AlreadyMigrated => {
                    info!("Config already contains build.tools, nothing to do");
                    return Ok(Migration::not_applied(document.deep_copy()));
                }
                LegacyBuild::Replace { apt_packages: kept } => apt_packages = kept,
            }
        }

        let python_version = match declared_version {
            // Unquoted `3.10` parses as 3.1, the intended version is gone
            Some(Value::Float(f)) => {
                return Err(self.precondition(format!(
                    "`python.version` {f} is an unquoted number, quote it (e.g. '3.10')"
                )));
            }
            Some(value) => value.scalar_to_string().ok_or_else(|| {
                self.precondition(format!(
                    "`python.version` must be a string or a number, found {}",
                    value.kind()
                ))
            })?,
            None => Self::DEFAULT_PYTHON_VERSION.to_string(),
        };
        debug!(python_version = %python_version, "Moving python version into build.tools");

        let mut tools = Mapping::new();
        tools.insert("python".to_string(), Value::String(python_version));

        let mut build = Mapping::new();
        build.insert("os".to_string(), Value::from(Self::DEFAULT_OS));
        build.insert("tools".to_string(), Value::Mapping(tools));
        if let Some(packages) = apt_packages {
            build.insert("apt_packages".to_string(), packages);
        }

        let mut working = document.deep_copy();
        working.remove_path(&["python", "version"]);
        if working
            .get(&["python"])
            .and_then(Value::as_mapping)
            .is_some_and(Mapping::is_empty)
        {
            working.remove("python");
        }
        working.insert("build", build);

        Ok(Migration::applied(working))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn doc(source: &str) -> Document {
        Document::parse_yaml(source).unwrap()
    }

    async fn migrate(source: &str) -> Result<Migration> {
        UseBuildTools::new().migrate(&doc(source)).await
    }

    #[tokio::test]
    async fn test_minimal_config_gets_default_python() {
        let migration = migrate("version: 2\n").await.unwrap();

        assert!(migration.applied);
        assert_eq!(
            migration.document,
            doc("version: 2\nbuild:\n  os: ubuntu-20.04\n  tools:\n    python: '3.7'\n")
        );
    }

    #[rstest]
    #[case::trailing_zero("3.10")]
    #[case::plain("3.9")]
    #[tokio::test]
    async fn test_unquoted_float_version_is_rejected(#[case] version: &str) {
        let err = migrate(&format!("version: 2\npython:\n  version: {version}\n"))
            .await
            .unwrap_err();

        assert!(
            matches!(err, Error::Precondition { ref reason, .. } if reason.contains("unquoted")),
            "unexpected error {err:?}"
        );
    }

    #[tokio::test]
    async fn test_integer_version_becomes_string() {
        let migration = migrate("version: 2\npython:\n  version: 3\n").await.unwrap();

        assert_eq!(
            migration.document.get(&["build", "tools", "python"]),
            Some(&Value::from("3"))
        );
        assert!(!migration.document.contains(&["python"]));
    }

    #[tokio::test]
    async fn test_null_python_is_rejected() {
        let err = migrate("version: 2\npython:\n").await.unwrap_err();
        assert!(
            matches!(err, Error::Precondition { ref reason, .. } if reason.contains("found null")),
            "unexpected error {err:?}"
        );
    }

    #[tokio::test]
    async fn test_empty_python_mapping_is_dropped() {
        let migration = migrate("version: 2\npython: {}\n").await.unwrap();
        assert!(!migration.document.contains(&["python"]));
    }

    #[tokio::test]
    async fn test_other_python_keys_survive() {
        let migration = migrate("version: 2\npython:\n  version: '3.8'\n  system_packages: true\n")
            .await
            .unwrap();

        assert_eq!(
            migration.document.get(&["python", "system_packages"]),
            Some(&Value::Bool(true))
        );
        assert!(!migration.document.contains(&["python", "version"]));
    }

    #[tokio::test]
    async fn test_version_one_is_rejected() {
        let err = migrate("version: 1\n").await.unwrap_err();
        assert!(matches!(err, Error::Precondition { ref reason, .. } if reason.contains("version 1")));
    }

    #[tokio::test]
    async fn test_missing_version_is_rejected() {
        let err = migrate("python:\n  version: '3.8'\n").await.unwrap_err();
        assert!(matches!(err, Error::Precondition { .. }));
    }

    #[tokio::test]
    async fn test_string_version_is_rejected() {
        let err = migrate("version: '2'\n").await.unwrap_err();
        assert!(matches!(err, Error::Precondition { .. }));
    }

    #[tokio::test]
    async fn test_python_must_be_mapping() {
        let err = migrate("version: 2\npython: '3.8'\n").await.unwrap_err();
        assert!(matches!(err, Error::Precondition { ref reason, .. } if reason.contains("`python`")));
    }

    #[tokio::test]
    async fn test_non_scalar_python_version_is_rejected() {
        let err = migrate("version: 2\npython:\n  version: [3.8]\n").await.unwrap_err();
        assert!(matches!(err, Error::Precondition { ref reason, .. } if reason.contains("sequence")));
    }

    #[tokio::test]
    async fn test_already_migrated_is_not_applied() {
        let source = "version: 2\nbuild:\n  os: ubuntu-22.04\n  tools:\n    python: '3.11'\n";
        let migration = migrate(source).await.unwrap();

        assert!(!migration.applied);
        assert_eq!(migration.document, doc(source));
    }

    #[tokio::test]
    async fn test_tools_with_python_version_is_ambiguous() {
        let err = migrate(
            "version: 2\nbuild:\n  os: ubuntu-20.04\n  tools:\n    python: '3.8'\npython:\n  version: '3.8'\n",
        )
        .await
        .unwrap_err();

        assert!(matches!(err, Error::Precondition { ref reason, .. } if reason.contains("both")));
    }

    #[tokio::test]
    async fn test_legacy_image_is_replaced_and_apt_packages_kept() {
        let migration = migrate(
            "version: 2\nbuild:\n  image: latest\n  apt_packages:\n    - graphviz\npython:\n  version: '3.8'\n",
        )
        .await
        .unwrap();

        assert!(migration.applied);
        assert_eq!(
            migration.document,
            doc(
                "version: 2\nbuild:\n  os: ubuntu-20.04\n  tools:\n    python: '3.8'\n  apt_packages:\n    - graphviz\n"
            )
        );
    }

    #[tokio::test]
    async fn test_unknown_build_key_is_rejected() {
        let err = migrate("version: 2\nbuild:\n  os: ubuntu-20.04\n").await.unwrap_err();
        assert!(matches!(err, Error::Precondition { ref reason, .. } if reason.contains("build.os")));
    }

    #[tokio::test]
    async fn test_build_must_be_mapping() {
        let err = migrate("version: 2\nbuild: latest\n").await.unwrap_err();
        assert!(matches!(err, Error::Precondition { .. }));
    }
}
