//! Assistant settings parsed from a TOML file
//!
//! Every section is optional; missing values fall back to the defaults
//! below. Command line flags override whatever the file provides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// GitHub REST API root
pub const DEFAULT_API_URL: &str = rtd_hosting::DEFAULT_API_URL;

/// Branch created on the fork when publishing
pub const DEFAULT_BRANCH: &str = "assistant-update-config";

/// Commit message used when publishing
pub const DEFAULT_MESSAGE: &str = "Update Read the Docs configuration";

/// Read the Docs v2 configuration schema
pub const DEFAULT_SCHEMA_URL: &str = "https://raw.githubusercontent.com/readthedocs/readthedocs.org/master/readthedocs/rtd_tests/fixtures/spec/v2/schema.json";

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_branch() -> String {
    DEFAULT_BRANCH.to_string()
}

fn default_message() -> String {
    DEFAULT_MESSAGE.to_string()
}

fn default_schema_url() -> String {
    DEFAULT_SCHEMA_URL.to_string()
}

fn default_dry_run() -> bool {
    true
}

/// `[github]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GitHubSection {
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

impl Default for GitHubSection {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
        }
    }
}

/// `[migration]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MigrationSection {
    /// Branch created on the fork
    #[serde(default = "default_branch")]
    pub branch: String,

    /// Commit message for the updated config file
    #[serde(default = "default_message")]
    pub message: String,

    #[serde(default = "default_schema_url")]
    pub schema_url: String,

    /// Preview changes instead of publishing them
    #[serde(default = "default_dry_run")]
    pub dry_run: bool,
}

impl Default for MigrationSection {
    fn default() -> Self {
        Self {
            branch: default_branch(),
            message: default_message(),
            schema_url: default_schema_url(),
            dry_run: default_dry_run(),
        }
    }
}

/// Assistant settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssistantConfig {
    #[serde(default)]
    pub github: GitHubSection,

    #[serde(default)]
    pub migration: MigrationSection,
}

impl AssistantConfig {
    /// Parse settings from TOML content
    ///
    /// # Example
    ///
    /// ```
    /// use rtd_core::config::AssistantConfig;
    ///
    /// let config = AssistantConfig::parse(r#"
    /// [migration]
    /// branch = "update-rtd"
    /// "#).unwrap();
    ///
    /// assert_eq!(config.migration.branch, "update-rtd");
    /// assert!(config.migration.dry_run);
    /// ```
    pub fn parse(content: &str) -> Result<Self> {
        let config: AssistantConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Load settings from `path`
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::Settings {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Load settings from `path` when given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
