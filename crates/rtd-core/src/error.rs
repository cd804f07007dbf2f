//! Error types for rtd-core

use std::path::PathBuf;

/// Result type for rtd-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while migrating a repository's configuration
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No file at the repository root matches the config file pattern
    #[error("No Read the Docs configuration file found in {repository}")]
    ConfigNotFound { repository: String },

    /// More than one root file matches the config file pattern
    #[error("Multiple configuration files found in {repository}: {}", candidates.join(", "))]
    AmbiguousConfig {
        repository: String,
        candidates: Vec<String>,
    },

    /// The configuration does not satisfy the schema
    #[error("Configuration does not match the schema:\n  {}", errors.join("\n  "))]
    Schema { errors: Vec<String> },

    /// The schema itself could not be compiled
    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    /// Downloading the schema failed
    #[error("Failed to fetch schema from {url}: {source}")]
    SchemaFetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Config file content is not UTF-8
    #[error("{path} is not valid UTF-8")]
    Encoding { path: String },

    /// Assistant settings file could not be read
    #[error("Failed to read settings from {path}: {source}")]
    Settings {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Transparent wrappers for underlying crate errors
    /// Document error from rtd-content
    #[error(transparent)]
    Content(#[from] rtd_content::Error),

    /// Migration error from rtd-migrate
    #[error(transparent)]
    Migrate(#[from] rtd_migrate::Error),

    /// Hosting error from rtd-hosting
    #[error(transparent)]
    Hosting(#[from] rtd_hosting::Error),

    /// TOML deserialization error
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),
}
