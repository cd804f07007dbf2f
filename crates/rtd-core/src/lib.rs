//! Orchestration layer for the Read the Docs assistant
//!
//! `rtd-core` ties the document model, the migration engine and a
//! repository host together:
//!
//! - **Discovery**: find the single config file at a repository root
//! - **Validation**: check configurations against the Read the Docs schema
//! - **Assistant**: migrate a repository's config and optionally publish it
//! - **Settings**: TOML settings shared by every entry point
//!
//! # Architecture
//!
//! ```text
//!                     CLI
//!                      |
//!                  rtd-core
//!                      |
//!       +--------------+--------------+
//!       |              |              |
//! rtd-content     rtd-migrate    rtd-hosting
//! ```

pub mod assistant;
pub mod config;
pub mod discovery;
pub mod error;
pub mod validation;

pub use assistant::{
    Assistant, MigrationReport, MigrationRequest, Outcome, Publication, changed_paths, classify,
    run_migrators,
};
pub use config::{AssistantConfig, GitHubSection, MigrationSection};
pub use discovery::{CONFIG_FILENAME_PATTERN, find_config, is_config_filename};
pub use error::{Error, Result};
pub use validation::{
    AcceptAll, JsonSchemaValidator, SchemaValidator, ValidatedConfig, load_and_validate,
};
