//! Shared test utilities for the readthedocs-assistant workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`fixtures`] - sample configuration files before and after migration
//! - [`host`] - pre-seeded in-memory repository hosts
//! - [`workspace`] - [`TestWorkspace`](workspace::TestWorkspace) for on-disk files

pub mod fixtures;
pub mod host;
pub mod workspace;
