//! Migration engine for Read the Docs configuration files.
//!
//! A [`MigratorRegistry`] maps stable names to [`Migrator`] constructors.
//! Each migrator turns a [`Document`](rtd_content::Document) into a new
//! document and reports whether it judged itself relevant.

pub mod error;
pub mod migrator;
pub mod registry;
pub mod rules;

pub use error::{Error, Result};
pub use migrator::{Migration, Migrator, apply_migrators};
pub use registry::{MigratorFactory, MigratorRegistry};
pub use rules::UseBuildTools;
