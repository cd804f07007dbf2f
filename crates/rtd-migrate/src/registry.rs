//! Migrator registry for built-in and injected migration rules.

use std::collections::HashMap;
use std::fmt;

use crate::migrator::Migrator;
use crate::rules::UseBuildTools;
use crate::{Error, Result};

/// Constructor for a migrator instance
pub type MigratorFactory = Box<dyn Fn() -> Box<dyn Migrator> + Send + Sync>;

/// Catalog of migrators keyed by their stable name.
///
/// Built once at process start and only read afterwards, so it can be shared
/// by reference between concurrent migrations.
#[derive(Default)]
pub struct MigratorRegistry {
    entries: HashMap<String, MigratorFactory>,
}

impl MigratorRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Create a registry populated with every built-in migrator.
    pub fn with_builtins() -> Result<Self> {
        let mut registry = Self::new();
        registry.register(UseBuildTools::NAME, || Box::new(UseBuildTools::new()))?;
        Ok(registry)
    }

    /// Register a migrator constructor.
    ///
    /// Fails with [`Error::DuplicateName`] when the name is taken; the
    /// existing entry is left in place.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F) -> Result<()>
    where
        F: Fn() -> Box<dyn Migrator> + Send + Sync + 'static,
    {
        let name = name.into();
        if self.entries.contains_key(&name) {
            return Err(Error::DuplicateName { name });
        }
        self.entries.insert(name, Box::new(factory));
        Ok(())
    }

    /// Construct the migrator registered under `name`.
    pub fn resolve(&self, name: &str) -> Result<Box<dyn Migrator>> {
        self.entries
            .get(name)
            .map(|factory| factory())
            .ok_or_else(|| Error::UnknownMigrator {
                name: name.to_string(),
                known: self.names(),
            })
    }

    /// Construct several migrators, preserving the requested order.
    pub fn resolve_all<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<Box<dyn Migrator>>> {
        names.iter().map(|name| self.resolve(name.as_ref())).collect()
    }

    /// Check if a migrator is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// List all registered names (sorted).
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of registered migrators.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for MigratorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MigratorRegistry")
            .field("names", &self.names())
            .finish()
    }
}
