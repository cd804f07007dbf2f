//! Configuration document

use crate::diff::SemanticDiff;
use crate::error::{Error, Result};
use crate::format;
use crate::value::{Mapping, Value};

/// In-memory tree of a configuration file.
///
/// The root is always a mapping. Callers hand documents to migrations by
/// reference and receive new documents back; the `&mut self` editing methods
/// are meant for working copies obtained through [`Document::deep_copy`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    root: Mapping,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing mapping
    pub fn from_mapping(root: Mapping) -> Self {
        Self { root }
    }

    /// Parse YAML text.
    ///
    /// An empty file yields an empty document; any other non-mapping root is
    /// rejected.
    pub fn parse_yaml(source: &str) -> Result<Self> {
        Self::from_value(format::parse_yaml(source)?)
    }

    /// Build a document from a JSON value
    pub fn from_json(value: &serde_json::Value) -> Result<Self> {
        Self::from_value(Value::from_json(value))
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Mapping(root) => Ok(Self { root }),
            Value::Null => Ok(Self::new()),
            other => Err(Error::NotAMapping {
                found: other.kind(),
            }),
        }
    }

    pub fn root(&self) -> &Mapping {
        &self.root
    }

    pub fn into_root(self) -> Mapping {
        self.root
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Explicit deep copy used as the working copy of a migration
    pub fn deep_copy(&self) -> Self {
        self.clone()
    }

    /// Configuration format version, when it is an integer
    pub fn version(&self) -> Option<i64> {
        self.root.get("version").and_then(Value::as_i64)
    }

    /// Look up a value by key path, e.g. `["python", "version"]`
    pub fn get(&self, path: &[&str]) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        let mut current = self.root.get(*first)?;
        for segment in rest {
            current = current.as_mapping()?.get(*segment)?;
        }
        Some(current)
    }

    pub fn contains(&self, path: &[&str]) -> bool {
        self.get(path).is_some()
    }

    /// Mutable access to a top-level entry
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.root.get_mut(key)
    }

    /// Insert a top-level entry, returning the previous value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.root.insert(key.into(), value.into())
    }

    /// Remove a top-level entry
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.root.remove(key)
    }

    /// Remove the value at a key path.
    ///
    /// Returns `None` when any intermediate segment is missing or is not a
    /// mapping.
    pub fn remove_path(&mut self, path: &[&str]) -> Option<Value> {
        let (last, parents) = path.split_last()?;
        let mut current = &mut self.root;
        for segment in parents {
            current = current.get_mut(*segment)?.as_mapping_mut()?;
        }
        current.remove(*last)
    }

    /// Render as YAML with deterministic key order
    pub fn to_yaml(&self) -> Result<String> {
        format::render_yaml(&Value::Mapping(self.root.clone()))
    }

    /// JSON form handed to schema validation
    pub fn to_json(&self) -> serde_json::Value {
        Value::Mapping(self.root.clone()).to_json()
    }

    /// Structural difference from `self` to `other`
    pub fn diff(&self, other: &Document) -> SemanticDiff {
        SemanticDiff::compute(
            &Value::Mapping(self.root.clone()),
            &Value::Mapping(other.root.clone()),
        )
    }
}

impl From<Mapping> for Document {
    fn from(root: Mapping) -> Self {
        Self::from_mapping(root)
    }
}
