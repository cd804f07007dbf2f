//! Semantic diff types and computation

use similar::TextDiff;

use crate::value::Value;

/// Maximum recursion depth for diff operations
const MAX_DIFF_DEPTH: usize = 128;

/// Result of comparing two documents semantically
#[derive(Debug, Clone, PartialEq)]
pub struct SemanticDiff {
    /// Are the documents semantically equivalent?
    pub is_equivalent: bool,
    /// List of semantic changes
    pub changes: Vec<SemanticChange>,
}

impl SemanticDiff {
    /// Compute a semantic diff between two values
    ///
    /// Changes carry dotted paths, e.g. `build.tools.python` or
    /// `python.install[0]`.
    pub fn compute(old: &Value, new: &Value) -> Self {
        let mut changes = Vec::new();
        diff_values(old, new, String::new(), &mut changes, 0);

        Self {
            is_equivalent: changes.is_empty(),
            changes,
        }
    }

    /// Paths touched by this diff, in discovery order
    pub fn paths(&self) -> Vec<&str> {
        self.changes.iter().map(SemanticChange::path).collect()
    }
}

/// A semantic change between documents
#[derive(Debug, Clone, PartialEq)]
pub enum SemanticChange {
    /// Key/path added
    Added { path: String, value: Value },
    /// Key/path removed
    Removed { path: String, value: Value },
    /// Value changed at path
    Modified { path: String, old: Value, new: Value },
}

impl SemanticChange {
    pub fn path(&self) -> &str {
        match self {
            Self::Added { path, .. } | Self::Removed { path, .. } | Self::Modified { path, .. } => {
                path
            }
        }
    }
}

/// Unified diff of two renderings, used for dry-run previews
pub fn unified_text_diff(old: &str, new: &str, old_name: &str, new_name: &str) -> String {
    TextDiff::from_lines(old, new)
        .unified_diff()
        .context_radius(3)
        .header(old_name, new_name)
        .to_string()
}

fn child_path(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}

fn diff_values(
    old: &Value,
    new: &Value,
    path: String,
    changes: &mut Vec<SemanticChange>,
    depth: usize,
) {
    // Depth limit: treat deeply nested differences as a single modification
    if depth > MAX_DIFF_DEPTH {
        if old != new {
            changes.push(SemanticChange::Modified {
                path,
                old: old.clone(),
                new: new.clone(),
            });
        }
        return;
    }

    match (old, new) {
        (Value::Mapping(old_map), Value::Mapping(new_map)) => {
            for (key, old_value) in old_map {
                let child = child_path(&path, key);
                match new_map.get(key) {
                    Some(new_value) => diff_values(old_value, new_value, child, changes, depth + 1),
                    None => changes.push(SemanticChange::Removed {
                        path: child,
                        value: old_value.clone(),
                    }),
                }
            }

            for (key, new_value) in new_map {
                if !old_map.contains_key(key) {
                    changes.push(SemanticChange::Added {
                        path: child_path(&path, key),
                        value: new_value.clone(),
                    });
                }
            }
        }

        (Value::Sequence(old_items), Value::Sequence(new_items)) => {
            let max_len = old_items.len().max(new_items.len());
            for i in 0..max_len {
                let child = format!("{}[{}]", path, i);
                match (old_items.get(i), new_items.get(i)) {
                    (Some(old_item), Some(new_item)) => {
                        diff_values(old_item, new_item, child, changes, depth + 1)
                    }
                    (Some(old_item), None) => changes.push(SemanticChange::Removed {
                        path: child,
                        value: old_item.clone(),
                    }),
                    (None, Some(new_item)) => changes.push(SemanticChange::Added {
                        path: child,
                        value: new_item.clone(),
                    }),
                    (None, None) => unreachable!(),
                }
            }
        }

        _ => {
            if old != new {
                changes.push(SemanticChange::Modified {
                    path,
                    old: old.clone(),
                    new: new.clone(),
                });
            }
        }
    }
}
