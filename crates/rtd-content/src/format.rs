//! YAML reading and deterministic rendering

use serde_yaml::Value as YamlValue;

use crate::error::{Error, Result};
use crate::value::{Mapping, Value};

/// Keys that are emitted first, in this order, at every mapping level.
///
/// The top-level entries follow the layout of the Read the Docs documentation;
/// the remaining ones keep `build` and `python.install` entries readable.
/// Keys not listed here follow alphabetically.
pub const PREFERRED_KEY_ORDER: &[&str] = &[
    "version",
    "build",
    "sphinx",
    "mkdocs",
    "python",
    "conda",
    "formats",
    "submodules",
    "search",
    "os",
    "tools",
    "apt_packages",
    "jobs",
    "requirements",
    "method",
    "path",
    "extra_requirements",
];

fn key_rank(key: &str) -> usize {
    PREFERRED_KEY_ORDER
        .iter()
        .position(|known| *known == key)
        .unwrap_or(PREFERRED_KEY_ORDER.len())
}

/// Keys of a mapping in rendering order
pub fn ordered_keys(map: &Mapping) -> Vec<&str> {
    let mut keys: Vec<&str> = map.keys().map(String::as_str).collect();
    keys.sort_by(|a, b| key_rank(a).cmp(&key_rank(b)).then_with(|| a.cmp(b)));
    keys
}

/// Parse YAML text into a value tree
pub fn parse_yaml(source: &str) -> Result<Value> {
    let yaml: YamlValue =
        serde_yaml::from_str(source).map_err(|e| Error::parse("YAML", e.to_string()))?;
    from_yaml(&yaml)
}

/// Convert a `serde_yaml` value, rejecting non-string mapping keys
pub fn from_yaml(value: &YamlValue) -> Result<Value> {
    Ok(match value {
        YamlValue::Null => Value::Null,
        YamlValue::Bool(b) => Value::Bool(*b),
        YamlValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Integer(i)
            } else if let Some(f) = n.as_f64() {
                Value::Float(f)
            } else {
                Value::Null
            }
        }
        YamlValue::String(s) => Value::String(s.clone()),
        YamlValue::Sequence(items) => Value::Sequence(
            items
                .iter()
                .map(from_yaml)
                .collect::<Result<Vec<_>>>()?,
        ),
        YamlValue::Mapping(map) => {
            let mut mapping = Mapping::new();
            for (key, value) in map {
                let key = match key {
                    YamlValue::String(s) => s.clone(),
                    other => {
                        return Err(Error::UnsupportedKey {
                            key: serde_yaml::to_string(other)
                                .map(|s| s.trim_end().to_string())
                                .unwrap_or_else(|_| format!("{other:?}")),
                        });
                    }
                };
                mapping.insert(key, from_yaml(value)?);
            }
            Value::Mapping(mapping)
        }
        YamlValue::Tagged(tagged) => from_yaml(&tagged.value)?,
    })
}

/// Convert to a `serde_yaml` value with mapping keys in rendering order
pub fn to_yaml(value: &Value) -> YamlValue {
    match value {
        Value::Null => YamlValue::Null,
        Value::Bool(b) => YamlValue::Bool(*b),
        Value::Integer(i) => YamlValue::Number((*i).into()),
        Value::Float(f) => YamlValue::Number((*f).into()),
        Value::String(s) => YamlValue::String(s.clone()),
        Value::Sequence(items) => YamlValue::Sequence(items.iter().map(to_yaml).collect()),
        Value::Mapping(map) => {
            let mut mapping = serde_yaml::Mapping::new();
            for key in ordered_keys(map) {
                if let Some(child) = map.get(key) {
                    mapping.insert(YamlValue::String(key.to_string()), to_yaml(child));
                }
            }
            YamlValue::Mapping(mapping)
        }
    }
}

/// Render a value tree as YAML text
pub fn render_yaml(value: &Value) -> Result<String> {
    serde_yaml::to_string(&to_yaml(value)).map_err(|e| Error::render("YAML", e.to_string()))
}
