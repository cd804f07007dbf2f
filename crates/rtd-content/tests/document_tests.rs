//! Tests for Document

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;
use rtd_content::{Document, Mapping, SemanticChange, Value};

const FULL_CONFIG: &str = r#"# Read the Docs configuration file
version: 2

sphinx:
  configuration: docs/conf.py

formats:
  - pdf
  - epub

python:
  version: 3.8
  install:
    - requirements: docs/requirements.txt
    - method: pip
      path: .
      extra_requirements:
        - docs
"#;

#[test]
fn test_parse_realistic_config() {
    let doc = Document::parse_yaml(FULL_CONFIG).unwrap();

    assert_eq!(doc.version(), Some(2));
    assert_eq!(doc.get(&["python", "version"]), Some(&Value::Float(3.8)));
    assert_eq!(
        doc.get(&["sphinx", "configuration"]).and_then(Value::as_str),
        Some("docs/conf.py")
    );
    let install = doc
        .get(&["python", "install"])
        .and_then(Value::as_sequence)
        .unwrap();
    assert_eq!(install.len(), 2);
}

#[test]
fn test_render_uses_preferred_order() {
    let doc = Document::parse_yaml(FULL_CONFIG).unwrap();
    let rendered = doc.to_yaml().unwrap();

    let position = |needle: &str| rendered.find(needle).unwrap();
    assert!(position("version:") < position("sphinx:"));
    assert!(position("sphinx:") < position("python:"));
    assert!(position("python:") < position("formats:"));
    assert!(position("method: pip") < position("path:"));
    assert!(position("path:") < position("extra_requirements:"));
}

#[test]
fn test_render_then_parse_preserves_document() {
    let doc = Document::parse_yaml(FULL_CONFIG).unwrap();
    let reparsed = Document::parse_yaml(&doc.to_yaml().unwrap()).unwrap();
    assert_eq!(doc, reparsed);
}

#[test]
fn test_json_view_matches_yaml() {
    let doc = Document::parse_yaml("version: 2\nformats: all\n").unwrap();
    assert_eq!(
        doc.to_json(),
        serde_json::json!({"version": 2, "formats": "all"})
    );
    assert_eq!(Document::from_json(&doc.to_json()).unwrap(), doc);
}

#[test]
fn test_diff_between_documents() {
    let before = Document::parse_yaml("version: 2\npython:\n  version: '3.8'\n").unwrap();
    let after = Document::parse_yaml(
        "version: 2\nbuild:\n  os: ubuntu-20.04\n  tools:\n    python: '3.8'\n",
    )
    .unwrap();

    let diff = before.diff(&after);
    assert!(!diff.is_equivalent);
    assert!(diff.changes.iter().any(|c| matches!(c,
        SemanticChange::Added { path, .. } if path == "build"
    )));
    assert!(before.diff(&before).is_equivalent);
}

#[rstest]
#[case("- just\n- a list\n", "sequence")]
#[case("plain scalar\n", "string")]
#[case("42\n", "integer")]
fn test_non_mapping_roots_are_rejected(#[case] source: &str, #[case] found: &str) {
    let err = Document::parse_yaml(source).unwrap_err();
    assert_eq!(
        err.to_string(),
        format!("Configuration root must be a mapping, found {found}")
    );
}

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Integer),
        "[a-z0-9.]{0,8}".prop_map(Value::String),
    ]
}

fn tree() -> impl Strategy<Value = Value> {
    leaf().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Sequence),
            prop::collection::btree_map("[a-z_]{1,8}", inner, 0..4).prop_map(Value::Mapping),
        ]
    })
}

proptest! {
    #[test]
    fn prop_rendering_is_stable(entries in prop::collection::btree_map("[a-z_]{1,8}", tree(), 0..6)) {
        let doc = Document::from_mapping(entries.into_iter().collect::<Mapping>());
        let first = doc.to_yaml().unwrap();
        let second = Document::parse_yaml(&first).unwrap().to_yaml().unwrap();
        prop_assert_eq!(first, second);
    }
}
