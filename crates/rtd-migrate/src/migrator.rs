//! Migrator trait and related types

use async_trait::async_trait;
use rtd_content::Document;
use tracing::debug;

use crate::Result;

/// Outcome of running one migrator over a document
#[derive(Debug, Clone, PartialEq)]
pub struct Migration {
    /// The resulting document; equal to the input when `applied` is false
    pub document: Document,
    /// Whether the migrator judged itself relevant to the input.
    ///
    /// `true` does not imply the document changed.
    pub applied: bool,
}

impl Migration {
    pub fn applied(document: Document) -> Self {
        Self {
            document,
            applied: true,
        }
    }

    pub fn not_applied(document: Document) -> Self {
        Self {
            document,
            applied: false,
        }
    }
}

/// Core trait for configuration migrations.
///
/// Implementations must never modify the input document and must be
/// idempotent: running a migrator on its own output either reports
/// `applied == false` or returns an equal document.
#[async_trait]
pub trait Migrator: Send + Sync {
    /// Stable registry name
    fn name(&self) -> &str;

    /// One-line human readable summary
    fn description(&self) -> &str;

    async fn migrate(&self, document: &Document) -> Result<Migration>;
}

/// Run migrators in sequence, each one on the previous output.
///
/// Returns the final document and the applied flag of every migrator, in
/// order. The first error aborts the chain.
pub async fn apply_migrators(
    document: &Document,
    migrators: &[Box<dyn Migrator>],
) -> Result<(Document, Vec<bool>)> {
    let mut current = document.deep_copy();
    let mut applied = Vec::with_capacity(migrators.len());

    for migrator in migrators {
        debug!(migrator = migrator.name(), "Applying migrator");
        let migration = migrator.migrate(&current).await?;
        debug!(
            migrator = migrator.name(),
            applied = migration.applied,
            document = ?migration.document,
            "Document after step"
        );
        applied.push(migration.applied);
        current = migration.document;
    }

    Ok((current, applied))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    struct SetFormats;

    #[async_trait]
    impl Migrator for SetFormats {
        fn name(&self) -> &str {
            "set-formats"
        }

        fn description(&self) -> &str {
            "Build every format"
        }

        async fn migrate(&self, document: &Document) -> Result<Migration> {
            if document.get(&["formats"]).and_then(|v| v.as_str()) == Some("all") {
                return Ok(Migration::not_applied(document.deep_copy()));
            }
            let mut working = document.deep_copy();
            working.insert("formats", "all");
            Ok(Migration::applied(working))
        }
    }

    struct AlwaysFails;

    #[async_trait]
    impl Migrator for AlwaysFails {
        fn name(&self) -> &str {
            "always-fails"
        }

        fn description(&self) -> &str {
            "Rejects every document"
        }

        async fn migrate(&self, _document: &Document) -> Result<Migration> {
            Err(Error::precondition(self.name(), "never applicable"))
        }
    }

    #[tokio::test]
    async fn test_apply_migrators_chains_outputs() {
        let doc = Document::parse_yaml("version: 2\n").unwrap();
        let migrators: Vec<Box<dyn Migrator>> = vec![Box::new(SetFormats), Box::new(SetFormats)];

        let (result, applied) = apply_migrators(&doc, &migrators).await.unwrap();

        assert_eq!(applied, vec![true, false]);
        assert_eq!(
            result,
            Document::parse_yaml("version: 2\nformats: all\n").unwrap()
        );
        assert_eq!(doc, Document::parse_yaml("version: 2\n").unwrap());
    }

    #[tokio::test]
    async fn test_apply_migrators_without_migrators() {
        let doc = Document::parse_yaml("version: 2\n").unwrap();
        let (result, applied) = apply_migrators(&doc, &[]).await.unwrap();

        assert_eq!(result, doc);
        assert!(applied.is_empty());
    }

    #[tokio::test]
    async fn test_apply_migrators_stops_on_error() {
        let doc = Document::parse_yaml("version: 2\n").unwrap();
        let migrators: Vec<Box<dyn Migrator>> = vec![Box::new(AlwaysFails), Box::new(SetFormats)];

        let err = apply_migrators(&doc, &migrators).await.unwrap_err();
        assert!(matches!(err, Error::Precondition { ref rule, .. } if rule == "always-fails"));
    }
}
