//! Error types for rtd-migrate

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The document does not satisfy a structural assumption of the rule
    #[error("Migrator {rule} cannot be applied: {reason}")]
    Precondition { rule: String, reason: String },

    #[error("Unknown migrator: {name} (available: {})", .known.join(", "))]
    UnknownMigrator { name: String, known: Vec<String> },

    /// Two rules were registered under one name
    #[error("Migrator already registered: {name}")]
    DuplicateName { name: String },
}

impl Error {
    pub fn precondition(rule: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Precondition {
            rule: rule.into(),
            reason: reason.into(),
        }
    }
}
