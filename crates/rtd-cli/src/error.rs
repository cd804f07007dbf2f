//! Error types for rtd-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from rtd-core
    #[error(transparent)]
    Core(#[from] rtd_core::Error),

    /// Error from rtd-migrate
    #[error(transparent)]
    Migrate(#[from] rtd_migrate::Error),

    /// Error from rtd-content
    #[error(transparent)]
    Content(#[from] rtd_content::Error),

    /// Error from rtd-hosting
    #[error(transparent)]
    Hosting(#[from] rtd_hosting::Error),

    /// File read or write failed
    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Logging could not be initialised
    #[error("Failed to initialise logging: {0}")]
    Logging(String),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }

    pub fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }
}
