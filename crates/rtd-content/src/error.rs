//! Error types for rtd-content

/// Result type for rtd-content operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading or rendering configuration documents
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to parse {format} content: {message}")]
    ParseError { format: String, message: String },

    #[error("Configuration root must be a mapping, found {found}")]
    NotAMapping { found: &'static str },

    #[error("Unsupported mapping key {key}: only string keys are allowed")]
    UnsupportedKey { key: String },

    #[error("Failed to render {format} content: {message}")]
    RenderError { format: String, message: String },
}

impl Error {
    pub fn parse(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ParseError {
            format: format.into(),
            message: message.into(),
        }
    }

    pub fn render(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RenderError {
            format: format.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_a_mapping_display() {
        let err = Error::NotAMapping { found: "sequence" };
        assert_eq!(
            err.to_string(),
            "Configuration root must be a mapping, found sequence"
        );
    }

    #[test]
    fn test_parse_helper() {
        let err = Error::parse("YAML", "unexpected end of stream");
        assert!(err.to_string().contains("YAML"));
        assert!(err.to_string().contains("unexpected end of stream"));
    }
}
