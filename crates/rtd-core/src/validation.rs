//! Schema validation of configuration documents

use jsonschema::JSONSchema;
use rtd_content::Document;
use tracing::{debug, warn};

use crate::{Error, Result};

/// Checks a configuration against the Read the Docs schema
pub trait SchemaValidator: Send + Sync {
    /// Validate the JSON view of a configuration
    fn validate(&self, instance: &serde_json::Value) -> Result<()>;
}

/// Validator that accepts every document
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl SchemaValidator for AcceptAll {
    fn validate(&self, _instance: &serde_json::Value) -> Result<()> {
        Ok(())
    }
}

/// Validator backed by a compiled JSON Schema
pub struct JsonSchemaValidator {
    schema: JSONSchema,
}

impl std::fmt::Debug for JsonSchemaValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonSchemaValidator").finish_non_exhaustive()
    }
}

impl JsonSchemaValidator {
    /// Compile `schema`
    pub fn new(schema: &serde_json::Value) -> Result<Self> {
        let schema =
            JSONSchema::compile(schema).map_err(|e| Error::InvalidSchema(e.to_string()))?;
        Ok(Self { schema })
    }

    /// Download and compile the schema published at `url`
    pub async fn fetch(url: &str) -> Result<Self> {
        debug!(%url, "Fetching schema");
        let fetch_error = |source: reqwest::Error| Error::SchemaFetch {
            url: url.to_string(),
            source,
        };
        let schema: serde_json::Value = reqwest::get(url)
            .await
            .and_then(|response| response.error_for_status())
            .map_err(fetch_error)?
            .json()
            .await
            .map_err(fetch_error)?;
        Self::new(&schema)
    }
}

impl SchemaValidator for JsonSchemaValidator {
    fn validate(&self, instance: &serde_json::Value) -> Result<()> {
        self.schema.validate(instance).map_err(|errors| Error::Schema {
            errors: errors
                .map(|error| {
                    let path = error.instance_path.to_string();
                    let path = if path.is_empty() { "/".to_string() } else { path };
                    format!("{path}: {error}")
                })
                .collect(),
        })
    }
}

/// A parsed configuration and the result of validating it
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedConfig {
    pub document: Document,
    /// Schema violations, empty for a valid document
    pub errors: Vec<String>,
}

impl ValidatedConfig {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Parse a YAML configuration and validate it.
///
/// With `strict` an invalid document is an error. Otherwise the violations
/// are logged and returned alongside the document.
pub fn load_and_validate(
    source: &str,
    validator: &dyn SchemaValidator,
    strict: bool,
) -> Result<ValidatedConfig> {
    let document = Document::parse_yaml(source)?;

    let errors = match validator.validate(&document.to_json()) {
        Ok(()) => Vec::new(),
        Err(Error::Schema { errors }) if !strict => {
            for error in &errors {
                warn!(%error, "Configuration does not match the schema");
            }
            errors
        }
        Err(e) => return Err(e),
    };

    Ok(ValidatedConfig { document, errors })
}
