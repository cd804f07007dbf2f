//! Configuration document model for the Read the Docs assistant
//!
//! Provides the in-memory tree representation of a configuration file,
//! deterministic YAML rendering, and semantic diffing between documents.

pub mod diff;
pub mod document;
pub mod error;
pub mod format;
pub mod value;

pub use diff::{SemanticChange, SemanticDiff, unified_text_diff};
pub use document::Document;
pub use error::{Error, Result};
pub use format::PREFERRED_KEY_ORDER;
pub use value::{Mapping, Value};
