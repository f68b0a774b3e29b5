//! Error types for catalog loading and configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to produce a [`crate::ModelCatalog`] from a document.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The document is not valid JSON.
    #[error("catalog document is malformed: {0}")]
    MalformedData(#[source] serde_json::Error),

    /// The document parsed but does not match the catalog schema.
    #[error("catalog schema violation: {0}")]
    SchemaViolation(#[from] SchemaViolation),

    #[error("failed to read catalog file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CatalogError {
    pub fn is_malformed(&self) -> bool {
        matches!(self, CatalogError::MalformedData(_))
    }

    /// The schema violation carried by this error, if any.
    pub fn schema_violation(&self) -> Option<&SchemaViolation> {
        match self {
            CatalogError::SchemaViolation(violation) => Some(violation),
            _ => None,
        }
    }
}

/// Structural problems found while validating a parsed document.
///
/// `index` is the zero-based position of the record in `models`, and
/// `field` is the dotted path of the offending field (`requirements.ram`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaViolation {
    #[error("top-level value must be an object")]
    NotAnObject,

    #[error("missing top-level `models` field")]
    MissingModels,

    #[error("`models` must be an array")]
    ModelsNotArray,

    #[error("entry #{index} must be an object")]
    EntryNotObject { index: usize },

    #[error("entry #{index} is missing required field `{field}`")]
    MissingField { index: usize, field: &'static str },

    #[error("entry #{index} field `{field}` must be a string")]
    InvalidFieldType { index: usize, field: &'static str },

    #[error("entry #{index} field `{field}` must not be empty")]
    EmptyField { index: usize, field: &'static str },

    #[error("duplicate model id '{id}' at entries #{first} and #{second}")]
    DuplicateId {
        id: String,
        first: usize,
        second: usize,
    },
}

/// Failure to read the optional `devagent.toml` configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("config file {} does not exist", .0.display())]
    NotFound(PathBuf),
}
