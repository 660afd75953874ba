//! Error types for schema loading and normalization.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading or normalizing schema documents.
///
/// Every variant except [`SchemaError::Io`] is a *data* defect: the caller
/// reports it and continues with the sibling documents or fragments.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A fragment is not shaped like a schema (for example, a string where an
    /// object is expected).
    #[error("malformed schema fragment `{name}`: {reason}")]
    Malformed {
        /// Name of the offending definition or property.
        name: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A YAML (or JSON-as-YAML) document could not be parsed.
    #[error("failed to parse document `{document}`: {source}")]
    Yaml {
        /// Document name, usually the file name.
        document: String,
        /// Underlying parser error.
        #[source]
        source: serde_yaml::Error,
    },

    /// A JSON document could not be parsed.
    #[error("failed to parse JSON document `{document}`: {source}")]
    Json {
        /// Document name, usually the file name.
        document: String,
        /// Underlying parser error.
        #[source]
        source: serde_json::Error,
    },

    /// The document parsed but declares no component schemas.
    #[error("document `{0}` declares no schemas")]
    NoSchemas(String),

    /// A CSV source could not be read.
    #[error("CSV error in `{file}`: {source}")]
    Csv {
        /// CSV file name.
        file: String,
        /// Underlying reader error.
        #[source]
        source: csv::Error,
    },

    /// A file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl SchemaError {
    /// Shorthand for [`SchemaError::Malformed`].
    pub fn malformed(name: impl Into<String>, reason: impl Into<String>) -> Self {
        SchemaError::Malformed {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
