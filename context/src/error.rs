//! Error types for context loading and root resolution.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the context resolver.
#[derive(Debug, Error)]
pub enum ContextError {
    /// No vocabulary root candidate survived validation. This is a
    /// configuration defect: the document cannot be given identifiers.
    #[error("no usable vocabulary root for `{document}`: {reason}")]
    RootExhausted {
        /// Document the root was requested for.
        document: String,
        /// Why the last candidate was rejected.
        reason: String,
    },

    /// A naming context document is not valid JSON.
    #[error("failed to parse naming context `{document}`: {source}")]
    Parse {
        /// Context document name.
        document: String,
        /// Underlying parser error.
        #[source]
        source: serde_json::Error,
    },

    /// A naming context document has no term mapping.
    #[error("naming context `{0}` has no term mapping")]
    NotAMapping(String),

    /// A naming context file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
