//! Generator errors.

use thiserror::Error;

/// A document produced no usable output.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SynthesisError {
    /// No definition of kind object, so no node shape.
    #[error("document `{0}` yields no shapes")]
    NoShapes(String),

    /// No class and no enumeration.
    #[error("document `{0}` yields no vocabulary entries")]
    EmptyVocabulary(String),
}
