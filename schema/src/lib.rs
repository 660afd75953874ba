//! Canonical schema model for ldshape.
//!
//! Schema fragments arrive in two dialects: OpenAPI `components.schemas`
//! documents and JSON Schema message files with `definitions`. This crate
//! normalizes both into one ordered [`SchemaSet`] of [`SchemaDefinition`]s,
//! resolves duplicates across documents by completeness, and applies
//! authoritative enumeration values loaded from CSV appendices.
//!
//! # Example
//!
//! ```
//! use ldshape_schema::{merge_documents, SchemaDocument, SchemaKind};
//!
//! let yaml = "components:\n  schemas:\n    Mode:\n      type: string\n      enum: [A, B]\n";
//! let doc = SchemaDocument::from_openapi_str("spec.yaml", yaml).unwrap();
//! let (set, diagnostics) = merge_documents(vec![doc]);
//! assert!(diagnostics.is_empty());
//! assert_eq!(set.get("Mode").map(|d| d.kind), Some(SchemaKind::StringEnum));
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod diagnostics;
pub mod document;
pub mod enum_source;
pub mod error;
pub mod merge;
pub mod model;
pub mod normalize;

pub use diagnostics::{Diagnostic, Diagnostics};
pub use document::SchemaDocument;
pub use enum_source::{apply_overrides, load_overrides, EnumOverride, EnumSourceSpec};
pub use error::SchemaError;
pub use merge::{merge_documents, Completeness, MergeOutcome};
pub use model::{enum_label, Bounds, PropertyDef, SchemaDefinition, SchemaKind, SchemaSet};
