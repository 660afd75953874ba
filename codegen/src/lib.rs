//! ldshape generators.
//!
//! Turns a frozen [`SchemaSet`] into linked-data artifacts, asking a
//! [`ContextResolver`] for every identifier it writes:
//!
//! - [`shacl`]: one `sh:NodeShape` per object schema, one property shape per
//!   property (cardinality, datatype, class reference, enumeration, bounds)
//! - [`vocab`]: `rdfs:Class` and `schema:Enumeration` entries, including
//!   enumerations written inline on properties
//! - [`jsonld`]: JSON-LD 1.1 rendering of both, and the generated naming
//!   context
//!
//! Output is a pure function of the schema set, the resolved root and the
//! naming contexts: generating twice yields byte-identical text.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod enums;
pub mod error;
pub mod jsonld;
pub mod mapping;
pub mod shacl;
pub mod vocab;

use ldshape_context::ContextResolver;
use ldshape_schema::{Diagnostics, SchemaSet};

pub use error::SynthesisError;
pub use shacl::{synthesize, NodeShape, PropertyShape, ShapeGraph, Synthesis};
pub use vocab::{build_vocabulary, VocabEntry, VocabOptions, Vocabulary};

/// Report of what was generated.
#[derive(Debug, Default)]
pub struct GenerationReport {
    /// Number of node shapes generated.
    pub shape_count: usize,
    /// Number of property shapes generated.
    pub property_count: usize,
    /// Number of class entries generated.
    pub class_count: usize,
    /// Number of enumeration types generated.
    pub enum_type_count: usize,
    /// Number of enumeration members generated.
    pub enum_value_count: usize,
    /// Non-fatal incidents.
    pub diagnostics: Diagnostics,
}

/// A rendered artifact.
#[derive(Debug)]
pub struct Artifact {
    /// Rendered JSON-LD text.
    pub text: String,
    /// What went into it.
    pub report: GenerationReport,
}

/// Synthesizes and renders the SHACL artifact of one document.
///
/// # Errors
///
/// Returns [`SynthesisError::NoShapes`] if the set has no object definition.
pub fn generate_shacl(
    document: &str,
    set: &SchemaSet,
    resolver: &ContextResolver,
    pretty: bool,
) -> Result<Artifact, SynthesisError> {
    let synthesis = synthesize(document, set, resolver)?;
    let text = jsonld::render(&jsonld::shacl_document(&synthesis.graph, resolver), pretty);
    Ok(Artifact {
        text,
        report: GenerationReport {
            shape_count: synthesis.graph.len(),
            property_count: synthesis.graph.property_count(),
            diagnostics: synthesis.diagnostics,
            ..GenerationReport::default()
        },
    })
}

/// Builds and renders the vocabulary artifact of one document.
///
/// # Errors
///
/// Returns [`SynthesisError::EmptyVocabulary`] if the set has neither
/// classes nor enumerations.
pub fn generate_vocab(
    document: &str,
    set: &SchemaSet,
    resolver: &ContextResolver,
    options: VocabOptions,
    pretty: bool,
) -> Result<Artifact, SynthesisError> {
    let vocabulary = build_vocabulary(document, set, resolver, options)?;
    let text = jsonld::render(&jsonld::vocab_document(&vocabulary, resolver), pretty);
    Ok(Artifact {
        text,
        report: GenerationReport {
            class_count: vocabulary.class_count(),
            enum_type_count: vocabulary.enum_type_count(),
            enum_value_count: vocabulary.enum_value_count(),
            ..GenerationReport::default()
        },
    })
}

/// Renders the naming context of a set: minified, trailing newline.
#[must_use]
pub fn generate_context(set: &SchemaSet, vocab_root: &str) -> String {
    let mut text = jsonld::render(&jsonld::context_document(set, vocab_root), false);
    text.push('\n');
    text
}
