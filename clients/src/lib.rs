//! Shared plumbing for the ldshape binaries: configuration, logging, file
//! placement and the JSON Schema converter.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod config;
pub mod convert;
pub mod io;
pub mod logging;

use std::path::Path;

use anyhow::{bail, Context, Result};
use ldshape_codegen::mapping::is_standard_prefix;
use ldshape_context::{
    ContextResolver, IdentifierMode, NamingContext, RootRequest, VocabularyRoot,
};

pub use config::{Config, GeneratorConfig};
pub use logging::init_logging;

/// Resolves the vocabulary root of `document` and builds its resolver.
///
/// The document path is canonicalized first so that relative invocations
/// still see the family folders above the working directory.
///
/// # Errors
///
/// Returns an error if `prefix` is a standard prefix (`sh`, `xsd`, ...) or
/// if no root can be derived for the document.
pub fn build_resolver(
    document: &Path,
    base_iri: Option<&str>,
    prefix: Option<&str>,
    contexts: Vec<NamingContext>,
    mode: IdentifierMode,
) -> Result<ContextResolver> {
    if let Some(prefix) = prefix.filter(|p| is_standard_prefix(p)) {
        bail!("prefix {prefix:?} is reserved for a standard vocabulary");
    }
    let canonical = document
        .canonicalize()
        .unwrap_or_else(|_| document.to_path_buf());
    let root = VocabularyRoot::resolve(&RootRequest {
        document: &canonical,
        base_iri,
        prefix,
        contexts: &contexts,
    })
    .with_context(|| format!("No vocabulary root for {}", document.display()))?;
    Ok(ContextResolver::new(root, mode, contexts))
}
