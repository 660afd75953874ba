//! Vocabulary root resolution.

use std::fmt;
use std::path::Path;

use crate::descriptor::Descriptor;
use crate::error::ContextError;
use crate::family::{self, FALLBACK_PREFIX};
use crate::iri::{is_http, join, with_separator};
use crate::naming::{NamingContext, PrefixBase};

/// Where a vocabulary root came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootSource {
    /// Explicitly supplied base IRI.
    Override,
    /// A naming context's `@vocab`.
    ContextVocab,
    /// The family prefix bound in a naming context.
    PrefixBinding,
    /// Family table and version scan over the document path.
    FamilyConvention,
    /// `https://schemas.<folder>/`.
    FolderFallback,
}

impl fmt::Display for RootSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RootSource::Override => "override",
            RootSource::ContextVocab => "context @vocab",
            RootSource::PrefixBinding => "prefix binding",
            RootSource::FamilyConvention => "family convention",
            RootSource::FolderFallback => "folder fallback",
        })
    }
}

/// Inputs to [`VocabularyRoot::resolve`].
#[derive(Debug, Clone, Copy)]
pub struct RootRequest<'a> {
    /// The schema document the root is for; its parent folders drive the
    /// conventions.
    pub document: &'a Path,
    /// Explicit base IRI.
    pub base_iri: Option<&'a str>,
    /// Explicit compact prefix.
    pub prefix: Option<&'a str>,
    /// Naming contexts, later ones shadowing earlier ones.
    pub contexts: &'a [NamingContext],
}

impl<'a> RootRequest<'a> {
    /// A request with no override and no contexts.
    #[must_use]
    pub fn for_document(document: &'a Path) -> Self {
        Self {
            document,
            base_iri: None,
            prefix: None,
            contexts: &[],
        }
    }
}

/// The absolute IRI unresolved terms fall back to, with the document's own
/// compact prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabularyRoot {
    iri: String,
    prefix: String,
    source: RootSource,
}

impl VocabularyRoot {
    /// Creates a root from an explicit IRI.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::RootExhausted`] unless `iri` is `http(s)`.
    pub fn new(iri: &str, prefix: &str) -> Result<Self, ContextError> {
        let iri = checked(iri).ok_or_else(|| ContextError::RootExhausted {
            document: prefix.to_owned(),
            reason: format!("`{iri}` is not an http(s) IRI"),
        })?;
        Ok(Self {
            iri,
            prefix: prefix.to_owned(),
            source: RootSource::Override,
        })
    }

    /// Derives the root for a document, in precedence order: explicit
    /// override, a context `@vocab`, the family prefix bound in a context,
    /// the family directory convention, then `https://schemas.<folder>/`.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::RootExhausted`] if no candidate is a usable
    /// `http(s)` IRI.
    pub fn resolve(request: &RootRequest<'_>) -> Result<Self, ContextError> {
        let dir = request.document.parent().unwrap_or_else(|| Path::new(""));
        let family = family::detect(dir);
        let prefix = request
            .prefix
            .map(str::to_owned)
            .or_else(|| family.as_ref().map(|m| m.family.prefix.to_owned()))
            .unwrap_or_else(|| FALLBACK_PREFIX.to_owned());

        let (iri, source) = Self::candidate(request, &prefix, family.as_ref(), dir)?;
        tracing::info!(
            document = %request.document.display(),
            root = %iri,
            prefix = %prefix,
            source = %source,
            "resolved vocabulary root"
        );
        Ok(Self {
            iri,
            prefix,
            source,
        })
    }

    fn candidate(
        request: &RootRequest<'_>,
        prefix: &str,
        family: Option<&family::FamilyMatch>,
        dir: &Path,
    ) -> Result<(String, RootSource), ContextError> {
        if let Some(base) = request.base_iri {
            match checked(base) {
                Some(iri) => return Ok((iri, RootSource::Override)),
                None => tracing::warn!("ignoring base IRI `{base}`: not an http(s) IRI"),
            }
        }

        for context in request.contexts.iter().rev() {
            if let Some(iri) = context.vocab().and_then(checked) {
                return Ok((iri, RootSource::ContextVocab));
            }
        }

        if let Some(iri) = bound_prefix(request.contexts, prefix).and_then(|b| checked(&b)) {
            return Ok((iri, RootSource::PrefixBinding));
        }

        if let Some(m) = family {
            if let Some(iri) = checked(&m.root_iri()) {
                return Ok((iri, RootSource::FamilyConvention));
            }
        }

        let folder = dir
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_default();
        if folder.is_empty() || folder.contains(char::is_whitespace) {
            return Err(ContextError::RootExhausted {
                document: request.document.display().to_string(),
                reason: format!("no convention applies and folder name `{folder}` is unusable"),
            });
        }
        let iri = format!("https://schemas.{folder}/");
        Ok((iri, RootSource::FolderFallback))
    }

    /// The root IRI; ends in `/` or `#`.
    #[must_use]
    pub fn iri(&self) -> &str {
        &self.iri
    }

    /// The document's own compact prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Where the root came from.
    #[must_use]
    pub fn source(&self) -> RootSource {
        self.source
    }

    /// Absolute IRI of a term under this root.
    #[must_use]
    pub fn term_iri(&self, term: &str) -> String {
        format!("{}{term}", self.iri)
    }
}

/// Absolute base of `prefix` in the contexts, following one compact
/// indirection (`"beckn": "core:beckn/"` with `core` bound absolutely).
fn bound_prefix(contexts: &[NamingContext], prefix: &str) -> Option<String> {
    let descriptor = contexts.iter().rev().find_map(|c| c.get(prefix))?;
    match descriptor.target() {
        Descriptor::Absolute(iri) => Some(iri.clone()),
        Descriptor::Compact { prefix: inner, local } => contexts
            .iter()
            .rev()
            .find_map(|c| c.prefix_base(inner))
            .and_then(|base| match base {
                PrefixBase::Absolute(base) => Some(join(&base, local)),
                PrefixBase::Relative => None,
            }),
        Descriptor::DeriveFromVocab | Descriptor::Structured(_) => None,
    }
}

fn checked(candidate: &str) -> Option<String> {
    is_http(candidate).then(|| with_separator(candidate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn context(value: serde_json::Value) -> NamingContext {
        NamingContext::from_value("ctx", &value).expect("context")
    }

    #[test]
    fn override_wins_and_gets_a_separator() {
        let contexts = [context(json!({ "@context": { "@vocab": "https://other.org/" } }))];
        let root = VocabularyRoot::resolve(&RootRequest {
            document: Path::new("schema/ocpp/2.0.1/spec.yaml"),
            base_iri: Some("https://schemas.example.org/v1"),
            prefix: None,
            contexts: &contexts,
        })
        .expect("root");
        assert_eq!(root.iri(), "https://schemas.example.org/v1/");
        assert_eq!(root.prefix(), "ocpp");
        assert_eq!(root.source(), RootSource::Override);
    }

    #[test]
    fn relative_override_is_ignored() {
        let root = VocabularyRoot::resolve(&RootRequest {
            base_iri: Some("./vocab/"),
            ..RootRequest::for_document(Path::new("schema/ocpi/2.2/spec.yaml"))
        })
        .expect("root");
        assert_eq!(root.iri(), "https://schemas.ocpi.org/2.2/");
        assert_eq!(root.source(), RootSource::FamilyConvention);
    }

    #[test]
    fn context_vocab_precedes_family() {
        let contexts = [context(json!({
            "@context": { "@vocab": "https://schemas.beckn.org/EnergyResource/v0.2#" }
        }))];
        let root = VocabularyRoot::resolve(&RootRequest {
            contexts: &contexts,
            ..RootRequest::for_document(Path::new("EnergyResource/v0.2/attributes.yaml"))
        })
        .expect("root");
        assert_eq!(root.iri(), "https://schemas.beckn.org/EnergyResource/v0.2#");
        assert_eq!(root.source(), RootSource::ContextVocab);
    }

    #[test]
    fn family_prefix_binding_through_one_indirection() {
        let contexts = [context(json!({
            "@context": {
                "core": "https://schemas.beckn.org/",
                "beckn": "core:EnergyResource/v0.3"
            }
        }))];
        let root = VocabularyRoot::resolve(&RootRequest {
            contexts: &contexts,
            ..RootRequest::for_document(Path::new("EnergyResource/v0.2/attributes.yaml"))
        })
        .expect("root");
        assert_eq!(root.iri(), "https://schemas.beckn.org/EnergyResource/v0.3/");
        assert_eq!(root.source(), RootSource::PrefixBinding);
    }

    #[test]
    fn relative_family_binding_falls_through_to_convention() {
        let contexts = [context(json!({ "@context": { "beckn": "./vocab.jsonld#" } }))];
        let root = VocabularyRoot::resolve(&RootRequest {
            contexts: &contexts,
            ..RootRequest::for_document(Path::new("EnergyResource/v0.2/attributes.yaml"))
        })
        .expect("root");
        assert_eq!(root.iri(), "https://schemas.beckn.org/EnergyResource/v0.2/");
    }

    #[test]
    fn unknown_folder_uses_generic_root() {
        let root = VocabularyRoot::resolve(&RootRequest::for_document(Path::new(
            "schemas/acme/spec.yaml",
        )))
        .expect("root");
        assert_eq!(root.iri(), "https://schemas.acme/");
        assert_eq!(root.prefix(), "vocab");
        assert_eq!(root.source(), RootSource::FolderFallback);
    }

    #[test]
    fn bare_file_name_exhausts_candidates() {
        let err = VocabularyRoot::resolve(&RootRequest::for_document(Path::new("spec.yaml")))
            .unwrap_err();
        assert!(matches!(err, ContextError::RootExhausted { .. }));
    }

    #[test]
    fn explicit_root_must_be_http() {
        assert!(VocabularyRoot::new("urn:x:", "x").is_err());
        let root = VocabularyRoot::new("https://a.org/v1", "a").expect("root");
        assert_eq!(root.term_iri("Foo"), "https://a.org/v1/Foo");
    }
}
