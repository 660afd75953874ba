//! Naming context documents.

use std::path::Path;

use serde_json::{Map, Value};

use crate::descriptor::Descriptor;
use crate::error::ContextError;

/// Base a prefix expands to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrefixBase {
    /// An absolute base IRI.
    Absolute(String),
    /// A document-relative base; terms under it belong to the local
    /// vocabulary.
    Relative,
}

/// One naming context: term descriptors plus an optional `@vocab`.
///
/// Terms keep declaration order; a later declaration of the same term
/// replaces the earlier one in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamingContext {
    name: String,
    vocab: Option<String>,
    terms: Vec<(String, Descriptor)>,
}

impl NamingContext {
    /// Builds a context from a parsed document.
    ///
    /// The term mapping is the value of `@context`, or of the document's
    /// single top-level entry. A mapping given as an array of objects is
    /// flattened in order. Ambiguous entries are dropped; other `@` keywords
    /// than `@vocab` are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::NotAMapping`] if no term mapping can be found.
    pub fn from_value(name: &str, document: &Value) -> Result<Self, ContextError> {
        let mapping = match document {
            Value::Object(root) => match root.get("@context") {
                Some(ctx) => ctx,
                None if root.len() == 1 => root.values().next().unwrap_or(document),
                None => document,
            },
            _ => return Err(ContextError::NotAMapping(name.to_owned())),
        };

        let mut context = NamingContext {
            name: name.to_owned(),
            ..NamingContext::default()
        };
        match mapping {
            Value::Object(map) => context.absorb(map),
            Value::Array(parts) => {
                for part in parts {
                    match part {
                        Value::Object(map) => context.absorb(map),
                        other => tracing::debug!(context = name, "ignoring non-inline context {other}"),
                    }
                }
            }
            _ => return Err(ContextError::NotAMapping(name.to_owned())),
        }
        tracing::debug!(
            context = name,
            terms = context.terms.len(),
            vocab = context.vocab.as_deref().unwrap_or("-"),
            "loaded naming context"
        );
        Ok(context)
    }

    /// Parses a context from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::Parse`] for invalid JSON, otherwise as
    /// [`NamingContext::from_value`].
    pub fn from_json_str(name: &str, text: &str) -> Result<Self, ContextError> {
        let document: Value = serde_json::from_str(text).map_err(|source| ContextError::Parse {
            document: name.to_owned(),
            source,
        })?;
        Self::from_value(name, &document)
    }

    /// Reads a context file.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::Io`] if the file cannot be read, otherwise as
    /// [`NamingContext::from_json_str`].
    pub fn read(path: &Path) -> Result<Self, ContextError> {
        let text = std::fs::read_to_string(path).map_err(|source| ContextError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&path.display().to_string(), &text)
    }

    fn absorb(&mut self, map: &Map<String, Value>) {
        for (term, value) in map {
            if term == "@vocab" {
                self.vocab = value.as_str().map(str::to_owned);
                continue;
            }
            if term.starts_with('@') {
                continue;
            }
            let Some(descriptor) = Descriptor::parse(value) else {
                tracing::debug!(context = %self.name, term = %term, "dropping ambiguous entry {value}");
                continue;
            };
            match self.terms.iter_mut().find(|(t, _)| t == term) {
                Some(slot) => slot.1 = descriptor,
                None => self.terms.push((term.clone(), descriptor)),
            }
        }
    }

    /// Context name (usually its file path).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared `@vocab`, if any.
    #[must_use]
    pub fn vocab(&self) -> Option<&str> {
        self.vocab.as_deref()
    }

    /// Descriptor of a term.
    #[must_use]
    pub fn get(&self, term: &str) -> Option<&Descriptor> {
        self.terms.iter().find(|(t, _)| t == term).map(|(_, d)| d)
    }

    /// Base the term expands to when used as a prefix. Only absolute and
    /// relative-marker descriptors bind a prefix.
    #[must_use]
    pub fn prefix_base(&self, prefix: &str) -> Option<PrefixBase> {
        match self.get(prefix)?.target() {
            Descriptor::Absolute(iri) => Some(PrefixBase::Absolute(iri.clone())),
            Descriptor::DeriveFromVocab => Some(PrefixBase::Relative),
            Descriptor::Compact { .. } | Descriptor::Structured(_) => None,
        }
    }

    /// Terms in declaration order.
    pub fn terms(&self) -> impl Iterator<Item = (&str, &Descriptor)> {
        self.terms.iter().map(|(t, d)| (t.as_str(), d))
    }

    /// Number of usable terms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns true if no usable term was declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_context_mapping() {
        let ctx = NamingContext::from_value(
            "context.jsonld",
            &json!({
                "@context": {
                    "@version": 1.1,
                    "@vocab": "https://schemas.beckn.org/EnergyResource/v0.2/",
                    "beckn": "./vocab.jsonld#",
                    "schema": "https://schema.org/",
                    "name": "schema:name",
                    "Item": "@id",
                    "ambiguous": "word"
                }
            }),
        )
        .expect("context");
        assert_eq!(ctx.vocab(), Some("https://schemas.beckn.org/EnergyResource/v0.2/"));
        assert_eq!(ctx.len(), 4);
        assert_eq!(ctx.prefix_base("beckn"), Some(PrefixBase::Relative));
        assert_eq!(
            ctx.prefix_base("schema"),
            Some(PrefixBase::Absolute("https://schema.org/".to_owned()))
        );
        assert_eq!(ctx.prefix_base("name"), None);
        assert!(ctx.get("ambiguous").is_none());
    }

    #[test]
    fn array_contexts_shadow_in_order() {
        let ctx = NamingContext::from_value(
            "ctx",
            &json!({
                "@context": [
                    "https://remote.example/context.jsonld",
                    { "name": "schema:name" },
                    { "name": "foaf:name" }
                ]
            }),
        )
        .expect("context");
        assert_eq!(
            ctx.get("name"),
            Some(&Descriptor::Compact {
                prefix: "foaf".to_owned(),
                local: "name".to_owned()
            })
        );
        assert_eq!(ctx.len(), 1);
    }

    #[test]
    fn non_mapping_is_rejected() {
        assert!(matches!(
            NamingContext::from_value("ctx", &json!({ "@context": 3 })),
            Err(ContextError::NotAMapping(_))
        ));
        assert!(matches!(
            NamingContext::from_json_str("ctx", "{"),
            Err(ContextError::Parse { .. })
        ));
    }
}
