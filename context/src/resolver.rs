//! Term-to-identifier resolution.

use std::collections::BTreeMap;
use std::fmt;

use crate::descriptor::Descriptor;
use crate::iri::{join, with_separator};
use crate::naming::{NamingContext, PrefixBase};
use crate::root::VocabularyRoot;

/// Identifier form used throughout one output document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdentifierMode {
    /// `prefix:local` identifiers.
    #[default]
    Compact,
    /// Full IRIs.
    Absolute,
}

/// What a term names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermKind {
    /// A schema: node shape, class or enumeration.
    Schema,
    /// A property path.
    Property,
}

/// A resolved identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Identifier {
    /// `prefix:local`.
    Compact {
        /// Declared prefix.
        prefix: String,
        /// Local part.
        local: String,
    },
    /// A full IRI.
    Absolute(String),
}

impl Identifier {
    /// The prefix of a compact identifier.
    #[must_use]
    pub fn prefix(&self) -> Option<&str> {
        match self {
            Identifier::Compact { prefix, .. } => Some(prefix),
            Identifier::Absolute(_) => None,
        }
    }

    /// Returns true for compact identifiers.
    #[must_use]
    pub fn is_compact(&self) -> bool {
        matches!(self, Identifier::Compact { .. })
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Compact { prefix, local } => write!(f, "{prefix}:{local}"),
            Identifier::Absolute(iri) => f.write_str(iri),
        }
    }
}

/// Resolves schema and property names against a vocabulary root and layered
/// naming contexts. Immutable once built; one per output document.
#[derive(Debug, Clone)]
pub struct ContextResolver {
    root: VocabularyRoot,
    mode: IdentifierMode,
    contexts: Vec<NamingContext>,
}

impl ContextResolver {
    /// Creates a resolver. Later contexts shadow earlier ones.
    #[must_use]
    pub fn new(root: VocabularyRoot, mode: IdentifierMode, contexts: Vec<NamingContext>) -> Self {
        Self {
            root,
            mode,
            contexts,
        }
    }

    /// The vocabulary root.
    #[must_use]
    pub fn root(&self) -> &VocabularyRoot {
        &self.root
    }

    /// The identifier mode.
    #[must_use]
    pub fn mode(&self) -> IdentifierMode {
        self.mode
    }

    /// Vocabulary identifier of a term, without any context lookup.
    #[must_use]
    pub fn own(&self, term: &str) -> Identifier {
        match self.mode {
            IdentifierMode::Compact => Identifier::Compact {
                prefix: self.root.prefix().to_owned(),
                local: term.to_owned(),
            },
            IdentifierMode::Absolute => Identifier::Absolute(self.root.term_iri(term)),
        }
    }

    /// Resolves a schema or property name.
    #[must_use]
    pub fn resolve(&self, term: &str, kind: TermKind) -> Identifier {
        let descriptor = self.descriptor(term);
        let id = match self.mode {
            IdentifierMode::Compact => self.resolve_compact(term, kind, descriptor),
            IdentifierMode::Absolute => self.resolve_absolute(term, descriptor),
        };
        tracing::debug!(term, kind = ?kind, id = %id, "resolved");
        id
    }

    /// Absolute base bound to `prefix` in the contexts, if any.
    #[must_use]
    pub fn binding(&self, prefix: &str) -> Option<String> {
        match self.prefix_base(prefix)? {
            PrefixBase::Absolute(base) => Some(base),
            PrefixBase::Relative => None,
        }
    }

    /// Bindings of the external prefixes among `ids`, sorted by prefix.
    /// The own prefix is never included.
    #[must_use]
    pub fn external_prefixes<'a>(
        &self,
        ids: impl IntoIterator<Item = &'a Identifier>,
    ) -> BTreeMap<String, String> {
        ids.into_iter()
            .filter_map(Identifier::prefix)
            .filter(|p| *p != self.root.prefix())
            .filter_map(|p| self.binding(p).map(|base| (p.to_owned(), base)))
            .collect()
    }

    fn descriptor(&self, term: &str) -> Option<&Descriptor> {
        self.contexts
            .iter()
            .rev()
            .find_map(|c| c.get(term))
            .map(Descriptor::target)
    }

    fn prefix_base(&self, prefix: &str) -> Option<PrefixBase> {
        self.contexts.iter().rev().find_map(|c| c.prefix_base(prefix))
    }

    fn is_root(&self, base: &str) -> bool {
        with_separator(base) == self.root.iri()
    }

    fn resolve_compact(
        &self,
        term: &str,
        kind: TermKind,
        descriptor: Option<&Descriptor>,
    ) -> Identifier {
        if kind == TermKind::Schema {
            return self.own(term);
        }
        match descriptor {
            None | Some(Descriptor::DeriveFromVocab | Descriptor::Structured(_)) => self.own(term),
            Some(Descriptor::Compact { prefix, local }) => {
                if prefix == self.root.prefix() {
                    return self.own(local);
                }
                match self.prefix_base(prefix) {
                    Some(PrefixBase::Absolute(base)) if self.is_root(&base) => self.own(local),
                    Some(PrefixBase::Absolute(_)) => Identifier::Compact {
                        prefix: prefix.clone(),
                        local: local.clone(),
                    },
                    Some(PrefixBase::Relative) | None => self.own(term),
                }
            }
            Some(Descriptor::Absolute(iri)) => {
                self.compact_iri(iri).unwrap_or_else(|| self.own(term))
            }
        }
    }

    fn resolve_absolute(&self, term: &str, descriptor: Option<&Descriptor>) -> Identifier {
        match descriptor {
            None | Some(Descriptor::DeriveFromVocab | Descriptor::Structured(_)) => {
                Identifier::Absolute(self.root.term_iri(term))
            }
            Some(Descriptor::Absolute(iri)) => Identifier::Absolute(iri.clone()),
            Some(Descriptor::Compact { prefix, local }) => match self.prefix_base(prefix) {
                Some(PrefixBase::Absolute(base)) => Identifier::Absolute(join(&base, local)),
                None if prefix == self.root.prefix() => {
                    Identifier::Absolute(self.root.term_iri(local))
                }
                Some(PrefixBase::Relative) | None => {
                    Identifier::Absolute(self.root.term_iri(term))
                }
            },
        }
    }

    /// Compacts an absolute IRI against the root, then against the longest
    /// matching absolute prefix binding.
    fn compact_iri(&self, iri: &str) -> Option<Identifier> {
        if let Some(local) = iri.strip_prefix(self.root.iri()).filter(|l| !l.is_empty()) {
            return Some(self.own(local));
        }
        let mut best: Option<(&str, &str)> = None;
        for context in self.contexts.iter().rev() {
            for (term, _) in context.terms() {
                let Some(PrefixBase::Absolute(base)) = self.prefix_base(term) else {
                    continue;
                };
                if !(base.ends_with('/') || base.ends_with('#')) {
                    continue;
                }
                let Some(local) = iri.strip_prefix(base.as_str()).filter(|l| !l.is_empty()) else {
                    continue;
                };
                if best.map_or(true, |(_, l)| local.len() < l.len()) {
                    best = Some((term, local));
                }
            }
        }
        best.map(|(prefix, local)| Identifier::Compact {
            prefix: prefix.to_owned(),
            local: local.to_owned(),
        })
    }
}
