//! Term descriptors: the right-hand side of a naming context entry.

use serde_json::Value;

use crate::iri::has_scheme;

/// How a naming context says a term should be identified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Descriptor {
    /// An absolute IRI (`https://...`, `urn:...`).
    Absolute(String),
    /// A compact identifier `prefix:local`.
    Compact {
        /// Prefix to expand.
        prefix: String,
        /// Local part.
        local: String,
    },
    /// Derive from the vocabulary root and the term name: the `"@id"` marker
    /// or a relative base such as `"./vocab.jsonld#"`.
    DeriveFromVocab,
    /// An object descriptor with an explicit `@id`.
    Structured(Box<Descriptor>),
}

impl Descriptor {
    /// Parses a context entry value. Returns `None` for ambiguous entries
    /// (bare words, empty strings, objects without a usable `@id`, numbers...),
    /// which callers drop so resolution falls through.
    #[must_use]
    pub fn parse(value: &Value) -> Option<Self> {
        match value {
            Value::String(text) => Self::parse_str(text),
            Value::Object(map) => {
                let inner = map.get("@id").and_then(Value::as_str)?;
                Self::parse_str(inner).map(|d| Descriptor::Structured(Box::new(d)))
            }
            _ => None,
        }
    }

    /// Parses a string descriptor.
    #[must_use]
    pub fn parse_str(text: &str) -> Option<Self> {
        if text == "@id" || is_relative_marker(text) {
            return Some(Descriptor::DeriveFromVocab);
        }
        if has_scheme(text) {
            return Some(Descriptor::Absolute(text.to_owned()));
        }
        let (prefix, local) = text.split_once(':')?;
        if prefix.is_empty()
            || local.is_empty()
            || prefix.starts_with('@')
            || prefix.contains(['/', '#', ' '])
        {
            return None;
        }
        Some(Descriptor::Compact {
            prefix: prefix.to_owned(),
            local: local.to_owned(),
        })
    }

    /// The descriptor with any `Structured` wrapping removed.
    #[must_use]
    pub fn target(&self) -> &Descriptor {
        match self {
            Descriptor::Structured(inner) => inner.target(),
            other => other,
        }
    }
}

/// Returns true for document-relative bases (`./vocab.jsonld#`, `../x/`).
#[must_use]
pub fn is_relative_marker(text: &str) -> bool {
    text.starts_with("./") || text.starts_with("../")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_each_descriptor_shape() {
        assert_eq!(
            Descriptor::parse(&json!("https://schema.org/name")),
            Some(Descriptor::Absolute("https://schema.org/name".to_owned()))
        );
        assert_eq!(
            Descriptor::parse(&json!("schema:name")),
            Some(Descriptor::Compact {
                prefix: "schema".to_owned(),
                local: "name".to_owned()
            })
        );
        assert_eq!(Descriptor::parse(&json!("@id")), Some(Descriptor::DeriveFromVocab));
        assert_eq!(
            Descriptor::parse(&json!("./vocab.jsonld#")),
            Some(Descriptor::DeriveFromVocab)
        );
        let structured = Descriptor::parse(&json!({ "@id": "beckn:Item", "@type": "@id" }))
            .expect("structured");
        assert!(matches!(structured, Descriptor::Structured(_)));
        assert!(matches!(structured.target(), Descriptor::Compact { prefix, .. } if prefix == "beckn"));
    }

    #[test]
    fn ambiguous_entries_are_dropped() {
        assert_eq!(Descriptor::parse(&json!("name")), None);
        assert_eq!(Descriptor::parse(&json!("")), None);
        assert_eq!(Descriptor::parse(&json!("beckn:")), None);
        assert_eq!(Descriptor::parse(&json!({ "@type": "@id" })), None);
        assert_eq!(Descriptor::parse(&json!(42)), None);
        assert_eq!(Descriptor::parse(&json!(["a"])), None);
    }
}
