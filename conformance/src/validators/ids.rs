//! Identifier classification shared by the artifact validators.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Value};

/// How an `@id` string is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdForm {
    /// Absolute IRI with a URI scheme.
    Absolute,
    /// `prefix:local`.
    Compact(String),
    /// Neither: no scheme and no prefix.
    Bare,
}

fn scheme() -> Option<&'static Regex> {
    static SCHEME: OnceLock<Option<Regex>> = OnceLock::new();
    SCHEME
        .get_or_init(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:").ok())
        .as_ref()
}

/// Classifies an identifier. `scheme://…` and `urn:…` are absolute; any
/// other `p:l` whose prefix is declared in `context` is compact, as is an
/// undeclared `p:l` that does not look like a hierarchical IRI.
#[must_use]
pub fn classify(id: &str, context: &Map<String, Value>) -> IdForm {
    if id.starts_with("urn:") {
        return IdForm::Absolute;
    }
    if let Some(found) = scheme().and_then(|re| re.find(id)) {
        let prefix = &found.as_str()[..found.end() - 1];
        if id[found.end()..].starts_with("//") && !context.contains_key(prefix) {
            return IdForm::Absolute;
        }
        return IdForm::Compact(prefix.to_owned());
    }
    IdForm::Bare
}

/// The `@id` of a node reference, or of a node itself.
#[must_use]
pub fn id_of(value: &Value) -> Option<&str> {
    value.get("@id").and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ctx() -> Map<String, Value> {
        json!({ "ocpi": "https://schemas.ocpi.org/2.2/" })
            .as_object()
            .cloned()
            .unwrap_or_default()
    }

    #[test]
    fn scheme_pattern_compiles() {
        assert!(scheme().is_some());
    }

    #[test]
    fn forms() {
        assert_eq!(classify("https://schemas.ocpi.org/2.2/Tariff", &ctx()), IdForm::Absolute);
        assert_eq!(classify("urn:example:x", &ctx()), IdForm::Absolute);
        assert_eq!(classify("ocpi:Tariff", &ctx()), IdForm::Compact("ocpi".to_owned()));
        assert_eq!(classify("beckn:Item", &ctx()), IdForm::Compact("beckn".to_owned()));
        assert_eq!(classify("Tariff", &ctx()), IdForm::Bare);
        assert_eq!(classify("/relative/path", &ctx()), IdForm::Bare);
    }
}
