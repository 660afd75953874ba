//! Resolution properties and file-based context loading.

use std::path::Path;

use ldshape_context::{
    ContextResolver, Identifier, IdentifierMode, NamingContext, RootRequest, TermKind,
    VocabularyRoot,
};
use proptest::prelude::*;

fn term() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9_]{0,15}"
}

proptest! {
    /// A term with no context entry resolves to root + term.
    #[test]
    fn prop_default_resolution_absolute(name in term(), schema in any::<bool>()) {
        let root = VocabularyRoot::new("https://schemas.ocpp.org/2.0.1/", "ocpp").unwrap();
        let resolver = ContextResolver::new(root, IdentifierMode::Absolute, Vec::new());
        let kind = if schema { TermKind::Schema } else { TermKind::Property };
        prop_assert_eq!(
            resolver.resolve(&name, kind),
            Identifier::Absolute(format!("https://schemas.ocpp.org/2.0.1/{name}"))
        );
    }

    /// Compact form of the same: own prefix + term.
    #[test]
    fn prop_default_resolution_compact(name in term()) {
        let root = VocabularyRoot::new("https://schemas.ocpp.org/2.0.1/", "ocpp").unwrap();
        let resolver = ContextResolver::new(root, IdentifierMode::Compact, Vec::new());
        prop_assert_eq!(
            resolver.resolve(&name, TermKind::Property).to_string(),
            format!("ocpp:{name}")
        );
    }

    /// Compact documents never contain absolute identifiers, whatever the
    /// context says.
    #[test]
    fn prop_compact_mode_never_emits_absolute(name in term(), iri_local in term()) {
        let mut terms = serde_json::Map::new();
        terms.insert(name.clone(), format!("https://unbound.example/{iri_local}").into());
        let ctx = serde_json::json!({ "@context": terms });
        let context = NamingContext::from_value("ctx", &ctx).unwrap();
        let root = VocabularyRoot::new("https://a.org/", "a").unwrap();
        let resolver = ContextResolver::new(root, IdentifierMode::Compact, vec![context]);
        prop_assert!(resolver.resolve(&name, TermKind::Property).is_compact());
    }
}

#[test]
fn context_file_feeds_root_and_resolution() {
    let dir = tempfile::tempdir().unwrap();
    let family_dir = dir.path().join("EnergyResource").join("v0.2");
    std::fs::create_dir_all(&family_dir).unwrap();
    let context_path = family_dir.join("context.jsonld");
    std::fs::write(
        &context_path,
        r#"{"@context": {"beckn": "./vocab.jsonld#", "schema": "https://schema.org/",
            "name": "schema:name", "capacity": "beckn:capacity"}}"#,
    )
    .unwrap();

    let contexts = vec![NamingContext::read(&context_path).unwrap()];
    let root = VocabularyRoot::resolve(&RootRequest {
        contexts: &contexts,
        ..RootRequest::for_document(&family_dir.join("attributes.yaml"))
    })
    .unwrap();
    assert_eq!(root.iri(), "https://schemas.beckn.org/EnergyResource/v0.2/");
    assert_eq!(root.prefix(), "beckn");

    let resolver = ContextResolver::new(root, IdentifierMode::Compact, contexts);
    assert_eq!(resolver.resolve("name", TermKind::Property).to_string(), "schema:name");
    assert_eq!(resolver.resolve("capacity", TermKind::Property).to_string(), "beckn:capacity");
}

#[test]
fn unrecognised_folder_without_context_gets_generic_root() {
    let root =
        VocabularyRoot::resolve(&RootRequest::for_document(Path::new("data/fleetops/spec.yaml")))
            .unwrap();
    assert_eq!(root.iri(), "https://schemas.fleetops/");
    assert!(root.iri().ends_with('/'));
}
