//! Property and filesystem tests for merging and CSV overrides.

use std::fs;

use ldshape_schema::enum_source::{default_sources, load_overrides};
use ldshape_schema::{
    apply_overrides, merge_documents, PropertyDef, SchemaDefinition, SchemaDocument, SchemaKind,
    SchemaSet,
};
use proptest::prelude::*;
use serde_json::Number;

fn document(name: &str, definition: SchemaDefinition) -> SchemaDocument {
    let mut doc = SchemaDocument {
        name: name.to_owned(),
        ..SchemaDocument::default()
    };
    doc.definitions.insert(definition);
    doc
}

/// `type`, `description`, `format`.
fn three_attributes() -> SchemaDefinition {
    SchemaDefinition::new(
        "IdTokenType",
        PropertyDef {
            type_: Some("string".to_owned()),
            description: Some("token".to_owned()),
            format: Some("uuid".to_owned()),
            ..PropertyDef::default()
        },
    )
}

/// `type`, `description`, `format`, `minLength`, `maxLength`.
fn five_attributes() -> SchemaDefinition {
    let mut def = three_attributes();
    def.schema.bounds.min_length = Some(1);
    def.schema.bounds.max_length = Some(36);
    def
}

// =============================================================================
// Merge precedence
// =============================================================================

#[test]
fn five_attributes_beat_three_in_either_order() {
    let (forward, _) = merge_documents(vec![
        document("a.json", three_attributes()),
        document("b.json", five_attributes()),
    ]);
    let (backward, _) = merge_documents(vec![
        document("a.json", five_attributes()),
        document("b.json", three_attributes()),
    ]);
    for set in [&forward, &backward] {
        let kept = set.get("IdTokenType").expect("merged");
        assert_eq!(kept.schema.bounds.max_length, Some(36));
    }
}

proptest! {
    /// The merge outcome does not depend on the order documents are supplied.
    #[test]
    fn prop_merge_is_order_independent(
        specs in prop::collection::vec((0u64..5, any::<bool>()), 1..6),
        rotate in 0usize..6,
    ) {
        let docs: Vec<SchemaDocument> = specs
            .iter()
            .enumerate()
            .map(|(i, (bound, described))| {
                let mut def = three_attributes();
                def.schema.bounds.maximum = Some(Number::from(*bound));
                if !described {
                    def.schema.description = None;
                }
                document(&format!("doc{i}.json"), def)
            })
            .collect();
        let mut rotated = docs.clone();
        rotated.rotate_left(rotate % docs.len());

        let (a, _) = merge_documents(docs);
        let (b, _) = merge_documents(rotated);
        prop_assert_eq!(a, b);
    }

    /// Applying the same overrides twice equals applying them once.
    #[test]
    fn prop_override_is_idempotent(
        values in prop::collection::vec("[A-Za-z][A-Za-z0-9]{0,8}", 1..8),
        existing in any::<bool>(),
    ) {
        let mut set = SchemaSet::new();
        if existing {
            set.insert(SchemaDefinition::string_enum("ModeEnumType", vec!["Old".to_owned()], None));
        }
        let overrides = vec![ldshape_schema::EnumOverride {
            target: "ModeEnumType".to_owned(),
            values: values.clone(),
            source_file: "mode.csv".to_owned(),
        }];
        apply_overrides(&mut set, &overrides);
        let once = set.clone();
        apply_overrides(&mut set, &overrides);
        prop_assert_eq!(&set, &once);
        prop_assert_eq!(set.get("ModeEnumType").map(SchemaDefinition::enum_labels), Some(values));
    }
}

// =============================================================================
// CSV directory loading
// =============================================================================

#[test]
fn appendix_directory_overrides_and_warns() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(
        dir.path().join("PaymentBrand.csv"),
        "PaymentBrand;Remark\nVisa;card\nMastercard;card\n",
    )
    .expect("write");
    fs::write(dir.path().join("signingmethod.csv"), "SigningMethod;Remark\n").expect("write");
    fs::write(dir.path().join("unrelated.csv"), "Value\nignored\n").expect("write");

    let (overrides, diagnostics) = load_overrides(dir.path(), &default_sources());
    assert_eq!(overrides.len(), 1);
    assert_eq!(overrides[0].target, "PaymentBrandEnumType");
    assert_eq!(overrides[0].values, vec!["Visa".to_owned(), "Mastercard".to_owned()]);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics.iter().next().map(|d| d.source.as_str()),
        Some("signingmethod.csv")
    );

    let mut set = SchemaSet::new();
    apply_overrides(&mut set, &overrides);
    assert_eq!(
        set.get("PaymentBrandEnumType").map(|d| d.kind),
        Some(SchemaKind::StringEnum)
    );
}

#[test]
fn missing_appendix_directory_is_a_diagnostic() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (overrides, diagnostics) = load_overrides(&dir.path().join("absent"), &default_sources());
    assert!(overrides.is_empty());
    assert_eq!(diagnostics.len(), 1);
}
