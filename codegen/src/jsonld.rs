//! JSON-LD 1.1 serializers for the generated artifacts.
//!
//! IRIs are written as `{"@id": ...}` node references and `sh:in` as an
//! `@list`, so the documents round-trip through any JSON-LD processor.

use std::collections::BTreeMap;

use ldshape_context::{ContextResolver, Identifier};
use ldshape_schema::SchemaSet;
use serde_json::{json, Map, Value};

use crate::mapping::{SHACL_PREFIXES, VOCAB_PREFIXES};
use crate::shacl::{NodeShape, PropertyShape, ShapeGraph};
use crate::vocab::{VocabEntry, Vocabulary};

/// Serializes a shape graph.
///
/// The `@context` declares the SHACL/RDF/XSD prefixes, the document's own
/// prefix, and every external prefix used by an identifier of the graph.
#[must_use]
pub fn shacl_document(graph: &ShapeGraph, resolver: &ContextResolver) -> Value {
    let mut ctx = Map::new();
    ctx.insert("@version".to_owned(), json!(1.1));
    for (prefix, iri) in SHACL_PREFIXES {
        ctx.insert((*prefix).to_owned(), json!(iri));
    }
    let root = resolver.root();
    ctx.insert(root.prefix().to_owned(), json!(root.iri()));
    let external: BTreeMap<String, String> = resolver.external_prefixes(graph.identifiers());
    for (prefix, base) in external {
        ctx.entry(prefix).or_insert(Value::String(base));
    }

    let shapes: Vec<Value> = graph.shapes().iter().map(node_shape_to_json).collect();
    json!({
        "@context": Value::Object(ctx),
        "@graph": shapes
    })
}

fn reference(id: &Identifier) -> Value {
    json!({ "@id": id.to_string() })
}

fn node_shape_to_json(shape: &NodeShape) -> Value {
    let mut node = json!({
        "@id": shape.id.to_string(),
        "@type": "sh:NodeShape",
        "sh:targetClass": reference(shape.target_class()),
        "sh:name": shape.name
    });
    if !shape.properties.is_empty() {
        let props: Vec<Value> = shape.properties.iter().map(property_shape_to_json).collect();
        node["sh:property"] = Value::Array(props);
    }
    node
}

fn property_shape_to_json(prop: &PropertyShape) -> Value {
    let mut node = Map::new();
    node.insert("sh:path".to_owned(), reference(&prop.path));
    node.insert("sh:name".to_owned(), json!(prop.name));
    if let Some(n) = prop.min_count {
        node.insert("sh:minCount".to_owned(), json!(n));
    }
    if let Some(n) = prop.max_count {
        node.insert("sh:maxCount".to_owned(), json!(n));
    }
    if let Some(datatype) = prop.datatype {
        node.insert("sh:datatype".to_owned(), json!({ "@id": datatype }));
    }
    if let Some(class) = &prop.class {
        node.insert("sh:class".to_owned(), reference(class));
    }
    if let Some(kind) = prop.node_kind {
        node.insert("sh:nodeKind".to_owned(), json!({ "@id": kind.as_str() }));
    }
    if !prop.in_values.is_empty() {
        node.insert("sh:in".to_owned(), json!({ "@list": prop.in_values }));
    }
    if let Some(n) = &prop.min_inclusive {
        node.insert("sh:minInclusive".to_owned(), Value::Number(n.clone()));
    }
    if let Some(n) = &prop.max_inclusive {
        node.insert("sh:maxInclusive".to_owned(), Value::Number(n.clone()));
    }
    Value::Object(node)
}

/// Serializes a vocabulary.
#[must_use]
pub fn vocab_document(vocabulary: &Vocabulary, resolver: &ContextResolver) -> Value {
    let mut ctx = Map::new();
    ctx.insert("@version".to_owned(), json!(1.1));
    let root = resolver.root();
    ctx.insert(root.prefix().to_owned(), json!(root.iri()));
    for (prefix, iri) in VOCAB_PREFIXES {
        ctx.entry(*prefix).or_insert_with(|| json!(iri));
    }

    let graph: Vec<Value> = vocabulary.entries.iter().map(vocab_entry_to_json).collect();
    json!({
        "@context": Value::Object(ctx),
        "@graph": graph
    })
}

fn vocab_entry_to_json(entry: &VocabEntry) -> Value {
    match entry {
        VocabEntry::Class { id, label, comment } => {
            let mut node = json!({
                "@id": id.to_string(),
                "@type": "rdfs:Class",
                "rdfs:label": label
            });
            if let Some(comment) = comment {
                node["rdfs:comment"] = json!(comment);
            }
            node
        }
        VocabEntry::Enumeration {
            id,
            name,
            comment,
            members,
        } => {
            let mut node = json!({
                "@id": id.to_string(),
                "@type": "schema:Enumeration",
                "schema:name": name
            });
            if let Some(comment) = comment {
                node["rdfs:comment"] = json!(comment);
            }
            if !members.is_empty() {
                let members: Vec<Value> = members.iter().map(reference).collect();
                node["schema:hasEnumerationMember"] = Value::Array(members);
            }
            node
        }
        VocabEntry::Member {
            id,
            enumeration,
            value,
        } => json!({
            "@id": id.to_string(),
            "@type": [enumeration.to_string(), "schema:Enumeration"],
            "schema:name": value,
            "schema:identifier": value
        }),
    }
}

/// Builds a naming context that maps every schema name to `@id` under
/// `@vocab`. Names are sorted.
#[must_use]
pub fn context_document(set: &SchemaSet, vocab_root: &str) -> Value {
    let mut ctx = Map::new();
    ctx.insert("@version".to_owned(), json!(1.1));
    ctx.insert("@vocab".to_owned(), json!(vocab_root));
    let mut names = set.names();
    names.sort_unstable();
    for name in names {
        ctx.insert(name.to_owned(), json!("@id"));
    }
    json!({ "@context": Value::Object(ctx) })
}

/// Renders a document: minified, or pretty-printed with a 2-space indent and
/// a trailing newline.
#[must_use]
pub fn render(document: &Value, pretty: bool) -> String {
    if pretty {
        format!("{document:#}\n")
    } else {
        document.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ldshape_context::{IdentifierMode, NamingContext, TermKind, VocabularyRoot};
    use ldshape_schema::{PropertyDef, SchemaDefinition};

    use crate::shacl::synthesize;

    #[test]
    fn shacl_context_declares_external_prefixes() {
        let root = VocabularyRoot::new("https://schemas.beckn.org/EnergyResource/v0.2/", "beckn")
            .expect("root");
        let ctx = NamingContext::from_value(
            "ctx",
            &json!({ "@context": {
                "schema": "https://schema.org/",
                "name": "schema:name"
            }}),
        )
        .expect("ctx");
        let resolver = ContextResolver::new(root, IdentifierMode::Compact, vec![ctx]);
        assert_eq!(resolver.resolve("name", TermKind::Property).to_string(), "schema:name");

        let set: SchemaSet = vec![SchemaDefinition::new(
            "Item",
            PropertyDef {
                type_: Some("object".to_owned()),
                properties: vec![(
                    "name".to_owned(),
                    PropertyDef {
                        type_: Some("string".to_owned()),
                        enum_values: vec![json!("a")],
                        ..PropertyDef::default()
                    },
                )],
                ..PropertyDef::default()
            },
        )]
        .into_iter()
        .collect();
        let graph = synthesize("doc", &set, &resolver).expect("shapes").graph;
        let doc = shacl_document(&graph, &resolver);

        let keys: Vec<&str> = doc["@context"]
            .as_object()
            .map(|m| m.keys().map(String::as_str).collect())
            .unwrap_or_default();
        assert_eq!(keys, vec!["@version", "sh", "rdf", "rdfs", "xsd", "beckn", "schema"]);
        let prop = &doc["@graph"][0]["sh:property"][0];
        assert_eq!(prop["sh:path"], json!({ "@id": "schema:name" }));
        assert_eq!(prop["sh:in"], json!({ "@list": ["a"] }));
        assert_eq!(doc["@graph"][0]["sh:targetClass"], json!({ "@id": "beckn:Item" }));
    }

    #[test]
    fn context_document_sorts_names() {
        let set: SchemaSet = vec![
            SchemaDefinition::new("Zeta", PropertyDef::default()),
            SchemaDefinition::new("Alpha", PropertyDef::default()),
        ]
        .into_iter()
        .collect();
        let doc = context_document(&set, "https://schemas.acme/");
        assert_eq!(
            render(&doc, false),
            r#"{"@context":{"@version":1.1,"@vocab":"https://schemas.acme/","Alpha":"@id","Zeta":"@id"}}"#
        );
    }

    #[test]
    fn pretty_output_ends_with_newline() {
        let text = render(&json!({ "a": 1 }), true);
        assert_eq!(text, "{\n  \"a\": 1\n}\n");
    }
}
