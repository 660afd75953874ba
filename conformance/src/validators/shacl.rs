//! SHACL artifact validator.
//!
//! Checks a `shacl_<stem>.jsonld` document:
//! - `@context` declares `sh` and every compact prefix in use
//! - every node is a `sh:NodeShape` whose `sh:targetClass` is its own `@id`
//! - node `@id`s are unique
//! - shape identifiers are either all compact or all absolute, and none is bare
//! - every property shape has a `sh:path`

use std::collections::{BTreeSet, HashSet};

use serde_json::{Map, Value};

use super::ids::{classify, id_of, IdForm};
use crate::report::{ConformanceReport, TestResult};

/// Validates one parsed SHACL artifact. `validator` names the results.
#[must_use]
pub fn validate(validator: &str, document: &Value) -> ConformanceReport {
    let mut report = ConformanceReport::new();

    let Some(context) = document.get("@context").and_then(Value::as_object) else {
        report.push(TestResult::fail(validator, "document missing @context object"));
        return report;
    };
    let Some(graph) = document.get("@graph").and_then(Value::as_array) else {
        report.push(TestResult::fail(validator, "document missing @graph array"));
        return report;
    };
    if graph.is_empty() {
        report.push(TestResult::warn(validator, "@graph is empty"));
    }

    check_node_shapes(validator, graph, &mut report);
    check_unique_ids(validator, graph, &mut report);
    check_paths(validator, graph, &mut report);
    check_identifier_forms(validator, context, graph, &mut report);
    report
}

fn property_shapes(node: &Value) -> &[Value] {
    node.get("sh:property")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn check_node_shapes(validator: &str, graph: &[Value], report: &mut ConformanceReport) {
    let mut offenders = Vec::new();
    for (index, node) in graph.iter().enumerate() {
        let id = id_of(node);
        let label = id.map_or_else(|| format!("@graph[{index}]"), str::to_owned);
        if node.get("@type").and_then(Value::as_str) != Some("sh:NodeShape") {
            offenders.push(format!("{label}: @type is not sh:NodeShape"));
        }
        let target = node.get("sh:targetClass").and_then(id_of);
        if id.is_none() || target != id {
            offenders.push(format!("{label}: sh:targetClass differs from @id"));
        }
    }
    report.check(
        validator,
        format!("{} node shapes target their own class", graph.len()),
        "Malformed node shapes",
        offenders,
    );
}

fn check_unique_ids(validator: &str, graph: &[Value], report: &mut ConformanceReport) {
    let mut seen = HashSet::new();
    let duplicates: BTreeSet<String> = graph
        .iter()
        .filter_map(id_of)
        .filter(|id| !seen.insert(*id))
        .map(str::to_owned)
        .collect();
    report.check(
        validator,
        "Node shape @ids are unique",
        "Duplicate node shape @ids",
        duplicates.into_iter().collect(),
    );
}

fn check_paths(validator: &str, graph: &[Value], report: &mut ConformanceReport) {
    let mut offenders = Vec::new();
    for node in graph {
        let owner = id_of(node).unwrap_or("?");
        for (index, prop) in property_shapes(node).iter().enumerate() {
            if prop.get("sh:path").and_then(id_of).is_none() {
                let name = prop
                    .get("sh:name")
                    .and_then(Value::as_str)
                    .map_or_else(|| index.to_string(), str::to_owned);
                offenders.push(format!("{owner}: property {name}"));
            }
        }
    }
    report.check(
        validator,
        "Every property shape has sh:path",
        "Property shapes without sh:path",
        offenders,
    );
}

/// Identifiers minted for the schema: node ids, target classes, paths and
/// class references. Datatypes and node kinds are vocabulary terms and
/// always compact.
fn shape_identifiers(graph: &[Value]) -> Vec<&str> {
    let mut ids = Vec::new();
    for node in graph {
        ids.extend(id_of(node));
        ids.extend(node.get("sh:targetClass").and_then(id_of));
        for prop in property_shapes(node) {
            ids.extend(prop.get("sh:path").and_then(id_of));
            ids.extend(prop.get("sh:class").and_then(id_of));
        }
    }
    ids
}

fn all_referenced_ids(graph: &[Value]) -> Vec<&str> {
    let mut ids = shape_identifiers(graph);
    for node in graph {
        for prop in property_shapes(node) {
            ids.extend(prop.get("sh:datatype").and_then(id_of));
            ids.extend(prop.get("sh:nodeKind").and_then(id_of));
        }
    }
    ids
}

fn check_identifier_forms(
    validator: &str,
    context: &Map<String, Value>,
    graph: &[Value],
    report: &mut ConformanceReport,
) {
    let mut undeclared: BTreeSet<String> = BTreeSet::new();
    if !context.contains_key("sh") {
        undeclared.insert("sh".to_owned());
    }
    for id in all_referenced_ids(graph) {
        if let IdForm::Compact(prefix) = classify(id, context) {
            if !context.contains_key(&prefix) {
                undeclared.insert(prefix);
            }
        }
    }
    report.check(
        validator,
        "@context declares every prefix in use",
        "Prefixes used but not declared in @context",
        undeclared.into_iter().collect(),
    );

    let (mut compact, mut absolute, mut bare) = (0usize, 0usize, Vec::new());
    for id in shape_identifiers(graph) {
        match classify(id, context) {
            IdForm::Compact(_) => compact += 1,
            IdForm::Absolute => absolute += 1,
            IdForm::Bare => bare.push(id.to_owned()),
        }
    }
    report.check(
        validator,
        "All identifiers carry a URI scheme or prefix",
        "Identifiers without scheme or prefix",
        bare,
    );
    if compact > 0 && absolute > 0 {
        report.push(TestResult::fail(
            validator,
            format!("Identifier forms are mixed: {compact} compact, {absolute} absolute"),
        ));
    } else {
        report.push(TestResult::pass(
            validator,
            if absolute > 0 {
                "Identifiers are uniformly absolute"
            } else {
                "Identifiers are uniformly compact"
            },
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn shape(id: &str, path: &str) -> Value {
        json!({
            "@id": id,
            "@type": "sh:NodeShape",
            "sh:targetClass": { "@id": id },
            "sh:name": "X",
            "sh:property": [{
                "sh:path": { "@id": path },
                "sh:name": "p",
                "sh:datatype": { "@id": "xsd:string" }
            }]
        })
    }

    fn doc(graph: Vec<Value>) -> Value {
        json!({
            "@context": {
                "@version": 1.1,
                "sh": "http://www.w3.org/ns/shacl#",
                "xsd": "http://www.w3.org/2001/XMLSchema#",
                "ocpi": "https://schemas.ocpi.org/2.2/"
            },
            "@graph": graph
        })
    }

    #[test]
    fn generated_shape_passes() {
        let report = validate("shacl", &doc(vec![shape("ocpi:Tariff", "ocpi:currency")]));
        assert!(report.all_passed(), "{:#?}", report.results);
    }

    #[test]
    fn undeclared_prefix_and_mixed_forms_fail() {
        let report = validate(
            "shacl",
            &doc(vec![
                shape("ocpi:Tariff", "https://schema.org/name"),
                shape("beckn:Item", "beckn:x"),
            ]),
        );
        let messages: Vec<&str> = report
            .results
            .iter()
            .filter(|r| r.is_failure())
            .map(|r| r.message.as_str())
            .collect();
        assert!(messages.contains(&"Prefixes used but not declared in @context"));
        assert!(messages.iter().any(|m| m.starts_with("Identifier forms are mixed")));
    }

    #[test]
    fn target_class_mismatch_and_duplicates_fail() {
        let mut bad = shape("ocpi:Tariff", "ocpi:currency");
        bad["sh:targetClass"] = json!({ "@id": "ocpi:Other" });
        let report = validate("shacl", &doc(vec![bad, shape("ocpi:Tariff", "ocpi:currency")]));
        assert_eq!(report.failure_count(), 2);
    }

    #[test]
    fn missing_path_fails() {
        let mut node = shape("ocpi:Tariff", "ocpi:currency");
        node["sh:property"][0]
            .as_object_mut()
            .unwrap()
            .remove("sh:path");
        let report = validate("shacl", &doc(vec![node]));
        assert_eq!(report.failure_count(), 1);
        let failure = report.results.iter().find(|r| r.is_failure()).unwrap();
        assert_eq!(failure.details, vec!["ocpi:Tariff: property p".to_owned()]);
    }
}
