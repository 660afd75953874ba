//! Vocabulary artifact validator.
//!
//! Every `schema:Enumeration` must list, in order, exactly the member
//! entries typed with it; class and enumeration `@id`s must be unique.

use std::collections::{BTreeSet, HashSet};

use serde_json::Value;

use super::ids::id_of;
use crate::report::{ConformanceReport, TestResult};

const ENUMERATION: &str = "schema:Enumeration";
const CLASS: &str = "rdfs:Class";

fn single_type(node: &Value) -> Option<&str> {
    node.get("@type").and_then(Value::as_str)
}

fn member_types(node: &Value) -> Vec<&str> {
    node.get("@type")
        .and_then(Value::as_array)
        .map(|types| types.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}

/// Validates one parsed vocabulary artifact.
#[must_use]
pub fn validate(validator: &str, document: &Value) -> ConformanceReport {
    let mut report = ConformanceReport::new();
    let Some(graph) = document.get("@graph").and_then(Value::as_array) else {
        report.push(TestResult::fail(validator, "document missing @graph array"));
        return report;
    };

    let missing = graph.iter().filter(|n| id_of(n).is_none()).count();
    if missing == 0 {
        report.push(TestResult::pass(validator, "All @graph nodes have @id"));
    } else {
        report.push(TestResult::fail(
            validator,
            format!("{missing} nodes in @graph are missing @id"),
        ));
    }

    check_members(validator, graph, &mut report);
    check_unique_ids(validator, graph, &mut report);
    report
}

fn check_members(validator: &str, graph: &[Value], report: &mut ConformanceReport) {
    let enumerations: Vec<&Value> = graph
        .iter()
        .filter(|n| single_type(n) == Some(ENUMERATION))
        .collect();
    if enumerations.is_empty() {
        report.push(TestResult::warn(validator, "Vocabulary declares no enumerations"));
        return;
    }

    let mut offenders = Vec::new();
    for enumeration in &enumerations {
        let Some(enum_id) = id_of(enumeration) else {
            continue;
        };
        let listed: Vec<&str> = enumeration
            .get("schema:hasEnumerationMember")
            .and_then(Value::as_array)
            .map(|members| members.iter().filter_map(id_of).collect())
            .unwrap_or_default();
        let typed: Vec<&str> = graph
            .iter()
            .filter(|n| member_types(n).contains(&enum_id))
            .filter_map(id_of)
            .collect();
        if listed != typed {
            offenders.push(format!(
                "{enum_id}: lists {} members, {} entries typed with it",
                listed.len(),
                typed.len()
            ));
        }
    }
    report.check(
        validator,
        format!(
            "{} enumerations list their members in order",
            enumerations.len()
        ),
        "Enumeration member lists disagree with member entries",
        offenders,
    );
}

fn check_unique_ids(validator: &str, graph: &[Value], report: &mut ConformanceReport) {
    let mut seen = HashSet::new();
    let duplicates: BTreeSet<String> = graph
        .iter()
        .filter(|n| matches!(single_type(n), Some(CLASS | ENUMERATION)))
        .filter_map(id_of)
        .filter(|id| !seen.insert(*id))
        .map(str::to_owned)
        .collect();
    report.check(
        validator,
        "Class and enumeration @ids are unique",
        "Duplicate class or enumeration @ids",
        duplicates.into_iter().collect(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn vocab(members: Value) -> Value {
        json!({
            "@context": { "ocpp": "https://schemas.ocpp.org/2.0.1/" },
            "@graph": [
                { "@id": "ocpp:Connector", "@type": "rdfs:Class", "rdfs:label": "Connector" },
                {
                    "@id": "ocpp:StatusEnumType",
                    "@type": "schema:Enumeration",
                    "schema:name": "StatusEnumType",
                    "schema:hasEnumerationMember": members
                },
                { "@id": "ocpp:Available", "@type": ["ocpp:StatusEnumType", "schema:Enumeration"] },
                { "@id": "ocpp:Faulted", "@type": ["ocpp:StatusEnumType", "schema:Enumeration"] },
                {
                    "@id": "ocpp:ResultEnumType",
                    "@type": "schema:Enumeration",
                    "schema:hasEnumerationMember": [{ "@id": "ocpp:Available" }]
                },
                { "@id": "ocpp:Available", "@type": ["ocpp:ResultEnumType", "schema:Enumeration"] }
            ]
        })
    }

    #[test]
    fn members_in_order_pass() {
        let doc = vocab(json!([{ "@id": "ocpp:Available" }, { "@id": "ocpp:Faulted" }]));
        let report = validate("vocab", &doc);
        assert!(report.all_passed(), "{:#?}", report.results);
    }

    #[test]
    fn reordered_members_fail() {
        let doc = vocab(json!([{ "@id": "ocpp:Faulted" }, { "@id": "ocpp:Available" }]));
        let report = validate("vocab", &doc);
        assert_eq!(report.failure_count(), 1);
    }

    #[test]
    fn duplicate_class_ids_fail() {
        let mut doc = vocab(json!([{ "@id": "ocpp:Available" }, { "@id": "ocpp:Faulted" }]));
        if let Some(graph) = doc["@graph"].as_array_mut() {
            graph.push(json!({ "@id": "ocpp:Connector", "@type": "rdfs:Class" }));
        }
        let report = validate("vocab", &doc);
        let failure = report.results.iter().find(|r| r.is_failure()).unwrap();
        assert_eq!(failure.details, vec!["ocpp:Connector".to_owned()]);
    }
}
