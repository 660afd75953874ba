//! Enumeration discovery.
//!
//! Enumerations come from two places: top-level string enumeration
//! definitions, and `enum` lists written inline on an object's property.
//! Inline ones are given a synthesized type name derived from the property.

use std::collections::HashSet;

use ldshape_schema::enum_source::capitalize_segments;
use ldshape_schema::{SchemaKind, SchemaSet};

/// Where an enumeration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumOrigin {
    /// A top-level definition.
    TopLevel,
    /// An inline `enum` on a property.
    Inline {
        /// Owning schema.
        schema: String,
        /// Property carrying the list.
        property: String,
    },
}

/// Detected enumeration type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedEnum {
    /// Enumeration type name.
    pub name: String,
    /// Description; inline enumerations default to `Enumeration for <property>`.
    pub description: Option<String>,
    /// Values as text, in declaration order.
    pub values: Vec<String>,
    /// Where it came from.
    pub origin: EnumOrigin,
}

/// Type name of an inline enumeration: `connector_standard` becomes
/// `ConnectorStandardEnumType`.
#[must_use]
pub fn inline_enum_name(property: &str) -> String {
    format!("{}EnumType", capitalize_segments(property))
}

/// Detects all enumerations of a set: top-level ones in set order, then
/// inline ones in schema and property order.
///
/// An inline name that collides with any top-level schema name or with an
/// earlier inline enumeration is skipped.
#[must_use]
pub fn detect_enums(set: &SchemaSet) -> Vec<DetectedEnum> {
    let mut enums: Vec<DetectedEnum> = set
        .iter()
        .filter(|def| def.kind == SchemaKind::StringEnum)
        .map(|def| DetectedEnum {
            name: def.name.clone(),
            description: def.description().map(str::to_owned),
            values: def.enum_labels(),
            origin: EnumOrigin::TopLevel,
        })
        .collect();

    let mut seen: HashSet<String> = HashSet::new();
    for def in set.iter().filter(|d| d.kind == SchemaKind::Object) {
        for (property, fragment) in def.properties() {
            if fragment.enum_values.is_empty()
                || !matches!(fragment.type_.as_deref(), None | Some("string"))
            {
                continue;
            }
            let name = inline_enum_name(property);
            if set.contains(&name) || seen.contains(&name) {
                tracing::debug!(
                    schema = %def.name,
                    property = %property,
                    "inline enumeration {name} already defined"
                );
                continue;
            }
            seen.insert(name.clone());
            enums.push(DetectedEnum {
                description: Some(
                    fragment
                        .description
                        .clone()
                        .unwrap_or_else(|| format!("Enumeration for {property}")),
                ),
                name,
                values: fragment.enum_labels(),
                origin: EnumOrigin::Inline {
                    schema: def.name.clone(),
                    property: property.clone(),
                },
            });
        }
    }
    enums
}

/// Makes enumeration values safe as identifier local parts.
///
/// `.`, `-`, `/` and whitespace become `_`. Values that collide after the
/// mapping get `_2`, `_3`, ... in order, skipping suffixes that are already
/// taken, so running the step twice changes nothing.
#[must_use]
pub fn sanitize_members(values: &[String]) -> Vec<String> {
    let bases: Vec<String> = values
        .iter()
        .map(|v| {
            v.chars()
                .map(|c| {
                    if matches!(c, '.' | '-' | '/') || c.is_whitespace() {
                        '_'
                    } else {
                        c
                    }
                })
                .collect()
        })
        .collect();

    let reserved: HashSet<&str> = bases.iter().map(String::as_str).collect();
    let mut taken: HashSet<String> = HashSet::new();
    let mut out = Vec::with_capacity(bases.len());
    for base in &bases {
        if taken.insert(base.clone()) {
            out.push(base.clone());
            continue;
        }
        let mut n = 2;
        let candidate = loop {
            let candidate = format!("{base}_{n}");
            if !reserved.contains(candidate.as_str()) && !taken.contains(&candidate) {
                break candidate;
            }
            n += 1;
        };
        taken.insert(candidate.clone());
        out.push(candidate);
    }
    out
}
