//! Fragment normalization.
//!
//! Raw fragments come from OpenAPI documents and from JSON Schema files with
//! `definitions`. Both are reduced to the same field table, `$ref` pointers
//! are rewritten to the components form, and the result is parsed into the
//! typed model.

use serde_json::{Map, Value};

use crate::error::SchemaError;
use crate::model::{Bounds, PropertyDef, SchemaDefinition};

/// Pointer prefix of OpenAPI component references.
pub const COMPONENTS_POINTER: &str = "#/components/schemas/";

/// Pointer prefix of JSON Schema draft references.
pub const DEFINITIONS_POINTER: &str = "#/definitions/";

/// Key prefix of vendor extensions, passed through verbatim.
pub const EXTENSION_PREFIX: &str = "x-";

/// Keys copied from a raw fragment, in output order.
pub const FIELD_TABLE: &[&str] = &[
    "type",
    "description",
    "enum",
    "additionalProperties",
    "required",
    "properties",
    "items",
    "minItems",
    "maxItems",
    "minLength",
    "maxLength",
    "minimum",
    "maximum",
    "format",
    "default",
    "nullable",
];

/// Reduces a raw fragment to the field table plus `$ref` and vendor
/// extensions. `properties` values and object-valued `items` are reduced
/// recursively; everything else is copied verbatim.
///
/// Non-object input is returned unchanged.
#[must_use]
pub fn copy_fields(raw: &Value) -> Value {
    let Value::Object(source) = raw else {
        return raw.clone();
    };

    let mut out = Map::new();
    for key in FIELD_TABLE {
        let Some(value) = source.get(*key) else {
            continue;
        };
        let copied = match (*key, value) {
            ("properties", Value::Object(props)) => Value::Object(
                props
                    .iter()
                    .map(|(name, prop)| (name.clone(), copy_fields(prop)))
                    .collect(),
            ),
            ("items", Value::Object(_)) => copy_fields(value),
            _ => value.clone(),
        };
        out.insert((*key).to_owned(), copied);
    }

    if let Some(reference) = source.get("$ref") {
        let rewritten = match reference.as_str() {
            Some(pointer) => Value::String(canonical_pointer(pointer)),
            None => reference.clone(),
        };
        out.insert("$ref".to_owned(), rewritten);
    }

    for (key, value) in source {
        if key.starts_with(EXTENSION_PREFIX) {
            out.insert(key.clone(), value.clone());
        }
    }

    Value::Object(out)
}

/// Rewrites every `#/definitions/X` reference to `#/components/schemas/X`,
/// walking object values and array elements. Nested `definitions` blocks are
/// dropped (they are hoisted into the component set by the caller); a
/// property that happens to be named `definitions` is kept.
pub fn rewrite_refs(value: &mut Value) {
    walk_refs(value, false);
}

fn walk_refs(value: &mut Value, is_properties_map: bool) {
    match value {
        Value::Object(map) => {
            let entries = std::mem::take(map);
            for (key, mut child) in entries {
                if key == "definitions" && !is_properties_map {
                    continue;
                }
                if key == "$ref" && !is_properties_map {
                    if let Value::String(pointer) = &child {
                        child = Value::String(canonical_pointer(pointer));
                    }
                } else {
                    walk_refs(&mut child, key == "properties" && !is_properties_map);
                }
                map.insert(key, child);
            }
        }
        Value::Array(items) => {
            for item in items {
                walk_refs(item, false);
            }
        }
        _ => {}
    }
}

fn canonical_pointer(pointer: &str) -> String {
    match pointer.strip_prefix(DEFINITIONS_POINTER) {
        Some(name) => format!("{COMPONENTS_POINTER}{name}"),
        None => pointer.to_owned(),
    }
}

/// Returns the canonical reference form (the bare definition name) of a
/// `$ref` pointer.
///
/// Local pointers lose their prefix; anything else (e.g. a file-relative
/// pointer) is reduced to its last path segment.
#[must_use]
pub fn reference_name(pointer: &str) -> &str {
    if let Some(name) = pointer
        .strip_prefix(COMPONENTS_POINTER)
        .or_else(|| pointer.strip_prefix(DEFINITIONS_POINTER))
    {
        return name;
    }
    pointer
        .rsplit(['/', '#'])
        .next()
        .unwrap_or(pointer)
}

impl SchemaDefinition {
    /// Normalizes a raw fragment into a definition: field copy, reference
    /// rewrite, then typed parse.
    ///
    /// A property that does not parse is left out and its error returned
    /// next to the definition; the other properties are kept.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Malformed`] if the fragment itself is not an
    /// object, or if its own `enum` or `properties` has the wrong shape.
    pub fn from_fragment(
        name: &str,
        raw: &Value,
    ) -> Result<(Self, Vec<SchemaError>), SchemaError> {
        let mut copied = copy_fields(raw);
        rewrite_refs(&mut copied);
        let mut skipped = Vec::new();
        let schema = PropertyDef::from_value(name, &copied, &mut skipped)?;
        Ok((SchemaDefinition::new(name, schema), skipped))
    }

    /// Renders the definition back into an OpenAPI fragment, field-table order.
    #[must_use]
    pub fn to_fragment(&self) -> Value {
        self.schema.to_value()
    }
}

impl PropertyDef {
    /// Parses a (normalized) fragment. `name` is only used in error messages.
    ///
    /// `null` values are treated as absent. Nested properties that fail to
    /// parse are pushed to `skipped` instead of failing the fragment.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Malformed`] if the fragment or its
    /// `properties` is not an object, if `enum` is not a list, or if an
    /// object-valued `items` fails to parse.
    pub fn from_value(
        name: &str,
        raw: &Value,
        skipped: &mut Vec<SchemaError>,
    ) -> Result<Self, SchemaError> {
        let Value::Object(map) = raw else {
            return Err(SchemaError::malformed(
                name,
                format!("expected an object, found {}", json_kind(raw)),
            ));
        };
        let field = |key: &str| map.get(key).filter(|v| !v.is_null());
        let text = |key: &str| field(key).and_then(Value::as_str).map(str::to_owned);
        let count = |key: &str| field(key).and_then(Value::as_u64);
        let number = |key: &str| match field(key) {
            Some(Value::Number(n)) => Some(n.clone()),
            _ => None,
        };

        let mut def = PropertyDef {
            type_: text("type"),
            format: text("format"),
            reference: field("$ref")
                .and_then(Value::as_str)
                .map(|pointer| reference_name(pointer).to_owned()),
            nullable: field("nullable").and_then(Value::as_bool).unwrap_or(false),
            description: text("description"),
            default: field("default").cloned(),
            additional_properties: field("additionalProperties").cloned(),
            bounds: Bounds {
                minimum: number("minimum"),
                maximum: number("maximum"),
                min_length: count("minLength"),
                max_length: count("maxLength"),
                min_items: count("minItems"),
                max_items: count("maxItems"),
            },
            ..PropertyDef::default()
        };

        match field("enum") {
            None => {}
            Some(Value::Array(values)) => {
                def.enum_values = values.iter().filter_map(enum_member).collect();
            }
            Some(other) => {
                return Err(SchemaError::malformed(
                    name,
                    format!("`enum` must be a list, found {}", json_kind(other)),
                ));
            }
        }

        if let Some(Value::Array(required)) = field("required") {
            for entry in required.iter().filter_map(Value::as_str) {
                if !def.required.iter().any(|r| r == entry) {
                    def.required.push(entry.to_owned());
                }
            }
        }

        match field("properties") {
            None => {}
            Some(Value::Object(props)) => {
                for (prop_name, prop) in props {
                    let qualified = format!("{name}.{prop_name}");
                    match PropertyDef::from_value(&qualified, prop, skipped) {
                        Ok(parsed) => def.properties.push((prop_name.clone(), parsed)),
                        Err(err) => skipped.push(err),
                    }
                }
            }
            Some(other) => {
                return Err(SchemaError::malformed(
                    name,
                    format!("`properties` must be an object, found {}", json_kind(other)),
                ));
            }
        }

        match field("items") {
            Some(items @ Value::Object(_)) => {
                def.items = Some(Box::new(PropertyDef::from_value(
                    &format!("{name}[]"),
                    items,
                    skipped,
                )?));
            }
            Some(other) => {
                tracing::debug!(fragment = name, "ignoring non-object items ({})", json_kind(other));
            }
            None => {}
        }

        def.extensions = map
            .iter()
            .filter(|(key, _)| key.starts_with(EXTENSION_PREFIX))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Ok(def)
    }

    /// Renders the fragment as an OpenAPI schema object, field-table order,
    /// then `$ref`, then vendor extensions.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut out = Map::new();
        if let Some(t) = &self.type_ {
            out.insert("type".to_owned(), Value::from(t.as_str()));
        }
        if let Some(d) = &self.description {
            out.insert("description".to_owned(), Value::from(d.as_str()));
        }
        if !self.enum_values.is_empty() {
            out.insert("enum".to_owned(), Value::from(self.enum_values.clone()));
        }
        if let Some(ap) = &self.additional_properties {
            out.insert("additionalProperties".to_owned(), ap.clone());
        }
        if !self.required.is_empty() {
            out.insert("required".to_owned(), Value::from(self.required.clone()));
        }
        if !self.properties.is_empty() {
            let props: Map<String, Value> = self
                .properties
                .iter()
                .map(|(name, prop)| (name.clone(), prop.to_value()))
                .collect();
            out.insert("properties".to_owned(), Value::Object(props));
        }
        if let Some(items) = &self.items {
            out.insert("items".to_owned(), items.to_value());
        }
        let b = &self.bounds;
        for (key, bound) in [
            ("minItems", b.min_items),
            ("maxItems", b.max_items),
            ("minLength", b.min_length),
            ("maxLength", b.max_length),
        ] {
            if let Some(v) = bound {
                out.insert(key.to_owned(), Value::from(v));
            }
        }
        if let Some(n) = &b.minimum {
            out.insert("minimum".to_owned(), Value::Number(n.clone()));
        }
        if let Some(n) = &b.maximum {
            out.insert("maximum".to_owned(), Value::Number(n.clone()));
        }
        if let Some(f) = &self.format {
            out.insert("format".to_owned(), Value::from(f.as_str()));
        }
        if let Some(d) = &self.default {
            out.insert("default".to_owned(), d.clone());
        }
        if self.nullable {
            out.insert("nullable".to_owned(), Value::Bool(true));
        }
        if let Some(r) = &self.reference {
            out.insert("$ref".to_owned(), Value::from(format!("{COMPONENTS_POINTER}{r}")));
        }
        for (key, value) in &self.extensions {
            out.insert(key.clone(), value.clone());
        }
        Value::Object(out)
    }
}

/// Enumeration member as written; `null` members are dropped.
fn enum_member(value: &Value) -> Option<Value> {
    (!value.is_null()).then(|| value.clone())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
