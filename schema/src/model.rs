//! Core schema model types.
//!
//! Every component schema, whatever tool produced it, is normalized into a
//! [`SchemaDefinition`]. Properties and definitions are kept as ordered `Vec`s
//! so that anything generated from the model follows declaration order.

use serde_json::{Number, Value};

/// Structural classification of a schema definition.
///
/// - `Object`: has (or may have) properties; becomes a class / node shape
/// - `StringEnum`: a closed list of values; referenced, never shaped directly
/// - `Array`: a list alias such as `type: array` with `items`
/// - `Primitive`: a scalar alias such as `type: string, maxLength: 36`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaKind {
    /// A structured type with named properties.
    Object,
    /// An enumeration of string values.
    StringEnum,
    /// An array type.
    Array,
    /// A scalar type.
    Primitive,
}

impl SchemaKind {
    /// Classifies a fragment from its declared `type` and whether it carries
    /// enumeration values.
    ///
    /// A non-empty enumeration always wins so that `enumValues` non-empty and
    /// `kind == StringEnum` stay equivalent. An untyped fragment is an object.
    #[must_use]
    pub fn classify(type_: Option<&str>, has_enum: bool) -> Self {
        if has_enum {
            return SchemaKind::StringEnum;
        }
        match type_ {
            None | Some("object") => SchemaKind::Object,
            Some("array") => SchemaKind::Array,
            Some(_) => SchemaKind::Primitive,
        }
    }

    /// Returns a short lowercase label, used in log output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SchemaKind::Object => "object",
            SchemaKind::StringEnum => "stringEnum",
            SchemaKind::Array => "array",
            SchemaKind::Primitive => "primitive",
        }
    }
}

/// Numeric, length and size bounds of a fragment.
///
/// `minimum`/`maximum` keep the JSON number as written so an integer bound
/// is re-emitted as an integer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bounds {
    /// Inclusive lower bound (`minimum`).
    pub minimum: Option<Number>,
    /// Inclusive upper bound (`maximum`).
    pub maximum: Option<Number>,
    /// Minimum string length (`minLength`).
    pub min_length: Option<u64>,
    /// Maximum string length (`maxLength`).
    pub max_length: Option<u64>,
    /// Minimum array size (`minItems`).
    pub min_items: Option<u64>,
    /// Maximum array size (`maxItems`).
    pub max_items: Option<u64>,
}

impl Bounds {
    /// Number of bounds that are set.
    #[must_use]
    pub fn populated(&self) -> usize {
        [
            self.minimum.is_some(),
            self.maximum.is_some(),
            self.min_length.is_some(),
            self.max_length.is_some(),
            self.min_items.is_some(),
            self.max_items.is_some(),
        ]
        .iter()
        .filter(|set| **set)
        .count()
    }
}

/// One schema fragment: a property of an object schema, an array's `items`,
/// or the body of a top-level [`SchemaDefinition`].
///
/// OpenAPI uses a single fragment shape for all three positions, so the model
/// does too.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyDef {
    /// Declared `type` keyword (`string`, `integer`, `object`, `array`, ...).
    pub type_: Option<String>,
    /// `format` refinement (`date-time`, `int32`, ...).
    pub format: Option<String>,
    /// Canonical reference: the bare name of the referenced definition.
    pub reference: Option<String>,
    /// Item fragment of an array.
    pub items: Option<Box<PropertyDef>>,
    /// Inline enumeration, in declaration order. Members keep their JSON
    /// type so an integer enumeration stays numeric.
    pub enum_values: Vec<Value>,
    /// Whether `null` is an accepted value.
    pub nullable: bool,
    /// Human-readable description.
    pub description: Option<String>,
    /// `default` value, verbatim.
    pub default: Option<Value>,
    /// `additionalProperties`, verbatim (boolean or schema).
    pub additional_properties: Option<Value>,
    /// Names of required properties, first occurrence order, no duplicates.
    pub required: Vec<String>,
    /// Nested properties, in declaration order.
    pub properties: Vec<(String, PropertyDef)>,
    /// Numeric, length and size bounds.
    pub bounds: Bounds,
    /// Vendor extensions (`x-*` keys), verbatim and in declaration order.
    pub extensions: Vec<(String, Value)>,
}

impl PropertyDef {
    /// Returns true if `type` is `array`, or if the fragment has `items`
    /// without declaring any type.
    #[must_use]
    pub fn is_array(&self) -> bool {
        match self.type_.as_deref() {
            Some(t) => t == "array",
            None => self.items.is_some(),
        }
    }

    /// Enumeration members as text, see [`enum_label`].
    #[must_use]
    pub fn enum_labels(&self) -> Vec<String> {
        self.enum_values.iter().map(enum_label).collect()
    }

    /// Looks up a nested property by name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&PropertyDef> {
        self.properties
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, p)| p)
    }

    /// Number of populated attributes, the "completeness" measure used when
    /// two documents define the same name.
    #[must_use]
    pub fn populated_attributes(&self) -> usize {
        let flags = [
            self.type_.is_some(),
            self.format.is_some(),
            self.reference.is_some(),
            self.items.is_some(),
            !self.enum_values.is_empty(),
            self.nullable,
            self.description.is_some(),
            self.default.is_some(),
            self.additional_properties.is_some(),
            !self.required.is_empty(),
            !self.properties.is_empty(),
        ];
        flags.iter().filter(|set| **set).count() + self.bounds.populated() + self.extensions.len()
    }
}

/// Text of an enumeration member: a string as is, any other value as its
/// JSON text (`3`, `true`).
#[must_use]
pub fn enum_label(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// A named schema: one entry of `components.schemas` (or `definitions`).
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDefinition {
    /// Unique key within a document.
    pub name: String,
    /// Structural classification.
    pub kind: SchemaKind,
    /// The fragment body.
    pub schema: PropertyDef,
}

impl SchemaDefinition {
    /// Creates a definition, deriving its kind from the fragment body.
    #[must_use]
    pub fn new(name: impl Into<String>, schema: PropertyDef) -> Self {
        let kind = SchemaKind::classify(schema.type_.as_deref(), !schema.enum_values.is_empty());
        Self {
            name: name.into(),
            kind,
            schema,
        }
    }

    /// Creates a string enumeration definition.
    #[must_use]
    pub fn string_enum(
        name: impl Into<String>,
        values: Vec<String>,
        description: Option<String>,
    ) -> Self {
        Self::new(
            name,
            PropertyDef {
                type_: Some("string".to_owned()),
                enum_values: values.into_iter().map(Value::String).collect(),
                description,
                additional_properties: Some(Value::Bool(false)),
                ..PropertyDef::default()
            },
        )
    }

    /// Properties in declaration order.
    #[must_use]
    pub fn properties(&self) -> &[(String, PropertyDef)] {
        &self.schema.properties
    }

    /// Enumeration values in declaration order (empty unless `StringEnum`).
    #[must_use]
    pub fn enum_values(&self) -> &[Value] {
        &self.schema.enum_values
    }

    /// Enumeration values as text, in declaration order.
    #[must_use]
    pub fn enum_labels(&self) -> Vec<String> {
        self.schema.enum_labels()
    }

    /// Description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.schema.description.as_deref()
    }

    /// Returns true if `property` is listed in `required`.
    #[must_use]
    pub fn is_required(&self, property: &str) -> bool {
        self.schema.required.iter().any(|r| r == property)
    }

    /// Replaces the enumeration values with string members, keeping `kind`
    /// consistent with them.
    pub fn set_enum_values(&mut self, values: Vec<String>) {
        self.schema.enum_values = values.into_iter().map(Value::String).collect();
        self.kind = SchemaKind::classify(
            self.schema.type_.as_deref(),
            !self.schema.enum_values.is_empty(),
        );
    }
}

/// The canonical, de-duplicated set of definitions for one output document.
///
/// Insertion order is preserved; replacing a definition keeps its position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaSet {
    definitions: Vec<SchemaDefinition>,
}

impl SchemaSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Returns true if the set holds no definitions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Iterates definitions in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, SchemaDefinition> {
        self.definitions.iter()
    }

    /// Looks up a definition by name. Returns `None` if not found.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SchemaDefinition> {
        self.definitions.iter().find(|d| d.name == name)
    }

    /// Mutable lookup by name.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut SchemaDefinition> {
        self.definitions.iter_mut().find(|d| d.name == name)
    }

    /// Returns true if a definition with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Inserts a definition, replacing (in place) any existing one with the
    /// same name. Returns the replaced definition.
    pub fn insert(&mut self, definition: SchemaDefinition) -> Option<SchemaDefinition> {
        match self.get_mut(&definition.name) {
            Some(slot) => Some(std::mem::replace(slot, definition)),
            None => {
                self.definitions.push(definition);
                None
            }
        }
    }

    /// All definition names in insertion order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.definitions.iter().map(|d| d.name.as_str()).collect()
    }

    /// Number of definitions of the given kind.
    #[must_use]
    pub fn count_of(&self, kind: SchemaKind) -> usize {
        self.definitions.iter().filter(|d| d.kind == kind).count()
    }
}

impl<'a> IntoIterator for &'a SchemaSet {
    type Item = &'a SchemaDefinition;
    type IntoIter = std::slice::Iter<'a, SchemaDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.definitions.iter()
    }
}

impl FromIterator<SchemaDefinition> for SchemaSet {
    fn from_iter<I: IntoIterator<Item = SchemaDefinition>>(iter: I) -> Self {
        let mut set = SchemaSet::new();
        for definition in iter {
            set.insert(definition);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_enum_wins_over_type() {
        assert_eq!(
            SchemaKind::classify(Some("string"), true),
            SchemaKind::StringEnum
        );
        assert_eq!(SchemaKind::classify(Some("string"), false), SchemaKind::Primitive);
        assert_eq!(SchemaKind::classify(None, false), SchemaKind::Object);
        assert_eq!(SchemaKind::classify(Some("array"), false), SchemaKind::Array);
    }

    #[test]
    fn set_enum_values_keeps_kind_consistent() {
        let mut def = SchemaDefinition::new(
            "Mode",
            PropertyDef {
                type_: Some("string".to_owned()),
                ..PropertyDef::default()
            },
        );
        assert_eq!(def.kind, SchemaKind::Primitive);
        def.set_enum_values(vec!["A".to_owned()]);
        assert_eq!(def.kind, SchemaKind::StringEnum);
        assert_eq!(def.enum_values(), &[Value::from("A")][..]);
        def.set_enum_values(Vec::new());
        assert_eq!(def.kind, SchemaKind::Primitive);
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut set = SchemaSet::new();
        set.insert(SchemaDefinition::new("A", PropertyDef::default()));
        set.insert(SchemaDefinition::new("B", PropertyDef::default()));
        let old = set.insert(SchemaDefinition::string_enum("A", vec!["x".to_owned()], None));
        assert!(old.is_some());
        assert_eq!(set.names(), vec!["A", "B"]);
        assert_eq!(set.get("A").map(|d| d.kind), Some(SchemaKind::StringEnum));
    }

    #[test]
    fn populated_attributes_counts_bounds_and_extensions() {
        let def = PropertyDef {
            type_: Some("integer".to_owned()),
            description: Some("d".to_owned()),
            bounds: Bounds {
                minimum: Some(Number::from(0)),
                maximum: Some(Number::from(10)),
                ..Bounds::default()
            },
            extensions: vec![("x-javaType".to_owned(), Value::from("Foo"))],
            ..PropertyDef::default()
        };
        assert_eq!(def.populated_attributes(), 5);
    }

    #[test]
    fn labels_render_non_string_members_as_json_text() {
        let def = PropertyDef {
            enum_values: vec![Value::from("DC"), Value::from(3), Value::Bool(true)],
            ..PropertyDef::default()
        };
        assert_eq!(def.enum_labels(), vec!["DC", "3", "true"]);
    }

    #[test]
    fn untyped_fragment_with_items_is_array() {
        let def = PropertyDef {
            items: Some(Box::default()),
            ..PropertyDef::default()
        };
        assert!(def.is_array());
    }
}
