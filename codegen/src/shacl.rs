//! SHACL shape synthesis.
//!
//! Every object definition becomes one [`NodeShape`] targeting its own
//! class; each of its properties becomes a [`PropertyShape`]. Other kinds
//! are only ever referenced.

use std::collections::HashSet;

use ldshape_context::{ContextResolver, Identifier, TermKind};
use ldshape_schema::{Diagnostics, PropertyDef, SchemaDefinition, SchemaKind, SchemaSet};
use serde_json::{Number, Value};

use crate::error::SynthesisError;
use crate::mapping::{scalar_datatype, SH_IRI_OR_LITERAL};

/// `sh:nodeKind` values used by the synthesizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// `sh:IRIOrLiteral`.
    IriOrLiteral,
}

impl NodeKind {
    /// Compact SHACL term.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::IriOrLiteral => SH_IRI_OR_LITERAL,
        }
    }
}

/// Constraints on one property.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyShape {
    /// `sh:path`.
    pub path: Identifier,
    /// `sh:name`: the property name as declared.
    pub name: String,
    /// `sh:minCount`.
    pub min_count: Option<u32>,
    /// `sh:maxCount`.
    pub max_count: Option<u32>,
    /// `sh:datatype`, a compact XSD term.
    pub datatype: Option<&'static str>,
    /// `sh:class`.
    pub class: Option<Identifier>,
    /// `sh:nodeKind`.
    pub node_kind: Option<NodeKind>,
    /// `sh:in`, in declaration order, as the JSON values written in the
    /// schema.
    pub in_values: Vec<Value>,
    /// `sh:minInclusive`.
    pub min_inclusive: Option<Number>,
    /// `sh:maxInclusive`.
    pub max_inclusive: Option<Number>,
}

impl PropertyShape {
    fn new(path: Identifier, name: &str) -> Self {
        Self {
            path,
            name: name.to_owned(),
            min_count: None,
            max_count: None,
            datatype: None,
            class: None,
            node_kind: None,
            in_values: Vec::new(),
            min_inclusive: None,
            max_inclusive: None,
        }
    }
}

/// Constraints on one class.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeShape {
    /// Shape identifier; also its target class.
    pub id: Identifier,
    /// `sh:name`: the schema name.
    pub name: String,
    /// Property shapes in declaration order.
    pub properties: Vec<PropertyShape>,
}

impl NodeShape {
    /// `sh:targetClass`, always the shape's own identifier.
    #[must_use]
    pub fn target_class(&self) -> &Identifier {
        &self.id
    }
}

/// Ordered node shapes of one document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapeGraph {
    shapes: Vec<NodeShape>,
}

impl ShapeGraph {
    /// Node shapes in schema order.
    #[must_use]
    pub fn shapes(&self) -> &[NodeShape] {
        &self.shapes
    }

    /// Number of node shapes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Returns true if the graph has no shapes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Total number of property shapes.
    #[must_use]
    pub fn property_count(&self) -> usize {
        self.shapes.iter().map(|s| s.properties.len()).sum()
    }

    /// Every vocabulary identifier of the graph: shape, path and class
    /// identifiers.
    pub fn identifiers(&self) -> impl Iterator<Item = &Identifier> {
        self.shapes.iter().flat_map(|shape| {
            std::iter::once(&shape.id).chain(
                shape
                    .properties
                    .iter()
                    .flat_map(|p| std::iter::once(&p.path).chain(p.class.as_ref())),
            )
        })
    }
}

/// A synthesized graph plus the per-property incidents met on the way.
#[derive(Debug, Clone, Default)]
pub struct Synthesis {
    /// The shapes.
    pub graph: ShapeGraph,
    /// Skipped properties and shapes.
    pub diagnostics: Diagnostics,
}

/// Builds the shape graph of a frozen schema set.
///
/// # Errors
///
/// Returns [`SynthesisError::NoShapes`] if the set has no object definition.
pub fn synthesize(
    document: &str,
    set: &SchemaSet,
    resolver: &ContextResolver,
) -> Result<Synthesis, SynthesisError> {
    let mut synthesizer = ShapeSynthesizer {
        set,
        resolver,
        diagnostics: Diagnostics::new(),
    };
    let mut shapes = Vec::new();
    let mut ids = HashSet::new();
    for definition in set.iter().filter(|d| d.kind == SchemaKind::Object) {
        let shape = synthesizer.node_shape(definition);
        if !ids.insert(shape.id.clone()) {
            synthesizer.diagnostics.warn(
                definition.name.clone(),
                format!("shape identifier {} already used; shape skipped", shape.id),
            );
            continue;
        }
        shapes.push(shape);
    }

    if shapes.is_empty() {
        return Err(SynthesisError::NoShapes(document.to_owned()));
    }
    let graph = ShapeGraph { shapes };
    tracing::info!(
        document,
        shapes = graph.len(),
        properties = graph.property_count(),
        "synthesized shapes"
    );
    Ok(Synthesis {
        graph,
        diagnostics: synthesizer.diagnostics,
    })
}

struct ShapeSynthesizer<'a> {
    set: &'a SchemaSet,
    resolver: &'a ContextResolver,
    diagnostics: Diagnostics,
}

impl ShapeSynthesizer<'_> {
    fn node_shape(&mut self, definition: &SchemaDefinition) -> NodeShape {
        let id = self.resolver.resolve(&definition.name, TermKind::Schema);
        let properties = definition
            .properties()
            .iter()
            .filter_map(|(name, fragment)| {
                let shape = self.property_shape(definition, name, fragment);
                if shape.is_none() {
                    tracing::debug!(schema = %definition.name, property = %name, "property skipped");
                }
                shape
            })
            .collect();
        NodeShape {
            id,
            name: definition.name.clone(),
            properties,
        }
    }

    fn property_shape(
        &mut self,
        owner: &SchemaDefinition,
        name: &str,
        fragment: &PropertyDef,
    ) -> Option<PropertyShape> {
        if name.is_empty() {
            self.diagnostics
                .warn(owner.name.clone(), "property with an empty name skipped");
            return None;
        }
        let mut shape = PropertyShape::new(self.resolver.resolve(name, TermKind::Property), name);
        if owner.is_required(name) {
            shape.min_count = Some(1);
        }
        if fragment.nullable {
            shape.max_count = Some(1);
        }

        if let Some(target) = &fragment.reference {
            if target.is_empty() {
                self.diagnostics
                    .warn(format!("{}.{name}", owner.name), "empty reference; property skipped");
                return None;
            }
            self.apply_reference(&mut shape, target);
            return Some(shape);
        }

        if fragment.is_array() {
            match fragment.items.as_deref() {
                Some(PropertyDef {
                    reference: Some(target),
                    ..
                }) => {
                    if target.is_empty() {
                        self.diagnostics.warn(
                            format!("{}.{name}", owner.name),
                            "empty item reference; property skipped",
                        );
                        return None;
                    }
                    shape.node_kind = Some(NodeKind::IriOrLiteral);
                    shape.class = Some(self.resolver.resolve(target, TermKind::Schema));
                }
                Some(items) => {
                    shape.datatype = scalar_datatype(items);
                    if shape.datatype.is_none() && items.type_.as_deref() == Some("object") {
                        shape.node_kind = Some(NodeKind::IriOrLiteral);
                    }
                }
                None => {}
            }
            return Some(shape);
        }

        shape.datatype = scalar_datatype(fragment);
        if shape.datatype.is_none() && matches!(fragment.type_.as_deref(), None | Some("object")) {
            shape.node_kind = Some(NodeKind::IriOrLiteral);
        }
        shape.in_values = fragment.enum_values.clone();
        shape.min_inclusive = fragment.bounds.minimum.clone();
        shape.max_inclusive = fragment.bounds.maximum.clone();
        Some(shape)
    }

    fn apply_reference(&self, shape: &mut PropertyShape, target: &str) {
        let Some(definition) = self.set.get(target) else {
            tracing::debug!(target_schema = target, "unknown reference, opaque class");
            shape.class = Some(self.resolver.resolve(target, TermKind::Schema));
            return;
        };
        match definition.kind {
            SchemaKind::StringEnum => {
                shape.in_values = definition.enum_values().to_vec();
                shape.datatype = scalar_datatype(&definition.schema);
            }
            SchemaKind::Object => {
                shape.class = Some(self.resolver.resolve(target, TermKind::Schema));
            }
            SchemaKind::Array | SchemaKind::Primitive => {
                shape.datatype = scalar_datatype(&definition.schema);
            }
        }
    }
}
