//! Vocabulary expansion: classes, enumeration types and enumeration members.

use ldshape_context::{ContextResolver, Identifier};
use ldshape_schema::{SchemaKind, SchemaSet};

use crate::enums::{detect_enums, sanitize_members, DetectedEnum, EnumOrigin};
use crate::error::SynthesisError;

/// Options of the vocabulary generator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VocabOptions {
    /// Run member values through [`sanitize_members`] before using them as
    /// identifier local parts.
    pub sanitize_member_ids: bool,
}

/// One vocabulary graph entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VocabEntry {
    /// `rdfs:Class` for an object schema.
    Class {
        /// Class identifier.
        id: Identifier,
        /// `rdfs:label`.
        label: String,
        /// `rdfs:comment`.
        comment: Option<String>,
    },
    /// `schema:Enumeration` type.
    Enumeration {
        /// Enumeration identifier.
        id: Identifier,
        /// `schema:name`.
        name: String,
        /// `rdfs:comment`.
        comment: Option<String>,
        /// `schema:hasEnumerationMember`, in value order.
        members: Vec<Identifier>,
    },
    /// One enumeration member.
    Member {
        /// Member identifier.
        id: Identifier,
        /// The enumeration it belongs to.
        enumeration: Identifier,
        /// The literal value (`schema:name` and `schema:identifier`).
        value: String,
    },
}

impl VocabEntry {
    /// Identifier of the entry.
    #[must_use]
    pub fn id(&self) -> &Identifier {
        match self {
            VocabEntry::Class { id, .. }
            | VocabEntry::Enumeration { id, .. }
            | VocabEntry::Member { id, .. } => id,
        }
    }
}

/// The vocabulary of one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    /// Entries in output order.
    pub entries: Vec<VocabEntry>,
}

impl Vocabulary {
    /// Number of class entries.
    #[must_use]
    pub fn class_count(&self) -> usize {
        self.count(|e| matches!(e, VocabEntry::Class { .. }))
    }

    /// Number of enumeration types.
    #[must_use]
    pub fn enum_type_count(&self) -> usize {
        self.count(|e| matches!(e, VocabEntry::Enumeration { .. }))
    }

    /// Number of enumeration members.
    #[must_use]
    pub fn enum_value_count(&self) -> usize {
        self.count(|e| matches!(e, VocabEntry::Member { .. }))
    }

    fn count(&self, pred: impl Fn(&VocabEntry) -> bool) -> usize {
        self.entries.iter().filter(|e| pred(e)).count()
    }
}

/// Builds the vocabulary: schemas in set order (object → class, string
/// enumeration → enumeration type followed by its members), then inline
/// enumerations discovered on properties.
///
/// # Errors
///
/// Returns [`SynthesisError::EmptyVocabulary`] if the set has neither
/// classes nor enumerations.
pub fn build_vocabulary(
    document: &str,
    set: &SchemaSet,
    resolver: &ContextResolver,
    options: VocabOptions,
) -> Result<Vocabulary, SynthesisError> {
    let detected = detect_enums(set);
    let mut vocabulary = Vocabulary::default();

    for definition in set {
        match definition.kind {
            SchemaKind::Object => vocabulary.entries.push(VocabEntry::Class {
                id: resolver.own(&definition.name),
                label: definition.name.clone(),
                comment: non_empty(definition.description()),
            }),
            SchemaKind::StringEnum => {
                if let Some(found) = detected.iter().find(|e| e.name == definition.name) {
                    push_enumeration(&mut vocabulary, found, resolver, options);
                }
            }
            SchemaKind::Array | SchemaKind::Primitive => {}
        }
    }
    for found in detected
        .iter()
        .filter(|e| matches!(e.origin, EnumOrigin::Inline { .. }))
    {
        push_enumeration(&mut vocabulary, found, resolver, options);
    }

    if vocabulary.entries.is_empty() {
        return Err(SynthesisError::EmptyVocabulary(document.to_owned()));
    }
    tracing::info!(
        document,
        classes = vocabulary.class_count(),
        enum_types = vocabulary.enum_type_count(),
        enum_values = vocabulary.enum_value_count(),
        "built vocabulary"
    );
    Ok(vocabulary)
}

fn push_enumeration(
    vocabulary: &mut Vocabulary,
    found: &DetectedEnum,
    resolver: &ContextResolver,
    options: VocabOptions,
) {
    let enum_id = resolver.own(&found.name);
    let locals = if options.sanitize_member_ids {
        sanitize_members(&found.values)
    } else {
        found.values.clone()
    };
    let members: Vec<Identifier> = locals.iter().map(|l| resolver.own(l)).collect();

    vocabulary.entries.push(VocabEntry::Enumeration {
        id: enum_id.clone(),
        name: found.name.clone(),
        comment: non_empty(found.description.as_deref()),
        members: members.clone(),
    });
    for (id, value) in members.into_iter().zip(&found.values) {
        vocabulary.entries.push(VocabEntry::Member {
            id,
            enumeration: enum_id.clone(),
            value: value.clone(),
        });
    }
}

fn non_empty(text: Option<&str>) -> Option<String> {
    text.filter(|t| !t.is_empty()).map(str::to_owned)
}
