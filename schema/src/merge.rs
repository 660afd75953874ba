//! Duplicate resolution across source documents.
//!
//! Message files repeat shared definitions (`EVSEType`, `StatusInfoType`...)
//! with varying levels of detail. The more complete definition wins, where
//! completeness is the total order [`Completeness`].

use crate::diagnostics::Diagnostics;
use crate::document::SchemaDocument;
use crate::model::{SchemaDefinition, SchemaSet};

/// Completeness of a definition: populated attribute count first, then
/// whether a description is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Completeness {
    /// Number of populated attributes of the definition body.
    pub attributes: usize,
    /// Whether the definition carries a description.
    pub has_description: bool,
}

impl Completeness {
    /// Measures a definition.
    #[must_use]
    pub fn of(definition: &SchemaDefinition) -> Self {
        Self {
            attributes: definition.schema.populated_attributes(),
            has_description: definition.schema.description.is_some(),
        }
    }
}

/// What [`merge_into`] did with the incoming definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The name was new.
    Inserted,
    /// The incoming definition was strictly more complete and replaced the
    /// existing one (in place).
    Replaced,
    /// The existing definition was kept.
    Kept,
}

/// Merges one definition into `set`, keeping the existing definition unless
/// the incoming one is strictly more complete.
pub fn merge_into(set: &mut SchemaSet, incoming: SchemaDefinition) -> MergeOutcome {
    let Some(existing) = set.get(&incoming.name) else {
        set.insert(incoming);
        return MergeOutcome::Inserted;
    };
    if Completeness::of(&incoming) > Completeness::of(existing) {
        tracing::debug!(name = %incoming.name, "replacing with more complete definition");
        set.insert(incoming);
        MergeOutcome::Replaced
    } else {
        MergeOutcome::Kept
    }
}

/// Folds documents into one canonical set, in sorted document-name order so
/// the result does not depend on the order the documents were read.
///
/// Per-document diagnostics are carried over into the returned collection.
pub fn merge_documents(
    documents: impl IntoIterator<Item = SchemaDocument>,
) -> (SchemaSet, Diagnostics) {
    let mut documents: Vec<SchemaDocument> = documents.into_iter().collect();
    documents.sort_by(|a, b| a.name.cmp(&b.name));

    let mut set = SchemaSet::new();
    let mut diagnostics = Diagnostics::new();
    let mut replaced = 0usize;
    for document in documents {
        diagnostics.extend(document.diagnostics);
        for definition in document.definitions.iter().cloned() {
            if merge_into(&mut set, definition) == MergeOutcome::Replaced {
                replaced += 1;
            }
        }
    }
    tracing::info!(schemas = set.len(), replaced, "merged definitions");
    (set, diagnostics)
}
