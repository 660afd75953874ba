//! Non-fatal per-item diagnostics.
//!
//! A [`Diagnostic`] names the item it is about (definition, property, file)
//! so that a run can report every incident while still processing siblings.

use std::fmt;

/// One non-fatal incident.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// The item the incident is attributed to (e.g. `Connector.status`,
    /// `paymentbrand.csv`).
    pub source: String,
    /// Human-readable message.
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.source, self.message)
    }
}

/// Collected diagnostics for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a warning and emits it through `tracing`.
    pub fn warn(&mut self, source: impl Into<String>, message: impl Into<String>) {
        let diagnostic = Diagnostic {
            source: source.into(),
            message: message.into(),
        };
        tracing::warn!(source = %diagnostic.source, "{}", diagnostic.message);
        self.entries.push(diagnostic);
    }

    /// Appends the diagnostics of another collection.
    pub fn extend(&mut self, other: Diagnostics) {
        self.entries.extend(other.entries);
    }

    /// Number of recorded diagnostics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates diagnostics in the order they were recorded.
    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
