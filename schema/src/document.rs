//! Schema documents: one parsed input file.

use std::path::Path;

use serde_json::Value;

use crate::diagnostics::Diagnostics;
use crate::error::SchemaError;
use crate::model::{SchemaDefinition, SchemaSet};

/// The definitions contributed by one input document, plus any per-fragment
/// diagnostics raised while reading it.
#[derive(Debug, Clone, Default)]
pub struct SchemaDocument {
    /// Document name: the file name for OpenAPI documents, the file stem for
    /// JSON Schema message files.
    pub name: String,
    /// Parsed definitions in declaration order.
    pub definitions: SchemaSet,
    /// Fragments that could not be parsed.
    pub diagnostics: Diagnostics,
}

impl SchemaDocument {
    /// Reads `components.schemas` from an OpenAPI document in YAML or JSON.
    ///
    /// Each fragment is normalized on its own; a malformed fragment becomes a
    /// diagnostic and its siblings still load.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Yaml`] if the text does not parse and
    /// [`SchemaError::NoSchemas`] if `components.schemas` is missing or empty.
    pub fn from_openapi_str(name: &str, text: &str) -> Result<Self, SchemaError> {
        let root: Value = serde_yaml::from_str(text).map_err(|source| SchemaError::Yaml {
            document: name.to_owned(),
            source,
        })?;
        Self::from_openapi_value(name, &root)
    }

    /// Like [`SchemaDocument::from_openapi_str`], for an already-parsed value.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::NoSchemas`] if `components.schemas` is missing
    /// or empty.
    pub fn from_openapi_value(name: &str, root: &Value) -> Result<Self, SchemaError> {
        let schemas = root
            .get("components")
            .and_then(|c| c.get("schemas"))
            .and_then(Value::as_object)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| SchemaError::NoSchemas(name.to_owned()))?;

        let mut document = SchemaDocument {
            name: name.to_owned(),
            ..SchemaDocument::default()
        };
        for (schema_name, raw) in schemas {
            document.push_fragment(schema_name, raw);
        }
        tracing::info!(
            document = name,
            schemas = document.definitions.len(),
            skipped = document.diagnostics.len(),
            "loaded OpenAPI components"
        );
        Ok(document)
    }

    /// Reads one JSON Schema message file. Every `definitions` entry becomes a
    /// definition, followed by the message root schema itself under `stem`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Json`] if the text does not parse and
    /// [`SchemaError::Malformed`] if the root is not an object.
    pub fn from_json_schema_str(stem: &str, text: &str) -> Result<Self, SchemaError> {
        let root: Value = serde_json::from_str(text).map_err(|source| SchemaError::Json {
            document: stem.to_owned(),
            source,
        })?;
        let Value::Object(map) = &root else {
            return Err(SchemaError::malformed(stem, "message schema is not an object"));
        };

        let mut document = SchemaDocument {
            name: stem.to_owned(),
            ..SchemaDocument::default()
        };
        if let Some(Value::Object(definitions)) = map.get("definitions") {
            for (def_name, raw) in definitions {
                document.push_fragment(def_name, raw);
            }
        }
        document.push_fragment(stem, &root);
        tracing::debug!(
            document = stem,
            schemas = document.definitions.len(),
            "loaded JSON Schema message"
        );
        Ok(document)
    }

    /// Reads an OpenAPI document from disk. The document is named after the
    /// file name.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Io`] if the file cannot be read, otherwise as
    /// [`SchemaDocument::from_openapi_str`].
    pub fn read_openapi(path: &Path) -> Result<Self, SchemaError> {
        let text = std::fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        Self::from_openapi_str(&name, &text)
    }

    fn push_fragment(&mut self, name: &str, raw: &Value) {
        match SchemaDefinition::from_fragment(name, raw) {
            Ok((definition, skipped)) => {
                for err in skipped {
                    self.diagnostics.warn(
                        format!("{}#{name}", self.name),
                        format!("{err}; property skipped"),
                    );
                }
                if self.definitions.insert(definition).is_some() {
                    self.diagnostics
                        .warn(format!("{}#{name}", self.name), "duplicate definition replaced");
                }
            }
            Err(err) => self.diagnostics.warn(format!("{}#{name}", self.name), err.to_string()),
        }
    }
}
