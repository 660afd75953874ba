//! JSON Schema message directory to OpenAPI 3.1 conversion.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use ldshape_schema::enum_source::capitalize_segments;
use ldshape_schema::{
    apply_overrides, load_overrides, merge_documents, Diagnostics, EnumSourceSpec, SchemaDocument,
    SchemaSet,
};
use serde_json::{json, Value};
use walkdir::WalkDir;

/// Default `info.version` of the generated document.
pub const DEFAULT_VERSION: &str = "2.1.0";

/// Result of converting one directory.
#[derive(Debug)]
pub struct Conversion {
    /// Merged definitions, overrides applied.
    pub definitions: SchemaSet,
    /// Message type names (file stems), sorted.
    pub message_types: Vec<String>,
    /// Unreadable files, skipped fragments and CSV problems.
    pub diagnostics: Diagnostics,
}

/// Reads every `*.json` file directly inside `dir` in file-name order,
/// merges their definitions and applies CSV overrides from `appendices`.
///
/// # Errors
///
/// Returns an error only if `dir` cannot be listed.
pub fn convert_dir(
    dir: &Path,
    appendices: Option<&Path>,
    sources: &[EnumSourceSpec],
) -> Result<Conversion> {
    let mut diagnostics = Diagnostics::new();
    let mut documents = Vec::new();
    let mut message_types = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to list {}", dir.display()))?;
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().and_then(|e| e.to_str()) != Some("json")
        {
            continue;
        }
        let Some(stem) = path.file_stem().map(|s| s.to_string_lossy().into_owned()) else {
            continue;
        };
        let loaded = fs::read_to_string(path)
            .map_err(anyhow::Error::from)
            .and_then(|text| {
                SchemaDocument::from_json_schema_str(&stem, &text).map_err(anyhow::Error::from)
            });
        match loaded {
            Ok(document) => {
                documents.push(document);
                message_types.push(stem);
            }
            Err(err) => diagnostics.warn(entry.file_name().to_string_lossy(), format!("{err:#}")),
        }
    }

    let (mut definitions, merge_diagnostics) = merge_documents(documents);
    diagnostics.extend(merge_diagnostics);
    if let Some(appendices) = appendices {
        let (overrides, csv_diagnostics) = load_overrides(appendices, sources);
        diagnostics.extend(csv_diagnostics);
        apply_overrides(&mut definitions, &overrides);
    }

    message_types.sort();
    tracing::info!(
        messages = message_types.len(),
        definitions = definitions.len(),
        "converted JSON Schema directory"
    );
    Ok(Conversion {
        definitions,
        message_types,
        diagnostics,
    })
}

/// Builds the OpenAPI 3.1 document: one tag per message type and every
/// definition under `components.schemas`.
#[must_use]
pub fn openapi_document(conversion: &Conversion, version: &str) -> Value {
    let tags: Vec<Value> = conversion
        .message_types
        .iter()
        .map(|message| {
            json!({
                "name": message.to_lowercase(),
                "x-displayName": capitalize_segments(message),
                "description": format!(
                    "<SchemaDefinition schemaRef=\"#/components/schemas/{message}\" />"
                )
            })
        })
        .collect();
    let schemas: serde_json::Map<String, Value> = conversion
        .definitions
        .iter()
        .map(|definition| (definition.name.clone(), definition.to_fragment()))
        .collect();

    json!({
        "openapi": "3.1.0",
        "info": { "title": "OCPP JSON Schemas", "version": version },
        "paths": {},
        "tags": tags,
        "components": { "schemas": schemas }
    })
}

/// Renders the OpenAPI document as YAML.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_yaml(document: &Value) -> Result<String> {
    serde_yaml::to_string(document).context("Failed to serialize OpenAPI document")
}
