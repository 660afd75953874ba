//! File handling shared by the binaries: input loading, output placement and
//! diagnostics printing.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ldshape_context::NamingContext;
use ldshape_schema::{Diagnostics, SchemaDocument};

/// File name of the naming context looked up beside an input document.
pub const DEFAULT_CONTEXT: &str = "context.jsonld";

/// Folder of an input file; empty for a bare file name.
#[must_use]
pub fn input_dir(input: &Path) -> &Path {
    input.parent().unwrap_or_else(|| Path::new(""))
}

/// Reads an OpenAPI document.
///
/// # Errors
///
/// Returns an error if the file cannot be read, does not parse, or declares
/// no schemas.
pub fn read_document(path: &Path) -> Result<SchemaDocument> {
    SchemaDocument::read_openapi(path)
        .with_context(|| format!("Failed to load {}", path.display()))
}

/// Loads naming contexts. Explicit paths must load; without any, the
/// `context.jsonld` beside `input` is used when present, and skipped with a
/// warning when it does not parse.
///
/// # Errors
///
/// Returns an error if an explicitly named context cannot be loaded.
pub fn load_contexts(explicit: &[PathBuf], input: &Path) -> Result<Vec<NamingContext>> {
    if !explicit.is_empty() {
        return explicit
            .iter()
            .map(|path| {
                NamingContext::read(path)
                    .with_context(|| format!("Failed to load context {}", path.display()))
            })
            .collect();
    }
    let beside = input_dir(input).join(DEFAULT_CONTEXT);
    if !beside.is_file() {
        return Ok(Vec::new());
    }
    match NamingContext::read(&beside) {
        Ok(context) => Ok(vec![context]),
        Err(err) => {
            tracing::warn!(context = %beside.display(), "ignoring unreadable context: {err}");
            Ok(Vec::new())
        }
    }
}

/// Where an artifact goes: `output` if absolute, `output` inside the
/// input's folder if relative, else `default_name` inside the input's folder.
#[must_use]
pub fn output_path(input: &Path, output: Option<&Path>, default_name: &str) -> PathBuf {
    match output {
        Some(path) if path.is_absolute() => path.to_path_buf(),
        Some(path) => input_dir(input).join(path),
        None => input_dir(input).join(default_name),
    }
}

/// `shacl_<stem>.jsonld`.
#[must_use]
pub fn shacl_file_name(input: &Path) -> String {
    let stem = input
        .file_stem()
        .map_or_else(|| "spec".to_owned(), |s| s.to_string_lossy().into_owned());
    format!("shacl_{stem}.jsonld")
}

/// Writes an artifact, creating parent folders.
///
/// # Errors
///
/// Returns an error if a folder cannot be created or the file written.
pub fn write_artifact(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))
}

/// Prints one line per diagnostic to stderr.
pub fn print_diagnostics(diagnostics: &Diagnostics) {
    for diagnostic in diagnostics {
        eprintln!("  warning: {diagnostic}");
    }
}

/// `Pretty-printed` or `Minified`.
#[must_use]
pub fn format_label(pretty: bool) -> &'static str {
    if pretty {
        "Pretty-printed"
    } else {
        "Minified"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_placement() {
        let input = Path::new("schema/ocpi/2.2/spec.yaml");
        assert_eq!(
            output_path(input, None, &shacl_file_name(input)),
            PathBuf::from("schema/ocpi/2.2/shacl_spec.jsonld")
        );
        assert_eq!(
            output_path(input, Some(Path::new("custom.jsonld")), "unused"),
            PathBuf::from("schema/ocpi/2.2/custom.jsonld")
        );
        assert_eq!(
            output_path(Path::new("spec.yaml"), None, "vocab.jsonld"),
            PathBuf::from("vocab.jsonld")
        );
    }

    #[test]
    fn beside_context_is_optional() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("spec.yaml");
        assert!(load_contexts(&[], &input).unwrap().is_empty());

        fs::write(dir.path().join(DEFAULT_CONTEXT), "not json").unwrap();
        assert!(load_contexts(&[], &input).unwrap().is_empty());

        fs::write(
            dir.path().join(DEFAULT_CONTEXT),
            r#"{"@context": {"@vocab": "https://schemas.acme/"}}"#,
        )
        .unwrap();
        let contexts = load_contexts(&[], &input).unwrap();
        assert_eq!(contexts[0].vocab(), Some("https://schemas.acme/"));

        let missing = dir.path().join("missing.jsonld");
        assert!(load_contexts(&[missing], &input).is_err());
    }
}
