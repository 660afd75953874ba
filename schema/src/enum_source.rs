//! CSV enumeration sources.
//!
//! Appendix CSV files are the authoritative value lists for a handful of
//! enumerations. A source table maps each file name to the target
//! enumeration and the column holding the values; loaded values replace
//! whatever the schema documents declared.

use std::path::Path;

use serde::Deserialize;
use walkdir::WalkDir;

use crate::diagnostics::Diagnostics;
use crate::error::SchemaError;
use crate::model::{SchemaDefinition, SchemaSet};

/// Column read when no override is configured and the header has it.
pub const DEFAULT_VALUE_COLUMN: &str = "Value";

/// Delimiters tried in order.
const DELIMITERS: [u8; 2] = [b';', b','];

/// Built-in appendix table: file name, target enumeration, value column.
static DEFAULT_SOURCES: &[(&str, &str, &str)] = &[
    ("connectorenumtype.csv", "ConnectorEnumType", "Value"),
    ("idtokenenumtype.csv", "IdTokenEnumType", "Value"),
    (
        "charginglimitsourceenumtype.csv",
        "ChargingLimitSourceEnumType",
        "Value",
    ),
    ("units_of_measure.csv", "UnitOfMeasureEnumType", "Value"),
    (
        "additional_info_types.csv",
        "AdditionalInfoTypeEnumType",
        "additionalInfo.type",
    ),
    (
        "additional_info_types_adhoc.csv",
        "AdditionalInfoTypeAdHocEnumType",
        "additionalInfo.type",
    ),
    ("paymentbrand.csv", "PaymentBrandEnumType", "PaymentBrand"),
    (
        "paymentrecognition.csv",
        "PaymentRecognitionEnumType",
        "PaymentRecognition",
    ),
    ("signingmethod.csv", "SigningMethodEnumType", "SigningMethod"),
];

/// One entry of the source table, as written in the `[[enum_sources]]`
/// configuration array.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EnumSourceSpec {
    /// CSV file name, matched case-insensitively.
    pub file: String,
    /// Target enumeration; derived from the file stem when absent.
    #[serde(default)]
    pub target: Option<String>,
    /// Value column; `Value` or the first column when absent.
    #[serde(default)]
    pub column: Option<String>,
}

impl EnumSourceSpec {
    /// Name of the enumeration this source overrides.
    #[must_use]
    pub fn target_name(&self) -> String {
        match &self.target {
            Some(target) => target.clone(),
            None => {
                let stem = Path::new(&self.file)
                    .file_stem()
                    .map_or_else(|| self.file.clone(), |s| s.to_string_lossy().into_owned());
                derive_target_name(&stem)
            }
        }
    }
}

/// The built-in source table.
#[must_use]
pub fn default_sources() -> Vec<EnumSourceSpec> {
    DEFAULT_SOURCES
        .iter()
        .map(|(file, target, column)| EnumSourceSpec {
            file: (*file).to_owned(),
            target: Some((*target).to_owned()),
            column: Some((*column).to_owned()),
        })
        .collect()
}

/// Upper-cases the first letter of every `_`-delimited segment, lower-cases
/// the rest, and joins the segments: `charging_limit` becomes `ChargingLimit`.
#[must_use]
pub fn capitalize_segments(text: &str) -> String {
    text.split('_')
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect()
}

/// Derives an enumeration name from a CSV file stem; `EnumType` is appended
/// when missing.
#[must_use]
pub fn derive_target_name(stem: &str) -> String {
    let mut name = capitalize_segments(stem);
    if !name.ends_with("EnumType") {
        name.push_str("EnumType");
    }
    name
}

/// Extracts the values of one column from CSV text.
///
/// `;` is tried first, then `,`. The column is `column` if given, else
/// `Value`, else the first column. A delimiter is only accepted if it finds
/// that column or splits the header into several fields; the last delimiter
/// always falls back to the first column. Cells are trimmed, empty cells are
/// skipped.
///
/// # Errors
///
/// Returns the reader error if a record cannot be decoded.
pub fn parse_values(text: &str, column: Option<&str>) -> Result<Vec<String>, csv::Error> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let wanted = column.unwrap_or(DEFAULT_VALUE_COLUMN);

    for (attempt, delimiter) in DELIMITERS.iter().enumerate() {
        let last = attempt + 1 == DELIMITERS.len();
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(*delimiter)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(text.as_bytes());
        let headers = reader.headers()?.clone();
        if headers.is_empty() {
            return Ok(Vec::new());
        }
        let index = match headers.iter().position(|h| h == wanted) {
            Some(index) => index,
            None if headers.len() > 1 || last => 0,
            None => continue,
        };

        let mut values = Vec::new();
        for record in reader.records() {
            let record = record?;
            if let Some(value) = record.get(index).filter(|v| !v.is_empty()) {
                values.push(value.to_owned());
            }
        }
        return Ok(values);
    }
    Ok(Vec::new())
}

/// Reads one CSV file and extracts its values (see [`parse_values`]).
///
/// # Errors
///
/// Returns [`SchemaError::Io`] if the file cannot be read and
/// [`SchemaError::Csv`] if it cannot be decoded.
pub fn load_values(path: &Path, column: Option<&str>) -> Result<Vec<String>, SchemaError> {
    let text = std::fs::read_to_string(path).map_err(|source| SchemaError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_values(&text, column).map_err(|source| SchemaError::Csv {
        file: path.display().to_string(),
        source,
    })
}

/// An authoritative value list for one enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumOverride {
    /// Enumeration the values belong to.
    pub target: String,
    /// Values in file order.
    pub values: Vec<String>,
    /// File name the values were read from.
    pub source_file: String,
}

/// Loads every CSV file in `dir` (not recursive, sorted by file name) that
/// matches an entry of `sources`.
///
/// Unreadable files and files without usable values are diagnostics; they
/// produce no override.
pub fn load_overrides(dir: &Path, sources: &[EnumSourceSpec]) -> (Vec<EnumOverride>, Diagnostics) {
    let mut overrides = Vec::new();
    let mut diagnostics = Diagnostics::new();

    if !dir.is_dir() {
        diagnostics.warn(dir.display().to_string(), "enum source directory not found");
        return (overrides, diagnostics);
    }

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                diagnostics.warn(dir.display().to_string(), err.to_string());
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy().into_owned();
        let lowered = file_name.to_lowercase();
        let Some(spec) = sources.iter().find(|s| s.file.to_lowercase() == lowered) else {
            continue;
        };

        match load_values(entry.path(), spec.column.as_deref()) {
            Ok(values) if values.is_empty() => {
                diagnostics.warn(file_name, "no usable enumeration values");
            }
            Ok(values) => {
                tracing::debug!(file = %file_name, values = values.len(), "loaded enum source");
                overrides.push(EnumOverride {
                    target: spec.target_name(),
                    values,
                    source_file: file_name,
                });
            }
            Err(err) => diagnostics.warn(file_name, err.to_string()),
        }
    }
    (overrides, diagnostics)
}

/// Applies overrides to the set: an existing target has its values replaced
/// unconditionally, a missing one is created as a string enumeration.
/// Applying the same overrides again leaves the set unchanged.
pub fn apply_overrides(set: &mut SchemaSet, overrides: &[EnumOverride]) {
    for item in overrides {
        match set.get_mut(&item.target) {
            Some(existing) => {
                existing.set_enum_values(item.values.clone());
                tracing::info!(
                    target_enum = %item.target,
                    values = item.values.len(),
                    "updated from {}",
                    item.source_file
                );
            }
            None => {
                set.insert(SchemaDefinition::string_enum(
                    item.target.clone(),
                    item.values.clone(),
                    Some(format!("Enumeration values from {}", item.source_file)),
                ));
                tracing::info!(
                    target_enum = %item.target,
                    values = item.values.len(),
                    "added from {}",
                    item.source_file
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PropertyDef, SchemaKind};

    #[test]
    fn target_names_are_derived_from_stems() {
        assert_eq!(derive_target_name("connector_enum_type"), "ConnectorEnumType");
        assert_eq!(derive_target_name("units_of_measure"), "UnitsOfMeasureEnumType");
        assert_eq!(derive_target_name("paymentbrand"), "PaymentbrandEnumType");
    }

    #[test]
    fn default_table_covers_appendices() {
        let sources = default_sources();
        assert_eq!(sources.len(), 9);
        let brand = sources
            .iter()
            .find(|s| s.file == "paymentbrand.csv")
            .expect("paymentbrand");
        assert_eq!(brand.target_name(), "PaymentBrandEnumType");
        assert_eq!(brand.column.as_deref(), Some("PaymentBrand"));
    }

    #[test]
    fn semicolon_file_with_value_column() {
        let text = "\u{feff}Value;Description\nCType1;IEC 62196-2 Type 1\n;empty\ncCCS2 ;Combo 2\n";
        assert_eq!(
            parse_values(text, None).expect("parses"),
            vec!["CType1".to_owned(), "cCCS2".to_owned()]
        );
    }

    #[test]
    fn comma_file_falls_back_after_semicolon() {
        let text = "PaymentBrand,Description\nVisa,Card\nMastercard,Card\n";
        assert_eq!(
            parse_values(text, Some("PaymentBrand")).expect("parses"),
            vec!["Visa".to_owned(), "Mastercard".to_owned()]
        );
    }

    #[test]
    fn single_column_uses_first_column() {
        let text = "Unit\nWh\nkWh\n";
        assert_eq!(
            parse_values(text, None).expect("parses"),
            vec!["Wh".to_owned(), "kWh".to_owned()]
        );
    }

    #[test]
    fn empty_text_yields_no_values() {
        assert!(parse_values("", None).expect("parses").is_empty());
    }

    #[test]
    fn override_replaces_existing_and_creates_missing() {
        let mut set = SchemaSet::new();
        set.insert(SchemaDefinition::new(
            "ConnectorEnumType",
            PropertyDef {
                type_: Some("string".to_owned()),
                enum_values: vec![serde_json::Value::from("Old")],
                ..PropertyDef::default()
            },
        ));
        let overrides = vec![
            EnumOverride {
                target: "ConnectorEnumType".to_owned(),
                values: vec!["cCCS1".to_owned(), "cCCS2".to_owned()],
                source_file: "connectorenumtype.csv".to_owned(),
            },
            EnumOverride {
                target: "PaymentBrandEnumType".to_owned(),
                values: vec!["Visa".to_owned()],
                source_file: "paymentbrand.csv".to_owned(),
            },
        ];
        apply_overrides(&mut set, &overrides);
        assert_eq!(
            set.get("ConnectorEnumType").map(SchemaDefinition::enum_labels),
            Some(vec!["cCCS1".to_owned(), "cCCS2".to_owned()])
        );
        let created = set.get("PaymentBrandEnumType").expect("created");
        assert_eq!(created.kind, SchemaKind::StringEnum);
        assert_eq!(
            created.description(),
            Some("Enumeration values from paymentbrand.csv")
        );
        assert_eq!(created.schema.additional_properties, Some(serde_json::Value::Bool(false)));

        let once = set.clone();
        apply_overrides(&mut set, &overrides);
        assert_eq!(set, once);
    }
}
