//! Optional TOML configuration (`--config ldshape.toml`).
//!
//! ```toml
//! [generator]
//! base_iri = "https://schemas.example.org/v1/"
//! prefix = "ex"
//! absolute = false
//! pretty = true
//! sanitize_member_ids = false
//!
//! [[enum_sources]]
//! file = "connectorenumtype.csv"
//! target = "ConnectorEnumType"
//! column = "Value"
//! ```
//!
//! Command-line flags win over file values.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use ldshape_codegen::mapping::is_standard_prefix;
use ldshape_context::IdentifierMode;
use ldshape_schema::enum_source::default_sources;
use ldshape_schema::EnumSourceSpec;
use serde::Deserialize;

/// `[generator]` table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Vocabulary root override applied to every document.
    pub base_iri: Option<String>,
    /// Own compact prefix override.
    pub prefix: Option<String>,
    /// Emit absolute identifiers instead of compact ones.
    pub absolute: bool,
    /// Pretty-print output.
    pub pretty: bool,
    /// Sanitize enumeration member identifiers.
    pub sanitize_member_ids: bool,
}

/// The whole configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Generator settings.
    pub generator: GeneratorConfig,
    /// CSV enumeration sources; the built-in table when absent.
    pub enum_sources: Option<Vec<EnumSourceSpec>>,
}

impl Config {
    /// Parses configuration text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML, has unknown keys, or
    /// sets `prefix` to one of the standard `sh`/`rdf`/`rdfs`/`xsd`/`schema`
    /// prefixes.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).context("Failed to parse configuration")?;
        if let Some(prefix) = config.generator.prefix.as_deref() {
            if is_standard_prefix(prefix) {
                bail!("prefix {prefix:?} is reserved for a standard vocabulary");
            }
        }
        Ok(config)
    }

    /// Loads the file at `path`, or the defaults when no path is given.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Configured enumeration sources, or the built-in table.
    #[must_use]
    pub fn enum_sources(&self) -> Vec<EnumSourceSpec> {
        self.enum_sources.clone().unwrap_or_else(default_sources)
    }

    /// Identifier mode, with `--absolute` taking precedence.
    #[must_use]
    pub fn identifier_mode(&self, absolute_flag: bool) -> IdentifierMode {
        if absolute_flag || self.generator.absolute {
            IdentifierMode::Absolute
        } else {
            IdentifierMode::Compact
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_file_parses() {
        let config = Config::from_toml_str(
            r#"
[generator]
base_iri = "https://schemas.example.org/v1/"
prefix = "ex"
pretty = true

[[enum_sources]]
file = "connectorenumtype.csv"

[[enum_sources]]
file = "units.csv"
target = "UnitOfMeasureEnumType"
column = "Unit"
"#,
        )
        .unwrap();
        assert_eq!(config.generator.prefix.as_deref(), Some("ex"));
        assert!(config.generator.pretty);
        assert!(!config.generator.absolute);
        let sources = config.enum_sources();
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].target_name(), "ConnectorenumtypeEnumType");
        assert_eq!(sources[1].column.as_deref(), Some("Unit"));
    }

    #[test]
    fn absent_sources_fall_back_to_builtin_table() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.enum_sources().len(), default_sources().len());
        assert_eq!(config.identifier_mode(true), IdentifierMode::Absolute);
        assert_eq!(config.identifier_mode(false), IdentifierMode::Compact);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Config::from_toml_str("[generator]\nbase = \"x\"\n").is_err());
    }

    #[test]
    fn standard_prefix_is_rejected() {
        let err = Config::from_toml_str("[generator]\nprefix = \"sh\"\n").unwrap_err();
        assert!(err.to_string().contains("reserved"));
        assert!(Config::from_toml_str("[generator]\nprefix = \"ex\"\n").is_ok());
    }
}
