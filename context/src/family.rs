//! Schema families recognised from directory naming.
//!
//! Schema trees are laid out as `<family>/<version>/spec.yaml` (or with the
//! version fused onto the family folder, `ocpp2.0.1/`). A known family fixes
//! the compact prefix and the root IRI of its vocabulary.

use std::path::{Component, Path};

/// How a family's root IRI is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootPattern {
    /// A fixed host; the version is appended.
    Fixed(&'static str),
    /// A host followed by the matched folder name, then the version.
    PerFolder(&'static str),
}

/// One row of the family table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Family {
    /// Display name.
    pub name: &'static str,
    /// Folder-name prefixes that select this family.
    pub folder_prefixes: &'static [&'static str],
    /// Compact prefix of the family vocabulary.
    pub prefix: &'static str,
    /// Root IRI pattern.
    pub root: RootPattern,
    /// Version used when the path carries none.
    pub default_version: Option<&'static str>,
    /// Whether a leading `v` is stripped from the version (`v2.1` -> `2.1`).
    pub strip_v: bool,
    /// Whether a version may be fused onto the family folder (`ocpp2.0.1`).
    pub fused_version: bool,
}

/// The known families.
pub static FAMILIES: &[Family] = &[
    Family {
        name: "OCPI",
        folder_prefixes: &["ocpi"],
        prefix: "ocpi",
        root: RootPattern::Fixed("https://schemas.ocpi.org/"),
        default_version: Some("2.2"),
        strip_v: true,
        fused_version: true,
    },
    Family {
        name: "OCPP",
        folder_prefixes: &["ocpp"],
        prefix: "ocpp",
        root: RootPattern::Fixed("https://schemas.ocpp.org/"),
        default_version: Some("2.0.1"),
        strip_v: true,
        fused_version: true,
    },
    Family {
        name: "Beckn",
        folder_prefixes: &["Energy", "EvCharging"],
        prefix: "beckn",
        root: RootPattern::PerFolder("https://schemas.beckn.org/"),
        default_version: None,
        strip_v: false,
        fused_version: false,
    },
];

/// Prefix used when no family matches.
pub const FALLBACK_PREFIX: &str = "vocab";

/// A family recognised in a directory path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyMatch {
    /// The matched family.
    pub family: &'static Family,
    /// The folder that matched, original case.
    pub folder: String,
    /// Last version segment found in the path, as written.
    pub version: Option<String>,
}

impl FamilyMatch {
    /// Root IRI by convention, always ending in `/`.
    #[must_use]
    pub fn root_iri(&self) -> String {
        let version = self
            .version
            .as_deref()
            .map(|v| {
                if self.family.strip_v {
                    v.strip_prefix('v').unwrap_or(v)
                } else {
                    v
                }
            })
            .or(self.family.default_version);
        let base = match self.family.root {
            RootPattern::Fixed(host) => host.to_owned(),
            RootPattern::PerFolder(host) => format!("{host}{}/", self.folder),
        };
        match version {
            Some(v) => format!("{base}{v}/"),
            None => base,
        }
    }
}

/// Returns true if a path segment is a version: `v<digit>...` or
/// `<digit>...`, containing a dot.
#[must_use]
pub fn is_version_segment(segment: &str) -> bool {
    let digits = segment.strip_prefix('v').unwrap_or(segment);
    digits.starts_with(|c: char| c.is_ascii_digit()) && segment.contains('.')
}

/// Scans a directory path for a known family folder and the last version
/// segment. The first family folder wins.
#[must_use]
pub fn detect(dir: &Path) -> Option<FamilyMatch> {
    let mut found: Option<(&'static Family, String)> = None;
    let mut version = None;

    for component in dir.components() {
        let Component::Normal(part) = component else {
            continue;
        };
        let part = part.to_string_lossy();
        if found.is_none() {
            if let Some((family, prefix)) = match_family(&part) {
                if family.fused_version {
                    let suffix = &part[prefix.len()..];
                    if is_version_segment(suffix) {
                        version = Some(suffix.to_owned());
                    }
                }
                found = Some((family, part.into_owned()));
                continue;
            }
        }
        if is_version_segment(&part) {
            version = Some(part.into_owned());
        }
    }

    let (family, folder) = found?;
    Some(FamilyMatch {
        family,
        folder,
        version,
    })
}

fn match_family(folder: &str) -> Option<(&'static Family, &'static str)> {
    FAMILIES.iter().find_map(|family| {
        family
            .folder_prefixes
            .iter()
            .find(|prefix| folder.starts_with(**prefix))
            .map(|prefix| (family, *prefix))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root_of(path: &str) -> Option<String> {
        detect(Path::new(path)).map(|m| m.root_iri())
    }

    #[test]
    fn version_segments() {
        assert!(is_version_segment("v0.2"));
        assert!(is_version_segment("2.0.1"));
        assert!(!is_version_segment("v2"));
        assert!(!is_version_segment("vocab.d"));
        assert!(!is_version_segment(""));
    }

    #[test]
    fn ocpp_and_ocpi_use_bare_versions() {
        assert_eq!(
            root_of("schema/ocpp/v2.1.0").as_deref(),
            Some("https://schemas.ocpp.org/2.1.0/")
        );
        assert_eq!(
            root_of("schema/ocpp2.0.1").as_deref(),
            Some("https://schemas.ocpp.org/2.0.1/")
        );
        assert_eq!(root_of("schema/ocpi").as_deref(), Some("https://schemas.ocpi.org/2.2/"));
    }

    #[test]
    fn beckn_keeps_folder_and_version_as_written() {
        assert_eq!(
            root_of("schema/EnergyResource/v0.2").as_deref(),
            Some("https://schemas.beckn.org/EnergyResource/v0.2/")
        );
        assert_eq!(
            root_of("schema/EvChargingSession").as_deref(),
            Some("https://schemas.beckn.org/EvChargingSession/")
        );
        let m = detect(Path::new("EnergyResource/v0.2")).expect("family");
        assert_eq!(m.family.prefix, "beckn");
    }

    #[test]
    fn last_version_wins() {
        assert_eq!(
            root_of("v1.0/ocpp/2.0.1").as_deref(),
            Some("https://schemas.ocpp.org/2.0.1/")
        );
    }

    #[test]
    fn unknown_folders_have_no_family() {
        assert_eq!(detect(Path::new("schema/acme/1.0")), None);
    }
}
