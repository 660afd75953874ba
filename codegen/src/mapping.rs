//! Schema → RDF mapping tables.
//!
//! Deterministic mappings from OpenAPI `type`/`format` keywords to XSD
//! datatypes, and the standard namespace prefixes every artifact declares.

use ldshape_schema::PropertyDef;

/// SHACL namespace.
pub const NS_SH: &str = "http://www.w3.org/ns/shacl#";
/// RDF namespace.
pub const NS_RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
/// RDFS namespace.
pub const NS_RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
/// XSD namespace.
pub const NS_XSD: &str = "http://www.w3.org/2001/XMLSchema#";
/// schema.org namespace.
pub const NS_SCHEMA: &str = "https://schema.org/";

/// Node kind of class-valued and untyped properties.
pub const SH_IRI_OR_LITERAL: &str = "sh:IRIOrLiteral";

/// `type`/`format` keyword → XSD datatype.
static TYPE_MAP: &[(&str, &str)] = &[
    ("string", "xsd:string"),
    ("integer", "xsd:integer"),
    ("int32", "xsd:int"),
    ("int64", "xsd:long"),
    ("number", "xsd:double"),
    ("float", "xsd:float"),
    ("boolean", "xsd:boolean"),
    ("date-time", "xsd:dateTime"),
    ("date", "xsd:date"),
];

/// Prefixes declared by the SHACL artifact, in output order.
pub static SHACL_PREFIXES: &[(&str, &str)] = &[
    ("sh", NS_SH),
    ("rdf", NS_RDF),
    ("rdfs", NS_RDFS),
    ("xsd", NS_XSD),
];

/// Prefixes declared by the vocabulary artifact after the own prefix.
pub static VOCAB_PREFIXES: &[(&str, &str)] = &[
    ("schema", NS_SCHEMA),
    ("rdf", NS_RDF),
    ("rdfs", NS_RDFS),
    ("xsd", NS_XSD),
];

/// Maps a `type` or `format` keyword to its XSD datatype.
#[must_use]
pub fn xsd_datatype(keyword: &str) -> Option<&'static str> {
    TYPE_MAP
        .iter()
        .find(|(k, _)| *k == keyword)
        .map(|(_, xsd)| *xsd)
}

/// Datatype of a scalar fragment: a mapped `format` wins over `type`.
#[must_use]
pub fn scalar_datatype(fragment: &PropertyDef) -> Option<&'static str> {
    fragment
        .format
        .as_deref()
        .and_then(xsd_datatype)
        .or_else(|| fragment.type_.as_deref().and_then(xsd_datatype))
}

/// Returns true for prefixes every artifact declares on its own.
#[must_use]
pub fn is_standard_prefix(prefix: &str) -> bool {
    SHACL_PREFIXES
        .iter()
        .chain(VOCAB_PREFIXES)
        .any(|(p, _)| *p == prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragment(type_: Option<&str>, format: Option<&str>) -> PropertyDef {
        PropertyDef {
            type_: type_.map(str::to_owned),
            format: format.map(str::to_owned),
            ..PropertyDef::default()
        }
    }

    #[test]
    fn type_map_covers_openapi_keywords() {
        assert_eq!(xsd_datatype("int64"), Some("xsd:long"));
        assert_eq!(xsd_datatype("date-time"), Some("xsd:dateTime"));
        assert_eq!(xsd_datatype("object"), None);
    }

    #[test]
    fn format_wins_over_type() {
        assert_eq!(
            scalar_datatype(&fragment(Some("integer"), Some("int32"))),
            Some("xsd:int")
        );
        assert_eq!(
            scalar_datatype(&fragment(Some("string"), Some("uri"))),
            Some("xsd:string")
        );
        assert_eq!(scalar_datatype(&fragment(None, None)), None);
    }

    #[test]
    fn standard_prefixes() {
        assert!(is_standard_prefix("sh"));
        assert!(is_standard_prefix("schema"));
        assert!(!is_standard_prefix("ocpp"));
    }
}
