//! Small IRI string helpers.

/// Returns true for `scheme://...` IRIs and `urn:` names.
#[must_use]
pub fn has_scheme(text: &str) -> bool {
    if text.starts_with("urn:") {
        return true;
    }
    let Some((scheme, _)) = text.split_once("://") else {
        return false;
    };
    let mut chars = scheme.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Returns true for `http://` and `https://` IRIs.
#[must_use]
pub fn is_http(text: &str) -> bool {
    text.starts_with("http://") || text.starts_with("https://")
}

/// Returns true if the IRI ends in a path or fragment separator.
#[must_use]
pub fn ends_with_separator(text: &str) -> bool {
    text.ends_with('/') || text.ends_with('#')
}

/// Appends `/` unless the IRI already ends in `/` or `#`.
#[must_use]
pub fn with_separator(text: &str) -> String {
    if ends_with_separator(text) {
        text.to_owned()
    } else {
        format!("{text}/")
    }
}

/// Expands `local` against `base`: concatenation when `base` ends in `/` or
/// `#`, otherwise joined with `/`.
#[must_use]
pub fn join(base: &str, local: &str) -> String {
    if ends_with_separator(base) {
        format!("{base}{local}")
    } else {
        format!("{base}/{local}")
    }
}
