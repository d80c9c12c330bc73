//! Escaping helpers for string-built XML parts.

/// Escapes text content.
pub(crate) fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escapes attribute values.
pub(crate) fn escape_attr(s: &str) -> String {
    escape_text(s)
        .replace('\"', "&quot;")
        .replace('\'', "&apos;")
}

/// True when a `<t>` element needs `xml:space="preserve"` so consumers keep
/// the string's edges intact.
pub(crate) fn needs_space_preserve(s: &str) -> bool {
    s.starts_with(char::is_whitespace) || s.ends_with(char::is_whitespace)
}
