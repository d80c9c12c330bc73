//! Validated hex color strings.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::StyleError;

/// A color as a 6-digit (`RRGGBB`) or 8-digit (`AARRGGBB`) hex string,
/// normalized to uppercase. Construction validates the digits, so a stored
/// color is always well formed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(String);

impl Color {
    pub fn from_hex(hex: &str) -> Result<Self, StyleError> {
        if !matches!(hex.len(), 6 | 8) || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(StyleError::InvalidColor(hex.to_string()));
        }
        Ok(Color(hex.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The 8-digit `AARRGGBB` form, with an opaque alpha prepended when the
    /// color was given as 6 digits.
    pub fn to_argb(&self) -> String {
        if self.0.len() == 6 {
            format!("FF{}", self.0)
        } else {
            self.0.clone()
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Color {
    type Error = StyleError;

    fn try_from(value: String) -> Result<Self, StyleError> {
        Color::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> String {
        color.0
    }
}
