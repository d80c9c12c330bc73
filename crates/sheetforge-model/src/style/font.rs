//! Font style component.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::color::Color;
use super::{Category, KeyBuilder, StyleComponent};

/// Font size in points, clamped to the representable window on
/// construction. Sizes never error; out-of-range values are clamped, and
/// non-finite input falls back to the minimum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "f32")]
pub struct FontSize(f32);

impl FontSize {
    pub const MIN: f32 = 1.0;
    pub const MAX: f32 = 409.0;

    pub fn points(value: f32) -> Self {
        if value.is_finite() {
            FontSize(value.clamp(Self::MIN, Self::MAX))
        } else {
            FontSize(Self::MIN)
        }
    }

    pub fn get(&self) -> f32 {
        self.0
    }
}

impl Default for FontSize {
    fn default() -> Self {
        FontSize(11.0)
    }
}

impl From<f32> for FontSize {
    fn from(value: f32) -> Self {
        FontSize::points(value)
    }
}

impl fmt::Display for FontSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Font scheme as understood by the document format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontScheme {
    None,
    #[default]
    Minor,
    Major,
}

impl FontScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            FontScheme::None => "none",
            FontScheme::Minor => "minor",
            FontScheme::Major => "major",
        }
    }
}

impl fmt::Display for FontScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sub/superscript positioning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalTextAlign {
    #[default]
    None,
    Subscript,
    Superscript,
}

impl VerticalTextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerticalTextAlign::None => "none",
            VerticalTextAlign::Subscript => "subscript",
            VerticalTextAlign::Superscript => "superscript",
        }
    }
}

impl fmt::Display for VerticalTextAlign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Font component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    pub name: String,
    #[serde(default)]
    pub size: FontSize,
    /// Font family classification (2 is "swiss"/sans-serif).
    #[serde(default = "default_family")]
    pub family: u8,
    #[serde(default)]
    pub scheme: FontScheme,
    #[serde(default)]
    pub vertical_align: VerticalTextAlign,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub bold: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub italic: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub underline: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub double_underline: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub strike: bool,
}

pub const DEFAULT_FONT_NAME: &str = "Calibri";

fn default_family() -> u8 {
    2
}

impl Default for Font {
    fn default() -> Self {
        Font {
            name: DEFAULT_FONT_NAME.to_string(),
            size: FontSize::default(),
            family: 2,
            scheme: FontScheme::default(),
            vertical_align: VerticalTextAlign::default(),
            color: None,
            bold: false,
            italic: false,
            underline: false,
            double_underline: false,
            strike: false,
        }
    }
}

impl Font {
    pub fn named(name: impl Into<String>) -> Self {
        Font {
            name: name.into(),
            ..Font::default()
        }
    }
}

impl StyleComponent for Font {
    const CATEGORY: Category = Category::Font;

    fn append_key_fields(&self, key: &mut KeyBuilder) {
        key.text(&self.name);
        key.field(self.size);
        key.field(self.family);
        key.field(self.scheme);
        key.field(self.vertical_align);
        key.color(self.color.as_ref());
        key.flag(self.bold);
        key.flag(self.italic);
        key.flag(self.underline);
        key.flag(self.double_underline);
        key.flag(self.strike);
    }

    fn merge_from(&mut self, source: &Self) {
        let baseline = Font::default();
        if source.name != baseline.name {
            self.name = source.name.clone();
        }
        if source.size != baseline.size {
            self.size = source.size;
        }
        if source.family != baseline.family {
            self.family = source.family;
        }
        if source.scheme != baseline.scheme {
            self.scheme = source.scheme;
        }
        if source.vertical_align != baseline.vertical_align {
            self.vertical_align = source.vertical_align;
        }
        if source.color != baseline.color {
            self.color = source.color.clone();
        }
        if source.bold != baseline.bold {
            self.bold = source.bold;
        }
        if source.italic != baseline.italic {
            self.italic = source.italic;
        }
        if source.underline != baseline.underline {
            self.underline = source.underline;
        }
        if source.double_underline != baseline.double_underline {
            self.double_underline = source.double_underline;
        }
        if source.strike != baseline.strike {
            self.strike = source.strike;
        }
    }
}
