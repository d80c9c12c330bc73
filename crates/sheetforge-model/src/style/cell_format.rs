//! Cell format style component (alignment, rotation, protection, indent).

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Category, KeyBuilder, StyleComponent, StyleError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HorizontalAlign {
    /// No alignment recorded; the format's own default applies.
    #[default]
    None,
    Left,
    Center,
    Right,
    Fill,
    Justify,
    General,
    CenterContinuous,
    Distributed,
}

impl HorizontalAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            HorizontalAlign::None => "none",
            HorizontalAlign::Left => "left",
            HorizontalAlign::Center => "center",
            HorizontalAlign::Right => "right",
            HorizontalAlign::Fill => "fill",
            HorizontalAlign::Justify => "justify",
            HorizontalAlign::General => "general",
            HorizontalAlign::CenterContinuous => "centerContinuous",
            HorizontalAlign::Distributed => "distributed",
        }
    }
}

impl fmt::Display for HorizontalAlign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VerticalAlign {
    /// No alignment recorded; the format's own default applies.
    #[default]
    None,
    Top,
    Center,
    Bottom,
    Justify,
    Distributed,
}

impl VerticalAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerticalAlign::None => "none",
            VerticalAlign::Top => "top",
            VerticalAlign::Center => "center",
            VerticalAlign::Bottom => "bottom",
            VerticalAlign::Justify => "justify",
            VerticalAlign::Distributed => "distributed",
        }
    }
}

impl fmt::Display for VerticalAlign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    #[default]
    Horizontal,
    Vertical,
}

impl TextDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextDirection::Horizontal => "horizontal",
            TextDirection::Vertical => "vertical",
        }
    }
}

impl fmt::Display for TextDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text rotation in degrees. Valid range is [-90, 90]; out-of-range values
/// error rather than clamp.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i16", into = "i16")]
pub struct TextRotation(i16);

impl TextRotation {
    pub const MIN: i16 = -90;
    pub const MAX: i16 = 90;

    pub fn degrees(value: i16) -> Result<Self, StyleError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(StyleError::InvalidRotation(value));
        }
        Ok(TextRotation(value))
    }

    pub fn get(&self) -> i16 {
        self.0
    }
}

impl TryFrom<i16> for TextRotation {
    type Error = StyleError;

    fn try_from(value: i16) -> Result<Self, StyleError> {
        TextRotation::degrees(value)
    }
}

impl From<TextRotation> for i16 {
    fn from(rotation: TextRotation) -> i16 {
        rotation.0
    }
}

impl fmt::Display for TextRotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Indent level. Valid range is [0, 250].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Indent(u16);

impl Indent {
    pub const MAX: u16 = 250;

    pub fn new(value: u16) -> Result<Self, StyleError> {
        if value > Self::MAX {
            return Err(StyleError::InvalidIndent(value));
        }
        Ok(Indent(value))
    }

    pub fn get(&self) -> u16 {
        self.0
    }
}

impl TryFrom<u16> for Indent {
    type Error = StyleError;

    fn try_from(value: u16) -> Result<Self, StyleError> {
        Indent::new(value)
    }
}

impl From<Indent> for u16 {
    fn from(indent: Indent) -> u16 {
        indent.0
    }
}

impl fmt::Display for Indent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Cell format component: alignment, rotation, wrapping, protection flags,
/// and indent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellFormat {
    #[serde(default)]
    pub horizontal: HorizontalAlign,
    #[serde(default)]
    pub vertical: VerticalAlign,
    #[serde(default)]
    pub text_rotation: TextRotation,
    #[serde(default)]
    pub text_direction: TextDirection,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub wrap_text: bool,
    /// When set, the emitted record asks the consumer to apply alignment
    /// even if no alignment attribute is present. Merged ranges use this to
    /// mark their non-anchor cells.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub force_apply_alignment: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub locked: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub hidden: bool,
    #[serde(default)]
    pub indent: Indent,
}

impl CellFormat {
    /// True when an alignment element would carry at least one attribute.
    pub fn has_alignment(&self) -> bool {
        self.horizontal != HorizontalAlign::None
            || self.vertical != VerticalAlign::None
            || self.text_rotation.get() != 0
            || self.text_direction != TextDirection::Horizontal
            || self.wrap_text
            || self.indent.get() != 0
    }

    /// True when a protection element would carry at least one attribute.
    pub fn has_protection(&self) -> bool {
        self.locked || self.hidden
    }
}

impl StyleComponent for CellFormat {
    const CATEGORY: Category = Category::CellFormat;

    fn append_key_fields(&self, key: &mut KeyBuilder) {
        key.field(self.horizontal);
        key.field(self.vertical);
        key.field(self.text_rotation);
        key.field(self.text_direction);
        key.flag(self.wrap_text);
        key.flag(self.force_apply_alignment);
        key.flag(self.locked);
        key.flag(self.hidden);
        key.field(self.indent);
    }

    fn merge_from(&mut self, source: &Self) {
        let baseline = CellFormat::default();
        if source.horizontal != baseline.horizontal {
            self.horizontal = source.horizontal;
        }
        if source.vertical != baseline.vertical {
            self.vertical = source.vertical;
        }
        if source.text_rotation != baseline.text_rotation {
            self.text_rotation = source.text_rotation;
        }
        if source.text_direction != baseline.text_direction {
            self.text_direction = source.text_direction;
        }
        if source.wrap_text != baseline.wrap_text {
            self.wrap_text = source.wrap_text;
        }
        if source.force_apply_alignment != baseline.force_apply_alignment {
            self.force_apply_alignment = source.force_apply_alignment;
        }
        if source.locked != baseline.locked {
            self.locked = source.locked;
        }
        if source.hidden != baseline.hidden {
            self.hidden = source.hidden;
        }
        if source.indent != baseline.indent {
            self.indent = source.indent;
        }
    }
}
