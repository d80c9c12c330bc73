//! Style descriptors and their components.
//!
//! A [`Style`] is a value-typed description of cell appearance split into
//! five independent components: border, fill, font, number format, and cell
//! format. Styles carry no workbook identity of their own; canonical indices
//! are assigned at save time by interning equal descriptors, where equality
//! is defined by each component's canonical key.
//!
//! Canonical keys are deterministic, category-prefixed, delimiter-joined
//! strings. User text inside a key is escaped so that two distinct field
//! sequences can never collide on the same key.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod border;
mod cell_format;
mod color;
mod fill;
mod font;
mod number_format;
pub mod presets;

pub use border::{Border, BorderEdge, LineStyle};
pub use cell_format::{
    CellFormat, HorizontalAlign, Indent, TextDirection, TextRotation, VerticalAlign,
};
pub use color::Color;
pub use fill::{Fill, PatternFill, DEFAULT_INDEXED_COLOR};
pub use font::{Font, FontScheme, FontSize, VerticalTextAlign, DEFAULT_FONT_NAME};
pub use number_format::{CustomFormatId, FormatNumber, NumberFormat, CUSTOM_FORMAT_START};

/// The five style component categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Border,
    Fill,
    Font,
    NumberFormat,
    CellFormat,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Border => "border",
            Category::Fill => "fill",
            Category::Font => "font",
            Category::NumberFormat => "numberformat",
            Category::CellFormat => "cellformat",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while constructing or interning styles.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StyleError {
    #[error("invalid color value: {0:?} (expected 6 or 8 hex digits)")]
    InvalidColor(String),
    #[error("text rotation {0} out of range [-90, 90]")]
    InvalidRotation(i16),
    #[error("indent {0} out of range [0, 250]")]
    InvalidIndent(u16),
    #[error("custom number format id {0} below reserved start {CUSTOM_FORMAT_START}")]
    InvalidCustomFormatId(u32),
    #[error("style has no {category} component")]
    MissingComponent { category: Category },
    #[error("the default style at index 0 cannot be removed")]
    ProtectedDefault,
}

/// Builds a canonical key: the category tag followed by `|`-delimited
/// fields, with `\` and `|` inside field content escaped (backslash first).
#[derive(Debug)]
pub struct KeyBuilder {
    buf: String,
}

impl KeyBuilder {
    pub fn new(category: Category) -> Self {
        KeyBuilder {
            buf: category.as_str().to_owned(),
        }
    }

    fn push_raw(&mut self, raw: &str) {
        self.buf.push('|');
        for ch in raw.chars() {
            match ch {
                '\\' => self.buf.push_str("\\\\"),
                '|' => self.buf.push_str("\\|"),
                other => self.buf.push(other),
            }
        }
    }

    /// Appends any displayable field value.
    pub fn field(&mut self, value: impl fmt::Display) {
        let rendered = value.to_string();
        self.push_raw(&rendered);
    }

    /// Appends free-form text, escaping delimiter characters.
    pub fn text(&mut self, value: &str) {
        self.push_raw(value);
    }

    /// Appends an optional color; `None` contributes an empty field.
    pub fn color(&mut self, value: Option<&Color>) {
        match value {
            Some(color) => self.push_raw(color.as_str()),
            None => self.push_raw(""),
        }
    }

    /// Appends a boolean as `1` or `0`.
    pub fn flag(&mut self, value: bool) {
        self.push_raw(if value { "1" } else { "0" });
    }

    pub fn finish(self) -> String {
        self.buf
    }
}

/// A style component that can be merged and canonically keyed.
pub trait StyleComponent: Clone + Default + PartialEq {
    const CATEGORY: Category;

    /// Appends this component's fields to a key in a fixed order.
    fn append_key_fields(&self, key: &mut KeyBuilder);

    /// Copies onto `self` every field of `source` that differs from a fresh
    /// default. Fields equal to the default leave `self` untouched.
    fn merge_from(&mut self, source: &Self);

    /// The canonical key identifying this component's value.
    fn canonical_key(&self) -> String {
        let mut key = KeyBuilder::new(Self::CATEGORY);
        self.append_key_fields(&mut key);
        key.finish()
    }

    fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

fn slot_key<T: StyleComponent>(slot: &Option<T>) -> String {
    match slot {
        Some(component) => component.canonical_key(),
        None => T::default().canonical_key(),
    }
}

/// A complete style descriptor.
///
/// Each component slot is optional; an empty slot means the component was
/// never touched and is equivalent to that component's default. Equality
/// compares the five effective component keys and ignores the display name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Style {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border: Option<Border>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<Fill>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_format: Option<NumberFormat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell_format: Option<CellFormat>,
    /// Optional display name; metadata only, never part of equality.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Style {
    pub fn new() -> Self {
        Style::default()
    }

    /// The canonical keys of the five effective components, in the fixed
    /// category order border, fill, font, number format, cell format.
    pub fn component_keys(&self) -> [String; 5] {
        [
            slot_key(&self.border),
            slot_key(&self.fill),
            slot_key(&self.font),
            slot_key(&self.number_format),
            slot_key(&self.cell_format),
        ]
    }

    /// Merges `source` onto `self`, component by component.
    ///
    /// For each component present and non-default in `source`, the fields
    /// differing from a fresh default are copied onto `self`'s component
    /// (created as a default if the slot was empty). Empty or default
    /// source components leave `self` unchanged. The display name is not
    /// merged.
    pub fn append(&mut self, source: &Style) -> &mut Self {
        if let Some(src) = &source.border {
            if !src.is_default() {
                self.border.get_or_insert_with(Border::default).merge_from(src);
            }
        }
        if let Some(src) = &source.fill {
            if !src.is_default() {
                self.fill.get_or_insert_with(Fill::default).merge_from(src);
            }
        }
        if let Some(src) = &source.font {
            if !src.is_default() {
                self.font.get_or_insert_with(Font::default).merge_from(src);
            }
        }
        if let Some(src) = &source.number_format {
            if !src.is_default() {
                self.number_format
                    .get_or_insert_with(NumberFormat::default)
                    .merge_from(src);
            }
        }
        if let Some(src) = &source.cell_format {
            if !src.is_default() {
                self.cell_format
                    .get_or_insert_with(CellFormat::default)
                    .merge_from(src);
            }
        }
        self
    }

    /// Returns a copy with every empty component slot filled with that
    /// component's default, so all five are present.
    pub fn materialize(&self) -> Style {
        Style {
            border: Some(self.border.clone().unwrap_or_default()),
            fill: Some(self.fill.clone().unwrap_or_default()),
            font: Some(self.font.clone().unwrap_or_default()),
            number_format: Some(self.number_format.clone().unwrap_or_default()),
            cell_format: Some(self.cell_format.clone().unwrap_or_default()),
            name: self.name.clone(),
        }
    }

    pub fn is_default(&self) -> bool {
        *self == Style::default()
    }

    pub fn with_border(mut self, border: Border) -> Self {
        self.border = Some(border);
        self
    }

    pub fn with_fill(mut self, fill: Fill) -> Self {
        self.fill = Some(fill);
        self
    }

    pub fn with_font(mut self, font: Font) -> Self {
        self.font = Some(font);
        self
    }

    pub fn with_number_format(mut self, number_format: NumberFormat) -> Self {
        self.number_format = Some(number_format);
        self
    }

    pub fn with_cell_format(mut self, cell_format: CellFormat) -> Self {
        self.cell_format = Some(cell_format);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl PartialEq for Style {
    fn eq(&self, other: &Self) -> bool {
        self.component_keys() == other.component_keys()
    }
}

impl Eq for Style {}
