//! Fill style component.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::color::Color;
use super::{Category, KeyBuilder, StyleComponent};

/// The closed set of fill patterns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PatternFill {
    #[default]
    None,
    Solid,
    DarkGray,
    MediumGray,
    LightGray,
    Gray0625,
    Gray125,
}

impl PatternFill {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternFill::None => "none",
            PatternFill::Solid => "solid",
            PatternFill::DarkGray => "darkGray",
            PatternFill::MediumGray => "mediumGray",
            PatternFill::LightGray => "lightGray",
            PatternFill::Gray0625 => "gray0625",
            PatternFill::Gray125 => "gray125",
        }
    }
}

impl fmt::Display for PatternFill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The default `bgColor indexed` value emitted with solid fills.
pub const DEFAULT_INDEXED_COLOR: u16 = 64;

/// Fill component: a pattern plus optional foreground/background colors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fill {
    #[serde(default)]
    pub pattern: PatternFill,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreground: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<Color>,
    #[serde(default = "default_indexed_color")]
    pub indexed_color: u16,
}

fn default_indexed_color() -> u16 {
    DEFAULT_INDEXED_COLOR
}

impl Default for Fill {
    fn default() -> Self {
        Fill {
            pattern: PatternFill::None,
            foreground: None,
            background: None,
            indexed_color: DEFAULT_INDEXED_COLOR,
        }
    }
}

impl Fill {
    /// A solid fill in the given color.
    pub fn solid(color: Color) -> Self {
        Fill {
            pattern: PatternFill::Solid,
            foreground: Some(color),
            ..Fill::default()
        }
    }

    /// The gray125 compatibility fill that consumers of the document format
    /// expect at fill table index 1.
    pub fn gray125() -> Self {
        Fill {
            pattern: PatternFill::Gray125,
            ..Fill::default()
        }
    }
}

impl StyleComponent for Fill {
    const CATEGORY: Category = Category::Fill;

    fn append_key_fields(&self, key: &mut KeyBuilder) {
        key.field(self.pattern);
        key.color(self.foreground.as_ref());
        key.color(self.background.as_ref());
        key.field(self.indexed_color);
    }

    fn merge_from(&mut self, source: &Self) {
        let baseline = Fill::default();
        if source.pattern != baseline.pattern {
            self.pattern = source.pattern;
        }
        if source.foreground != baseline.foreground {
            self.foreground = source.foreground.clone();
        }
        if source.background != baseline.background {
            self.background = source.background.clone();
        }
        if source.indexed_color != baseline.indexed_color {
            self.indexed_color = source.indexed_color;
        }
    }
}
