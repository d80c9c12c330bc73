//! Border style component.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::color::Color;
use super::{Category, KeyBuilder, StyleComponent};

/// Line styles a border edge can take.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LineStyle {
    #[default]
    None,
    Hair,
    Dotted,
    DashDotDot,
    DashDot,
    Dashed,
    MediumDashDotDot,
    SlantDashDot,
    MediumDashDot,
    MediumDashed,
    Medium,
    Thin,
    Double,
    Thick,
}

impl LineStyle {
    /// The token the document format uses for this line style.
    pub fn as_str(&self) -> &'static str {
        match self {
            LineStyle::None => "none",
            LineStyle::Hair => "hair",
            LineStyle::Dotted => "dotted",
            LineStyle::DashDotDot => "dashDotDot",
            LineStyle::DashDot => "dashDot",
            LineStyle::Dashed => "dashed",
            LineStyle::MediumDashDotDot => "mediumDashDotDot",
            LineStyle::SlantDashDot => "slantDashDot",
            LineStyle::MediumDashDot => "mediumDashDot",
            LineStyle::MediumDashed => "mediumDashed",
            LineStyle::Medium => "medium",
            LineStyle::Thin => "thin",
            LineStyle::Double => "double",
            LineStyle::Thick => "thick",
        }
    }
}

impl fmt::Display for LineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One edge of a border: a line style plus an optional color.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorderEdge {
    #[serde(default, skip_serializing_if = "is_default_line")]
    pub style: LineStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

fn is_default_line(style: &LineStyle) -> bool {
    *style == LineStyle::None
}

impl BorderEdge {
    pub fn new(style: LineStyle) -> Self {
        BorderEdge { style, color: None }
    }

    pub fn colored(style: LineStyle, color: Color) -> Self {
        BorderEdge {
            style,
            color: Some(color),
        }
    }
}

/// Border component: the four outer edges, the diagonal, and its direction
/// flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Border {
    #[serde(default)]
    pub left: BorderEdge,
    #[serde(default)]
    pub right: BorderEdge,
    #[serde(default)]
    pub top: BorderEdge,
    #[serde(default)]
    pub bottom: BorderEdge,
    #[serde(default)]
    pub diagonal: BorderEdge,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub diagonal_up: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub diagonal_down: bool,
}

impl Border {
    /// A border with the same line style on all four outer edges.
    pub fn outline(style: LineStyle) -> Self {
        let edge = BorderEdge::new(style);
        Border {
            left: edge.clone(),
            right: edge.clone(),
            top: edge.clone(),
            bottom: edge,
            ..Border::default()
        }
    }
}

impl StyleComponent for Border {
    const CATEGORY: Category = Category::Border;

    fn append_key_fields(&self, key: &mut KeyBuilder) {
        for edge in [&self.left, &self.right, &self.top, &self.bottom, &self.diagonal] {
            key.field(edge.style);
            key.color(edge.color.as_ref());
        }
        key.flag(self.diagonal_up);
        key.flag(self.diagonal_down);
    }

    fn merge_from(&mut self, source: &Self) {
        let baseline = Border::default();
        if source.left != baseline.left {
            self.left = source.left.clone();
        }
        if source.right != baseline.right {
            self.right = source.right.clone();
        }
        if source.top != baseline.top {
            self.top = source.top.clone();
        }
        if source.bottom != baseline.bottom {
            self.bottom = source.bottom.clone();
        }
        if source.diagonal != baseline.diagonal {
            self.diagonal = source.diagonal.clone();
        }
        if source.diagonal_up != baseline.diagonal_up {
            self.diagonal_up = source.diagonal_up;
        }
        if source.diagonal_down != baseline.diagonal_down {
            self.diagonal_down = source.diagonal_down;
        }
    }
}
