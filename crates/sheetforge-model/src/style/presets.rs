//! Ready-made style constructors.
//!
//! Every function returns a fresh value; there is no shared cache, so a
//! caller mutating the result can never affect later calls.

use super::{
    Border, CellFormat, Color, Fill, Font, FormatNumber, LineStyle, NumberFormat, Style,
    StyleError,
};

pub fn bold() -> Style {
    Style::new().with_font(Font {
        bold: true,
        ..Font::default()
    })
}

pub fn italic() -> Style {
    Style::new().with_font(Font {
        italic: true,
        ..Font::default()
    })
}

pub fn bold_italic() -> Style {
    Style::new().with_font(Font {
        bold: true,
        italic: true,
        ..Font::default()
    })
}

pub fn underline() -> Style {
    Style::new().with_font(Font {
        underline: true,
        ..Font::default()
    })
}

pub fn double_underline() -> Style {
    Style::new().with_font(Font {
        underline: true,
        double_underline: true,
        ..Font::default()
    })
}

pub fn strikethrough() -> Style {
    Style::new().with_font(Font {
        strike: true,
        ..Font::default()
    })
}

/// The canonical date style (built-in format 14, `m/d/yyyy`).
pub fn date_format() -> Style {
    Style::new().with_number_format(date_number_format())
}

/// The canonical time style (built-in format 21, `h:mm:ss`).
pub fn time_format() -> Style {
    Style::new().with_number_format(time_number_format())
}

/// Two decimal places (built-in format 2, `0.00`).
pub fn round_format() -> Style {
    Style::new().with_number_format(NumberFormat::builtin(FormatNumber::Decimal))
}

/// Thin border on all four edges.
pub fn border_frame() -> Style {
    Style::new().with_border(Border::outline(LineStyle::Thin))
}

/// Thin outline with a medium bottom edge and a bold font, for header rows.
pub fn border_frame_header() -> Style {
    let mut border = Border::outline(LineStyle::Thin);
    border.bottom.style = LineStyle::Medium;
    Style::new().with_border(border).with_font(Font {
        bold: true,
        ..Font::default()
    })
}

/// Font colored with the given hex value (6 or 8 digits).
pub fn colorized_text(hex: &str) -> Result<Style, StyleError> {
    let color = Color::from_hex(hex)?;
    Ok(Style::new().with_font(Font {
        color: Some(color),
        ..Font::default()
    }))
}

/// Solid background fill of the given hex value (6 or 8 digits).
pub fn colorized_background(hex: &str) -> Result<Style, StyleError> {
    let color = Color::from_hex(hex)?;
    Ok(Style::new().with_fill(Fill::solid(color)))
}

/// Default-sized font with the given face name.
pub fn font(name: impl Into<String>) -> Style {
    Style::new().with_font(Font::named(name))
}

/// Marker style applied to the non-anchor cells of a merged range at save
/// time. Only `force_apply_alignment` is set, so merging it into an existing
/// format never disturbs other fields.
pub fn merge_cell_style() -> Style {
    Style::new().with_cell_format(CellFormat {
        force_apply_alignment: true,
        ..CellFormat::default()
    })
}

/// Component used when a date-typed cell has no explicit number format.
pub fn date_number_format() -> NumberFormat {
    NumberFormat::builtin(FormatNumber::DateShort)
}

/// Component used when a time-typed cell has no explicit number format.
pub fn time_number_format() -> NumberFormat {
    NumberFormat::builtin(FormatNumber::Time24HourSeconds)
}
