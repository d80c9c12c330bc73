//! styles.xml emission from the frozen canonical tables.

use sheetforge_model::style::{
    Border, BorderEdge, CellFormat, Fill, Font, FontScheme, HorizontalAlign, LineStyle,
    PatternFill, TextDirection, VerticalAlign, VerticalTextAlign,
};

use crate::styles::{StyleEntry, StyleTables};
use crate::xml::escape_attr;

/// Sections appear in the order consumers require: number formats first,
/// then fonts, fills, borders, and only then the xf records that reference
/// them by index.
pub(crate) fn styles_xml(tables: &StyleTables) -> String {
    let mut out = String::new();
    out.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    out.push('\n');
    out.push_str(
        r#"<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
    );
    out.push('\n');

    if !tables.custom_format_ids.is_empty() {
        let mut formats: Vec<(u32, &str)> = tables
            .custom_format_ids
            .iter()
            .map(|(&nf_idx, &id)| (id, tables.number_formats[nf_idx as usize].custom_code.as_str()))
            .collect();
        formats.sort_by_key(|&(id, _)| id);

        out.push_str(&format!("  <numFmts count=\"{}\">\n", formats.len()));
        for (id, code) in formats {
            out.push_str(&format!(
                "    <numFmt numFmtId=\"{id}\" formatCode=\"{}\"/>\n",
                escape_attr(code)
            ));
        }
        out.push_str("  </numFmts>\n");
    }

    out.push_str(&format!("  <fonts count=\"{}\">\n", tables.fonts.len()));
    for font in &tables.fonts {
        out.push_str("    ");
        out.push_str(&font_xml(font));
        out.push('\n');
    }
    out.push_str("  </fonts>\n");

    out.push_str(&format!("  <fills count=\"{}\">\n", tables.fills.len()));
    for fill in &tables.fills {
        out.push_str("    ");
        out.push_str(&fill_xml(fill));
        out.push('\n');
    }
    out.push_str("  </fills>\n");

    out.push_str(&format!("  <borders count=\"{}\">\n", tables.borders.len()));
    for border in &tables.borders {
        out.push_str("    ");
        out.push_str(&border_xml(border));
        out.push('\n');
    }
    out.push_str("  </borders>\n");

    out.push_str(
        r#"  <cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs>"#,
    );
    out.push('\n');

    out.push_str(&format!("  <cellXfs count=\"{}\">\n", tables.styles.len()));
    for entry in &tables.styles {
        out.push_str("    ");
        out.push_str(&xf_xml(tables, entry));
        out.push('\n');
    }
    out.push_str("  </cellXfs>\n");

    out.push_str(
        r#"  <cellStyles count="1"><cellStyle name="Normal" xfId="0" builtinId="0"/></cellStyles>"#,
    );
    out.push('\n');
    out.push_str(r#"  <dxfs count="0"/>"#);
    out.push('\n');
    out.push_str("</styleSheet>\n");
    out
}

fn font_xml(font: &Font) -> String {
    let mut out = String::from("<font>");
    if font.bold {
        out.push_str("<b/>");
    }
    if font.italic {
        out.push_str("<i/>");
    }
    if font.double_underline {
        out.push_str(r#"<u val="double"/>"#);
    } else if font.underline {
        out.push_str("<u/>");
    }
    if font.strike {
        out.push_str("<strike/>");
    }
    if font.vertical_align != VerticalTextAlign::None {
        out.push_str(&format!(
            "<vertAlign val=\"{}\"/>",
            font.vertical_align.as_str()
        ));
    }
    out.push_str(&format!("<sz val=\"{}\"/>", font.size));
    if let Some(color) = &font.color {
        out.push_str(&format!("<color rgb=\"{}\"/>", color.to_argb()));
    }
    out.push_str(&format!("<name val=\"{}\"/>", escape_attr(&font.name)));
    out.push_str(&format!("<family val=\"{}\"/>", font.family));
    if font.scheme != FontScheme::None {
        out.push_str(&format!("<scheme val=\"{}\"/>", font.scheme.as_str()));
    }
    out.push_str("</font>");
    out
}

fn fill_xml(fill: &Fill) -> String {
    let mut out = String::from("<fill><patternFill patternType=\"");
    out.push_str(fill.pattern.as_str());
    out.push('"');

    let mut colors = String::new();
    if let Some(fg) = &fill.foreground {
        colors.push_str(&format!("<fgColor rgb=\"{}\"/>", fg.to_argb()));
    }
    if let Some(bg) = &fill.background {
        colors.push_str(&format!("<bgColor rgb=\"{}\"/>", bg.to_argb()));
    } else if fill.pattern == PatternFill::Solid {
        colors.push_str(&format!("<bgColor indexed=\"{}\"/>", fill.indexed_color));
    }

    if colors.is_empty() {
        out.push_str("/></fill>");
    } else {
        out.push('>');
        out.push_str(&colors);
        out.push_str("</patternFill></fill>");
    }
    out
}

fn border_xml(border: &Border) -> String {
    let mut out = String::from("<border");
    if border.diagonal_up {
        out.push_str(r#" diagonalUp="1""#);
    }
    if border.diagonal_down {
        out.push_str(r#" diagonalDown="1""#);
    }
    out.push('>');
    for (name, edge) in [
        ("left", &border.left),
        ("right", &border.right),
        ("top", &border.top),
        ("bottom", &border.bottom),
        ("diagonal", &border.diagonal),
    ] {
        out.push_str(&border_edge_xml(name, edge));
    }
    out.push_str("</border>");
    out
}

fn border_edge_xml(name: &str, edge: &BorderEdge) -> String {
    if edge.style == LineStyle::None && edge.color.is_none() {
        return format!("<{name}/>");
    }
    let mut out = format!("<{name}");
    if edge.style != LineStyle::None {
        out.push_str(&format!(" style=\"{}\"", edge.style.as_str()));
    }
    match &edge.color {
        Some(color) => {
            out.push_str(&format!("><color rgb=\"{}\"/></{name}>", color.to_argb()));
        }
        None => out.push_str("/>"),
    }
    out
}

fn xf_xml(tables: &StyleTables, entry: &StyleEntry) -> String {
    let ids = entry.indices;
    let num_fmt_id = tables.num_fmt_id(ids.number_format);
    let format = &tables.cell_formats[ids.cell_format as usize];

    let mut out = format!(
        "<xf numFmtId=\"{num_fmt_id}\" fontId=\"{}\" fillId=\"{}\" borderId=\"{}\" xfId=\"0\"",
        ids.font, ids.fill, ids.border
    );
    if num_fmt_id != 0 {
        out.push_str(r#" applyNumberFormat="1""#);
    }
    if ids.font != 0 {
        out.push_str(r#" applyFont="1""#);
    }
    if ids.fill != 0 {
        out.push_str(r#" applyFill="1""#);
    }
    if ids.border != 0 {
        out.push_str(r#" applyBorder="1""#);
    }

    let alignment = format.has_alignment().then(|| alignment_xml(format));
    let protection = format.has_protection().then(|| protection_xml(format));

    if alignment.is_some() || format.force_apply_alignment {
        out.push_str(r#" applyAlignment="1""#);
    }
    if protection.is_some() {
        out.push_str(r#" applyProtection="1""#);
    }

    if alignment.is_none() && protection.is_none() {
        out.push_str("/>");
        return out;
    }
    out.push('>');
    if let Some(alignment) = alignment {
        out.push_str(&alignment);
    }
    if let Some(protection) = protection {
        out.push_str(&protection);
    }
    out.push_str("</xf>");
    out
}

fn alignment_xml(format: &CellFormat) -> String {
    let mut out = String::from("<alignment");
    if format.horizontal != HorizontalAlign::None {
        out.push_str(&format!(" horizontal=\"{}\"", format.horizontal.as_str()));
    }
    if format.vertical != VerticalAlign::None {
        out.push_str(&format!(" vertical=\"{}\"", format.vertical.as_str()));
    }
    if let Some(rotation) = effective_rotation(format) {
        out.push_str(&format!(" textRotation=\"{rotation}\""));
    }
    if format.wrap_text {
        out.push_str(r#" wrapText="1""#);
    }
    if format.indent.get() != 0 {
        out.push_str(&format!(" indent=\"{}\"", format.indent.get()));
    }
    out.push_str("/>");
    out
}

/// The stored rotation is in signed degrees; the emitted attribute encodes
/// downward angles as 90 + |degrees| and stacked (vertical) text as 255.
fn effective_rotation(format: &CellFormat) -> Option<u16> {
    if format.text_direction == TextDirection::Vertical {
        return Some(255);
    }
    let degrees = format.text_rotation.get();
    if degrees == 0 {
        None
    } else if degrees < 0 {
        Some((90 - degrees) as u16)
    } else {
        Some(degrees as u16)
    }
}

fn protection_xml(format: &CellFormat) -> String {
    let mut out = String::from("<protection");
    if format.locked {
        out.push_str(r#" locked="1""#);
    }
    if format.hidden {
        out.push_str(r#" hidden="1""#);
    }
    out.push_str("/>");
    out
}
