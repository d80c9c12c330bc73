//! Worksheet part emission.

use std::collections::BTreeSet;

use sheetforge_model::{date_serial, time_serial, Address, CellValue};

use crate::shared_strings::SharedStrings;
use crate::styles::{ResolvedCell, ResolvedSheet};
use crate::write::SaveError;
use crate::xml::escape_text;

/// Renders one worksheet part. Text cells are interned into the shared
/// string table as they are encountered, so sheets must be rendered in
/// workbook order for stable string indices.
pub(crate) fn sheet_xml(
    sheet: &ResolvedSheet,
    strings: &mut SharedStrings,
) -> Result<String, SaveError> {
    let mut out = String::new();
    out.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    out.push('\n');
    out.push_str(
        r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
    );
    out.push('\n');

    if !sheet.column_widths.is_empty() {
        out.push_str("  <cols>\n");
        for (&col, &width) in &sheet.column_widths {
            out.push_str(&format!(
                "    <col min=\"{0}\" max=\"{0}\" width=\"{1}\" customWidth=\"1\"/>\n",
                col + 1,
                width
            ));
        }
        out.push_str("  </cols>\n");
    }

    out.push_str("  <sheetData>\n");
    // A row appears when it holds cells or carries an explicit height.
    let mut rows: BTreeSet<u32> = sheet.cells.keys().map(|&(row, _)| row).collect();
    rows.extend(sheet.row_heights.keys().copied());
    for row in rows {
        out.push_str(&format!("    <row r=\"{}\"", row + 1));
        if let Some(height) = sheet.row_heights.get(&row) {
            out.push_str(&format!(" ht=\"{height}\" customHeight=\"1\""));
        }
        out.push('>');
        for (&(_, col), cell) in sheet.cells.range((row, 0)..=(row, u32::MAX)) {
            out.push_str(&cell_xml(Address::new(col, row), cell, strings)?);
        }
        out.push_str("</row>\n");
    }
    out.push_str("  </sheetData>\n");

    if !sheet.merges.is_empty() {
        out.push_str(&format!(
            "  <mergeCells count=\"{}\">",
            sheet.merges.len()
        ));
        for merge in &sheet.merges {
            out.push_str(&format!("<mergeCell ref=\"{merge}\"/>"));
        }
        out.push_str("</mergeCells>\n");
    }

    out.push_str("</worksheet>\n");
    Ok(out)
}

fn cell_xml(
    addr: Address,
    cell: &ResolvedCell,
    strings: &mut SharedStrings,
) -> Result<String, SaveError> {
    let mut out = format!("<c r=\"{}\"", addr.to_a1());
    if cell.style != 0 {
        out.push_str(&format!(" s=\"{}\"", cell.style));
    }
    match &cell.value {
        CellValue::Empty => out.push_str("/>"),
        CellValue::Bool(b) => {
            out.push_str(&format!(" t=\"b\"><v>{}</v></c>", u8::from(*b)));
        }
        CellValue::Number(n) => {
            out.push_str(&format!("><v>{n}</v></c>"));
        }
        CellValue::Text(text) => {
            let index = strings.intern(text);
            out.push_str(&format!(" t=\"s\"><v>{index}</v></c>"));
        }
        CellValue::Date(dt) => {
            let serial = date_serial(dt)?;
            out.push_str(&format!("><v>{serial}</v></c>"));
        }
        CellValue::Time(t) => {
            out.push_str(&format!("><v>{}</v></c>", time_serial(t)));
        }
        CellValue::Formula(text) => {
            out.push_str(&format!("><f>{}</f></c>", escape_text(text)));
        }
    }
    Ok(out)
}
