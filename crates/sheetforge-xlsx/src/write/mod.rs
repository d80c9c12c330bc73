//! Container assembly.
//!
//! Parts are rendered to strings first and zipped in a fixed order, so the
//! same workbook always serializes to the same bytes.

mod styles;
mod worksheet;

use std::io::{Cursor, Write};
use std::path::Path;

use thiserror::Error;
use zip::write::FileOptions;

use sheetforge_model::{RangeError, StyleError, Workbook};

use crate::shared_strings::SharedStrings;
use crate::styles::{resolve_workbook, ResolvedWorkbook};
use crate::xml::escape_attr;

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("workbook has no worksheets")]
    EmptyWorkbook,
    #[error("style error: {0}")]
    Style(#[from] StyleError),
    #[error("range error: {0}")]
    Range(#[from] RangeError),
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Serializes the workbook into an in-memory xlsx container.
pub fn write_to_vec(workbook: &Workbook) -> Result<Vec<u8>, SaveError> {
    if workbook.sheets().is_empty() {
        return Err(SaveError::EmptyWorkbook);
    }
    let resolved = resolve_workbook(workbook)?;
    let parts = build_parts(&resolved)?;

    let mut buffer = Cursor::new(Vec::new());
    {
        let mut zip = zip::ZipWriter::new(&mut buffer);
        let options =
            FileOptions::<()>::default().compression_method(zip::CompressionMethod::Deflated);
        for (name, xml) in &parts {
            zip.start_file(name.as_str(), options)?;
            zip.write_all(xml.as_bytes())?;
        }
        zip.finish()?;
    }
    Ok(buffer.into_inner())
}

/// Serializes the workbook and writes the container to `path`.
pub fn save_to_path(workbook: &Workbook, path: impl AsRef<Path>) -> Result<(), SaveError> {
    let bytes = write_to_vec(workbook)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

fn build_parts(resolved: &ResolvedWorkbook) -> Result<Vec<(String, String)>, SaveError> {
    // Sheets render first: text cells fill the shared string table, and the
    // content types and relationships depend on whether it ended up empty.
    let mut strings = SharedStrings::new();
    let mut sheet_parts = Vec::with_capacity(resolved.sheets.len());
    for (position, sheet) in resolved.sheets.iter().enumerate() {
        let name = format!("xl/worksheets/sheet{}.xml", position + 1);
        sheet_parts.push((name, worksheet::sheet_xml(sheet, &mut strings)?));
    }

    let mut parts = vec![
        (
            "[Content_Types].xml".to_string(),
            content_types_xml(resolved, &strings),
        ),
        ("_rels/.rels".to_string(), rels_xml()),
        ("xl/workbook.xml".to_string(), workbook_xml(resolved)),
        (
            "xl/_rels/workbook.xml.rels".to_string(),
            workbook_rels_xml(resolved, &strings),
        ),
        (
            "xl/styles.xml".to_string(),
            styles::styles_xml(&resolved.tables),
        ),
    ];
    parts.extend(sheet_parts);
    if !strings.is_empty() {
        parts.push(("xl/sharedStrings.xml".to_string(), strings.to_xml()));
    }
    Ok(parts)
}

fn content_types_xml(resolved: &ResolvedWorkbook, strings: &SharedStrings) -> String {
    let mut out = String::new();
    out.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    out.push('\n');
    out.push_str(r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#);
    out.push('\n');
    out.push_str(
        r#"  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
    );
    out.push('\n');
    out.push_str(r#"  <Default Extension="xml" ContentType="application/xml"/>"#);
    out.push('\n');
    out.push_str(
        r#"  <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>"#,
    );
    out.push('\n');
    out.push_str(
        r#"  <Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>"#,
    );
    out.push('\n');
    for position in 1..=resolved.sheets.len() {
        out.push_str(&format!(
            "  <Override PartName=\"/xl/worksheets/sheet{position}.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml\"/>\n"
        ));
    }
    if !strings.is_empty() {
        out.push_str(
            r#"  <Override PartName="/xl/sharedStrings.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml"/>"#,
        );
        out.push('\n');
    }
    out.push_str("</Types>\n");
    out
}

fn rels_xml() -> String {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>
"#
    .to_owned()
}

fn workbook_xml(resolved: &ResolvedWorkbook) -> String {
    let mut out = String::new();
    out.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    out.push('\n');
    out.push_str(
        r#"<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
    );
    out.push('\n');
    out.push_str("  <sheets>\n");
    for (position, sheet) in resolved.sheets.iter().enumerate() {
        out.push_str(&format!(
            "    <sheet name=\"{}\" sheetId=\"{}\" r:id=\"rId{}\"/>\n",
            escape_attr(&sheet.name),
            sheet.sheet_id,
            position + 1
        ));
    }
    out.push_str("  </sheets>\n");
    out.push_str("</workbook>\n");
    out
}

fn workbook_rels_xml(resolved: &ResolvedWorkbook, strings: &SharedStrings) -> String {
    let mut out = String::new();
    out.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    out.push('\n');
    out.push_str(
        r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );
    out.push('\n');
    let sheet_count = resolved.sheets.len();
    for position in 1..=sheet_count {
        out.push_str(&format!(
            "  <Relationship Id=\"rId{position}\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet\" Target=\"worksheets/sheet{position}.xml\"/>\n"
        ));
    }
    out.push_str(&format!(
        "  <Relationship Id=\"rId{}\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles\" Target=\"styles.xml\"/>\n",
        sheet_count + 1
    ));
    if !strings.is_empty() {
        out.push_str(&format!(
            "  <Relationship Id=\"rId{}\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings\" Target=\"sharedStrings.xml\"/>\n",
            sheet_count + 2
        ));
    }
    out.push_str("</Relationships>\n");
    out
}
