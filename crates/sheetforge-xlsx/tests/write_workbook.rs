use std::fs;
use std::io::{Cursor, Read};

use sheetforge_model::style::{presets, NumberFormat, Style};
use sheetforge_model::{Address, Range, Workbook};
use sheetforge_xlsx::{save_to_path, write_to_vec, SaveError};
use tempfile::tempdir;
use zip::ZipArchive;

/// A small two-sheet workbook touching every cell kind: styled text, a
/// merged title row, a custom number format, a date, a bool, a formula, a
/// time, and explicit column/row sizing.
fn report_workbook() -> Result<Workbook, Box<dyn std::error::Error>> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_sheet("Report")?;
    sheet.set_value_with_style(Address::new(0, 0), "Quarterly report", &presets::bold())?;
    sheet.merge_cells(Range::from_a1("A1:C1")?)?;
    sheet.set_value(Address::new(0, 1), "Region")?;
    sheet.set_value_with_style(Address::new(1, 1), "Revenue", &presets::bold())?;
    sheet.set_value(Address::new(0, 2), "North")?;
    let units = Style::new().with_number_format(NumberFormat::custom("0.0#"));
    sheet.set_value_with_style(Address::new(1, 2), 1250.5, &units)?;
    let day = chrono::NaiveDate::from_ymd_opt(2024, 7, 15)
        .ok_or("bad date")?
        .and_hms_opt(0, 0, 0)
        .ok_or("bad time")?;
    sheet.set_value(Address::new(0, 3), day)?;
    sheet.set_value(Address::new(1, 3), true)?;
    sheet.set_formula(Address::new(2, 3), "=SUM(B3:B3)")?;
    sheet.set_value(
        Address::new(0, 4),
        chrono::NaiveTime::from_hms_opt(6, 0, 0).ok_or("bad time")?,
    )?;
    sheet.set_column_width(1, 25.0)?;
    sheet.set_row_height(0, 30.0)?;

    let summary = workbook.add_sheet("Summary")?;
    summary.set_value(Address::new(0, 0), "Region")?;
    Ok(workbook)
}

#[test]
fn container_parts_come_in_a_fixed_order() -> Result<(), Box<dyn std::error::Error>> {
    let bytes = write_to_vec(&report_workbook()?)?;
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let names: Vec<String> = (0..archive.len())
        .map(|i| archive.by_index(i).map(|f| f.name().to_string()))
        .collect::<Result<_, _>>()?;
    assert_eq!(
        names,
        [
            "[Content_Types].xml",
            "_rels/.rels",
            "xl/workbook.xml",
            "xl/_rels/workbook.xml.rels",
            "xl/styles.xml",
            "xl/worksheets/sheet1.xml",
            "xl/worksheets/sheet2.xml",
            "xl/sharedStrings.xml",
        ]
    );
    Ok(())
}

#[test]
fn styles_part_reflects_the_canonical_tables() -> Result<(), Box<dyn std::error::Error>> {
    let bytes = write_to_vec(&report_workbook()?)?;
    let xml = read_part(&bytes, "xl/styles.xml")?;
    let doc = roxmltree::Document::parse(&xml)?;

    let num_fmts = find_all(&doc, "numFmt");
    assert_eq!(num_fmts.len(), 1);
    assert_eq!(num_fmts[0].attribute("numFmtId"), Some("164"));
    assert_eq!(num_fmts[0].attribute("formatCode"), Some("0.0#"));

    assert_eq!(section_count(&doc, "fonts")?, 2, "default + bold");
    let fonts = find_all(&doc, "font");
    assert!(fonts[1].children().any(|c| c.tag_name().name() == "b"));

    let fills = find_all(&doc, "patternFill");
    assert_eq!(fills[0].attribute("patternType"), Some("none"));
    assert_eq!(fills[1].attribute("patternType"), Some("gray125"));

    assert_eq!(section_count(&doc, "borders")?, 1);
    assert_eq!(
        section_count(&doc, "cellXfs")?,
        6,
        "default, bold, merge marker, custom format, date, time"
    );

    let xfs: Vec<_> = find_all(&doc, "cellXfs")[0]
        .children()
        .filter(|n| n.is_element())
        .collect();
    assert_eq!(xfs[0].attribute("applyFont"), None);
    assert_eq!(xfs[1].attribute("applyFont"), Some("1"));
    assert_eq!(xfs[2].attribute("applyAlignment"), Some("1"));
    assert!(
        !xfs[2].children().any(|c| c.is_element()),
        "marker xf carries the apply flag without an alignment element"
    );
    assert_eq!(xfs[3].attribute("numFmtId"), Some("164"));
    assert_eq!(xfs[4].attribute("numFmtId"), Some("14"));
    assert_eq!(xfs[4].attribute("applyNumberFormat"), Some("1"));
    assert_eq!(xfs[5].attribute("numFmtId"), Some("21"));

    let cell_style = find_all(&doc, "cellStyle");
    assert_eq!(cell_style[0].attribute("name"), Some("Normal"));
    assert_eq!(cell_style[0].attribute("xfId"), Some("0"));
    assert_eq!(cell_style[0].attribute("builtinId"), Some("0"));
    Ok(())
}

#[test]
fn sheet_part_references_the_interned_indices() -> Result<(), Box<dyn std::error::Error>> {
    let bytes = write_to_vec(&report_workbook()?)?;
    let xml = read_part(&bytes, "xl/worksheets/sheet1.xml")?;

    assert!(xml.contains(r#"<c r="A1" s="1" t="s"><v>0</v></c>"#));
    // Merge holes exist as styled empty cells sharing one marker descriptor.
    assert!(xml.contains(r#"<c r="B1" s="2"/>"#));
    assert!(xml.contains(r#"<c r="C1" s="2"/>"#));
    assert!(xml.contains(r#"<c r="B3" s="3"><v>1250.5</v></c>"#));
    assert!(xml.contains(r#"<c r="A4" s="4"><v>45488</v></c>"#));
    assert!(xml.contains(r#"<c r="B4" t="b"><v>1</v></c>"#));
    assert!(xml.contains(r#"<c r="C4"><f>SUM(B3:B3)</f></c>"#));
    assert!(xml.contains(r#"<c r="A5" s="5"><v>0.25</v></c>"#));

    assert!(xml.contains(r#"<row r="1" ht="30" customHeight="1">"#));
    assert!(xml.contains(r#"<col min="2" max="2" width="25" customWidth="1"/>"#));
    assert!(xml.contains(r#"<mergeCells count="1"><mergeCell ref="A1:C1"/></mergeCells>"#));
    Ok(())
}

#[test]
fn merged_regions_emit_every_cell_of_the_range() -> Result<(), Box<dyn std::error::Error>> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_sheet("Board")?;
    sheet.merge_cells(Range::from_a1("A1:B2")?)?;
    sheet.set_value(Address::new(2, 2), "sentinel")?;

    let bytes = write_to_vec(&workbook)?;
    let xml = read_part(&bytes, "xl/worksheets/sheet1.xml")?;
    let doc = roxmltree::Document::parse(&xml)?;

    let refs: Vec<&str> = find_all(&doc, "c")
        .iter()
        .filter_map(|c| c.attribute("r"))
        .collect();
    assert_eq!(refs, ["A1", "B1", "A2", "B2", "C3"]);

    // The untouched anchor stays on the default descriptor; the rest of
    // the range shares the marker style.
    assert!(xml.contains(r#"<c r="A1"/>"#));
    assert!(xml.contains(r#"<c r="B1" s="1"/>"#));
    assert!(xml.contains(r#"<c r="B2" s="1"/>"#));
    Ok(())
}

#[test]
fn shared_strings_deduplicate_across_sheets() -> Result<(), Box<dyn std::error::Error>> {
    let bytes = write_to_vec(&report_workbook()?)?;
    let xml = read_part(&bytes, "xl/sharedStrings.xml")?;
    let doc = roxmltree::Document::parse(&xml)?;

    let sst = doc.root_element();
    assert_eq!(sst.attribute("count"), Some("5"), "five text cells in total");
    assert_eq!(sst.attribute("uniqueCount"), Some("4"));

    let texts: Vec<&str> = doc
        .descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == "t")
        .map(|n| n.text().unwrap_or_default())
        .collect();
    assert_eq!(texts, ["Quarterly report", "Region", "Revenue", "North"]);

    // The second sheet's "Region" resolves to the shared index 1.
    let sheet2 = read_part(&bytes, "xl/worksheets/sheet2.xml")?;
    assert!(sheet2.contains(r#"<c r="A1" t="s"><v>1</v></c>"#));
    Ok(())
}

#[test]
fn workbook_part_lists_sheets_with_relationship_ids() -> Result<(), Box<dyn std::error::Error>> {
    let bytes = write_to_vec(&report_workbook()?)?;
    let xml = read_part(&bytes, "xl/workbook.xml")?;
    assert!(xml.contains(r#"<sheet name="Report" sheetId="1" r:id="rId1"/>"#));
    assert!(xml.contains(r#"<sheet name="Summary" sheetId="2" r:id="rId2"/>"#));

    let rels = read_part(&bytes, "xl/_rels/workbook.xml.rels")?;
    assert!(rels.contains(r#"Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml""#));
    assert!(rels.contains(r#"Id="rId4" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings" Target="sharedStrings.xml""#));
    Ok(())
}

#[test]
fn identical_workbooks_serialize_to_identical_bytes() -> Result<(), Box<dyn std::error::Error>> {
    let first = write_to_vec(&report_workbook()?)?;
    let second = write_to_vec(&report_workbook()?)?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn save_to_path_writes_a_readable_container() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("report.xlsx");
    save_to_path(&report_workbook()?, &path)?;

    let bytes = fs::read(&path)?;
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut xml = String::new();
    archive.by_name("xl/workbook.xml")?.read_to_string(&mut xml)?;
    assert!(xml.contains("Report"));
    Ok(())
}

#[test]
fn text_free_workbooks_omit_the_shared_string_part() -> Result<(), Box<dyn std::error::Error>> {
    let mut workbook = Workbook::new();
    workbook
        .add_sheet("Numbers")?
        .set_value(Address::new(0, 0), 42.0)?;
    let bytes = write_to_vec(&workbook)?;

    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    assert!(archive.by_name("xl/sharedStrings.xml").is_err());

    let content_types = read_part_from(&mut archive, "[Content_Types].xml")?;
    assert!(!content_types.contains("sharedStrings"));
    Ok(())
}

#[test]
fn saving_an_empty_workbook_fails() {
    match write_to_vec(&Workbook::new()) {
        Err(SaveError::EmptyWorkbook) => {}
        other => panic!("expected EmptyWorkbook, got {other:?}"),
    }
}

fn read_part(bytes: &[u8], name: &str) -> Result<String, Box<dyn std::error::Error>> {
    let mut archive = ZipArchive::new(Cursor::new(bytes.to_vec()))?;
    read_part_from(&mut archive, name)
}

fn read_part_from(
    archive: &mut ZipArchive<Cursor<Vec<u8>>>,
    name: &str,
) -> Result<String, Box<dyn std::error::Error>> {
    let mut xml = String::new();
    archive.by_name(name)?.read_to_string(&mut xml)?;
    Ok(xml)
}

fn find_all<'a, 'input>(
    doc: &'a roxmltree::Document<'input>,
    tag: &str,
) -> Vec<roxmltree::Node<'a, 'input>> {
    doc.descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == tag)
        .collect()
}

fn section_count(
    doc: &roxmltree::Document,
    tag: &str,
) -> Result<usize, Box<dyn std::error::Error>> {
    let section = doc
        .descendants()
        .find(|n| n.is_element() && n.tag_name().name() == tag)
        .ok_or_else(|| format!("styles.xml missing <{tag}>"))?;
    let count = section
        .attribute("count")
        .and_then(|v| v.parse::<usize>().ok())
        .ok_or_else(|| format!("<{tag}> missing count"))?;
    let children = section.children().filter(|n| n.is_element()).count();
    assert_eq!(count, children, "<{tag}> count matches its children");
    Ok(count)
}
