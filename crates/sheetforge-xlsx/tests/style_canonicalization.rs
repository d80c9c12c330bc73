use pretty_assertions::assert_eq;
use proptest::prelude::*;

use sheetforge_model::style::{presets, Color, Fill, NumberFormat, Style, StyleComponent, StyleError};
use sheetforge_model::{Address, Range, Workbook};
use sheetforge_xlsx::{resolve_workbook, StyleRegistry};

#[test]
fn identical_styles_share_one_descriptor() -> Result<(), Box<dyn std::error::Error>> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_sheet("Sheet1")?;
    // Built independently so only canonical keys can unify them.
    sheet.set_value_with_style(Address::new(0, 0), 1.0, &presets::bold())?;
    sheet.set_value_with_style(Address::new(1, 0), 2.0, &presets::bold())?;
    sheet.set_value_with_style(Address::new(2, 0), 3.0, &presets::italic())?;

    let resolved = resolve_workbook(&workbook)?;
    let cells = &resolved.sheets[0].cells;
    assert_eq!(cells[&(0, 0)].style, cells[&(0, 1)].style);
    assert_ne!(cells[&(0, 0)].style, cells[&(0, 2)].style);
    assert_eq!(resolved.tables.styles.len(), 3, "default, bold, italic");
    Ok(())
}

#[test]
fn style_names_do_not_affect_identity() -> Result<(), Box<dyn std::error::Error>> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_sheet("Sheet1")?;
    let named = presets::bold().with_name("Header");
    sheet.set_value_with_style(Address::new(0, 0), "a", &named)?;
    sheet.set_value_with_style(Address::new(1, 0), "b", &presets::bold())?;

    let resolved = resolve_workbook(&workbook)?;
    let cells = &resolved.sheets[0].cells;
    assert_eq!(cells[&(0, 0)].style, cells[&(0, 1)].style);
    Ok(())
}

#[test]
fn absent_slots_equal_explicit_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_sheet("Sheet1")?;
    sheet.set_value_with_style(Address::new(0, 0), 1.0, &presets::bold())?;
    sheet.set_value_with_style(Address::new(1, 0), 2.0, &presets::bold().materialize())?;

    let resolved = resolve_workbook(&workbook)?;
    let cells = &resolved.sheets[0].cells;
    assert_eq!(cells[&(0, 0)].style, cells[&(0, 1)].style);
    Ok(())
}

#[test]
fn seeded_entries_hold_their_positions() -> Result<(), Box<dyn std::error::Error>> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_sheet("Sheet1")?;
    let filled = Style::new().with_fill(Fill::solid(Color::from_hex("4472C4")?));
    sheet.set_value_with_style(Address::new(0, 0), 1.0, &filled)?;

    let resolved = resolve_workbook(&workbook)?;
    let tables = &resolved.tables;
    assert!(tables.fills[0].is_default());
    assert_eq!(tables.fills[1], Fill::gray125());
    assert_eq!(
        tables.fills[2].foreground.as_ref().map(|c| c.as_str()),
        Some("4472C4"),
        "user fills start after the seeds"
    );

    let default_entry = tables.styles[0].indices;
    assert_eq!(
        (
            default_entry.border,
            default_entry.fill,
            default_entry.font,
            default_entry.number_format,
            default_entry.cell_format,
        ),
        (0, 0, 0, 0, 0)
    );
    Ok(())
}

#[test]
fn merge_range_marks_every_cell_but_the_anchor() -> Result<(), Box<dyn std::error::Error>> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_sheet("Sheet1")?;
    sheet.set_value_with_style(Address::new(0, 0), "title", &presets::bold())?;
    let filled = Style::new().with_fill(Fill::solid(Color::from_hex("FFC000")?));
    sheet.set_style(Address::new(1, 0), &filled)?;
    sheet.merge_cells(Range::from_a1("A1:B2")?)?;

    let resolved = resolve_workbook(&workbook)?;
    let sheet = &resolved.sheets[0];
    let tables = &resolved.tables;

    let anchor = &tables.styles[sheet.cells[&(0, 0)].style as usize];
    assert!(
        !tables.cell_formats[anchor.indices.cell_format as usize].force_apply_alignment,
        "anchor is never marked"
    );
    assert!(tables.fonts[anchor.indices.font as usize].bold);

    // B1 had a fill before the merge; the marker must not clobber it.
    let marked = &tables.styles[sheet.cells[&(0, 1)].style as usize];
    assert!(tables.cell_formats[marked.indices.cell_format as usize].force_apply_alignment);
    assert_eq!(
        tables.fills[marked.indices.fill as usize]
            .foreground
            .as_ref()
            .map(|c| c.as_str()),
        Some("FFC000")
    );

    // A2 and B2 did not exist; they appear as marked empty cells.
    for key in [(1, 0), (1, 1)] {
        let cell = &sheet.cells[&key];
        assert!(cell.value.is_empty());
        let entry = &tables.styles[cell.style as usize];
        assert!(tables.cell_formats[entry.indices.cell_format as usize].force_apply_alignment);
    }
    Ok(())
}

#[test]
fn date_and_time_cells_bind_the_builtin_formats() -> Result<(), Box<dyn std::error::Error>> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_sheet("Sheet1")?;
    let day = chrono::NaiveDate::from_ymd_opt(2024, 7, 15)
        .ok_or("bad date")?
        .and_hms_opt(0, 0, 0)
        .ok_or("bad time")?;
    let noon = chrono::NaiveTime::from_hms_opt(12, 30, 0).ok_or("bad time")?;
    sheet.set_value(Address::new(0, 0), day)?;
    sheet.set_value(Address::new(1, 0), noon)?;
    // Pre-styled with the same canonical format; must unify with A1.
    sheet.set_value_with_style(Address::new(2, 0), day, &presets::date_format())?;

    let resolved = resolve_workbook(&workbook)?;
    let sheet = &resolved.sheets[0];
    let tables = &resolved.tables;

    let date_entry = &tables.styles[sheet.cells[&(0, 0)].style as usize];
    assert_eq!(tables.num_fmt_id(date_entry.indices.number_format), 14);

    let time_entry = &tables.styles[sheet.cells[&(0, 1)].style as usize];
    assert_eq!(tables.num_fmt_id(time_entry.indices.number_format), 21);

    assert_eq!(sheet.cells[&(0, 0)].style, sheet.cells[&(0, 2)].style);
    Ok(())
}

#[test]
fn custom_ids_allocate_in_descriptor_order() -> Result<(), Box<dyn std::error::Error>> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_sheet("Sheet1")?;
    let first = Style::new().with_number_format(NumberFormat::custom("0.0#"));
    let pinned = Style::new().with_number_format(NumberFormat::custom_with_id("#.00", 170)?);
    let second = Style::new().with_number_format(NumberFormat::custom("0.000"));
    sheet.set_value_with_style(Address::new(0, 0), 1.0, &first)?;
    sheet.set_value_with_style(Address::new(1, 0), 2.0, &pinned)?;
    sheet.set_value_with_style(Address::new(2, 0), 3.0, &second)?;

    let resolved = resolve_workbook(&workbook)?;
    let sheet = &resolved.sheets[0];
    let tables = &resolved.tables;

    let id_at = |key: (u32, u32)| {
        let entry = &tables.styles[sheet.cells[&key].style as usize];
        tables.num_fmt_id(entry.indices.number_format)
    };
    assert_eq!(id_at((0, 0)), 164);
    assert_eq!(id_at((0, 1)), 170, "explicit id kept as given");
    assert_eq!(id_at((0, 2)), 165);
    Ok(())
}

#[test]
fn format_codes_with_delimiters_stay_distinct() -> Result<(), Box<dyn std::error::Error>> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_sheet("Sheet1")?;
    let quoted = Style::new().with_number_format(NumberFormat::custom(r#"#,##0 "k|g""#));
    let similar = Style::new().with_number_format(NumberFormat::custom(r#"#,##0 "kg""#));
    sheet.set_value_with_style(Address::new(0, 0), 1.0, &quoted)?;
    sheet.set_value_with_style(Address::new(1, 0), 2.0, &quoted)?;
    sheet.set_value_with_style(Address::new(2, 0), 3.0, &similar)?;

    let resolved = resolve_workbook(&workbook)?;
    let cells = &resolved.sheets[0].cells;
    assert_eq!(cells[&(0, 0)].style, cells[&(0, 1)].style);
    assert_ne!(cells[&(0, 0)].style, cells[&(0, 2)].style);
    assert_eq!(resolved.tables.custom_format_ids.len(), 2);
    Ok(())
}

#[test]
fn the_default_descriptor_is_protected() {
    let mut registry = StyleRegistry::new();
    assert_eq!(registry.remove_style(0), Err(StyleError::ProtectedDefault));
    registry.remove_style(40).expect("unknown index is a no-op");
}

fn cell_kind() -> impl Strategy<Value = u8> {
    0u8..5
}

fn small_grid() -> impl Strategy<Value = Vec<(u32, u32, u8)>> {
    proptest::collection::vec((0u32..6, 0u32..4, cell_kind()), 0..24)
}

fn build_workbook(grid: &[(u32, u32, u8)]) -> Workbook {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_sheet("Grid").expect("valid name");
    for &(row, col, kind) in grid {
        let addr = Address::new(col, row);
        match kind {
            0 => sheet.set_value(addr, f64::from(row * 10 + col)),
            1 => sheet.set_value(addr, format!("r{row}c{col}")),
            2 => sheet.set_value_with_style(addr, 1.0, &presets::bold()),
            3 => sheet.set_value(
                addr,
                chrono::NaiveDate::from_ymd_opt(2024, 1, 1 + (row % 28))
                    .expect("valid day")
                    .and_hms_opt(0, 0, 0)
                    .expect("valid time"),
            ),
            _ => sheet.set_value_with_style(
                addr,
                2.5,
                &Style::new().with_number_format(NumberFormat::custom("0.0##")),
            ),
        }
        .expect("in-bounds write");
    }
    workbook
}

proptest! {
    #![proptest_config(ProptestConfig {
        failure_persistence: None,
        .. ProptestConfig::default()
    })]

    /// Two workbooks built from the same description resolve to the same
    /// tables, even though every style value was constructed separately.
    #[test]
    fn resolution_is_deterministic(grid in small_grid()) {
        let first = resolve_workbook(&build_workbook(&grid)).unwrap();
        let second = resolve_workbook(&build_workbook(&grid)).unwrap();

        prop_assert_eq!(first.tables.styles.len(), second.tables.styles.len());
        prop_assert_eq!(&first.tables.custom_format_ids, &second.tables.custom_format_ids);

        let lhs = &first.sheets[0];
        let rhs = &second.sheets[0];
        prop_assert_eq!(lhs.cells.len(), rhs.cells.len());
        for (key, cell) in &lhs.cells {
            prop_assert_eq!(cell.style, rhs.cells[key].style, "cell {:?}", key);
        }
    }

    /// Interning never hands out an index past the table length, and every
    /// referenced component index stays in range.
    #[test]
    fn descriptor_indices_stay_in_range(grid in small_grid()) {
        let resolved = resolve_workbook(&build_workbook(&grid)).unwrap();
        let tables = &resolved.tables;
        for entry in &tables.styles {
            prop_assert!((entry.indices.border as usize) < tables.borders.len());
            prop_assert!((entry.indices.fill as usize) < tables.fills.len());
            prop_assert!((entry.indices.font as usize) < tables.fonts.len());
            prop_assert!((entry.indices.number_format as usize) < tables.number_formats.len());
            prop_assert!((entry.indices.cell_format as usize) < tables.cell_formats.len());
        }
        for sheet in &resolved.sheets {
            for cell in sheet.cells.values() {
                prop_assert!((cell.style as usize) < tables.styles.len());
            }
        }
    }
}
