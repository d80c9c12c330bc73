//! The pre-save semantic pass.
//!
//! Resolution snapshots every worksheet, applies the cell-semantics rules
//! (canonical date and time formats, merge-range alignment markers), interns
//! the effective descriptors, and freezes the tables. The source workbook is
//! never mutated, so saving the same workbook twice yields identical bytes.

use std::collections::BTreeMap;

use sheetforge_model::{
    style::presets, CellType, CellValue, Range, Style, Workbook, Worksheet,
};

use super::{StyleRegistry, StyleTables};
use crate::write::SaveError;

/// A cell after resolution: its value plus the interned composite index.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCell {
    pub value: CellValue,
    pub cell_type: CellType,
    pub style: u32,
}

/// One worksheet's emission-ready view.
#[derive(Debug)]
pub struct ResolvedSheet {
    pub name: String,
    pub sheet_id: u32,
    /// Keyed `(row, col)`, zero-based, so iteration is row-major.
    pub cells: BTreeMap<(u32, u32), ResolvedCell>,
    pub merges: Vec<Range>,
    pub column_widths: BTreeMap<u32, f64>,
    pub row_heights: BTreeMap<u32, f64>,
}

#[derive(Debug)]
pub struct ResolvedWorkbook {
    pub sheets: Vec<ResolvedSheet>,
    pub tables: StyleTables,
}

/// Runs the full canonicalization pipeline over a workbook.
pub fn resolve_workbook(workbook: &Workbook) -> Result<ResolvedWorkbook, SaveError> {
    let mut registry = StyleRegistry::new();
    let mut sheets = Vec::with_capacity(workbook.sheets().len());
    for worksheet in workbook.sheets() {
        sheets.push(resolve_sheet(worksheet, &mut registry)?);
    }
    Ok(ResolvedWorkbook {
        sheets,
        tables: registry.finalize(),
    })
}

fn resolve_sheet(
    worksheet: &Worksheet,
    registry: &mut StyleRegistry,
) -> Result<ResolvedSheet, SaveError> {
    let mut work: BTreeMap<(u32, u32), (CellValue, Style)> = BTreeMap::new();
    for (addr, cell) in worksheet.cells() {
        let style = cell.style.as_deref().cloned().unwrap_or_default();
        work.insert((addr.row, addr.col), (cell.value.clone(), style));
    }

    // Every cell of a merged range becomes an explicit cell, the anchor
    // included; holes turn into empty cells so the whole range renders
    // with the anchor's look. All but the anchor also take the alignment
    // marker.
    let marker = presets::merge_cell_style();
    for range in worksheet.merged_ranges() {
        let anchor = range.anchor();
        for addr in range {
            let (_, style) = work
                .entry((addr.row, addr.col))
                .or_insert_with(|| (CellValue::Empty, Style::new()));
            if addr != anchor {
                style.append(&marker);
            }
        }
    }

    // Date and time cells always carry the canonical built-in formats.
    for (value, style) in work.values_mut() {
        match value.cell_type() {
            CellType::Date => {
                style.number_format = Some(presets::date_number_format());
            }
            CellType::Time => {
                style.number_format = Some(presets::time_number_format());
            }
            _ => {}
        }
    }

    let mut cells = BTreeMap::new();
    for ((row, col), (value, style)) in work {
        let index = registry.intern_style(&style.materialize())?;
        let cell_type = value.cell_type();
        cells.insert(
            (row, col),
            ResolvedCell {
                value,
                cell_type,
                style: index,
            },
        );
    }

    Ok(ResolvedSheet {
        name: worksheet.name().to_string(),
        sheet_id: worksheet.sheet_id(),
        cells,
        merges: worksheet.merged_ranges().to_vec(),
        column_widths: worksheet.column_widths().clone(),
        row_heights: worksheet.row_heights().clone(),
    })
}
