//! A single worksheet: sparse cells, merged ranges, and layout overrides.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::address::{Address, Range, RangeError, MAX_COLS, MAX_ROWS};
use crate::cell::{Cell, CellValue};
use crate::style::Style;

/// Largest permitted column width.
pub const MAX_COLUMN_WIDTH: f64 = 255.0;
/// Largest permitted row height, in points.
pub const MAX_ROW_HEIGHT: f64 = 409.5;

/// A worksheet holds cells sparsely, keyed by `(row, col)` so iteration is
/// row-major and deterministic. Cells whose value is empty and which carry
/// no style are never stored.
#[derive(Debug, Clone)]
pub struct Worksheet {
    name: String,
    sheet_id: u32,
    cells: BTreeMap<(u32, u32), Cell>,
    merges: Vec<Range>,
    column_widths: BTreeMap<u32, f64>,
    row_heights: BTreeMap<u32, f64>,
    active_style: Option<Arc<Style>>,
}

impl Worksheet {
    pub(crate) fn new(name: impl Into<String>, sheet_id: u32) -> Self {
        Worksheet {
            name: name.into(),
            sheet_id,
            cells: BTreeMap::new(),
            merges: Vec::new(),
            column_widths: BTreeMap::new(),
            row_heights: BTreeMap::new(),
            active_style: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// The workbook-assigned identifier, stable across sheet removals.
    pub fn sheet_id(&self) -> u32 {
        self.sheet_id
    }

    fn check_bounds(&self, addr: Address) -> Result<(), RangeError> {
        if addr.in_bounds() {
            Ok(())
        } else {
            Err(RangeError::OutOfBounds {
                col: addr.col,
                row: addr.row,
            })
        }
    }

    /// Writes a value. A new cell picks up the active style if one is set;
    /// overwriting keeps whatever style the cell already had. Writing an
    /// empty value into an unstyled cell removes it.
    pub fn set_value(
        &mut self,
        addr: Address,
        value: impl Into<CellValue>,
    ) -> Result<(), RangeError> {
        self.check_bounds(addr)?;
        let key = (addr.row, addr.col);
        let value = value.into();
        match self.cells.get_mut(&key) {
            Some(cell) => {
                cell.value = value;
                if cell.style.is_none() {
                    cell.style = self.active_style.clone();
                }
                let now_empty = cell.is_truly_empty();
                if now_empty {
                    self.cells.remove(&key);
                }
            }
            None => {
                let cell = Cell {
                    value,
                    style: self.active_style.clone(),
                };
                if !cell.is_truly_empty() {
                    self.cells.insert(key, cell);
                }
            }
        }
        Ok(())
    }

    /// Writes a value with an explicit style, replacing any existing style
    /// and ignoring the active style.
    pub fn set_value_with_style(
        &mut self,
        addr: Address,
        value: impl Into<CellValue>,
        style: &Style,
    ) -> Result<(), RangeError> {
        self.check_bounds(addr)?;
        let cell = Cell {
            value: value.into(),
            style: Some(Arc::new(style.clone())),
        };
        self.cells.insert((addr.row, addr.col), cell);
        Ok(())
    }

    /// Binds a style to the cell, creating an empty styled cell if none
    /// exists there yet.
    pub fn set_style(&mut self, addr: Address, style: &Style) -> Result<(), RangeError> {
        self.check_bounds(addr)?;
        self.cells
            .entry((addr.row, addr.col))
            .or_default()
            .style = Some(Arc::new(style.clone()));
        Ok(())
    }

    /// Unbinds the cell's style; a cell left with no value and no style is
    /// removed.
    pub fn clear_style(&mut self, addr: Address) -> Result<(), RangeError> {
        self.check_bounds(addr)?;
        let key = (addr.row, addr.col);
        if let Some(cell) = self.cells.get_mut(&key) {
            cell.style = None;
            let now_empty = cell.is_truly_empty();
            if now_empty {
                self.cells.remove(&key);
            }
        }
        Ok(())
    }

    /// Writes a formula cell. A leading `=` in `formula` is stripped.
    pub fn set_formula(&mut self, addr: Address, formula: &str) -> Result<(), RangeError> {
        self.set_value(addr, CellValue::formula(formula))
    }

    pub fn cell(&self, addr: Address) -> Option<&Cell> {
        self.cells.get(&(addr.row, addr.col))
    }

    pub fn remove_cell(&mut self, addr: Address) -> Option<Cell> {
        self.cells.remove(&(addr.row, addr.col))
    }

    /// All stored cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Address, &Cell)> {
        self.cells
            .iter()
            .map(|(&(row, col), cell)| (Address::new(col, row), cell))
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Records a merged range. The range must lie in bounds and must not
    /// intersect any existing merge.
    pub fn merge_cells(&mut self, range: Range) -> Result<(), RangeError> {
        self.check_bounds(range.start)?;
        self.check_bounds(range.end)?;
        if let Some(existing) = self.merges.iter().find(|m| m.intersects(&range)) {
            return Err(RangeError::MergeOverlap {
                range,
                existing: *existing,
            });
        }
        self.merges.push(range);
        Ok(())
    }

    /// Removes a merged range; the range must match a recorded merge
    /// exactly.
    pub fn unmerge(&mut self, range: Range) -> Result<(), RangeError> {
        match self.merges.iter().position(|m| *m == range) {
            Some(pos) => {
                self.merges.remove(pos);
                Ok(())
            }
            None => Err(RangeError::MergeNotFound(range)),
        }
    }

    /// Merged ranges in the order they were recorded.
    pub fn merged_ranges(&self) -> &[Range] {
        &self.merges
    }

    /// Overrides a column's width. Valid widths are `[0, 255]`.
    pub fn set_column_width(&mut self, col: u32, width: f64) -> Result<(), RangeError> {
        if col >= MAX_COLS {
            return Err(RangeError::OutOfBounds { col, row: 0 });
        }
        if !(0.0..=MAX_COLUMN_WIDTH).contains(&width) {
            return Err(RangeError::ColumnWidthOutOfRange(width));
        }
        self.column_widths.insert(col, width);
        Ok(())
    }

    /// Overrides a row's height in points. Valid heights are `[0, 409.5]`.
    pub fn set_row_height(&mut self, row: u32, height: f64) -> Result<(), RangeError> {
        if row >= MAX_ROWS {
            return Err(RangeError::OutOfBounds { col: 0, row });
        }
        if !(0.0..=MAX_ROW_HEIGHT).contains(&height) {
            return Err(RangeError::RowHeightOutOfRange(height));
        }
        self.row_heights.insert(row, height);
        Ok(())
    }

    pub fn column_widths(&self) -> &BTreeMap<u32, f64> {
        &self.column_widths
    }

    pub fn row_heights(&self) -> &BTreeMap<u32, f64> {
        &self.row_heights
    }

    /// Sets the style bound to every cell written from now on (until
    /// cleared). Existing cells are not touched.
    pub fn set_active_style(&mut self, style: &Style) {
        self.active_style = Some(Arc::new(style.clone()));
    }

    pub fn clear_active_style(&mut self) {
        self.active_style = None;
    }

    pub fn active_style(&self) -> Option<&Arc<Style>> {
        self.active_style.as_ref()
    }
}
