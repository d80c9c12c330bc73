//! Style canonicalization: interning tables and the pre-save semantic pass.

mod registry;
mod resolve;

pub use registry::StyleRegistry;
pub use resolve::{
    resolve_workbook, ResolvedCell, ResolvedSheet, ResolvedWorkbook,
};

use std::collections::BTreeMap;

use sheetforge_model::style::{Border, CellFormat, Fill, Font, NumberFormat};

/// Per-category table positions making up one canonical descriptor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ComponentIndices {
    pub border: u32,
    pub fill: u32,
    pub font: u32,
    pub number_format: u32,
    pub cell_format: u32,
}

/// A descriptor-table entry: the composite index plus its component tuple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleEntry {
    pub index: u32,
    pub indices: ComponentIndices,
}

/// Frozen output of [`StyleRegistry::finalize`], ready for emission.
#[derive(Debug)]
pub struct StyleTables {
    pub borders: Vec<Border>,
    pub fills: Vec<Fill>,
    pub fonts: Vec<Font>,
    pub number_formats: Vec<NumberFormat>,
    pub cell_formats: Vec<CellFormat>,
    pub styles: Vec<StyleEntry>,
    /// Number-format table index to the allocated custom format ID.
    pub custom_format_ids: BTreeMap<u32, u32>,
}

impl StyleTables {
    /// The format ID written out for the number-format entry at `index`:
    /// the allocated custom ID when one exists, the built-in ID otherwise.
    pub fn num_fmt_id(&self, index: u32) -> u32 {
        if let Some(&id) = self.custom_format_ids.get(&index) {
            return id;
        }
        self.number_formats[index as usize]
            .format
            .builtin_id()
            .map(u32::from)
            .unwrap_or(0)
    }
}
