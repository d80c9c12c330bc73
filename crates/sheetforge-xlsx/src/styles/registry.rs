//! The style interning store.
//!
//! Each component category gets its own canonical table: an ordered list of
//! distinct components plus a reverse map from canonical key to index.
//! Descriptors dedup one level up, on the tuple of five component indices.
//! Indices are assigned in first-encounter order and never change, so
//! interning the same workbook twice yields identical tables.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use sheetforge_model::style::{
    Border, CellFormat, Fill, Font, NumberFormat, Style, StyleComponent, StyleError,
    CUSTOM_FORMAT_START,
};

use super::{ComponentIndices, StyleEntry, StyleTables};

/// One per-category canonical table.
#[derive(Debug)]
struct Table<T: StyleComponent> {
    items: Vec<T>,
    index: HashMap<String, u32>,
}

impl<T: StyleComponent> Table<T> {
    /// Starts with the category default at index 0.
    fn new() -> Self {
        let mut table = Table {
            items: Vec::new(),
            index: HashMap::new(),
        };
        table.intern(T::default());
        table
    }

    fn intern(&mut self, component: T) -> u32 {
        let key = component.canonical_key();
        if let Some(&idx) = self.index.get(&key) {
            return idx;
        }
        let idx = self.items.len() as u32;
        self.items.push(component);
        self.index.insert(key, idx);
        idx
    }

    fn items(&self) -> &[T] {
        &self.items
    }
}

fn required<T: StyleComponent>(slot: &Option<T>) -> Result<T, StyleError> {
    slot.clone().ok_or(StyleError::MissingComponent {
        category: T::CATEGORY,
    })
}

/// Interning store for a single save.
///
/// Construction seeds the entries the output format expects at fixed low
/// positions: every category's default at index 0, the gray125 compatibility
/// fill at fill index 1, and the default descriptor at composite index 0.
#[derive(Debug)]
pub struct StyleRegistry {
    borders: Table<Border>,
    fills: Table<Fill>,
    fonts: Table<Font>,
    number_formats: Table<NumberFormat>,
    cell_formats: Table<CellFormat>,
    styles: Vec<StyleEntry>,
    style_index: HashMap<ComponentIndices, u32>,
}

impl StyleRegistry {
    pub fn new() -> Self {
        let mut registry = StyleRegistry {
            borders: Table::new(),
            fills: Table::new(),
            fonts: Table::new(),
            number_formats: Table::new(),
            cell_formats: Table::new(),
            styles: Vec::new(),
            style_index: HashMap::new(),
        };
        registry.fills.intern(Fill::gray125());
        let default_indices = ComponentIndices::default();
        registry.styles.push(StyleEntry {
            index: 0,
            indices: default_indices,
        });
        registry.style_index.insert(default_indices, 0);
        registry
    }

    pub fn intern_border(&mut self, border: &Border) -> u32 {
        self.borders.intern(border.clone())
    }

    pub fn intern_fill(&mut self, fill: &Fill) -> u32 {
        self.fills.intern(fill.clone())
    }

    pub fn intern_font(&mut self, font: &Font) -> u32 {
        self.fonts.intern(font.clone())
    }

    pub fn intern_number_format(&mut self, number_format: &NumberFormat) -> u32 {
        self.number_formats.intern(number_format.clone())
    }

    pub fn intern_cell_format(&mut self, cell_format: &CellFormat) -> u32 {
        self.cell_formats.intern(cell_format.clone())
    }

    /// Interns a full descriptor and returns its composite index.
    ///
    /// All five component slots must be present; callers materialize the
    /// descriptor (and apply the semantic substitutions) first. The slots
    /// are checked before anything is interned, so a failing call leaves
    /// the tables unchanged.
    pub fn intern_style(&mut self, style: &Style) -> Result<u32, StyleError> {
        let border = required(&style.border)?;
        let fill = required(&style.fill)?;
        let font = required(&style.font)?;
        let number_format = required(&style.number_format)?;
        let cell_format = required(&style.cell_format)?;
        let indices = ComponentIndices {
            border: self.borders.intern(border),
            fill: self.fills.intern(fill),
            font: self.fonts.intern(font),
            number_format: self.number_formats.intern(number_format),
            cell_format: self.cell_formats.intern(cell_format),
        };
        Ok(self.intern_indices(indices))
    }

    fn intern_indices(&mut self, indices: ComponentIndices) -> u32 {
        if let Some(&idx) = self.style_index.get(&indices) {
            return idx;
        }
        let idx = self.styles.len() as u32;
        self.styles.push(StyleEntry { index: idx, indices });
        self.style_index.insert(indices, idx);
        idx
    }

    pub fn style_count(&self) -> usize {
        self.styles.len()
    }

    /// Removes a descriptor entry. Index 0 is the protected default; an
    /// index past the end is a no-op (the entry is already gone). Later
    /// entries shift down and are reindexed. Component tables are left
    /// untouched, their entries may be shared with other descriptors.
    pub fn remove_style(&mut self, index: u32) -> Result<(), StyleError> {
        if index == 0 {
            return Err(StyleError::ProtectedDefault);
        }
        let pos = index as usize;
        if pos >= self.styles.len() {
            return Ok(());
        }
        self.styles.remove(pos);
        self.style_index.clear();
        for (i, entry) in self.styles.iter_mut().enumerate() {
            entry.index = i as u32;
            self.style_index.insert(entry.indices, i as u32);
        }
        Ok(())
    }

    /// Freezes the registry into emission-ready tables.
    ///
    /// The descriptor list is sorted by assigned index. Appends keep it
    /// monotonic already, so the sort is a confirmation that the seeded
    /// entries hold their fixed positions. Custom number format IDs are then
    /// allocated from 164 upward: explicit IDs are kept as given, the rest
    /// are assigned in descriptor-table order, skipping any taken value;
    /// custom components referenced by no descriptor get theirs last, in
    /// table order.
    pub fn finalize(mut self) -> StyleTables {
        self.styles.sort_by_key(|entry| entry.index);

        let mut custom_format_ids: BTreeMap<u32, u32> = BTreeMap::new();
        let mut used: BTreeSet<u32> = BTreeSet::new();

        for (idx, nf) in self.number_formats.items().iter().enumerate() {
            if let (true, Some(explicit)) = (nf.is_custom(), nf.custom_id) {
                custom_format_ids.insert(idx as u32, explicit.get());
                used.insert(explicit.get());
            }
        }

        let mut next = CUSTOM_FORMAT_START;
        let mut allocate = |nf_idx: u32,
                            items: &[NumberFormat],
                            ids: &mut BTreeMap<u32, u32>,
                            used: &mut BTreeSet<u32>| {
            let nf = &items[nf_idx as usize];
            if !nf.is_custom() || ids.contains_key(&nf_idx) {
                return;
            }
            while used.contains(&next) {
                next += 1;
            }
            ids.insert(nf_idx, next);
            used.insert(next);
            next += 1;
        };

        for entry in &self.styles {
            allocate(
                entry.indices.number_format,
                self.number_formats.items(),
                &mut custom_format_ids,
                &mut used,
            );
        }
        for idx in 0..self.number_formats.items().len() as u32 {
            allocate(
                idx,
                self.number_formats.items(),
                &mut custom_format_ids,
                &mut used,
            );
        }

        StyleTables {
            borders: self.borders.items,
            fills: self.fills.items,
            fonts: self.fonts.items,
            number_formats: self.number_formats.items,
            cell_formats: self.cell_formats.items,
            styles: self.styles,
            custom_format_ids,
        }
    }
}

impl Default for StyleRegistry {
    fn default() -> Self {
        StyleRegistry::new()
    }
}
