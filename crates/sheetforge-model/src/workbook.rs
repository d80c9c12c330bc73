//! Workbook: an ordered collection of uniquely named worksheets.

use thiserror::Error;

use crate::worksheet::Worksheet;

/// Longest permitted worksheet name, in characters.
pub const MAX_SHEET_NAME_LEN: usize = 31;

const FORBIDDEN_SHEET_NAME_CHARS: [char; 7] = ['[', ']', '*', '?', '/', '\\', ':'];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkbookError {
    #[error("invalid sheet name {0:?} (1-31 characters, none of [ ] * ? / \\ :)")]
    InvalidSheetName(String),
    #[error("a sheet named {0:?} already exists")]
    DuplicateSheetName(String),
    #[error("no sheet named {0:?}")]
    UnknownSheet(String),
}

fn validate_sheet_name(name: &str) -> Result<(), WorkbookError> {
    let len = name.chars().count();
    if len == 0
        || len > MAX_SHEET_NAME_LEN
        || name.chars().any(|c| FORBIDDEN_SHEET_NAME_CHARS.contains(&c))
    {
        return Err(WorkbookError::InvalidSheetName(name.to_string()));
    }
    Ok(())
}

/// Sheets keep their insertion order. Every sheet gets a workbook-unique ID
/// on creation; IDs are never reused, so removing a sheet cannot alias a
/// later one.
#[derive(Debug, Clone)]
pub struct Workbook {
    sheets: Vec<Worksheet>,
    next_sheet_id: u32,
}

impl Workbook {
    pub fn new() -> Self {
        Workbook {
            sheets: Vec::new(),
            next_sheet_id: 1,
        }
    }

    /// Appends a new empty sheet and returns it for population.
    pub fn add_sheet(&mut self, name: impl Into<String>) -> Result<&mut Worksheet, WorkbookError> {
        let name = name.into();
        validate_sheet_name(&name)?;
        if self.sheets.iter().any(|s| s.name() == name) {
            return Err(WorkbookError::DuplicateSheetName(name));
        }
        let id = self.next_sheet_id;
        self.next_sheet_id += 1;
        self.sheets.push(Worksheet::new(name, id));
        Ok(self.sheets.last_mut().expect("sheet was just pushed"))
    }

    pub fn sheet(&self, name: &str) -> Option<&Worksheet> {
        self.sheets.iter().find(|s| s.name() == name)
    }

    pub fn sheet_mut(&mut self, name: &str) -> Option<&mut Worksheet> {
        self.sheets.iter_mut().find(|s| s.name() == name)
    }

    pub fn sheet_at(&self, index: usize) -> Option<&Worksheet> {
        self.sheets.get(index)
    }

    pub fn sheets(&self) -> &[Worksheet] {
        &self.sheets
    }

    pub fn rename_sheet(&mut self, from: &str, to: impl Into<String>) -> Result<(), WorkbookError> {
        let to = to.into();
        validate_sheet_name(&to)?;
        let idx = self
            .sheets
            .iter()
            .position(|s| s.name() == from)
            .ok_or_else(|| WorkbookError::UnknownSheet(from.to_string()))?;
        if self
            .sheets
            .iter()
            .enumerate()
            .any(|(i, s)| i != idx && s.name() == to)
        {
            return Err(WorkbookError::DuplicateSheetName(to));
        }
        self.sheets[idx].set_name(to);
        Ok(())
    }

    pub fn remove_sheet(&mut self, name: &str) -> Result<Worksheet, WorkbookError> {
        match self.sheets.iter().position(|s| s.name() == name) {
            Some(idx) => Ok(self.sheets.remove(idx)),
            None => Err(WorkbookError::UnknownSheet(name.to_string())),
        }
    }
}

impl Default for Workbook {
    fn default() -> Self {
        Workbook::new()
    }
}
