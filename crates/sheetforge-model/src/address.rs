//! Cell addresses and rectangular ranges.
//!
//! Addresses are zero-based `(col, row)` pairs with A1-style parsing and
//! display. Ranges are always stored normalized (start is the top-left
//! corner), so range arithmetic never has to reason about reversed corners.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum number of columns in a worksheet ("XFD" is the last column).
pub const MAX_COLS: u32 = 16_384;
/// Maximum number of rows in a worksheet.
pub const MAX_ROWS: u32 = 1_048_576;

/// Errors produced by address/range parsing and by worksheet operations that
/// take addresses, dimensions, or date values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RangeError {
    #[error("invalid cell address {0:?}")]
    InvalidAddress(String),
    #[error("invalid cell range {0:?}")]
    InvalidRange(String),
    #[error("cell address out of bounds: column {col}, row {row}")]
    OutOfBounds { col: u32, row: u32 },
    #[error("range {range} overlaps already merged range {existing}")]
    MergeOverlap { range: Range, existing: Range },
    #[error("range {0} is not merged")]
    MergeNotFound(Range),
    #[error("column width {0} out of range (0..=255)")]
    ColumnWidthOutOfRange(f64),
    #[error("row height {0} out of range (0..=409.5)")]
    RowHeightOutOfRange(f64),
    #[error("date {0} cannot be represented (allowed window is 1900-01-01..=9999-12-31)")]
    DateOutOfRange(NaiveDateTime),
}

/// Zero-based cell address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Address {
    pub col: u32,
    pub row: u32,
}

impl Address {
    pub fn new(col: u32, row: u32) -> Self {
        Address { col, row }
    }

    pub fn in_bounds(&self) -> bool {
        self.col < MAX_COLS && self.row < MAX_ROWS
    }

    /// Parses an A1-style reference such as `B3`. Absolute markers (`$B$3`)
    /// are accepted and ignored.
    pub fn from_a1(s: &str) -> Result<Self, RangeError> {
        let invalid = || RangeError::InvalidAddress(s.to_string());
        let mut rest = s.strip_prefix('$').unwrap_or(s);

        let letters_end = rest
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(rest.len());
        let letters = &rest[..letters_end];
        rest = &rest[letters_end..];
        rest = rest.strip_prefix('$').unwrap_or(rest);

        if letters.is_empty() || rest.is_empty() || !rest.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let col = name_to_col(letters)?;
        let row1: u32 = rest.parse().map_err(|_| invalid())?;
        if row1 == 0 {
            return Err(invalid());
        }
        let addr = Address::new(col, row1 - 1);
        if !addr.in_bounds() {
            return Err(RangeError::OutOfBounds {
                col: addr.col,
                row: addr.row,
            });
        }
        Ok(addr)
    }

    pub fn to_a1(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Saturates so that printing an unvalidated address never wraps.
        write!(f, "{}{}", col_to_name(self.col), self.row.saturating_add(1))
    }
}

/// Converts a zero-based column index to its letter name (0 -> "A").
/// Total over `u32`; indices past [`MAX_COLS`] still render a name.
pub fn col_to_name(col: u32) -> String {
    let mut n = col.saturating_add(1);
    let mut buf = [0u8; 7];
    let mut i = buf.len();
    while n > 0 {
        i -= 1;
        buf[i] = b'A' + ((n - 1) % 26) as u8;
        n = (n - 1) / 26;
    }
    String::from_utf8_lossy(&buf[i..]).into_owned()
}

/// Converts a column letter name to its zero-based index ("A" -> 0).
///
/// Case-insensitive; rejects names past the column limit.
pub fn name_to_col(name: &str) -> Result<u32, RangeError> {
    if name.is_empty() || name.len() > 3 || !name.bytes().all(|b| b.is_ascii_alphabetic()) {
        return Err(RangeError::InvalidAddress(name.to_string()));
    }
    let mut acc: u32 = 0;
    for b in name.bytes() {
        acc = acc * 26 + (b.to_ascii_uppercase() - b'A' + 1) as u32;
    }
    let col = acc - 1;
    if col >= MAX_COLS {
        return Err(RangeError::OutOfBounds { col, row: 0 });
    }
    Ok(col)
}

/// A rectangular, inclusive cell range. Always normalized: `start` is the
/// top-left corner and `end` the bottom-right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    pub start: Address,
    pub end: Address,
}

impl Range {
    pub fn new(a: Address, b: Address) -> Self {
        Range {
            start: Address::new(a.col.min(b.col), a.row.min(b.row)),
            end: Address::new(a.col.max(b.col), a.row.max(b.row)),
        }
    }

    pub fn single(addr: Address) -> Self {
        Range {
            start: addr,
            end: addr,
        }
    }

    /// Parses `"A1:B2"`. A bare `"A1"` is accepted as a single-cell range.
    pub fn from_a1(s: &str) -> Result<Self, RangeError> {
        match s.split_once(':') {
            Some((a, b)) => {
                let a = Address::from_a1(a).map_err(|_| RangeError::InvalidRange(s.to_string()))?;
                let b = Address::from_a1(b).map_err(|_| RangeError::InvalidRange(s.to_string()))?;
                Ok(Range::new(a, b))
            }
            None => {
                let a = Address::from_a1(s).map_err(|_| RangeError::InvalidRange(s.to_string()))?;
                Ok(Range::single(a))
            }
        }
    }

    pub fn contains(&self, addr: Address) -> bool {
        addr.col >= self.start.col
            && addr.col <= self.end.col
            && addr.row >= self.start.row
            && addr.row <= self.end.row
    }

    pub fn intersects(&self, other: &Range) -> bool {
        self.start.col <= other.end.col
            && other.start.col <= self.end.col
            && self.start.row <= other.end.row
            && other.start.row <= self.end.row
    }

    pub fn width(&self) -> u32 {
        self.end.col - self.start.col + 1
    }

    pub fn height(&self) -> u32 {
        self.end.row - self.start.row + 1
    }

    pub fn cell_count(&self) -> u64 {
        u64::from(self.width()) * u64::from(self.height())
    }

    pub fn is_single_cell(&self) -> bool {
        self.start == self.end
    }

    /// The top-left cell; the one that keeps its content when the range is
    /// merged.
    pub fn anchor(&self) -> Address {
        self.start
    }

    /// Iterates the cells of the range in row-major order.
    pub fn iter(&self) -> RangeIter {
        RangeIter {
            range: *self,
            next: Some(self.start),
        }
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}

/// Row-major iterator over the cells of a [`Range`].
#[derive(Debug, Clone)]
pub struct RangeIter {
    range: Range,
    next: Option<Address>,
}

impl Iterator for RangeIter {
    type Item = Address;

    fn next(&mut self) -> Option<Address> {
        let current = self.next?;
        self.next = if current.col < self.range.end.col {
            Some(Address::new(current.col + 1, current.row))
        } else if current.row < self.range.end.row {
            Some(Address::new(self.range.start.col, current.row + 1))
        } else {
            None
        };
        Some(current)
    }
}

impl IntoIterator for &Range {
    type Item = Address;
    type IntoIter = RangeIter;

    fn into_iter(self) -> RangeIter {
        self.iter()
    }
}
