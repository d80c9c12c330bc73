//! In-memory workbook model for Sheetforge.
//!
//! The model is deliberately small: a [`Workbook`] owns an ordered list of
//! [`Worksheet`]s, each worksheet owns a sparse map of [`Cell`]s, and every
//! cell may carry a shared [`style::Style`] binding. Styles are plain value
//! records; deduplicating them into the indexed tables the xlsx format wants
//! is the writer crate's job. Everything here is synchronous and
//! deterministic: iteration orders are defined by the underlying `BTreeMap`s
//! so that two identical workbooks always enumerate identically.

pub mod address;
pub mod cell;
pub mod style;
pub mod workbook;
pub mod worksheet;

pub use address::{col_to_name, name_to_col, Address, Range, RangeError, MAX_COLS, MAX_ROWS};
pub use cell::{date_serial, time_serial, Cell, CellType, CellValue};
pub use style::{Style, StyleError};
pub use workbook::{Workbook, WorkbookError};
pub use worksheet::Worksheet;
