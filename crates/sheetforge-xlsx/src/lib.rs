//! XLSX writer for [`sheetforge_model::Workbook`].
//!
//! The crate has two layers:
//!
//! - [`resolve_workbook`]: the canonicalization pipeline. It snapshots the
//!   workbook, applies the cell-semantics rules (canonical date and time
//!   formats, merge-range alignment markers), and interns every style into
//!   the five per-category tables plus the composite descriptor table that
//!   `styles.xml` is built from. The workbook itself is never mutated.
//! - [`write_to_vec`]/[`save_to_path`]: part emission and container
//!   assembly. Parts are rendered in a fixed order from the resolved view,
//!   so the same workbook always serializes to the same bytes.
//!
//! [`StyleRegistry`] is exposed for callers that want to intern styles or
//! inspect the frozen [`StyleTables`] without producing a container.

mod shared_strings;
mod styles;
mod write;
mod xml;

pub use styles::{
    resolve_workbook, ComponentIndices, ResolvedCell, ResolvedSheet, ResolvedWorkbook, StyleEntry,
    StyleRegistry, StyleTables,
};
pub use write::{save_to_path, write_to_vec, SaveError};
