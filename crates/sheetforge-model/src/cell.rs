//! Cells, cell values, and semantic cell types.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::address::RangeError;
use crate::style::Style;

/// Day number of the serial epoch (1899-12-30) in chrono's proleptic
/// Gregorian day count, so `serial = num_days_from_ce(date) - EPOCH`.
const SERIAL_EPOCH_DAYS_FROM_CE: i64 = 693_594;
/// Serial of the first representable date, 1900-01-01.
const MIN_DATE_SERIAL: i64 = 2;
/// Serial of the last representable date, 9999-12-31.
const MAX_DATE_SERIAL: i64 = 2_958_465;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// A cell's content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    #[default]
    Empty,
    Bool(bool),
    Number(f64),
    Text(String),
    Date(NaiveDateTime),
    Time(NaiveTime),
    /// Formula text, stored without a leading `=`.
    Formula(String),
}

impl CellValue {
    /// Builds a formula value, stripping one leading `=` if present.
    pub fn formula(text: impl Into<String>) -> Self {
        let text = text.into();
        match text.strip_prefix('=') {
            Some(rest) => CellValue::Formula(rest.to_string()),
            None => CellValue::Formula(text),
        }
    }

    /// The resolved semantic type of this value. Never returns
    /// [`CellType::General`]; that state exists only before a value is
    /// assigned.
    pub fn cell_type(&self) -> CellType {
        match self {
            CellValue::Empty => CellType::Empty,
            CellValue::Bool(_) => CellType::Boolean,
            CellValue::Number(_) => CellType::Number,
            CellValue::Text(_) => CellType::Text,
            CellValue::Date(_) => CellType::Date,
            CellValue::Time(_) => CellType::Time,
            CellValue::Formula(_) => CellType::Formula,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Number(v)
    }
}

macro_rules! impl_from_number {
    ($($ty:ty),*) => {
        $(impl From<$ty> for CellValue {
            fn from(v: $ty) -> Self {
                CellValue::Number(v as f64)
            }
        })*
    };
}

impl_from_number!(f32, i8, i16, i32, i64, u8, u16, u32, u64);

impl From<bool> for CellValue {
    fn from(v: bool) -> Self {
        CellValue::Bool(v)
    }
}

impl From<&str> for CellValue {
    fn from(v: &str) -> Self {
        CellValue::Text(v.to_string())
    }
}

impl From<String> for CellValue {
    fn from(v: String) -> Self {
        CellValue::Text(v)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(v: NaiveDateTime) -> Self {
        CellValue::Date(v)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(v: NaiveDate) -> Self {
        CellValue::Date(v.into())
    }
}

impl From<NaiveTime> for CellValue {
    fn from(v: NaiveTime) -> Self {
        CellValue::Time(v)
    }
}

/// Semantic cell types. `General` is the "detect from the value" request
/// state; cells stored in a worksheet always expose one of the concrete
/// types via [`CellValue::cell_type`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellType {
    General,
    Text,
    Number,
    Boolean,
    Date,
    Time,
    Formula,
    Empty,
}

/// A worksheet cell: a value plus an optional shared style binding.
///
/// Styles are shared through `Arc`; a bound descriptor is replaced, never
/// mutated through the cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cell {
    pub value: CellValue,
    pub style: Option<Arc<Style>>,
}

impl Cell {
    pub fn new(value: impl Into<CellValue>) -> Self {
        Cell {
            value: value.into(),
            style: None,
        }
    }

    pub fn with_style(value: impl Into<CellValue>, style: Arc<Style>) -> Self {
        Cell {
            value: value.into(),
            style: Some(style),
        }
    }

    pub fn cell_type(&self) -> CellType {
        self.value.cell_type()
    }

    /// True when there is nothing to keep: no value and no style binding.
    /// Such cells are not stored in a worksheet.
    pub fn is_truly_empty(&self) -> bool {
        self.value.is_empty() && self.style.is_none()
    }
}

/// Converts a date-time to its spreadsheet serial number (days since
/// 1899-12-30, time as the fractional part).
pub fn date_serial(dt: &NaiveDateTime) -> Result<f64, RangeError> {
    let days = chrono::Datelike::num_days_from_ce(&dt.date()) as i64 - SERIAL_EPOCH_DAYS_FROM_CE;
    if !(MIN_DATE_SERIAL..=MAX_DATE_SERIAL).contains(&days) {
        return Err(RangeError::DateOutOfRange(*dt));
    }
    Ok(days as f64 + day_fraction(&dt.time()))
}

/// Converts a time of day to its serial fraction (0.5 is noon).
pub fn time_serial(t: &NaiveTime) -> f64 {
    day_fraction(t)
}

fn day_fraction(t: &NaiveTime) -> f64 {
    let seconds = t.num_seconds_from_midnight() as f64 + t.nanosecond() as f64 / 1e9;
    seconds / SECONDS_PER_DAY
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().into()
    }

    #[test]
    fn date_serials_match_known_values() {
        assert_eq!(date_serial(&date(1900, 1, 1)).unwrap(), 2.0);
        assert_eq!(date_serial(&date(2000, 1, 1)).unwrap(), 36_526.0);
        assert_eq!(date_serial(&date(2008, 5, 25)).unwrap(), 39_593.0);
        assert_eq!(date_serial(&date(9999, 12, 31)).unwrap(), MAX_DATE_SERIAL as f64);
    }

    #[test]
    fn date_serial_includes_time_fraction() {
        let dt = NaiveDate::from_ymd_opt(2020, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        assert_eq!(date_serial(&dt).unwrap(), 43_831.5);
    }

    #[test]
    fn dates_outside_window_are_rejected() {
        let early = date(1899, 12, 31);
        assert_eq!(
            date_serial(&early),
            Err(RangeError::DateOutOfRange(early))
        );
    }

    #[test]
    fn time_serial_is_a_day_fraction() {
        let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
        assert_eq!(time_serial(&noon), 0.5);
        let six = NaiveTime::from_hms_opt(6, 0, 0).unwrap();
        assert_eq!(time_serial(&six), 0.25);
    }

    #[test]
    fn formula_constructor_strips_equals() {
        assert_eq!(
            CellValue::formula("=SUM(A1:A3)"),
            CellValue::Formula("SUM(A1:A3)".to_string())
        );
        assert_eq!(
            CellValue::formula("SUM(A1:A3)"),
            CellValue::Formula("SUM(A1:A3)".to_string())
        );
    }

    #[test]
    fn semantic_types_resolve_from_values() {
        assert_eq!(CellValue::from(1.5).cell_type(), CellType::Number);
        assert_eq!(CellValue::from("x").cell_type(), CellType::Text);
        assert_eq!(CellValue::from(true).cell_type(), CellType::Boolean);
        assert_eq!(CellValue::Empty.cell_type(), CellType::Empty);
        assert_eq!(
            CellValue::formula("A1+A2").cell_type(),
            CellType::Formula
        );
    }

    #[test]
    fn truly_empty_requires_no_style() {
        assert!(Cell::new(CellValue::Empty).is_truly_empty());
        let styled = Cell::with_style(CellValue::Empty, Arc::new(Style::default()));
        assert!(!styled.is_truly_empty());
    }
}
