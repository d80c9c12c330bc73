//! Number format style component.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Category, KeyBuilder, StyleComponent, StyleError};

/// The closed set of built-in number formats, plus [`FormatNumber::Custom`]
/// for caller-supplied format codes. Each built-in variant maps to the fixed
/// format ID the document format defines for it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormatNumber {
    /// "General" display, ID 0.
    #[default]
    General,
    /// `0`
    Integer,
    /// `0.00`
    Decimal,
    /// `#,##0`
    ThousandsInteger,
    /// `#,##0.00`
    ThousandsDecimal,
    /// `0%`
    PercentInteger,
    /// `0.00%`
    PercentDecimal,
    /// `0.00E+00`
    Scientific,
    /// `# ?/?`
    FractionOneDigit,
    /// `# ??/??`
    FractionTwoDigits,
    /// `m/d/yyyy`, the canonical date format.
    DateShort,
    /// `d-mmm-yy`
    DateDayMonthYear,
    /// `d-mmm`
    DateDayMonth,
    /// `mmm-yy`
    DateMonthYear,
    /// `h:mm AM/PM`
    Time12Hour,
    /// `h:mm:ss AM/PM`
    Time12HourSeconds,
    /// `h:mm`
    Time24Hour,
    /// `h:mm:ss`, the canonical time format.
    Time24HourSeconds,
    /// `m/d/yyyy h:mm`
    DateTimeShort,
    /// `#,##0 ;(#,##0)`
    ThousandsNegParen,
    /// `#,##0 ;[Red](#,##0)`
    ThousandsNegRed,
    /// `#,##0.00;(#,##0.00)`
    DecimalNegParen,
    /// `#,##0.00;[Red](#,##0.00)`
    DecimalNegRed,
    /// `mm:ss`
    TimeMinutesSeconds,
    /// `[h]:mm:ss`
    TimeElapsed,
    /// `mmss.0`
    TimeMinutesSecondsTenths,
    /// `##0.0E+0`
    ScientificOneDigit,
    /// `@` (text)
    TextFormat,
    /// Caller-supplied format code; the ID is allocated (or given
    /// explicitly) from the custom range starting at 164.
    Custom,
}

impl FormatNumber {
    /// The fixed format ID, or `None` for [`FormatNumber::Custom`] whose ID
    /// comes from allocation.
    pub fn builtin_id(&self) -> Option<u16> {
        let id = match self {
            FormatNumber::General => 0,
            FormatNumber::Integer => 1,
            FormatNumber::Decimal => 2,
            FormatNumber::ThousandsInteger => 3,
            FormatNumber::ThousandsDecimal => 4,
            FormatNumber::PercentInteger => 9,
            FormatNumber::PercentDecimal => 10,
            FormatNumber::Scientific => 11,
            FormatNumber::FractionOneDigit => 12,
            FormatNumber::FractionTwoDigits => 13,
            FormatNumber::DateShort => 14,
            FormatNumber::DateDayMonthYear => 15,
            FormatNumber::DateDayMonth => 16,
            FormatNumber::DateMonthYear => 17,
            FormatNumber::Time12Hour => 18,
            FormatNumber::Time12HourSeconds => 19,
            FormatNumber::Time24Hour => 20,
            FormatNumber::Time24HourSeconds => 21,
            FormatNumber::DateTimeShort => 22,
            FormatNumber::ThousandsNegParen => 37,
            FormatNumber::ThousandsNegRed => 38,
            FormatNumber::DecimalNegParen => 39,
            FormatNumber::DecimalNegRed => 40,
            FormatNumber::TimeMinutesSeconds => 45,
            FormatNumber::TimeElapsed => 46,
            FormatNumber::TimeMinutesSecondsTenths => 47,
            FormatNumber::ScientificOneDigit => 48,
            FormatNumber::TextFormat => 49,
            FormatNumber::Custom => return None,
        };
        Some(id)
    }

    /// True for the built-in date-typed formats.
    pub fn is_date(&self) -> bool {
        matches!(
            self,
            FormatNumber::DateShort
                | FormatNumber::DateDayMonthYear
                | FormatNumber::DateDayMonth
                | FormatNumber::DateMonthYear
                | FormatNumber::DateTimeShort
        )
    }

    /// True for the built-in time-typed formats.
    pub fn is_time(&self) -> bool {
        matches!(
            self,
            FormatNumber::Time12Hour
                | FormatNumber::Time12HourSeconds
                | FormatNumber::Time24Hour
                | FormatNumber::Time24HourSeconds
                | FormatNumber::TimeMinutesSeconds
                | FormatNumber::TimeElapsed
                | FormatNumber::TimeMinutesSecondsTenths
        )
    }
}

/// First format ID available to custom formats; everything below is
/// reserved for the built-ins.
pub const CUSTOM_FORMAT_START: u32 = 164;

/// A validated explicit custom format ID (≥ 164).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct CustomFormatId(u32);

impl CustomFormatId {
    pub fn new(id: u32) -> Result<Self, StyleError> {
        if id < CUSTOM_FORMAT_START {
            return Err(StyleError::InvalidCustomFormatId(id));
        }
        Ok(CustomFormatId(id))
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for CustomFormatId {
    type Error = StyleError;

    fn try_from(value: u32) -> Result<Self, StyleError> {
        CustomFormatId::new(value)
    }
}

impl From<CustomFormatId> for u32 {
    fn from(id: CustomFormatId) -> u32 {
        id.0
    }
}

impl fmt::Display for CustomFormatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Number format component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberFormat {
    #[serde(default)]
    pub format: FormatNumber,
    /// Format code text; meaningful only when `format` is `Custom`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub custom_code: String,
    /// Explicit custom format ID. When `None`, custom formats get an ID
    /// allocated at finalize time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_id: Option<CustomFormatId>,
}

impl NumberFormat {
    pub fn builtin(format: FormatNumber) -> Self {
        NumberFormat {
            format,
            ..NumberFormat::default()
        }
    }

    pub fn custom(code: impl Into<String>) -> Self {
        NumberFormat {
            format: FormatNumber::Custom,
            custom_code: code.into(),
            custom_id: None,
        }
    }

    pub fn custom_with_id(code: impl Into<String>, id: u32) -> Result<Self, StyleError> {
        Ok(NumberFormat {
            format: FormatNumber::Custom,
            custom_code: code.into(),
            custom_id: Some(CustomFormatId::new(id)?),
        })
    }

    pub fn is_custom(&self) -> bool {
        self.format == FormatNumber::Custom
    }
}

impl StyleComponent for NumberFormat {
    const CATEGORY: Category = Category::NumberFormat;

    fn append_key_fields(&self, key: &mut KeyBuilder) {
        match self.format.builtin_id() {
            Some(id) => key.field(id),
            None => key.field("custom"),
        };
        key.text(&self.custom_code);
        match self.custom_id {
            Some(id) => key.field(id),
            None => key.field(""),
        };
    }

    fn merge_from(&mut self, source: &Self) {
        let baseline = NumberFormat::default();
        if source.format != baseline.format {
            self.format = source.format;
        }
        if source.custom_code != baseline.custom_code {
            self.custom_code = source.custom_code.clone();
        }
        if source.custom_id != baseline.custom_id {
            self.custom_id = source.custom_id;
        }
    }
}
