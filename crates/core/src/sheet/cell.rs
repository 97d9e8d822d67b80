//! Cell values and typed coercion.
//!
//! The ingest layer maps spreadsheet cells into [`CellValue`]; everything
//! here is pure. Coercion is soft: an unparseable value becomes `None` and
//! the row is still admitted.

use chrono::{Days, NaiveDate, NaiveDateTime};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::header::is_blank_text;

/// Excel serial dates count days from this epoch (the 1900 date system with
/// the historical leap-year bug folded in).
const EXCEL_EPOCH: (i32, u32, u32) = (1899, 12, 30);

/// Serial values outside this window are not treated as dates.
const SERIAL_DATE_MIN: i64 = 20_000;
const SERIAL_DATE_MAX: i64 = 60_000;

/// A single spreadsheet cell, decoupled from the workbook reader.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Empty or missing cell.
    Empty,
    /// Text cell.
    Text(String),
    /// Integer cell.
    Int(i64),
    /// Floating-point cell as exported by the workbook reader.
    Float(f64),
    /// Boolean cell.
    Bool(bool),
    /// Date cell.
    Date(NaiveDate),
    /// Date-time cell.
    DateTime(NaiveDateTime),
}

impl CellValue {
    /// Returns true for empty cells and blank text markers (`-`, `nan`, …).
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(text) => is_blank_text(text),
            _ => false,
        }
    }

    /// Text representation, or `None` for blank cells.
    #[must_use]
    pub fn as_text(&self) -> Option<String> {
        if self.is_blank() {
            return None;
        }
        let text = match self {
            Self::Text(text) => text.trim().to_string(),
            Self::Int(value) => value.to_string(),
            Self::Float(value) => value.to_string(),
            Self::Bool(value) => value.to_string(),
            Self::Date(value) => value.to_string(),
            Self::DateTime(value) => value.to_string(),
            Self::Empty => return None,
        };
        Some(text)
    }
}

fn excel_epoch() -> NaiveDate {
    let (year, month, day) = EXCEL_EPOCH;
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn serial_to_date(serial: i64) -> Option<NaiveDate> {
    if !(SERIAL_DATE_MIN..=SERIAL_DATE_MAX).contains(&serial) {
        return None;
    }
    let days = u64::try_from(serial).ok()?;
    excel_epoch().checked_add_days(Days::new(days))
}

fn parse_date_text(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }
    if trimmed.contains('/') {
        // Day-first when the leading token cannot be a month.
        let day_first = trimmed
            .split('/')
            .next()
            .and_then(|token| token.parse::<u32>().ok())
            .is_some_and(|first| first > 12);
        let formats: [&str; 4] = if day_first {
            ["%d/%m/%Y", "%d/%m/%y", "%m/%d/%Y", "%m/%d/%y"]
        } else {
            ["%m/%d/%Y", "%m/%d/%y", "%d/%m/%Y", "%d/%m/%y"]
        };
        for format in formats {
            if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
                return Some(date);
            }
        }
    }
    for format in ["%Y/%m/%d", "%d-%m-%Y", "%B %d, %Y", "%b %d, %Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }
    None
}

/// Coerces a cell to a calendar date, or `None` on failure.
///
/// Accepts native date cells, Excel serial numbers in the plausible date
/// window, and common textual formats.
#[must_use]
pub fn to_date(value: &CellValue) -> Option<NaiveDate> {
    if value.is_blank() {
        return None;
    }
    match value {
        CellValue::Date(date) => Some(*date),
        CellValue::DateTime(datetime) => Some(datetime.date()),
        CellValue::Int(serial) => serial_to_date(*serial),
        #[allow(clippy::cast_possible_truncation)]
        CellValue::Float(serial) => serial_to_date(*serial as i64),
        CellValue::Text(text) => parse_date_text(text),
        _ => None,
    }
}

fn parse_decimal_text(text: &str) -> Option<Decimal> {
    let mut candidate = text.trim().to_string();
    if is_blank_text(&candidate) {
        return None;
    }

    // Accounting negatives: (1,234.56)
    let negative = candidate.starts_with('(') && candidate.ends_with(')');
    if negative {
        candidate = candidate[1..candidate.len() - 1].trim().to_string();
    }

    candidate = candidate.replace(',', "");
    if let Some(stripped) = candidate.strip_prefix('$') {
        candidate = stripped.trim().to_string();
    }

    let percent = candidate.ends_with('%');
    if percent {
        candidate = candidate[..candidate.len() - 1].trim().to_string();
    }

    // The scientific fallback keeps values like "1.23E+5" exact instead of
    // failing or round-tripping through binary floats.
    let mut parsed = candidate
        .parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(&candidate))
        .ok()?;

    if negative {
        parsed = -parsed;
    }
    if percent {
        parsed /= Decimal::ONE_HUNDRED;
    }
    Some(parsed)
}

/// Coerces a cell to an exact decimal, or `None` on failure.
///
/// Floats are converted through their shortest string representation so a
/// spreadsheet value never picks up binary-float artifacts.
#[must_use]
pub fn to_decimal(value: &CellValue) -> Option<Decimal> {
    if value.is_blank() {
        return None;
    }
    match value {
        CellValue::Int(int) => Some(Decimal::from(*int)),
        CellValue::Float(float) => {
            let text = float.to_string();
            text.parse::<Decimal>()
                .or_else(|_| Decimal::from_scientific(&text))
                .ok()
        }
        CellValue::Text(text) => parse_decimal_text(text),
        CellValue::Bool(flag) => Some(Decimal::from(u8::from(*flag))),
        _ => None,
    }
}

/// Coerces a cell to an integer, or `None` on failure.
#[must_use]
pub fn to_int(value: &CellValue) -> Option<i64> {
    if value.is_blank() {
        return None;
    }
    match value {
        CellValue::Int(int) => Some(*int),
        CellValue::Bool(flag) => Some(i64::from(*flag)),
        _ => to_decimal(value).and_then(|decimal| decimal.trunc().to_i64()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[test]
    fn test_blank_detection() {
        assert!(CellValue::Empty.is_blank());
        assert!(CellValue::Text("  ".into()).is_blank());
        assert!(CellValue::Text("-".into()).is_blank());
        assert!(CellValue::Text("NaN".into()).is_blank());
        assert!(CellValue::Text("\u{2014}".into()).is_blank());
        assert!(!CellValue::Text("0".into()).is_blank());
        assert!(!CellValue::Int(0).is_blank());
    }

    #[rstest]
    #[case(CellValue::Text("1234.56".into()), dec!(1234.56))]
    #[case(CellValue::Text("1,234.56".into()), dec!(1234.56))]
    #[case(CellValue::Text("(1,234.56)".into()), dec!(-1234.56))]
    #[case(CellValue::Text("$2,500".into()), dec!(2500))]
    #[case(CellValue::Text("12.5%".into()), dec!(0.125))]
    #[case(CellValue::Int(42), dec!(42))]
    #[case(CellValue::Bool(true), dec!(1))]
    fn test_to_decimal(#[case] cell: CellValue, #[case] expected: Decimal) {
        assert_eq!(to_decimal(&cell), Some(expected));
    }

    #[test]
    fn test_to_decimal_scientific_round_trip() {
        // Spreadsheet-exported scientific notation must stay exact.
        let parsed = to_decimal(&CellValue::Text("1.23E+5".into())).unwrap();
        assert_eq!(parsed, dec!(123000));
        assert_eq!(parsed.to_string(), "123000");

        let negative_exp = to_decimal(&CellValue::Text("1.5e-3".into())).unwrap();
        assert_eq!(negative_exp, dec!(0.0015));
    }

    #[test]
    fn test_to_decimal_float_avoids_artifacts() {
        let parsed = to_decimal(&CellValue::Float(0.1)).unwrap();
        assert_eq!(parsed, dec!(0.1));
    }

    #[test]
    fn test_to_decimal_unparseable_is_none() {
        assert_eq!(to_decimal(&CellValue::Text("n/a value".into())), None);
        assert_eq!(to_decimal(&CellValue::Empty), None);
    }

    #[test]
    fn test_to_date_from_serial() {
        // 2024-01-15 is serial 45306 in the 1900 date system.
        let date = to_date(&CellValue::Int(45306)).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());

        // Outside the plausible window: not a date.
        assert_eq!(to_date(&CellValue::Int(1234)), None);
    }

    #[rstest]
    #[case("2024-03-09", 2024, 3, 9)]
    #[case("03/09/2024", 2024, 3, 9)]
    #[case("25/03/2024", 2024, 3, 25)]
    #[case("2024/03/09", 2024, 3, 9)]
    fn test_to_date_from_text(#[case] text: &str, #[case] y: i32, #[case] m: u32, #[case] d: u32) {
        let expected = NaiveDate::from_ymd_opt(y, m, d).unwrap();
        assert_eq!(to_date(&CellValue::Text(text.into())), Some(expected));
    }

    #[test]
    fn test_to_date_unparseable_is_none() {
        assert_eq!(to_date(&CellValue::Text("quarterly".into())), None);
    }

    #[rstest]
    #[case(CellValue::Int(7), Some(7))]
    #[case(CellValue::Float(7.9), Some(7))]
    #[case(CellValue::Text("1,200".into()), Some(1200))]
    #[case(CellValue::Bool(true), Some(1))]
    #[case(CellValue::Text("abc".into()), None)]
    fn test_to_int(#[case] cell: CellValue, #[case] expected: Option<i64>) {
        assert_eq!(to_int(&cell), expected);
    }
}
