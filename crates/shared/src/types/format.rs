//! Display formatting helpers for dashboard values.
//!
//! Every helper accepts an optional value and renders the `—` placeholder when
//! the value is absent, so missing data degrades to empty-state UI instead of
//! erroring.

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Placeholder rendered for absent values.
pub const PLACEHOLDER: &str = "—";

/// Formats a monetary amount as `$1,234.56`, or `—` when absent.
#[must_use]
pub fn format_currency(value: Option<Decimal>) -> String {
    let Some(amount) = value else {
        return PLACEHOLDER.to_string();
    };
    let text = format!("{:.2}", amount.round_dp(2));
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    let (sign, digits) = int_part
        .strip_prefix('-')
        .map_or(("", int_part), |rest| ("-", rest));
    format!("${sign}{}.{frac_part}", group_thousands(digits))
}

/// Formats a ratio as a percentage with one decimal place, or `—` when absent.
///
/// Stored ratios at or below 1 are treated as fractions and scaled by 100;
/// larger values are assumed to already be expressed in percent.
#[must_use]
pub fn format_pct(value: Option<Decimal>) -> String {
    let Some(pct) = value.map(normalize_pct) else {
        return PLACEHOLDER.to_string();
    };
    format!("{:.1}%", pct.round_dp(1))
}

/// Scales fractional ratios (≤ 1) to percent; leaves percent values alone.
///
/// The boundary at exactly 1 is treated as fractional, so `1` renders as
/// `100.0%`. Legitimately sub-one percent values cannot be distinguished from
/// fractions and will be scaled; this is a known precision risk carried over
/// from the source data convention.
#[must_use]
pub fn normalize_pct(value: Decimal) -> Decimal {
    if value <= Decimal::ONE {
        value * Decimal::ONE_HUNDRED
    } else {
        value
    }
}

/// Formats a date as `MM/DD/YYYY`, or `—` when absent.
#[must_use]
pub fn format_date(value: Option<NaiveDate>) -> String {
    value.map_or_else(
        || PLACEHOLDER.to_string(),
        |d| d.format("%m/%d/%Y").to_string(),
    )
}

/// Returns the string unchanged, or `—` when absent or empty.
#[must_use]
pub fn safe_str(value: Option<&str>) -> String {
    match value {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Formats an amount in abbreviated axis-label form: `$4M`, `$120k`, `$950`.
#[must_use]
pub fn format_short_currency(value: Decimal) -> String {
    let (sign, abs) = if value.is_sign_negative() {
        ("-", -value)
    } else {
        ("", value)
    };

    let billion = Decimal::from(1_000_000_000_u64);
    let million = Decimal::from(1_000_000_u64);
    let thousand = Decimal::from(1_000_u64);

    if abs >= billion {
        format!("${sign}{}B", scale_label(abs / billion))
    } else if abs >= million {
        format!("${sign}{}M", scale_label(abs / million))
    } else if abs >= thousand {
        format!("${sign}{}k", scale_label(abs / thousand))
    } else {
        format!("${sign}{}", scale_label(abs))
    }
}

fn scale_label(value: Decimal) -> String {
    value.round_dp(1).normalize().to_string()
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (len - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(dec!(0), "$0.00")]
    #[case(dec!(1234.5), "$1,234.50")]
    #[case(dec!(1000000), "$1,000,000.00")]
    #[case(dec!(-1234.5), "$-1,234.50")]
    #[case(dec!(999.999), "$1,000.00")]
    fn test_format_currency(#[case] input: Decimal, #[case] expected: &str) {
        assert_eq!(format_currency(Some(input)), expected);
    }

    #[test]
    fn test_format_currency_none_renders_placeholder() {
        assert_eq!(format_currency(None), PLACEHOLDER);
    }

    #[rstest]
    #[case(dec!(0.125), "12.5%")]
    #[case(dec!(12.5), "12.5%")]
    #[case(dec!(1.5), "150.0%")]
    #[case(dec!(1), "100.0%")]
    #[case(dec!(0.005), "0.5%")]
    fn test_format_pct(#[case] input: Decimal, #[case] expected: &str) {
        assert_eq!(format_pct(Some(input)), expected);
    }

    #[test]
    fn test_format_pct_none_renders_placeholder() {
        assert_eq!(format_pct(None), PLACEHOLDER);
    }

    #[test]
    fn test_normalize_pct_boundary_is_fractional() {
        // Exactly 1 is treated as a fraction, not a percent.
        assert_eq!(normalize_pct(dec!(1)), dec!(100));
        assert_eq!(normalize_pct(dec!(1.0001)), dec!(1.0001));
    }

    #[test]
    fn test_format_date() {
        let date = chrono::NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(format_date(Some(date)), "03/09/2024");
        assert_eq!(format_date(None), PLACEHOLDER);
    }

    #[test]
    fn test_safe_str() {
        assert_eq!(safe_str(Some("Acme")), "Acme");
        assert_eq!(safe_str(Some("")), PLACEHOLDER);
        assert_eq!(safe_str(None), PLACEHOLDER);
    }

    #[rstest]
    #[case(dec!(4000000), "$4M")]
    #[case(dec!(120000), "$120k")]
    #[case(dec!(950), "$950")]
    #[case(dec!(2500000), "$2.5M")]
    #[case(dec!(-120000), "$-120k")]
    #[case(dec!(1200000000), "$1.2B")]
    fn test_format_short_currency(#[case] input: Decimal, #[case] expected: &str) {
        assert_eq!(format_short_currency(input), expected);
    }
}
