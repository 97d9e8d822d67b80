//! Human-friendly axis scaling.
//!
//! Gridline steps come from a "nice number" rounding: the raw step is the
//! value range divided by the tick gaps, and its leading digit is rounded up
//! to the nearest of {1, 2, 5, 10} at the same order of magnitude.

use rust_decimal::Decimal;

use lendview_shared::types::format_short_currency;

/// A computed Y-axis scale.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct AxisScale {
    /// Axis minimum; never negative when the underlying values are not.
    pub min: Decimal,
    /// Axis maximum.
    pub max: Decimal,
    /// Step between gridlines.
    pub step: Decimal,
    /// Tick values from min to max inclusive.
    pub ticks: Vec<Decimal>,
    /// Short currency labels for each tick ("$4M", "$120k").
    pub labels: Vec<String>,
}

/// Largest power of ten at or below `value`; `value` must be positive.
fn order_of_magnitude(value: Decimal) -> Decimal {
    let ten = Decimal::TEN;
    let mut magnitude = Decimal::ONE;
    while magnitude * ten <= value {
        magnitude *= ten;
    }
    while magnitude > value {
        magnitude /= ten;
    }
    magnitude
}

/// Computes a nice step size for the given value range and tick count.
///
/// A range needing a raw step near 37 yields exactly 50: magnitude 10,
/// leading digit 3.7, rounded up to 5.
#[must_use]
pub fn nice_step(range: Decimal, tick_count: usize) -> Decimal {
    let gaps = tick_count.saturating_sub(1).max(1);
    let raw = range.abs() / Decimal::from(gaps);
    if raw.is_zero() {
        return Decimal::ONE;
    }

    let magnitude = order_of_magnitude(raw);
    let leading = raw / magnitude;

    let factor = if leading <= Decimal::ONE {
        Decimal::ONE
    } else if leading <= Decimal::TWO {
        Decimal::TWO
    } else if leading <= Decimal::from(5) {
        Decimal::from(5)
    } else {
        Decimal::TEN
    };
    factor * magnitude
}

/// Builds an axis covering `[min_value, max_value]` with ticks landing on
/// round numbers. The axis floor is clamped at zero when the data minimum is
/// non-negative.
#[must_use]
pub fn build_axis(min_value: Decimal, max_value: Decimal, tick_count: usize) -> AxisScale {
    let (low, high) = if min_value <= max_value {
        (min_value, max_value)
    } else {
        (max_value, min_value)
    };

    let step = nice_step(high - low, tick_count);
    let mut min = (low / step).floor() * step;
    if low >= Decimal::ZERO && min < Decimal::ZERO {
        min = Decimal::ZERO;
    }
    let mut max = (high / step).ceil() * step;
    if max <= min {
        max = min + step;
    }

    let mut ticks = Vec::new();
    let mut tick = min;
    while tick <= max {
        ticks.push(tick);
        tick += step;
    }
    let labels = ticks.iter().map(|t| format_short_currency(*t)).collect();

    AxisScale {
        min,
        max,
        step,
        ticks,
        labels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(dec!(148), 5, dec!(50))] // raw 37 -> 50
    #[case(dec!(100), 5, dec!(50))] // raw 25 -> 50
    #[case(dec!(80), 5, dec!(20))] // raw 20 -> 20
    #[case(dec!(4), 5, dec!(1))] // raw 1 -> 1
    #[case(dec!(0.4), 5, dec!(0.1))] // raw 0.1 -> 0.1
    #[case(dec!(36000), 5, dec!(10000))] // raw 9000 -> 10000
    #[case(dec!(2800000), 5, dec!(1000000))]
    fn test_nice_step(#[case] range: Decimal, #[case] ticks: usize, #[case] expected: Decimal) {
        assert_eq!(nice_step(range, ticks), expected);
    }

    #[test]
    fn test_nice_step_zero_range() {
        assert_eq!(nice_step(dec!(0), 5), dec!(1));
    }

    #[test]
    fn test_axis_min_never_negative_for_non_negative_data() {
        let scale = build_axis(dec!(30), dec!(178), 5);
        assert!(scale.min >= Decimal::ZERO);
        assert!(scale.max >= dec!(178));
        assert_eq!(scale.min, dec!(0));
        assert_eq!(scale.step, dec!(50));
    }

    #[test]
    fn test_axis_allows_negative_when_data_is_negative() {
        let scale = build_axis(dec!(-100), dec!(100), 5);
        assert!(scale.min <= dec!(-100));
    }

    #[test]
    fn test_axis_ticks_land_on_round_numbers() {
        let scale = build_axis(dec!(0), dec!(148), 5);
        assert_eq!(scale.step, dec!(50));
        assert_eq!(scale.ticks, vec![dec!(0), dec!(50), dec!(100), dec!(150)]);
        assert_eq!(scale.labels[1], "$50");
    }

    #[test]
    fn test_axis_degenerate_range_still_has_span() {
        let scale = build_axis(dec!(100), dec!(100), 5);
        assert!(scale.max > scale.min);
    }

    #[test]
    fn test_axis_short_labels_for_large_values() {
        let scale = build_axis(dec!(0), dec!(4000000), 5);
        assert_eq!(scale.step, dec!(1000000));
        assert_eq!(scale.labels.last().map(String::as_str), Some("$4M"));
    }
}
