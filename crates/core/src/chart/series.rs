//! Fixed-length chart series.
//!
//! Every chart series is normalized to a target length: shorter series are
//! left-padded by repeating the first value (or a caller-supplied fallback
//! when empty), longer series are right-truncated to the most recent points.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

/// Default number of points per chart series.
pub const DEFAULT_SERIES_LEN: usize = 5;

/// One labeled series point.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    /// Display label.
    pub label: String,
    /// Point value.
    pub value: Decimal,
}

/// A timestamped metric value before monthly bucketing.
#[derive(Debug, Clone, PartialEq)]
pub struct DatedValue {
    /// Creation timestamp of the underlying row.
    pub created_at: NaiveDateTime,
    /// Metric value.
    pub value: Decimal,
}

/// Normalized chart series: parallel label and value vectors of equal,
/// fixed length.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct ChartSeries {
    /// Point labels.
    pub labels: Vec<String>,
    /// Point values.
    pub values: Vec<Decimal>,
}

/// Enforces the target length on a series.
///
/// Fewer points: left-pad by repeating the first value, or `fallback` when
/// the series is empty; padded series get synthesized zero-padded sequence
/// labels. More points: keep the most recent `target`.
#[must_use]
pub fn normalize_series(points: &[SeriesPoint], target: usize, fallback: Decimal) -> ChartSeries {
    if target == 0 {
        return ChartSeries::default();
    }

    if points.len() >= target {
        let recent = &points[points.len() - target..];
        return ChartSeries {
            labels: recent.iter().map(|p| p.label.clone()).collect(),
            values: recent.iter().map(|p| p.value).collect(),
        };
    }

    let pad = target - points.len();
    let first_value = points.first().map_or(fallback, |p| p.value);

    let mut values = vec![first_value; pad];
    values.extend(points.iter().map(|p| p.value));

    // Real labels are insufficient once padding enters the picture.
    let labels = (1..=target).map(|n| format!("{n:02}")).collect();

    ChartSeries { labels, values }
}

/// Buckets timestamped values by calendar month and reduces each bucket to
/// the snapshot sharing its maximum timestamp, summed.
///
/// This mirrors the snapshot-replace import semantics: within a month, only
/// the rows from the latest import count. Labels are `MM/YY`, sorted
/// chronologically.
#[must_use]
pub fn monthly_latest_sum(
    values: &[DatedValue],
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Vec<SeriesPoint> {
    use std::collections::BTreeMap;

    let mut buckets: BTreeMap<(i32, u32), Vec<&DatedValue>> = BTreeMap::new();
    for value in values {
        let date = value.created_at.date();
        if start.map_or(false, |s| date < s) || end.map_or(false, |e| date > e) {
            continue;
        }
        buckets
            .entry((date.year(), date.month()))
            .or_default()
            .push(value);
    }

    buckets
        .into_iter()
        .map(|((year, month), members)| {
            let latest = members.iter().map(|v| v.created_at).max();
            let total: Decimal = members
                .iter()
                .filter(|v| Some(v.created_at) == latest)
                .map(|v| v.value)
                .sum();
            SeriesPoint {
                label: format!("{month:02}/{:02}", year.rem_euclid(100)),
                value: total,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn point(label: &str, value: Decimal) -> SeriesPoint {
        SeriesPoint {
            label: label.to_string(),
            value,
        }
    }

    fn dated(text: &str, value: Decimal) -> DatedValue {
        DatedValue {
            created_at: NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S").unwrap(),
            value,
        }
    }

    #[test]
    fn test_normalize_pads_left_with_first_value() {
        let points = vec![point("04/24", dec!(10)), point("05/24", dec!(20))];
        let series = normalize_series(&points, 5, dec!(0));

        assert_eq!(series.values.len(), 5);
        assert_eq!(
            series.values,
            vec![dec!(10), dec!(10), dec!(10), dec!(10), dec!(20)]
        );
        assert_eq!(series.labels, vec!["01", "02", "03", "04", "05"]);
    }

    #[test]
    fn test_normalize_empty_uses_fallback() {
        let series = normalize_series(&[], 5, dec!(7));
        assert_eq!(series.values, vec![dec!(7); 5]);
        assert_eq!(series.labels.len(), 5);
    }

    #[test]
    fn test_normalize_truncates_to_most_recent() {
        let points: Vec<SeriesPoint> = (1..=8)
            .map(|n| point(&format!("{n:02}/24"), Decimal::from(n)))
            .collect();
        let series = normalize_series(&points, 5, dec!(0));
        assert_eq!(
            series.values,
            vec![dec!(4), dec!(5), dec!(6), dec!(7), dec!(8)]
        );
        assert_eq!(series.labels[0], "04/24");
        assert_eq!(series.labels[4], "08/24");
    }

    #[test]
    fn test_normalize_exact_length_keeps_labels() {
        let points: Vec<SeriesPoint> = (1..=5)
            .map(|n| point(&format!("{n:02}/24"), Decimal::from(n)))
            .collect();
        let series = normalize_series(&points, 5, dec!(0));
        assert_eq!(series.labels[0], "01/24");
        assert_eq!(series.values[4], dec!(5));
    }

    #[test]
    fn test_monthly_latest_sum_snapshot_per_month() {
        let values = vec![
            dated("2024-01-05 12:00:00", dec!(100)),
            dated("2024-01-20 12:00:00", dec!(150)),
            dated("2024-02-10 12:00:00", dec!(200)),
        ];
        let points = monthly_latest_sum(&values, None, None);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].label, "01/24");
        assert_eq!(points[0].value, dec!(150));
        assert_eq!(points[1].label, "02/24");
        assert_eq!(points[1].value, dec!(200));
    }

    #[test]
    fn test_monthly_latest_sum_sums_rows_sharing_latest_timestamp() {
        let values = vec![
            dated("2024-01-20 12:00:00", dec!(150)),
            dated("2024-01-20 12:00:00", dec!(50)),
            dated("2024-01-05 12:00:00", dec!(999)),
        ];
        let points = monthly_latest_sum(&values, None, None);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].value, dec!(200));
    }

    #[test]
    fn test_monthly_latest_sum_respects_range() {
        let values = vec![
            dated("2024-01-05 12:00:00", dec!(100)),
            dated("2024-03-10 12:00:00", dec!(300)),
        ];
        let start = NaiveDate::from_ymd_opt(2024, 2, 1);
        let points = monthly_latest_sum(&values, start, None);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].label, "03/24");
    }
}
