//! Date-range presets for dashboard queries.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Fixed set of dashboard date-range presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateRangePreset {
    /// Today only.
    Today,
    /// Yesterday only.
    Yesterday,
    /// Last 7 days including today.
    Last7,
    /// Last 14 days including today.
    Last14,
    /// Last 30 days including today.
    #[default]
    Last30,
    /// Last 90 days including today.
    Last90,
}

impl DateRangePreset {
    /// Parses a preset from its query-string token, falling back to the
    /// default for unknown input.
    #[must_use]
    pub fn parse(token: &str) -> Self {
        match token.trim().to_lowercase().as_str() {
            "today" => Self::Today,
            "yesterday" => Self::Yesterday,
            "last7" => Self::Last7,
            "last14" => Self::Last14,
            "last90" => Self::Last90,
            _ => Self::Last30,
        }
    }

    /// Query-string token for this preset.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Yesterday => "yesterday",
            Self::Last7 => "last7",
            Self::Last14 => "last14",
            Self::Last30 => "last30",
            Self::Last90 => "last90",
        }
    }

    /// Inclusive (start, end) bounds of the preset relative to `today`.
    #[must_use]
    pub fn bounds(self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let days_back = |n: u64| today.checked_sub_days(Days::new(n)).unwrap_or(today);
        match self {
            Self::Today => (today, today),
            Self::Yesterday => (days_back(1), days_back(1)),
            Self::Last7 => (days_back(6), today),
            Self::Last14 => (days_back(13), today),
            Self::Last30 => (days_back(29), today),
            Self::Last90 => (days_back(89), today),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case("today", DateRangePreset::Today)]
    #[case("Yesterday", DateRangePreset::Yesterday)]
    #[case("last7", DateRangePreset::Last7)]
    #[case("last14", DateRangePreset::Last14)]
    #[case("last30", DateRangePreset::Last30)]
    #[case("last90", DateRangePreset::Last90)]
    #[case("unknown", DateRangePreset::Last30)]
    #[case("", DateRangePreset::Last30)]
    fn test_parse(#[case] token: &str, #[case] expected: DateRangePreset) {
        assert_eq!(DateRangePreset::parse(token), expected);
    }

    #[test]
    fn test_bounds_today() {
        let today = day(2024, 6, 15);
        assert_eq!(DateRangePreset::Today.bounds(today), (today, today));
    }

    #[test]
    fn test_bounds_yesterday() {
        let today = day(2024, 6, 15);
        let yesterday = day(2024, 6, 14);
        assert_eq!(
            DateRangePreset::Yesterday.bounds(today),
            (yesterday, yesterday)
        );
    }

    #[test]
    fn test_bounds_windows_are_inclusive_of_today() {
        let today = day(2024, 6, 15);
        assert_eq!(
            DateRangePreset::Last7.bounds(today),
            (day(2024, 6, 9), today)
        );
        assert_eq!(
            DateRangePreset::Last30.bounds(today),
            (day(2024, 5, 17), today)
        );
        assert_eq!(
            DateRangePreset::Last90.bounds(today),
            (day(2024, 3, 18), today)
        );
    }

    #[test]
    fn test_round_trip_tokens() {
        for preset in [
            DateRangePreset::Today,
            DateRangePreset::Yesterday,
            DateRangePreset::Last7,
            DateRangePreset::Last14,
            DateRangePreset::Last30,
            DateRangePreset::Last90,
        ] {
            assert_eq!(DateRangePreset::parse(preset.as_str()), preset);
        }
    }
}
