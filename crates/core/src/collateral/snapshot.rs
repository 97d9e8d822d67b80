//! Latest-snapshot selection.
//!
//! Each import creates a fresh full snapshot of collateral rows rather than
//! incremental deltas, so "current" data is the set of rows sharing the
//! maximum creation timestamp within the active range.

use chrono::NaiveDate;

use super::types::CollateralRow;

/// Selects the current snapshot: rows whose `created_at` falls inside the
/// inclusive date range and matches the latest timestamp seen there.
#[must_use]
pub fn latest_snapshot<'a>(
    rows: &'a [CollateralRow],
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Vec<&'a CollateralRow> {
    let in_range = |row: &CollateralRow| {
        let date = row.created_at.date();
        start.map_or(true, |s| date >= s) && end.map_or(true, |e| date <= e)
    };

    let latest = rows
        .iter()
        .filter(|row| in_range(row))
        .map(|row| row.created_at)
        .max();

    let Some(latest) = latest else {
        return Vec::new();
    };

    rows.iter()
        .filter(|row| in_range(row) && row.created_at == latest)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn at(text: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn row(created: &str, sub_type: &str) -> CollateralRow {
        CollateralRow {
            created_at: at(created),
            sub_type: Some(sub_type.to_string()),
            ..CollateralRow::default()
        }
    }

    #[test]
    fn test_latest_snapshot_keeps_only_max_timestamp() {
        let rows = vec![
            row("2024-01-05 12:00:00", "FG old"),
            row("2024-01-20 12:00:00", "FG"),
            row("2024-01-20 12:00:00", "RM"),
        ];
        let snapshot = latest_snapshot(&rows, None, None);
        let labels: Vec<_> = snapshot
            .iter()
            .map(|r| r.sub_type.clone().unwrap())
            .collect();
        assert_eq!(labels, ["FG", "RM"]);
    }

    #[test]
    fn test_latest_snapshot_respects_range() {
        let rows = vec![
            row("2024-01-05 12:00:00", "January"),
            row("2024-02-10 12:00:00", "February"),
        ];
        let start = NaiveDate::from_ymd_opt(2024, 1, 1);
        let end = NaiveDate::from_ymd_opt(2024, 1, 31);
        let snapshot = latest_snapshot(&rows, start, end);
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].sub_type.as_deref(), Some("January"));
    }

    #[test]
    fn test_latest_snapshot_empty_when_nothing_in_range() {
        let rows = vec![row("2024-01-05 12:00:00", "January")];
        let start = NaiveDate::from_ymd_opt(2024, 3, 1);
        let snapshot = latest_snapshot(&rows, start, None);
        assert!(snapshot.is_empty());
    }
}
