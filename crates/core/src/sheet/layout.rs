//! Sheet layout handling: header-row detection, tabular extraction, and the
//! non-tabular overview sheet.

use std::collections::BTreeMap;

use thiserror::Error;

use super::cell::{to_date, to_decimal, to_int, CellValue};
use super::header::normalize_header;
use super::record::RowRecord;
use super::schema::SheetSchema;

/// Rows scanned when locating the header of a tabular sheet.
const HEADER_SCAN_LIMIT: usize = 12;

/// A run of this many fully-blank rows terminates the data region.
const BLANK_STREAK_LIMIT: usize = 20;

/// Errors raised while interpreting a sheet layout.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// The overview sheet did not contain the field-name and value rows.
    #[error("overview sheet is missing its field and value rows")]
    MalformedOverview,
}

/// Extracted tabular sheet: resolved columns plus admitted row records.
#[derive(Debug)]
pub struct SheetTable {
    /// Normalized header for every column, deduplicated.
    pub columns: Vec<String>,
    /// Declared field each column resolved to, if any.
    pub resolved: Vec<Option<&'static str>>,
    /// Admitted rows.
    pub records: Vec<RowRecord>,
    /// Rows dropped because every typed field was null.
    pub skipped: usize,
    /// Zero-based index of the detected header row.
    pub header_row: usize,
}

fn row_is_blank(row: &[CellValue]) -> bool {
    row.iter().all(CellValue::is_blank)
}

/// Scores a candidate header row: three points per expected token, one per
/// string cell, with a penalty for repetitive rows that match nothing.
fn score_header_row(row: &[CellValue], schema: &SheetSchema) -> i64 {
    let string_cells: Vec<String> = row
        .iter()
        .filter(|cell| !cell.is_blank())
        .filter_map(|cell| match cell {
            CellValue::Text(text) => Some(text.clone()),
            _ => None,
        })
        .collect();
    if string_cells.is_empty() {
        return -1;
    }

    let normalized: Vec<String> = string_cells
        .iter()
        .map(|text| normalize_header(text))
        .collect();
    let matches = i64::try_from(
        normalized
            .iter()
            .filter(|token| schema.is_expected_token(token))
            .count(),
    )
    .unwrap_or(0);
    let unique: std::collections::BTreeSet<&String> = normalized.iter().collect();
    let total = i64::try_from(normalized.len()).unwrap_or(1).max(1);
    let unique_count = i64::try_from(unique.len()).unwrap_or(0);

    let mut score = matches * 3 + i64::try_from(string_cells.len()).unwrap_or(0);
    // Repetitive rows with no field matches are almost certainly data.
    if matches == 0 && unique_count * 5 < total * 2 {
        score -= 5;
    }
    score
}

fn detect_header_row(rows: &[Vec<CellValue>], schema: &SheetSchema) -> usize {
    if let Some(hint) = schema.header_hint {
        if hint < rows.len() {
            return hint;
        }
    }
    let limit = rows.len().min(HEADER_SCAN_LIMIT);
    let mut best = (i64::MIN, 0);
    for (idx, row) in rows.iter().take(limit).enumerate() {
        let score = score_header_row(row, schema);
        if score > best.0 {
            best = (score, idx);
        }
    }
    best.1
}

fn unique_headers(headers: Vec<String>) -> Vec<String> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    headers
        .into_iter()
        .map(|header| {
            let base = if header.is_empty() {
                "unnamed".to_string()
            } else {
                header
            };
            let count = counts.entry(base.clone()).or_insert(0);
            *count += 1;
            if *count == 1 {
                base
            } else {
                format!("{base}_{count}")
            }
        })
        .collect()
}

/// Extracts a tabular sheet into typed row records.
///
/// The header row is located by scoring the leading rows against the
/// schema's expected field names (or taken from the schema's hint), headers
/// are normalized and resolved against the declared fields, and data rows
/// are admitted through [`RowRecord::from_cells`]. Fully-blank rows are
/// skipped; a long blank streak ends the sheet.
#[must_use]
pub fn extract_table(schema: &'static SheetSchema, rows: &[Vec<CellValue>]) -> SheetTable {
    if rows.is_empty() {
        return SheetTable {
            columns: Vec::new(),
            resolved: Vec::new(),
            records: Vec::new(),
            skipped: 0,
            header_row: 0,
        };
    }

    let header_row = detect_header_row(rows, schema);
    let headers: Vec<String> = rows[header_row]
        .iter()
        .map(|cell| cell.as_text().map_or_else(String::new, |t| normalize_header(&t)))
        .collect();
    let columns = unique_headers(headers);
    let resolved: Vec<Option<&'static str>> = columns
        .iter()
        .map(|column| schema.resolve_column(column))
        .collect();

    let mut records = Vec::new();
    let mut skipped = 0;
    let mut blank_streak = 0;
    for row in rows.iter().skip(header_row + 1) {
        if row_is_blank(row) {
            blank_streak += 1;
            if blank_streak >= BLANK_STREAK_LIMIT {
                break;
            }
            continue;
        }
        blank_streak = 0;
        let record = RowRecord::from_cells(schema, &resolved, row);
        if record.is_empty() {
            skipped += 1;
        } else {
            records.push(record);
        }
    }

    SheetTable {
        columns,
        resolved,
        records,
        skipped,
        header_row,
    }
}

/// Key/value record parsed from the non-tabular overview sheet.
///
/// The overview layout puts field names on its second populated row and the
/// single value row directly beneath it.
#[derive(Debug, Default)]
pub struct OverviewRecord {
    values: BTreeMap<String, CellValue>,
}

impl OverviewRecord {
    /// Raw cell for a field name as written in the sheet.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&CellValue> {
        self.values.get(field)
    }

    /// Text value for a field.
    #[must_use]
    pub fn text(&self, field: &str) -> Option<String> {
        self.values.get(field).and_then(CellValue::as_text)
    }

    /// Integer value for a field.
    #[must_use]
    pub fn int(&self, field: &str) -> Option<i64> {
        self.values.get(field).and_then(|cell| to_int(cell))
    }

    /// Date value for a field.
    #[must_use]
    pub fn date(&self, field: &str) -> Option<chrono::NaiveDate> {
        self.values.get(field).and_then(|cell| to_date(cell))
    }

    /// Decimal value for a field.
    #[must_use]
    pub fn decimal(&self, field: &str) -> Option<rust_decimal::Decimal> {
        self.values.get(field).and_then(|cell| to_decimal(cell))
    }
}

/// Parses the overview sheet's merged key/value record.
///
/// # Errors
///
/// Returns [`LayoutError::MalformedOverview`] when the sheet has fewer than
/// three populated rows (title, field names, values).
pub fn extract_overview(rows: &[Vec<CellValue>]) -> Result<OverviewRecord, LayoutError> {
    let populated: Vec<&Vec<CellValue>> = rows.iter().filter(|row| !row_is_blank(row)).collect();
    if populated.len() < 3 {
        return Err(LayoutError::MalformedOverview);
    }
    let headers = populated[1];
    let cells = populated[2];

    let mut values = BTreeMap::new();
    for (idx, header) in headers.iter().enumerate() {
        let Some(name) = header.as_text() else {
            continue;
        };
        let cell = cells.get(idx).cloned().unwrap_or(CellValue::Empty);
        values.entry(name.trim().to_string()).or_insert(cell);
    }
    Ok(OverviewRecord { values })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::schema::{schema_for_family, RowFamily};
    use rust_decimal_macros::dec;

    fn text(value: &str) -> CellValue {
        CellValue::Text(value.to_string())
    }

    fn collateral_rows() -> Vec<Vec<CellValue>> {
        vec![
            vec![text("Collateral Overview"), CellValue::Empty],
            vec![
                text("Main Type"),
                text("SubType"),
                text("Eligible Collateral"),
                text("Ineligibles"),
                text("Net Collateral"),
            ],
            vec![
                text("Inventory"),
                text("Finished Goods"),
                CellValue::Int(1000),
                CellValue::Int(100),
                CellValue::Int(900),
            ],
            vec![
                CellValue::Empty,
                CellValue::Empty,
                CellValue::Empty,
                CellValue::Empty,
                CellValue::Empty,
            ],
            vec![
                text("Inventory"),
                text("Raw Materials"),
                CellValue::Int(500),
                CellValue::Int(50),
                CellValue::Int(450),
            ],
        ]
    }

    #[test]
    fn test_extract_table_detects_header_below_title() {
        let schema = schema_for_family(RowFamily::CollateralOverview).unwrap();
        let table = extract_table(schema, &collateral_rows());

        assert_eq!(table.header_row, 1);
        assert_eq!(table.records.len(), 2);
        assert_eq!(table.skipped, 0);
        let first = &table.records[0];
        assert_eq!(first.text("sub_type").as_deref(), Some("Finished Goods"));
        assert_eq!(first.decimal("eligible_collateral"), Some(dec!(1000)));
    }

    #[test]
    fn test_extract_table_skips_blank_only_rows() {
        let schema = schema_for_family(RowFamily::CollateralOverview).unwrap();
        let mut rows = collateral_rows();
        rows.push(vec![text("-"), text("-"), CellValue::Empty]);
        let table = extract_table(schema, &rows);
        assert_eq!(table.records.len(), 2);
        assert_eq!(table.skipped, 1);
    }

    #[test]
    fn test_extract_table_empty_sheet() {
        let schema = schema_for_family(RowFamily::CollateralOverview).unwrap();
        let table = extract_table(schema, &[]);
        assert!(table.records.is_empty());
        assert_eq!(table.skipped, 0);
    }

    #[test]
    fn test_extract_table_honors_header_hint() {
        let schema = schema_for_family(RowFamily::BorrowerOverview).unwrap();
        let rows = vec![
            vec![text("Borrower Overview")],
            vec![text("Company"), text("Company ID"), text("Industry")],
            vec![text("Acme"), CellValue::Int(42), text("Manufacturing")],
        ];
        let table = extract_table(schema, &rows);
        assert_eq!(table.header_row, 1);
        assert_eq!(table.records.len(), 1);
        assert_eq!(table.records[0].integer("company_id"), Some(42));
    }

    #[test]
    fn test_extract_overview() {
        let rows = vec![
            vec![text("Borrower Overview")],
            vec![
                text("Company"),
                text("Company ID"),
                text("Primary Contact"),
                text("Current Update"),
            ],
            vec![
                text("Acme"),
                CellValue::Int(42),
                text("Jane Doe"),
                text("2024-06-01"),
            ],
        ];
        let overview = extract_overview(&rows).unwrap();
        assert_eq!(overview.text("Company").as_deref(), Some("Acme"));
        assert_eq!(overview.int("Company ID"), Some(42));
        assert_eq!(
            overview.date("Current Update"),
            chrono::NaiveDate::from_ymd_opt(2024, 6, 1)
        );
        assert_eq!(overview.text("Website"), None);
    }

    #[test]
    fn test_extract_overview_skips_blank_rows() {
        let rows = vec![
            vec![CellValue::Empty],
            vec![text("Borrower Overview")],
            vec![CellValue::Empty, CellValue::Empty],
            vec![text("Company"), text("Company ID")],
            vec![text("Acme"), CellValue::Int(7)],
        ];
        let overview = extract_overview(&rows).unwrap();
        assert_eq!(overview.int("Company ID"), Some(7));
    }

    #[test]
    fn test_extract_overview_malformed() {
        let rows = vec![vec![text("Borrower Overview")]];
        assert!(extract_overview(&rows).is_err());
    }
}
