//! Workbook export: one sheet per persisted row family.
//!
//! Sheet names are truncated to the 31-character spreadsheet limit and
//! timestamp cells are written without timezone information, which
//! spreadsheet formats cannot represent.

use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};
use sea_orm::DatabaseConnection;
use serde_json::Value;

use lendview_core::sheet::{schema_for_family, report_families, FieldSpec};
use lendview_db::repositories::ExportRepository;

use crate::error::IngestError;

/// Hard spreadsheet limit on sheet name length.
const SHEET_NAME_LIMIT: usize = 31;

/// Truncates a sheet title to the spreadsheet limit.
#[must_use]
pub fn sheet_title(name: &str) -> String {
    name.chars().take(SHEET_NAME_LIMIT).collect()
}

/// Drops timezone information from a serialized timestamp, leaving a plain
/// `YYYY-MM-DD HH:MM:SS` value.
#[must_use]
pub fn strip_timezone(text: &str) -> String {
    if let Ok(stamped) = chrono::DateTime::parse_from_rfc3339(text) {
        return stamped.naive_utc().format("%Y-%m-%d %H:%M:%S").to_string();
    }
    if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return naive.format("%Y-%m-%d %H:%M:%S").to_string();
    }
    text.to_string()
}

fn is_timestamp_field(name: &str) -> bool {
    name.ends_with("_at")
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    field: &str,
    value: &Value,
) -> Result<(), XlsxError> {
    match value {
        Value::Null => Ok(()),
        Value::Bool(flag) => worksheet.write_boolean(row, col, *flag).map(|_| ()),
        Value::Number(number) => worksheet
            .write_number(row, col, number.as_f64().unwrap_or(0.0))
            .map(|_| ()),
        Value::String(text) => {
            if is_timestamp_field(field) {
                return worksheet
                    .write_string(row, col, strip_timezone(text))
                    .map(|_| ());
            }
            // Decimals serialize as strings; write them back as numbers.
            if let Ok(number) = text.parse::<f64>() {
                worksheet.write_number(row, col, number).map(|_| ())
            } else {
                worksheet.write_string(row, col, text).map(|_| ())
            }
        }
        other => worksheet
            .write_string(row, col, other.to_string())
            .map(|_| ()),
    }
}

/// Writes one family's rows into a new worksheet.
pub(crate) fn write_family_sheet(
    workbook: &mut Workbook,
    title: &str,
    fields: &[FieldSpec],
    rows: &[Value],
) -> Result<(), XlsxError> {
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_title(title))?;

    let mut columns: Vec<&str> = fields.iter().map(|spec| spec.name).collect();
    columns.push("created_at");

    for (col, name) in columns.iter().enumerate() {
        worksheet.write_string(0, u16::try_from(col).unwrap_or(u16::MAX), *name)?;
    }
    for (row_idx, row) in rows.iter().enumerate() {
        let row_number = u32::try_from(row_idx + 1).unwrap_or(u32::MAX);
        for (col, name) in columns.iter().enumerate() {
            let value = row.get(*name).unwrap_or(&Value::Null);
            write_cell(
                worksheet,
                row_number,
                u16::try_from(col).unwrap_or(u16::MAX),
                name,
                value,
            )?;
        }
    }
    Ok(())
}

/// Export service rendering persisted rows back into a workbook.
#[derive(Debug, Clone)]
pub struct ExportService {
    repository: ExportRepository,
}

impl ExportService {
    /// Creates a new export service.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            repository: ExportRepository::new(db),
        }
    }

    /// Builds an `.xlsx` workbook for one borrower, one sheet per row
    /// family that has data.
    ///
    /// # Errors
    ///
    /// Returns an error when a query or the workbook write fails.
    pub async fn export_workbook(&self, borrower_id: i64) -> Result<Vec<u8>, IngestError> {
        let mut workbook = Workbook::new();
        let mut wrote_any = false;

        for family in report_families() {
            let rows = self.repository.family_rows(borrower_id, family).await?;
            if rows.is_empty() {
                continue;
            }
            let Some(schema) = schema_for_family(family) else {
                continue;
            };
            write_family_sheet(&mut workbook, schema.sheet_name, schema.fields, &rows)
                .map_err(|err| IngestError::Export(err.to_string()))?;
            wrote_any = true;
        }

        if !wrote_any {
            // A workbook needs at least one sheet to be valid.
            let worksheet = workbook.add_worksheet();
            worksheet
                .set_name("Empty")
                .map_err(|err| IngestError::Export(err.to_string()))?;
        }

        workbook
            .save_to_buffer()
            .map_err(|err| IngestError::Export(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sheet_title_truncates_to_31_chars() {
        let long = "A Very Long Sheet Name That Exceeds The Limit";
        assert_eq!(sheet_title(long).chars().count(), 31);
        assert_eq!(sheet_title("Forecast"), "Forecast");
    }

    #[test]
    fn test_strip_timezone() {
        assert_eq!(
            strip_timezone("2024-06-15T12:00:00+02:00"),
            "2024-06-15 10:00:00"
        );
        assert_eq!(
            strip_timezone("2024-06-15T12:00:00"),
            "2024-06-15 12:00:00"
        );
        assert_eq!(strip_timezone("not a timestamp"), "not a timestamp");
    }

    #[test]
    fn test_write_family_sheet_smoke() {
        use lendview_core::sheet::{schema_for_family, RowFamily};

        let schema = schema_for_family(RowFamily::ArMetrics).unwrap();
        let rows = vec![json!({
            "division": "North",
            "as_of_date": "2024-06-15",
            "balance": "1250.50",
            "created_at": "2024-06-15T12:00:00",
        })];

        let mut workbook = Workbook::new();
        write_family_sheet(&mut workbook, schema.sheet_name, schema.fields, &rows).unwrap();
        let buffer = workbook.save_to_buffer().unwrap();
        assert!(!buffer.is_empty());
    }
}
