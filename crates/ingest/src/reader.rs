//! Workbook reading via calamine.
//!
//! Cells are mapped into the core [`CellValue`] model immediately so that
//! everything downstream stays independent of the spreadsheet library.

use std::path::Path;

use calamine::{open_workbook, Data, Reader, Xlsx};
use chrono::NaiveDateTime;

use lendview_core::sheet::CellValue;

use crate::error::IngestError;

/// A fully read workbook: sheet names in workbook order with their cells.
#[derive(Debug, Default)]
pub struct WorkbookData {
    /// (sheet name, rows) in workbook order.
    pub sheets: Vec<(String, Vec<Vec<CellValue>>)>,
}

impl WorkbookData {
    /// Finds a sheet by name, tolerating casing and stray whitespace.
    #[must_use]
    pub fn sheet(&self, name: &str) -> Option<&[Vec<CellValue>]> {
        let wanted = name.trim().to_lowercase();
        self.sheets
            .iter()
            .find(|(sheet_name, _)| sheet_name.trim().to_lowercase() == wanted)
            .map(|(_, rows)| rows.as_slice())
    }
}

fn convert_cell(data: &Data) -> CellValue {
    match data {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(text) => CellValue::Text(text.clone()),
        Data::Float(value) => CellValue::Float(*value),
        Data::Int(value) => CellValue::Int(*value),
        Data::Bool(value) => CellValue::Bool(*value),
        // Serial date; the typed coercion layer decides whether it is one.
        Data::DateTime(value) => CellValue::Float(value.as_f64()),
        Data::DateTimeIso(text) => NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S")
            .map_or_else(|_| CellValue::Text(text.clone()), CellValue::DateTime),
        Data::DurationIso(text) => CellValue::Text(text.clone()),
    }
}

/// Reads an `.xlsx` workbook into memory.
///
/// # Errors
///
/// Returns [`IngestError::Workbook`] when the file cannot be opened; a
/// sheet that fails to read is skipped and logged rather than fatal.
pub fn read_workbook(path: &Path) -> Result<WorkbookData, IngestError> {
    let mut workbook: Xlsx<_> =
        open_workbook(path).map_err(|err: calamine::XlsxError| IngestError::Workbook(err.to_string()))?;

    let sheet_names = workbook.sheet_names().to_vec();
    let mut sheets = Vec::with_capacity(sheet_names.len());
    for sheet_name in sheet_names {
        match workbook.worksheet_range(&sheet_name) {
            Ok(range) => {
                let rows: Vec<Vec<CellValue>> = range
                    .rows()
                    .map(|row| row.iter().map(convert_cell).collect())
                    .collect();
                sheets.push((sheet_name, rows));
            }
            Err(err) => {
                tracing::warn!(sheet = %sheet_name, error = %err, "skipping unreadable sheet");
            }
        }
    }

    Ok(WorkbookData { sheets })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_cell_variants() {
        assert_eq!(convert_cell(&Data::Empty), CellValue::Empty);
        assert_eq!(
            convert_cell(&Data::String("Acme".into())),
            CellValue::Text("Acme".into())
        );
        assert_eq!(convert_cell(&Data::Int(7)), CellValue::Int(7));
        assert_eq!(convert_cell(&Data::Bool(true)), CellValue::Bool(true));
    }

    #[test]
    fn test_read_workbook_missing_file() {
        let result = read_workbook(Path::new("/nonexistent/workbook.xlsx"));
        assert!(result.is_err());
    }
}
