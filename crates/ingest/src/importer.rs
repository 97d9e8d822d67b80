//! Import orchestration: workbook file → structured outcome.
//!
//! Parsing is separated from persistence so the whole pipeline up to the
//! database boundary is testable against fixture workbooks. Failures never
//! escape [`ImportService::import_file`]; they are folded into the outcome.

use std::path::Path;

use chrono::{NaiveDate, Utc};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use tracing::{info, warn};

use lendview_core::sheet::{
    extract_overview, extract_table, schema_for_family, OverviewRecord, RowFamily, SheetSchema,
    OVERVIEW_SHEET, SHEET_SCHEMAS,
};
use lendview_db::repositories::{ImportError, ImportRepository, PersistOptions, SheetBatch};

use crate::error::IngestError;
use crate::reader::{read_workbook, WorkbookData};

/// Overall import status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportStatus {
    /// Every mapped sheet imported cleanly.
    Success,
    /// Rows were imported but some sheets were missing, empty, or failed.
    Partial,
    /// Nothing usable was imported.
    Failed,
}

/// Per-sheet status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SheetStatus {
    /// Rows imported.
    Ok,
    /// Sheet absent from the workbook.
    Missing,
    /// Sheet present but no data rows survived admission.
    Empty,
    /// Sheet failed to parse or persist.
    Failed,
}

/// One line of the per-sheet import summary.
#[derive(Debug, Clone, Serialize)]
pub struct SheetReport {
    /// Workbook sheet name.
    pub sheet: String,
    /// Destination row family name.
    pub model: &'static str,
    /// Rows imported.
    pub imported: usize,
    /// Rows skipped by admission.
    pub skipped: usize,
    /// Sheet status.
    pub status: SheetStatus,
    /// Human-readable note for non-ok statuses.
    pub message: String,
}

/// One recorded import error.
#[derive(Debug, Clone, Serialize)]
pub struct ImportIssue {
    /// Sheet the error belongs to, empty for workbook-level errors.
    pub sheet: String,
    /// Error message.
    pub error: String,
}

/// Structured result returned across the import boundary.
#[derive(Debug, Clone, Serialize)]
pub struct ImportOutcome {
    /// Overall status.
    pub status: ImportStatus,
    /// New report id when the transaction committed.
    pub report_id: Option<i64>,
    /// Borrower id when resolved.
    pub borrower_id: Option<i64>,
    /// Per-sheet summary.
    pub summary: Vec<SheetReport>,
    /// Recorded errors.
    pub errors: Vec<ImportIssue>,
    /// Aggregate imported row count.
    pub total_imported: usize,
    /// Aggregate skipped row count.
    pub total_skipped: usize,
}

impl ImportOutcome {
    fn failed(message: String) -> Self {
        Self {
            status: ImportStatus::Failed,
            report_id: None,
            borrower_id: None,
            summary: Vec::new(),
            errors: vec![ImportIssue {
                sheet: String::new(),
                error: message,
            }],
            total_imported: 0,
            total_skipped: 0,
        }
    }
}

/// One import request.
#[derive(Debug, Clone)]
pub struct ImportRequest {
    /// Workbook path on disk.
    pub path: std::path::PathBuf,
    /// Original filename override; defaults to the path's file name.
    pub source_file: Option<String>,
    /// Explicit report date; wins over the overview sheet's date.
    pub report_date: Option<NaiveDate>,
    /// Delete the borrower's previously imported data first.
    pub clear_existing: bool,
}

/// Parse-phase result: typed batches plus the per-sheet summary.
#[derive(Debug)]
pub struct ParsedWorkbook {
    /// Overview key/value record.
    pub overview: OverviewRecord,
    /// Report date taken from the overview sheet, when present.
    pub overview_report_date: Option<NaiveDate>,
    /// Typed row batches ready for persistence.
    pub batches: Vec<SheetBatch>,
    /// Per-sheet summary for every mapped sheet.
    pub summary: Vec<SheetReport>,
    /// Parse-phase errors.
    pub errors: Vec<ImportIssue>,
}

impl ParsedWorkbook {
    /// Total rows admitted across all batches.
    #[must_use]
    pub fn total_imported(&self) -> usize {
        self.summary.iter().map(|sheet| sheet.imported).sum()
    }

    /// Total rows skipped across all batches.
    #[must_use]
    pub fn total_skipped(&self) -> usize {
        self.summary.iter().map(|sheet| sheet.skipped).sum()
    }
}

fn parse_mapped_sheet(
    workbook: &WorkbookData,
    schema: &'static SheetSchema,
    batches: &mut Vec<SheetBatch>,
    summary: &mut Vec<SheetReport>,
) {
    let Some(rows) = workbook.sheet(schema.sheet_name) else {
        summary.push(SheetReport {
            sheet: schema.sheet_name.to_string(),
            model: schema.family.name(),
            imported: 0,
            skipped: 0,
            status: SheetStatus::Missing,
            message: "Missing sheet in workbook".to_string(),
        });
        return;
    };

    let table = extract_table(schema, rows);
    if table.records.is_empty() {
        summary.push(SheetReport {
            sheet: schema.sheet_name.to_string(),
            model: schema.family.name(),
            imported: 0,
            skipped: table.skipped,
            status: SheetStatus::Empty,
            message: "No data rows detected".to_string(),
        });
        return;
    }

    summary.push(SheetReport {
        sheet: schema.sheet_name.to_string(),
        model: schema.family.name(),
        imported: table.records.len(),
        skipped: table.skipped,
        status: SheetStatus::Ok,
        message: String::new(),
    });
    batches.push(SheetBatch {
        sheet_name: schema.sheet_name.to_string(),
        family: schema.family,
        records: table.records,
    });
}

/// Parses a workbook into typed batches without touching the database.
///
/// # Errors
///
/// Returns an error when the workbook cannot be read or its overview sheet
/// is missing or malformed; per-sheet problems are soft and recorded in the
/// summary instead.
pub fn parse_workbook(path: &Path) -> Result<ParsedWorkbook, IngestError> {
    let workbook = read_workbook(path)?;

    let overview_rows = workbook
        .sheet(OVERVIEW_SHEET)
        .ok_or_else(|| IngestError::Overview("workbook has no Borrower Overview sheet".into()))?;
    let overview =
        extract_overview(overview_rows).map_err(|err| IngestError::Overview(err.to_string()))?;
    let overview_report_date = overview.date("Current Update");

    let mut batches = Vec::new();
    let mut summary = Vec::new();
    let errors = Vec::new();

    // The overview sheet is also stored verbatim as its own row family.
    if let Some(schema) = schema_for_family(RowFamily::BorrowerOverview) {
        let table = extract_table(schema, overview_rows);
        if !table.records.is_empty() {
            summary.push(SheetReport {
                sheet: OVERVIEW_SHEET.to_string(),
                model: schema.family.name(),
                imported: table.records.len(),
                skipped: table.skipped,
                status: SheetStatus::Ok,
                message: String::new(),
            });
            batches.push(SheetBatch {
                sheet_name: OVERVIEW_SHEET.to_string(),
                family: RowFamily::BorrowerOverview,
                records: table.records,
            });
        }
    }

    for schema in SHEET_SCHEMAS {
        if schema.family == RowFamily::BorrowerOverview {
            continue;
        }
        parse_mapped_sheet(&workbook, schema, &mut batches, &mut summary);
    }

    // Anything unmapped is skipped, not an error.
    for (name, _) in &workbook.sheets {
        let known = name.trim().eq_ignore_ascii_case(OVERVIEW_SHEET)
            || lendview_core::sheet::schema_for_sheet(name).is_some();
        if !known {
            warn!(sheet = %name, "skipping unmapped sheet");
        }
    }

    Ok(ParsedWorkbook {
        overview,
        overview_report_date,
        batches,
        summary,
        errors,
    })
}

fn overall_status(summary: &[SheetReport], total_imported: usize) -> ImportStatus {
    let any_failed = summary
        .iter()
        .any(|sheet| sheet.status == SheetStatus::Failed);
    let any_warning = summary
        .iter()
        .any(|sheet| matches!(sheet.status, SheetStatus::Missing | SheetStatus::Empty));

    if any_failed {
        if total_imported == 0 {
            ImportStatus::Failed
        } else {
            ImportStatus::Partial
        }
    } else if any_warning {
        if total_imported > 0 {
            ImportStatus::Partial
        } else {
            ImportStatus::Failed
        }
    } else {
        ImportStatus::Success
    }
}

/// High-level import entry point.
#[derive(Debug, Clone)]
pub struct ImportService {
    repository: ImportRepository,
}

impl ImportService {
    /// Creates a new import service.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            repository: ImportRepository::new(db),
        }
    }

    /// Imports one workbook. Failure modes never raise past this boundary;
    /// they are converted into a `failed` outcome with the triggering error
    /// captured.
    pub async fn import_file(&self, request: &ImportRequest) -> ImportOutcome {
        let parsed = match parse_workbook(&request.path) {
            Ok(parsed) => parsed,
            Err(err) => return ImportOutcome::failed(err.to_string()),
        };

        let source_file = request.source_file.clone().unwrap_or_else(|| {
            request
                .path
                .file_name()
                .map_or_else(|| "workbook.xlsx".to_string(), |name| {
                    name.to_string_lossy().to_string()
                })
        });
        // Report date priority: explicit input > overview date > today.
        let report_date = request
            .report_date
            .or(parsed.overview_report_date)
            .unwrap_or_else(|| Utc::now().date_naive());

        let options = PersistOptions {
            source_file,
            report_date,
            clear_existing: request.clear_existing,
        };

        let mut summary = parsed.summary.clone();
        let mut errors = parsed.errors.clone();

        match self
            .repository
            .persist(&parsed.overview, &parsed.batches, &options)
            .await
        {
            Ok(receipt) => {
                let total_imported = parsed.total_imported();
                let total_skipped = parsed.total_skipped();
                let status = overall_status(&summary, total_imported);
                info!(
                    report_id = receipt.report_id,
                    borrower_id = receipt.borrower_id,
                    total_imported,
                    total_skipped,
                    "workbook import committed"
                );
                ImportOutcome {
                    status,
                    report_id: Some(receipt.report_id),
                    borrower_id: Some(receipt.borrower_id),
                    summary,
                    errors,
                    total_imported,
                    total_skipped,
                }
            }
            Err(err) => {
                warn!(error = %err, "workbook import rolled back");
                let sheet_name = match &err {
                    ImportError::Sheet { sheet, .. } => sheet.clone(),
                    ImportError::MissingCompanyId => OVERVIEW_SHEET.to_string(),
                    ImportError::Database(_) => String::new(),
                };
                for report in &mut summary {
                    if report.sheet == sheet_name {
                        report.status = SheetStatus::Failed;
                        report.message = err.to_string();
                        report.imported = 0;
                    }
                }
                errors.push(ImportIssue {
                    sheet: sheet_name,
                    error: err.to_string(),
                });
                ImportOutcome {
                    status: ImportStatus::Failed,
                    report_id: None,
                    borrower_id: None,
                    summary,
                    errors,
                    total_imported: 0,
                    total_skipped: parsed.total_skipped(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(status: SheetStatus, imported: usize) -> SheetReport {
        SheetReport {
            sheet: "Sheet".to_string(),
            model: "Model",
            imported,
            skipped: 0,
            status,
            message: String::new(),
        }
    }

    #[test]
    fn test_overall_status_success() {
        let summary = vec![report(SheetStatus::Ok, 5), report(SheetStatus::Ok, 2)];
        assert_eq!(overall_status(&summary, 7), ImportStatus::Success);
    }

    #[test]
    fn test_overall_status_partial_with_missing_sheets() {
        let summary = vec![report(SheetStatus::Ok, 5), report(SheetStatus::Missing, 0)];
        assert_eq!(overall_status(&summary, 5), ImportStatus::Partial);
    }

    #[test]
    fn test_overall_status_failed_when_nothing_imported() {
        let summary = vec![report(SheetStatus::Missing, 0), report(SheetStatus::Empty, 0)];
        assert_eq!(overall_status(&summary, 0), ImportStatus::Failed);
    }

    #[test]
    fn test_overall_status_failed_sheet_with_other_rows_is_partial() {
        let summary = vec![report(SheetStatus::Ok, 5), report(SheetStatus::Failed, 0)];
        assert_eq!(overall_status(&summary, 5), ImportStatus::Partial);
    }
}
