//! Workbook ingestion and export.
//!
//! This crate owns every touch point with actual spreadsheet files:
//! - `reader` maps workbook cells into the core [`lendview_core::sheet::CellValue`] model
//! - `importer` orchestrates parse → structured outcome → transactional persist
//! - `export` renders persisted row families back into a workbook

pub mod error;
pub mod export;
pub mod importer;
pub mod reader;

pub use error::IngestError;
pub use export::ExportService;
pub use importer::{
    parse_workbook, ImportIssue, ImportOutcome, ImportRequest, ImportService, ImportStatus,
    ParsedWorkbook, SheetReport, SheetStatus,
};
pub use reader::read_workbook;
