//! Workbook sheet parsing: header normalization, cell typing, schema
//! dispatch, and row admission.
//!
//! Nothing in this module touches a workbook file directly; the ingest layer
//! converts spreadsheet cells into [`CellValue`]s and everything downstream
//! of that is pure and unit-testable.

pub mod cell;
pub mod header;
pub mod layout;
pub mod record;
pub mod schema;

pub use cell::{to_date, to_decimal, to_int, CellValue};
pub use header::normalize_header;
pub use layout::{extract_overview, extract_table, LayoutError, OverviewRecord, SheetTable};
pub use record::{FieldValue, RowRecord};
pub use schema::{
    report_families, schema_for_family, schema_for_sheet, FieldKind, FieldSpec, RowFamily,
    SheetSchema, SHEET_SCHEMAS,
};

/// Sheet name of the non-tabular overview sheet that resolves the company
/// and borrower for an import.
pub const OVERVIEW_SHEET: &str = "Borrower Overview";
