//! End-to-end parse tests against generated fixture workbooks.
//!
//! These cover the whole pipeline up to the database boundary: workbook
//! file → cell conversion → header normalization → typed admission.

use std::path::PathBuf;

use rust_decimal_macros::dec;
use rust_xlsxwriter::Workbook;
use tempfile::TempDir;

use lendview_core::sheet::RowFamily;
use lendview_ingest::importer::{parse_workbook, SheetStatus};

fn write_fixture(dir: &TempDir) -> PathBuf {
    let mut workbook = Workbook::new();

    let overview = workbook.add_worksheet();
    overview.set_name("Borrower Overview").unwrap();
    overview.write_string(0, 0, "Borrower Overview").unwrap();
    let headers = [
        "Company",
        "Company ID",
        "Industry",
        "Primary Contact",
        "Current Update",
    ];
    for (col, header) in headers.iter().enumerate() {
        overview
            .write_string(1, u16::try_from(col).unwrap(), *header)
            .unwrap();
    }
    overview.write_string(2, 0, "Acme").unwrap();
    overview.write_number(2, 1, 42.0).unwrap();
    overview.write_string(2, 2, "Manufacturing").unwrap();
    overview.write_string(2, 3, "Jane Doe").unwrap();
    overview.write_string(2, 4, "2024-06-01").unwrap();

    let collateral = workbook.add_worksheet();
    collateral.set_name("Collateral Overview").unwrap();
    let headers = [
        "Main Type",
        "SubType",
        "Eligible Collateral",
        "Ineligibles",
        "Net Collateral",
        "NOLV %",
    ];
    for (col, header) in headers.iter().enumerate() {
        collateral
            .write_string(0, u16::try_from(col).unwrap(), *header)
            .unwrap();
    }
    collateral.write_string(1, 0, "Inventory").unwrap();
    collateral.write_string(1, 1, "Finished Goods").unwrap();
    collateral.write_number(1, 2, 1000.0).unwrap();
    // Spreadsheet-exported scientific notation must stay exact.
    collateral.write_string(1, 3, "1.00E+2").unwrap();
    collateral.write_number(1, 4, 900.0).unwrap();
    collateral.write_string(1, 5, "65%").unwrap();
    // A fully blank row must not be admitted.
    collateral.write_string(2, 0, "-").unwrap();
    collateral.write_string(2, 1, "").unwrap();

    let notes = workbook.add_worksheet();
    notes.set_name("Notes").unwrap();
    notes.write_string(0, 0, "freeform, unmapped").unwrap();

    let path = dir.path().join("fixture.xlsx");
    workbook.save(&path).unwrap();
    path
}

#[test]
fn test_parse_fixture_workbook() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir);

    let parsed = parse_workbook(&path).unwrap();

    assert_eq!(parsed.overview.int("Company ID"), Some(42));
    assert_eq!(parsed.overview.text("Company").as_deref(), Some("Acme"));
    assert_eq!(
        parsed.overview_report_date,
        chrono::NaiveDate::from_ymd_opt(2024, 6, 1)
    );

    let collateral = parsed
        .batches
        .iter()
        .find(|batch| batch.family == RowFamily::CollateralOverview)
        .expect("collateral batch");
    assert_eq!(collateral.records.len(), 1);
    let record = &collateral.records[0];
    assert_eq!(record.text("main_type").as_deref(), Some("Inventory"));
    assert_eq!(record.text("sub_type").as_deref(), Some("Finished Goods"));
    assert_eq!(record.decimal("eligible_collateral"), Some(dec!(1000)));
    assert_eq!(record.decimal("ineligibles"), Some(dec!(100)));
    assert_eq!(record.decimal("net_collateral"), Some(dec!(900)));
    assert_eq!(record.decimal("nolv_pct"), Some(dec!(0.65)));

    // The overview rows are also stored as their own family.
    assert!(parsed
        .batches
        .iter()
        .any(|batch| batch.family == RowFamily::BorrowerOverview));

    // The collateral sheet reports one admitted and one skipped row.
    let report = parsed
        .summary
        .iter()
        .find(|sheet| sheet.sheet == "Collateral Overview")
        .expect("collateral summary");
    assert_eq!(report.status, SheetStatus::Ok);
    assert_eq!(report.imported, 1);
    assert_eq!(report.skipped, 1);

    // Absent mapped sheets are recorded as missing, not errors.
    let missing = parsed
        .summary
        .iter()
        .filter(|sheet| sheet.status == SheetStatus::Missing)
        .count();
    assert!(missing > 0);
    assert!(parsed.errors.is_empty());
}

#[test]
fn test_parse_workbook_without_overview_sheet_fails() {
    let dir = TempDir::new().unwrap();
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Collateral Overview").unwrap();
    sheet.write_string(0, 0, "Main Type").unwrap();
    let path = dir.path().join("no_overview.xlsx");
    workbook.save(&path).unwrap();

    assert!(parse_workbook(&path).is_err());
}
