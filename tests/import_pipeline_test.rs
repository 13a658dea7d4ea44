// ==========================================
// stockbook - import pipeline integration tests
// ==========================================
// Full pipeline over in-memory workbooks: sheet resolution,
// normalization, validation, per-row and per-sheet containment,
// and the outcome counters.
// ==========================================

#[path = "test_helpers.rs"]
mod test_helpers;

use stockbook::domain::types::{CellValue, EntityKind};
use stockbook::{ImportOrchestrator, InventoryStore};
use test_helpers::*;

#[test]
fn test_blank_rows_dropped_before_validation() {
    init_logging();

    // The middle row has numbers but no identifying field, so it
    // is dropped silently rather than failing validation.
    let wb = workbook(vec![sheet(
        "Product Master",
        vec![
            product_row("Hammer", 5.0, 100.0, 150.0),
            row(&[("Quantity", num(4.0)), ("Unit Rate", num(9.0))]),
            product_row("Wrench", 2.0, 80.0, 120.0),
        ],
    )]);

    let mut store = InventoryStore::new();
    let report = ImportOrchestrator::new().import_workbook(&wb, &mut store);

    assert_eq!(report.products.count, 2);
    assert_eq!(report.products.processed, 2);
    assert_eq!(report.products.failed, 0);
    assert_eq!(store.products().len(), 2);
}

#[test]
fn test_invalid_row_reported_with_spreadsheet_row_number() {
    init_logging();

    let wb = workbook(vec![sheet(
        "Product Master",
        vec![
            product_row("Hammer", 5.0, 100.0, 150.0),
            product_row("Broken", -3.0, 100.0, 150.0), // negative quantity
            product_row("Wrench", 2.0, 80.0, 120.0),
        ],
    )]);

    let mut store = InventoryStore::new();
    let report = ImportOrchestrator::new().import_workbook(&wb, &mut store);

    assert_eq!(report.products.count, 3);
    assert_eq!(report.products.processed, 2);
    assert_eq!(report.products.failed, 1);

    let error = &report.validation_errors[0];
    assert_eq!(error.entity, EntityKind::Product);
    // Header is row 1; second data row is spreadsheet row 3.
    assert_eq!(error.row, 3);
    assert_eq!(error.name, "Broken");
    assert!(!error.is_sheet_level());

    // Valid rows committed despite the failure in between.
    assert_eq!(store.products().len(), 2);
}

#[test]
fn test_sheet_failure_does_not_abort_other_entities() {
    init_logging();

    // A NaN cell in the purchase sheet aborts that sheet; the
    // sales sheet after it still imports.
    let wb = workbook(vec![
        sheet(
            "Purchase Record",
            vec![
                row(&[
                    ("Invoice No", text("INV-1")),
                    ("Quantity Purchased", CellValue::Number(f64::NAN)),
                ]),
                purchase_row("INV-2", "Hammer", 3.0, 50.0),
            ],
        ),
        sheet(
            "Sales Record",
            vec![sale_row("Asha", "Hammer", 1.0, 80.0)],
        ),
    ]);

    let mut store = InventoryStore::new();
    let report = ImportOrchestrator::new().import_workbook(&wb, &mut store);

    // Purchase sheet aborted: a sheet-level error at row 0.
    let sheet_errors: Vec<_> = report
        .validation_errors
        .iter()
        .filter(|e| e.is_sheet_level())
        .collect();
    assert_eq!(sheet_errors.len(), 1);
    assert_eq!(sheet_errors[0].entity, EntityKind::Purchase);
    assert_eq!(sheet_errors[0].name, "Purchase Record");

    // Sales still went through.
    assert_eq!(report.sales.processed, 1);
    assert_eq!(store.sales().len(), 1);
}

#[test]
fn test_entities_commit_in_fixed_order() {
    init_logging();

    let wb = workbook(vec![
        sheet("Sales Record", vec![sale_row("Asha", "Hammer", 1.0, 80.0)]),
        sheet(
            "Purchase Record",
            vec![purchase_row("INV-1", "Hammer", 3.0, 50.0)],
        ),
        sheet(
            "Product Master",
            vec![product_row("Hammer", 5.0, 100.0, 150.0)],
        ),
    ]);

    let mut store = InventoryStore::new();
    let report = ImportOrchestrator::new().import_workbook(&wb, &mut store);

    assert_eq!(report.total_committed(), 3);
    assert_eq!(report.total_failed(), 0);
    assert_eq!(store.products().len(), 1);
    assert_eq!(store.purchases().len(), 1);
    assert_eq!(store.sales().len(), 1);
}

#[test]
fn test_fallback_sheet_feeds_products_only() {
    init_logging();

    // A lone "Sheet1" (e.g. a CSV import) is claimed by the
    // product entity; it is not re-read as purchases or sales.
    let wb = workbook(vec![sheet(
        "Sheet1",
        vec![product_row("Hammer", 5.0, 100.0, 150.0)],
    )]);

    let mut store = InventoryStore::new();
    let report = ImportOrchestrator::new().import_workbook(&wb, &mut store);

    assert_eq!(report.products.processed, 1);
    assert_eq!(report.purchases.count, 0);
    assert_eq!(report.sales.count, 0);
    assert!(store.purchases().is_empty());
    assert!(store.sales().is_empty());
}

#[test]
fn test_sales_prefilter_drops_formatting_junk_rows() {
    init_logging();

    let wb = workbook(vec![sheet(
        "Sales Record",
        vec![
            sale_row("Asha", "Hammer", 2.0, 80.0),
            // Trailing row with only a tax cell; no identifying column.
            row(&[("Tax", num(5.0))]),
        ],
    )]);

    let mut store = InventoryStore::new();
    let report = ImportOrchestrator::new().import_workbook(&wb, &mut store);

    assert_eq!(report.sales.count, 1);
    assert_eq!(report.sales.processed, 1);
    assert!(report.validation_errors.is_empty());
}

#[test]
fn test_missing_sheets_yield_empty_outcomes() {
    init_logging();

    let wb = workbook(vec![sheet("Notes", vec![])]);
    let mut store = InventoryStore::new();
    let report = ImportOrchestrator::new().import_workbook(&wb, &mut store);

    assert_eq!(report.total_committed(), 0);
    assert_eq!(report.total_failed(), 0);
    assert!(report.validation_errors.is_empty());
}

#[test]
fn test_import_recomputes_derived_and_collects_parties() {
    init_logging();

    let wb = workbook(vec![
        sheet(
            "Product Master",
            vec![row(&[
                ("Product Name", text("Hammer")),
                ("Quantity", num(4.0)),
                ("Unit Rate", num(25.0)),
                ("Sell Rate", num(40.0)),
                ("Total Buy", num(999.0)), // stale, must be ignored
            ])],
        ),
        sheet(
            "Purchase Record",
            vec![row(&[
                ("Invoice No", text("INV-1")),
                ("Product Name", text("Hammer")),
                ("Quantity Purchased", num(3.0)),
                ("Unit Price", num(20.0)),
                ("Supplier", text("Acme Traders")),
            ])],
        ),
    ]);

    let mut store = InventoryStore::new();
    ImportOrchestrator::new().import_workbook(&wb, &mut store);

    assert_eq!(store.products()[0].total_buy, 100.0);
    assert_eq!(store.suppliers().len(), 1);
    assert_eq!(store.suppliers()[0].name, "Acme Traders");
}
