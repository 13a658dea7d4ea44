// ==========================================
// stockbook - shared test helpers
// ==========================================
// Row/sheet/workbook builders so integration tests can express
// spreadsheet content inline instead of shipping fixture files.
// ==========================================

#![allow(dead_code)]

use stockbook::domain::types::CellValue;
use stockbook::importer::workbook::{ParsedWorkbook, RawRow, Sheet};

pub fn init_logging() {
    stockbook::logging::init_test();
}

/// Build a raw row from (header, value) pairs.
pub fn row(pairs: &[(&str, CellValue)]) -> RawRow {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

pub fn text(value: &str) -> CellValue {
    CellValue::from(value)
}

pub fn num(value: f64) -> CellValue {
    CellValue::Number(value)
}

pub fn sheet(name: &str, rows: Vec<RawRow>) -> Sheet {
    Sheet {
        name: name.to_string(),
        rows,
    }
}

pub fn workbook(sheets: Vec<Sheet>) -> ParsedWorkbook {
    ParsedWorkbook::new(sheets)
}

/// Minimal valid product row.
pub fn product_row(name: &str, qty: f64, unit_rate: f64, sell_rate: f64) -> RawRow {
    row(&[
        ("Product Name", text(name)),
        ("Quantity", num(qty)),
        ("Unit Rate", num(unit_rate)),
        ("Sell Rate", num(sell_rate)),
    ])
}

/// Minimal valid purchase row.
pub fn purchase_row(invoice: &str, product: &str, qty: f64, price: f64) -> RawRow {
    row(&[
        ("Invoice No", text(invoice)),
        ("Product Name", text(product)),
        ("Quantity Purchased", num(qty)),
        ("Unit Price", num(price)),
    ])
}

/// Minimal valid sale row.
pub fn sale_row(customer: &str, product: &str, qty: f64, price: f64) -> RawRow {
    row(&[
        ("Customer Name", text(customer)),
        ("Product Name", text(product)),
        ("Quantity Sold", num(qty)),
        ("Unit Price", num(price)),
    ])
}
