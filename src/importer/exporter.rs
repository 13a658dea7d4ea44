// ==========================================
// stockbook - xlsx export
// ==========================================
// One worksheet per entity, named canonically (Product Master /
// Purchase Record / Sales Record). Header names are contractual;
// column order is whatever is listed here. The output re-imports
// cleanly through the normalizer because every header below is
// the leading alias of its field.
// ==========================================

use crate::domain::types::EntityKind;
use crate::domain::{Product, Purchase, Sale};
use crate::importer::error::ImportResult;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;

const PRODUCT_HEADERS: &[&str] = &[
    "Product Code",
    "Product",
    "Product Name",
    "Size",
    "Brand",
    "Grade",
    "Material",
    "Color",
    "Model No",
    "Category",
    "Unit",
    "Unit Qty",
    "Quantity",
    "Unit Rate",
    "Approximate Rate",
    "Authentication Rate",
    "Sell Rate",
    "Total Buy",
];

const PURCHASE_HEADERS: &[&str] = &[
    "Invoice No",
    "Product ID",
    "Product Name",
    "Quantity Purchased",
    "Unit Price",
    "Total Cost",
    "Supplier",
    "Payment Status",
    "Purchase Date",
];

const SALE_HEADERS: &[&str] = &[
    "Invoice No",
    "Customer Name",
    "Customer Phone",
    "Product ID",
    "Product Name",
    "Quantity Sold",
    "Unit Price",
    "Discount",
    "Tax",
    "Total Sale",
    "Payment Status",
    "Payment Method",
    "Date",
];

fn write_headers(sheet: &mut Worksheet, headers: &[&str]) -> ImportResult<()> {
    let bold = Format::new().set_bold();
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &bold)?;
    }
    Ok(())
}

fn opt_str(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

fn write_product_rows(sheet: &mut Worksheet, products: &[Product]) -> ImportResult<()> {
    write_headers(sheet, PRODUCT_HEADERS)?;
    for (i, p) in products.iter().enumerate() {
        let r = (i + 1) as u32;
        sheet.write_string(r, 0, &p.product_code)?;
        sheet.write_string(r, 1, opt_str(&p.product))?;
        sheet.write_string(r, 2, &p.product_name)?;
        sheet.write_string(r, 3, opt_str(&p.size))?;
        sheet.write_string(r, 4, opt_str(&p.brand))?;
        sheet.write_string(r, 5, opt_str(&p.grade))?;
        sheet.write_string(r, 6, opt_str(&p.material))?;
        sheet.write_string(r, 7, opt_str(&p.color))?;
        sheet.write_string(r, 8, opt_str(&p.model_no))?;
        sheet.write_string(r, 9, opt_str(&p.category))?;
        sheet.write_string(r, 10, opt_str(&p.unit))?;
        sheet.write_number(r, 11, p.unit_qty as f64)?;
        sheet.write_number(r, 12, p.quantity as f64)?;
        sheet.write_number(r, 13, p.unit_rate)?;
        sheet.write_number(r, 14, p.approximate_rate)?;
        sheet.write_number(r, 15, p.authentication_rate)?;
        sheet.write_number(r, 16, p.sell_rate)?;
        sheet.write_number(r, 17, p.total_buy)?;
    }
    Ok(())
}

fn write_purchase_rows(sheet: &mut Worksheet, purchases: &[Purchase]) -> ImportResult<()> {
    write_headers(sheet, PURCHASE_HEADERS)?;
    for (i, p) in purchases.iter().enumerate() {
        let r = (i + 1) as u32;
        sheet.write_string(r, 0, &p.invoice_no)?;
        sheet.write_string(r, 1, opt_str(&p.product_id))?;
        sheet.write_string(r, 2, opt_str(&p.product_name))?;
        sheet.write_number(r, 3, p.quantity_purchased as f64)?;
        sheet.write_number(r, 4, p.unit_price)?;
        sheet.write_number(r, 5, p.total_cost)?;
        sheet.write_string(r, 6, opt_str(&p.supplier))?;
        sheet.write_string(r, 7, p.payment_status.as_str())?;
        let date = p
            .purchase_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        sheet.write_string(r, 8, &date)?;
    }
    Ok(())
}

fn write_sale_rows(sheet: &mut Worksheet, sales: &[Sale]) -> ImportResult<()> {
    write_headers(sheet, SALE_HEADERS)?;
    for (i, s) in sales.iter().enumerate() {
        let r = (i + 1) as u32;
        sheet.write_string(r, 0, &s.invoice_no)?;
        sheet.write_string(r, 1, &s.customer_name)?;
        sheet.write_string(r, 2, opt_str(&s.customer_phone))?;
        sheet.write_string(r, 3, opt_str(&s.product_id))?;
        sheet.write_string(r, 4, opt_str(&s.product_name))?;
        sheet.write_number(r, 5, s.quantity_sold as f64)?;
        sheet.write_number(r, 6, s.unit_price)?;
        sheet.write_number(r, 7, s.discount)?;
        sheet.write_number(r, 8, s.tax)?;
        sheet.write_number(r, 9, s.total_sale)?;
        sheet.write_string(r, 10, s.payment_status.as_str())?;
        sheet.write_string(r, 11, opt_str(&s.payment_method))?;
        let date = s
            .date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        sheet.write_string(r, 12, &date)?;
    }
    Ok(())
}

/// Products as xlsx bytes, one "Product Master" sheet.
pub fn export_products(products: &[Product]) -> ImportResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(EntityKind::Product.sheet_name())?;
    write_product_rows(sheet, products)?;
    Ok(workbook.save_to_buffer()?)
}

/// Purchases as xlsx bytes, one "Purchase Record" sheet.
pub fn export_purchases(purchases: &[Purchase]) -> ImportResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(EntityKind::Purchase.sheet_name())?;
    write_purchase_rows(sheet, purchases)?;
    Ok(workbook.save_to_buffer()?)
}

/// Sales as xlsx bytes, one "Sales Record" sheet.
pub fn export_sales(sales: &[Sale]) -> ImportResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(EntityKind::Sale.sheet_name())?;
    write_sale_rows(sheet, sales)?;
    Ok(workbook.save_to_buffer()?)
}

fn build_all(
    products: &[Product],
    purchases: &[Purchase],
    sales: &[Sale],
) -> ImportResult<Workbook> {
    let mut workbook = Workbook::new();

    let sheet = workbook.add_worksheet();
    sheet.set_name(EntityKind::Product.sheet_name())?;
    write_product_rows(sheet, products)?;

    let sheet = workbook.add_worksheet();
    sheet.set_name(EntityKind::Purchase.sheet_name())?;
    write_purchase_rows(sheet, purchases)?;

    let sheet = workbook.add_worksheet();
    sheet.set_name(EntityKind::Sale.sheet_name())?;
    write_sale_rows(sheet, sales)?;

    Ok(workbook)
}

/// All three collections in one workbook, as bytes.
pub fn export_all(
    products: &[Product],
    purchases: &[Purchase],
    sales: &[Sale],
) -> ImportResult<Vec<u8>> {
    Ok(build_all(products, purchases, sales)?.save_to_buffer()?)
}

/// All three collections written to a file.
pub fn export_all_to_path<P: AsRef<Path>>(
    path: P,
    products: &[Product],
    purchases: &[Purchase],
    sales: &[Sale],
) -> ImportResult<()> {
    build_all(products, purchases, sales)?.save(path.as_ref())?;
    Ok(())
}
