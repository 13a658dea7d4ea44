// ==========================================
// stockbook - schema normalizer
// ==========================================
// Maps one raw header-keyed row to the canonical record shape of
// an entity. Header matching is case-insensitive against a fixed
// per-entity alias table. Numeric fields parse permissively
// (failure -> 0). Rows with every identifying field blank are
// dropped before validation. Unknown headers are carried through
// verbatim as extra attributes.
// ==========================================

use crate::domain::trade::WALK_IN_CUSTOMER;
use crate::domain::types::{CellValue, PaymentStatus};
use crate::domain::{Product, Purchase, Sale};
use crate::engine::{derived, product_code};
use crate::importer::workbook::RawRow;
use anyhow::bail;
use chrono::{Duration, NaiveDate};

// ==========================================
// Alias tables
// ==========================================
// First entry of each group is the canonical display header used
// on export; the rest are the synonyms/typos seen in the wild.

// ----- Product -----
const P_CODE: &[&str] = &["Product Code", "productCode", "code", "sku"];
const P_TYPE: &[&str] = &["Product", "product type", "type"];
const P_NAME: &[&str] = &["Product Name", "productName", "name", "item name", "item"];
const P_SIZE: &[&str] = &["Size"];
const P_BRAND: &[&str] = &["Brand", "make"];
const P_GRADE: &[&str] = &["Grade"];
const P_MATERIAL: &[&str] = &["Material"];
const P_COLOR: &[&str] = &["Color", "colour"];
const P_MODEL: &[&str] = &["Model No", "modelNo", "model", "model no."];
const P_CATEGORY: &[&str] = &["Category"];
const P_UNIT: &[&str] = &["Unit", "uom"];
const P_UNIT_QTY: &[&str] = &["Unit Qty", "unitQty", "unit quantity"];
const P_QUANTITY: &[&str] = &["Quantity", "qty", "stock", "stock qty"];
const P_UNIT_RATE: &[&str] = &["Unit Rate", "unitRate", "rate", "purchase rate", "cost price"];
const P_APPROX_RATE: &[&str] = &["Approximate Rate", "approximateRate", "approx rate"];
const P_AUTH_RATE: &[&str] = &["Authentication Rate", "authenticationRate", "auth rate"];
const P_SELL_RATE: &[&str] = &["Sell Rate", "sellRate", "sale rate", "selling price", "mrp"];
const P_TOTAL_BUY: &[&str] = &["Total Buy", "totalBuy"];

fn product_alias_groups() -> &'static [&'static [&'static str]] {
    &[
        P_CODE, P_TYPE, P_NAME, P_SIZE, P_BRAND, P_GRADE, P_MATERIAL, P_COLOR, P_MODEL,
        P_CATEGORY, P_UNIT, P_UNIT_QTY, P_QUANTITY, P_UNIT_RATE, P_APPROX_RATE, P_AUTH_RATE,
        P_SELL_RATE, P_TOTAL_BUY,
    ]
}

// ----- Purchase -----
const PU_INVOICE: &[&str] = &["Invoice No", "invoiceNo", "invoice", "invoice number", "bill no"];
const PU_PRODUCT_ID: &[&str] = &["Product ID", "productId", "product id"];
const PU_PRODUCT_NAME: &[&str] = &["Product Name", "productName", "product", "item"];
const PU_QTY: &[&str] = &["Quantity Purchased", "quantityPurchased", "quantity", "qty"];
const PU_UNIT_PRICE: &[&str] = &["Unit Price", "unitPrice", "price", "rate"];
const PU_TOTAL: &[&str] = &["Total Cost", "totalCost", "total", "amount"];
const PU_SUPPLIER: &[&str] = &["Supplier", "supplier name", "vendor"];
const PU_STATUS: &[&str] = &["Payment Status", "paymentStatus", "status"];
const PU_DATE: &[&str] = &["Purchase Date", "purchaseDate", "date"];

fn purchase_alias_groups() -> &'static [&'static [&'static str]] {
    &[
        PU_INVOICE, PU_PRODUCT_ID, PU_PRODUCT_NAME, PU_QTY, PU_UNIT_PRICE, PU_TOTAL,
        PU_SUPPLIER, PU_STATUS, PU_DATE,
    ]
}

// ----- Sale -----
const S_INVOICE: &[&str] = &["Invoice No", "invoiceNo", "invoice", "invoice number", "bill no"];
const S_CUSTOMER: &[&str] = &["Customer Name", "customerName", "customer"];
const S_PHONE: &[&str] = &["Customer Phone", "customerPhone", "phone", "mobile"];
const S_PRODUCT_ID: &[&str] = &["Product ID", "productId", "product id"];
const S_PRODUCT_NAME: &[&str] = &["Product Name", "productName", "product", "item"];
const S_QTY: &[&str] = &["Quantity Sold", "quantitySold", "quantity", "qty"];
const S_UNIT_PRICE: &[&str] = &["Unit Price", "unitPrice", "price", "rate"];
const S_DISCOUNT: &[&str] = &["Discount", "discount %", "discount%"];
const S_TAX: &[&str] = &["Tax", "tax %", "gst"];
const S_TOTAL: &[&str] = &["Total Sale", "totalSale", "total", "amount"];
const S_STATUS: &[&str] = &["Payment Status", "paymentStatus", "status"];
const S_METHOD: &[&str] = &["Payment Method", "paymentMethod", "method", "mode"];
const S_DATE: &[&str] = &["Date", "sale date", "saleDate"];

fn sale_alias_groups() -> &'static [&'static [&'static str]] {
    &[
        S_INVOICE, S_CUSTOMER, S_PHONE, S_PRODUCT_ID, S_PRODUCT_NAME, S_QTY, S_UNIT_PRICE,
        S_DISCOUNT, S_TAX, S_TOTAL, S_STATUS, S_METHOD, S_DATE,
    ]
}

// ==========================================
// RowView - case-insensitive cell access
// ==========================================
struct RowView<'a> {
    row: &'a RawRow,
}

impl<'a> RowView<'a> {
    fn new(row: &'a RawRow) -> Self {
        Self { row }
    }

    fn cell(&self, aliases: &[&str]) -> Option<&'a CellValue> {
        for alias in aliases {
            let wanted = alias.trim().to_lowercase();
            for (header, value) in self.row.iter() {
                if header.trim().to_lowercase() == wanted && !value.is_blank() {
                    return Some(value);
                }
            }
        }
        None
    }

    fn text(&self, aliases: &[&str]) -> Option<String> {
        self.cell(aliases).map(|v| v.to_text())
    }

    /// Permissive numeric read; missing/unparseable is 0.
    /// Non-finite values are the one formatting failure a typed
    /// pipeline can hit, and they abort the sheet upstream.
    fn number(&self, aliases: &[&str]) -> anyhow::Result<f64> {
        match self.cell(aliases) {
            None => Ok(0.0),
            Some(cell) => {
                let n = cell.to_number_lossy();
                if !n.is_finite() {
                    bail!("non-finite number in column '{}'", aliases[0]);
                }
                Ok(n)
            }
        }
    }

    fn integer(&self, aliases: &[&str]) -> anyhow::Result<i64> {
        Ok(self.number(aliases)?.round() as i64)
    }

    fn date(&self, aliases: &[&str]) -> Option<NaiveDate> {
        match self.cell(aliases)? {
            CellValue::Number(serial) => excel_serial_to_date(*serial),
            other => parse_date_flexible(&other.to_text()),
        }
    }

    /// Headers not claimed by any alias group, carried verbatim.
    fn extras(
        &self,
        groups: &[&[&str]],
    ) -> std::collections::BTreeMap<String, String> {
        let mut consumed: Vec<String> = Vec::new();
        for group in groups {
            for alias in *group {
                consumed.push(alias.trim().to_lowercase());
            }
        }

        self.row
            .iter()
            .filter(|(header, value)| {
                !value.is_blank() && !consumed.contains(&header.trim().to_lowercase())
            })
            .map(|(header, value)| (header.clone(), value.to_text()))
            .collect()
    }
}

// ==========================================
// Date helpers
// ==========================================
fn parse_date_flexible(value: &str) -> Option<NaiveDate> {
    const FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%Y/%m/%d"];
    let trimmed = value.trim();
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}

/// Excel serial date (1900 system, epoch 1899-12-30).
fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial <= 0.0 || serial > 2_958_465.0 {
        return None;
    }
    NaiveDate::from_ymd_opt(1899, 12, 30).map(|epoch| epoch + Duration::days(serial as i64))
}

// ==========================================
// Product
// ==========================================
/// Ok(None) means blank row: no identifying field had a value.
pub fn normalize_product(row: &RawRow) -> anyhow::Result<Option<Product>> {
    let view = RowView::new(row);

    let type_field = view.text(P_TYPE);
    let name_field = view.text(P_NAME);
    if type_field.is_none() && name_field.is_none() {
        return Ok(None);
    }

    let mut product = Product::blank(name_field.unwrap_or_default());
    product.product = type_field;
    product.size = view.text(P_SIZE);
    product.brand = view.text(P_BRAND);
    product.grade = view.text(P_GRADE);
    product.material = view.text(P_MATERIAL);
    product.color = view.text(P_COLOR);
    product.model_no = view.text(P_MODEL);
    product.category = view.text(P_CATEGORY);
    product.unit = view.text(P_UNIT);
    product.unit_qty = (view.integer(P_UNIT_QTY)?.max(1)) as u32;
    product.quantity = view.integer(P_QUANTITY)?;
    product.unit_rate = view.number(P_UNIT_RATE)?;
    product.approximate_rate = view.number(P_APPROX_RATE)?;
    product.authentication_rate = view.number(P_AUTH_RATE)?;
    product.sell_rate = view.number(P_SELL_RATE)?;

    product.product_code = match view.text(P_CODE) {
        Some(code) => code,
        None => product_code::generate(
            product.product.as_deref(),
            product.model_no.as_deref(),
            product.material.as_deref(),
        ),
    };

    // Derived values are always recomputed from source fields,
    // even when the sheet carried its own Total Buy column.
    derived::apply(&mut product);

    product.extras = view.extras(product_alias_groups());

    Ok(Some(product))
}

// ==========================================
// Purchase
// ==========================================
pub fn normalize_purchase(row: &RawRow) -> anyhow::Result<Option<Purchase>> {
    let view = RowView::new(row);

    let invoice = view.text(PU_INVOICE);
    let product_id = view.text(PU_PRODUCT_ID);
    let product_name = view.text(PU_PRODUCT_NAME);
    if invoice.is_none() && product_id.is_none() && product_name.is_none() {
        return Ok(None);
    }

    let mut purchase = Purchase::blank();
    purchase.invoice_no = invoice.unwrap_or_default();
    purchase.product_id = product_id;
    purchase.product_name = product_name;
    purchase.quantity_purchased = view.integer(PU_QTY)?;
    purchase.unit_price = view.number(PU_UNIT_PRICE)?;
    purchase.supplier = view.text(PU_SUPPLIER);
    purchase.payment_status = view
        .text(PU_STATUS)
        .map(|s| PaymentStatus::parse(&s))
        .unwrap_or_default();
    purchase.purchase_date = view.date(PU_DATE);

    // Supplied total wins; otherwise derive it.
    let supplied_total = view.number(PU_TOTAL)?;
    purchase.total_cost = if supplied_total > 0.0 {
        supplied_total
    } else {
        derived::purchase_total(purchase.quantity_purchased, purchase.unit_price)
    };

    purchase.extras = view.extras(purchase_alias_groups());

    Ok(Some(purchase))
}

// ==========================================
// Sale
// ==========================================
pub fn normalize_sale(row: &RawRow) -> anyhow::Result<Option<Sale>> {
    let view = RowView::new(row);

    let invoice = view.text(S_INVOICE);
    let product_id = view.text(S_PRODUCT_ID);
    let product_name = view.text(S_PRODUCT_NAME);
    let customer = view.text(S_CUSTOMER);
    if invoice.is_none() && product_id.is_none() && product_name.is_none() && customer.is_none() {
        return Ok(None);
    }

    let mut sale = Sale::blank();
    sale.invoice_no = invoice.unwrap_or_default();
    sale.customer_name = customer.unwrap_or_else(|| WALK_IN_CUSTOMER.to_string());
    sale.customer_phone = view.text(S_PHONE);
    sale.product_id = product_id;
    sale.product_name = product_name;
    sale.quantity_sold = view.integer(S_QTY)?;
    sale.unit_price = view.number(S_UNIT_PRICE)?;
    sale.discount = view.number(S_DISCOUNT)?;
    sale.tax = view.number(S_TAX)?;
    sale.payment_status = view
        .text(S_STATUS)
        .map(|s| PaymentStatus::parse(&s))
        .unwrap_or_default();
    sale.payment_method = view.text(S_METHOD);
    sale.date = view.date(S_DATE);

    // Total is derived: subtotal - discount%, then + tax%.
    sale.total_sale = derived::sale_total(
        sale.quantity_sold,
        sale.unit_price,
        sale.discount,
        sale.tax,
    );

    sale.extras = view.extras(sale_alias_groups());

    Ok(Some(sale))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, CellValue)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_alias_coverage_product_name() {
        // Every recognized alias populates the same canonical field.
        for header in ["Product Name", "productName", "name", "NAME", "Item Name"] {
            let r = row(&[(header, CellValue::from("Hammer"))]);
            let product = normalize_product(&r).unwrap().expect("not blank");
            assert_eq!(product.product_name, "Hammer", "alias {}", header);
        }
    }

    #[test]
    fn test_alias_coverage_quantity() {
        for header in ["Quantity", "quantity", "Qty", "stock"] {
            let r = row(&[
                ("Product Name", CellValue::from("Hammer")),
                (header, CellValue::Number(7.0)),
            ]);
            let product = normalize_product(&r).unwrap().unwrap();
            assert_eq!(product.quantity, 7, "alias {}", header);
        }
    }

    #[test]
    fn test_blank_row_dropped_all_entities() {
        let r = row(&[("Quantity", CellValue::Number(5.0))]);
        assert!(normalize_product(&r).unwrap().is_none());

        let r = row(&[("Unit Price", CellValue::Number(5.0))]);
        assert!(normalize_purchase(&r).unwrap().is_none());

        let r = row(&[("Tax", CellValue::Number(5.0))]);
        assert!(normalize_sale(&r).unwrap().is_none());
    }

    #[test]
    fn test_numeric_permissiveness() {
        let r = row(&[
            ("Product Name", CellValue::from("Hammer")),
            ("Quantity", CellValue::from("abc")),
            ("Unit Rate", CellValue::Empty),
        ]);
        let product = normalize_product(&r).unwrap().unwrap();
        assert_eq!(product.quantity, 0);
        assert_eq!(product.unit_rate, 0.0);
    }

    #[test]
    fn test_non_finite_number_is_format_error() {
        let r = row(&[
            ("Product Name", CellValue::from("Hammer")),
            ("Quantity", CellValue::Number(f64::NAN)),
        ]);
        assert!(normalize_product(&r).is_err());
    }

    #[test]
    fn test_derived_fields_computed() {
        let r = row(&[
            ("Product Name", CellValue::from("Hammer")),
            ("Quantity", CellValue::Number(4.0)),
            ("Unit Rate", CellValue::Number(25.0)),
            ("Sell Rate", CellValue::Number(40.0)),
            // Stale value in the sheet is ignored.
            ("Total Buy", CellValue::Number(123.0)),
        ]);
        let product = normalize_product(&r).unwrap().unwrap();
        assert_eq!(product.total_buy, 100.0);
        assert_eq!(product.potential_value, 160.0);
        assert_eq!(product.profit_margin, 60.0);
        assert!(product.extras.is_empty());
    }

    #[test]
    fn test_unknown_headers_pass_through() {
        let r = row(&[
            ("Product Name", CellValue::from("Hammer")),
            ("Warehouse Shelf", CellValue::from("B-12")),
        ]);
        let product = normalize_product(&r).unwrap().unwrap();
        assert_eq!(
            product.extras.get("Warehouse Shelf"),
            Some(&"B-12".to_string())
        );
    }

    #[test]
    fn test_product_code_generated_when_absent() {
        let r = row(&[("Product Name", CellValue::from("Hammer"))]);
        let product = normalize_product(&r).unwrap().unwrap();
        assert!(!product.product_code.is_empty());

        let r = row(&[
            ("Product Name", CellValue::from("Hammer")),
            ("Product Code", CellValue::from("HMR-1")),
        ]);
        let product = normalize_product(&r).unwrap().unwrap();
        assert_eq!(product.product_code, "HMR-1");
    }

    #[test]
    fn test_purchase_total_supplied_or_derived() {
        let r = row(&[
            ("Invoice No", CellValue::from("INV-1")),
            ("Quantity Purchased", CellValue::Number(3.0)),
            ("Unit Price", CellValue::Number(50.0)),
        ]);
        let purchase = normalize_purchase(&r).unwrap().unwrap();
        assert_eq!(purchase.total_cost, 150.0);

        let r = row(&[
            ("Invoice No", CellValue::from("INV-2")),
            ("Quantity Purchased", CellValue::Number(3.0)),
            ("Unit Price", CellValue::Number(50.0)),
            ("Total Cost", CellValue::Number(140.0)),
        ]);
        let purchase = normalize_purchase(&r).unwrap().unwrap();
        assert_eq!(purchase.total_cost, 140.0);
    }

    #[test]
    fn test_sale_walk_in_customer_default() {
        let r = row(&[
            ("Product Name", CellValue::from("Hammer")),
            ("Quantity Sold", CellValue::Number(1.0)),
        ]);
        let sale = normalize_sale(&r).unwrap().unwrap();
        assert_eq!(sale.customer_name, WALK_IN_CUSTOMER);
    }

    #[test]
    fn test_sale_total_derived() {
        let r = row(&[
            ("Product Name", CellValue::from("Hammer")),
            ("Quantity Sold", CellValue::Number(10.0)),
            ("Unit Price", CellValue::Number(100.0)),
            ("Discount", CellValue::Number(10.0)),
            ("Tax", CellValue::Number(10.0)),
        ]);
        let sale = normalize_sale(&r).unwrap().unwrap();
        assert!((sale.total_sale - 990.0).abs() < 1e-9);
    }

    #[test]
    fn test_date_parsing_text_and_serial() {
        let r = row(&[
            ("Invoice No", CellValue::from("INV-1")),
            ("Purchase Date", CellValue::from("2026-03-15")),
        ]);
        let purchase = normalize_purchase(&r).unwrap().unwrap();
        assert_eq!(
            purchase.purchase_date,
            NaiveDate::from_ymd_opt(2026, 3, 15)
        );

        // Excel serial for 2026-03-15 is 46096.
        let r = row(&[
            ("Invoice No", CellValue::from("INV-2")),
            ("Purchase Date", CellValue::Number(46096.0)),
        ]);
        let purchase = normalize_purchase(&r).unwrap().unwrap();
        assert_eq!(
            purchase.purchase_date,
            NaiveDate::from_ymd_opt(2026, 3, 15)
        );
    }
}
