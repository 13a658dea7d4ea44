// ==========================================
// stockbook - record validator
// ==========================================
// Structural, local checks on one normalized record. Returns an
// ordered list of human-readable problems; empty = valid. Never
// consults the live collections: no uniqueness, no referential
// checks (product references are soft by design of the data
// model, see domain::trade).
// ==========================================

use crate::domain::{Product, Purchase, Sale};

pub fn validate_product(product: &Product) -> Vec<String> {
    let mut errors = Vec::new();

    if product.display_name().trim().is_empty() {
        errors.push("Product name is required".to_string());
    }
    if product.quantity < 0 {
        errors.push("Quantity cannot be negative".to_string());
    }
    if product.unit_rate < 0.0 {
        errors.push("Unit rate cannot be negative".to_string());
    }
    if product.sell_rate < 0.0 {
        errors.push("Sell rate cannot be negative".to_string());
    }

    errors
}

pub fn validate_purchase(purchase: &Purchase) -> Vec<String> {
    let mut errors = Vec::new();

    let has_reference = purchase
        .product_id
        .as_deref()
        .map(|v| !v.trim().is_empty())
        .unwrap_or(false)
        || purchase
            .product_name
            .as_deref()
            .map(|v| !v.trim().is_empty())
            .unwrap_or(false);
    if !has_reference {
        errors.push("Product reference (ID or name) is required".to_string());
    }
    if purchase.quantity_purchased <= 0 {
        errors.push("Quantity purchased must be greater than zero".to_string());
    }
    if purchase.unit_price < 0.0 {
        errors.push("Unit price cannot be negative".to_string());
    }

    errors
}

pub fn validate_sale(sale: &Sale) -> Vec<String> {
    let mut errors = Vec::new();

    let has_reference = sale
        .product_id
        .as_deref()
        .map(|v| !v.trim().is_empty())
        .unwrap_or(false)
        || sale
            .product_name
            .as_deref()
            .map(|v| !v.trim().is_empty())
            .unwrap_or(false);
    if !has_reference {
        errors.push("Product reference (ID or name) is required".to_string());
    }
    if sale.quantity_sold <= 0 {
        errors.push("Quantity sold must be greater than zero".to_string());
    }
    if sale.unit_price < 0.0 {
        errors.push("Unit price cannot be negative".to_string());
    }

    errors
}
