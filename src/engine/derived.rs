// ==========================================
// stockbook - derived-field calculator
// ==========================================
// Pure functions of (quantity, unit_rate, sell_rate). Every code
// path that mutates a product goes through apply(); there is no
// second implementation of these formulas anywhere.
// ==========================================

use crate::domain::Product;

// ==========================================
// DerivedFields - recomputed product values
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DerivedFields {
    pub total_buy: f64,
    pub stock_value: f64,
    pub potential_value: f64,
    pub potential_profit: f64,
    pub profit_margin: f64,
}

/// Recompute all derived product values.
///
/// - total_buy / stock_value = quantity x unit_rate
/// - potential_value         = quantity x sell_rate
/// - potential_profit        = potential_value - stock_value
/// - profit_margin           = (sell_rate - unit_rate) / unit_rate x 100,
///                             exactly 0 when unit_rate is 0
pub fn compute(quantity: i64, unit_rate: f64, sell_rate: f64) -> DerivedFields {
    let qty = quantity as f64;
    let stock_value = qty * unit_rate;
    let potential_value = qty * sell_rate;

    let profit_margin = if unit_rate > 0.0 {
        (sell_rate - unit_rate) / unit_rate * 100.0
    } else {
        0.0
    };

    DerivedFields {
        total_buy: stock_value,
        stock_value,
        potential_value,
        potential_profit: potential_value - stock_value,
        profit_margin,
    }
}

/// Write the recomputed values back onto the product.
pub fn apply(product: &mut Product) {
    let d = compute(product.quantity, product.unit_rate, product.sell_rate);
    product.total_buy = d.total_buy;
    product.stock_value = d.stock_value;
    product.potential_value = d.potential_value;
    product.potential_profit = d.potential_profit;
    product.profit_margin = d.profit_margin;
}

/// Purchase line total when the sheet/form did not supply one.
pub fn purchase_total(quantity: i64, unit_price: f64) -> f64 {
    quantity as f64 * unit_price
}

/// Sale total: subtotal minus discount percent, then tax percent
/// applied to the discounted amount.
pub fn sale_total(quantity: i64, unit_price: f64, discount_pct: f64, tax_pct: f64) -> f64 {
    let subtotal = quantity as f64 * unit_price;
    let discounted = subtotal * (1.0 - discount_pct / 100.0);
    discounted * (1.0 + tax_pct / 100.0)
}
