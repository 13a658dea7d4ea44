// ==========================================
// stockbook - product catalog model
// ==========================================
// Persisted JSON keys are camelCase to stay readable
// alongside the other stored collections
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// Product - catalog entry
// ==========================================
// Derived fields (total_buy .. profit_margin) are recomputed from
// quantity/unit_rate/sell_rate on every mutation and are never
// edited independently.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    // ===== Identity =====
    pub id: String,           // opaque unique token (UUID)
    pub product_code: String, // human-assigned or auto-generated SKU

    // ===== Descriptive fields =====
    pub product: Option<String>, // product type
    pub product_name: String,
    pub size: Option<String>,
    pub brand: Option<String>,
    pub grade: Option<String>,
    pub material: Option<String>,
    pub color: Option<String>,
    pub model_no: Option<String>,
    pub category: Option<String>,

    // ===== Inventory fields =====
    pub unit: Option<String>,
    pub unit_qty: u32, // >= 1
    pub quantity: i64, // >= 0 (validator flags negatives)

    // ===== Pricing fields =====
    pub unit_rate: f64, // purchase/cost price
    pub approximate_rate: f64,
    pub authentication_rate: f64,
    pub sell_rate: f64,

    // ===== Derived fields =====
    pub total_buy: f64,
    pub stock_value: f64,
    pub potential_value: f64,
    pub potential_profit: f64,
    pub profit_margin: f64,

    // ===== Unrecognized import columns, kept verbatim =====
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extras: BTreeMap<String, String>,

    // ===== Audit fields =====
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Blank product with identity and timestamps filled in.
    /// Callers set the real fields and run the derived-field
    /// recompute before the record is visible anywhere.
    pub fn blank(product_name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            product_code: String::new(),
            product: None,
            product_name: product_name.into(),
            size: None,
            brand: None,
            grade: None,
            material: None,
            color: None,
            model_no: None,
            category: None,
            unit: None,
            unit_qty: 1,
            quantity: 0,
            unit_rate: 0.0,
            approximate_rate: 0.0,
            authentication_rate: 0.0,
            sell_rate: 0.0,
            total_buy: 0.0,
            stock_value: 0.0,
            potential_value: 0.0,
            potential_profit: 0.0,
            profit_margin: 0.0,
            extras: BTreeMap::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Best display name: product name, falling back to the type field.
    pub fn display_name(&self) -> &str {
        if !self.product_name.trim().is_empty() {
            &self.product_name
        } else {
            self.product.as_deref().unwrap_or("")
        }
    }
}
