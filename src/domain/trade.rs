// ==========================================
// stockbook - purchase and sales records
// ==========================================
// Product references here are soft: a string id/name match with
// no enforced integrity. A record may point at a product that
// does not exist and that is not an error.
// ==========================================

use crate::domain::types::PaymentStatus;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sentinel customer for quick sales with no name captured.
pub const WALK_IN_CUSTOMER: &str = "Walk-in Customer";

// ==========================================
// Purchase - stock-in record
// ==========================================
// Created via form or import; never updated in place and no
// delete is exposed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    pub id: String,
    pub invoice_no: String,

    // Soft product reference
    pub product_id: Option<String>,
    pub product_name: Option<String>,

    pub quantity_purchased: i64, // > 0 (validated)
    pub unit_price: f64,         // >= 0
    pub total_cost: f64,         // derived when not supplied

    pub supplier: Option<String>,
    pub payment_status: PaymentStatus,
    pub purchase_date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extras: BTreeMap<String, String>,

    pub created_at: DateTime<Utc>,
}

impl Purchase {
    pub fn blank() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            invoice_no: String::new(),
            product_id: None,
            product_name: None,
            quantity_purchased: 0,
            unit_price: 0.0,
            total_cost: 0.0,
            supplier: None,
            payment_status: PaymentStatus::Pending,
            purchase_date: None,
            extras: BTreeMap::new(),
            created_at: Utc::now(),
        }
    }
}

// ==========================================
// Sale - stock-out record
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: String,
    pub invoice_no: String,

    pub customer_name: String, // defaults to WALK_IN_CUSTOMER
    pub customer_phone: Option<String>,

    // Soft product reference
    pub product_id: Option<String>,
    pub product_name: Option<String>,

    pub quantity_sold: i64, // > 0 (validated)
    pub unit_price: f64,    // >= 0
    pub discount: f64,      // percent
    pub tax: f64,           // percent
    pub total_sale: f64,    // derived when not supplied

    pub payment_status: PaymentStatus,
    pub payment_method: Option<String>,
    pub date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extras: BTreeMap<String, String>,

    pub created_at: DateTime<Utc>,
}

impl Sale {
    pub fn blank() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            invoice_no: String::new(),
            customer_name: WALK_IN_CUSTOMER.to_string(),
            customer_phone: None,
            product_id: None,
            product_name: None,
            quantity_sold: 0,
            unit_price: 0.0,
            discount: 0.0,
            tax: 0.0,
            total_sale: 0.0,
            payment_status: PaymentStatus::Pending,
            payment_method: None,
            date: None,
            extras: BTreeMap::new(),
            created_at: Utc::now(),
        }
    }
}

// ==========================================
// SalesBill - printable snapshot of a quick sale
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesBill {
    pub id: String,
    pub sale_id: String,
    pub bill_no: String,
    pub customer_name: String,
    pub total_amount: f64,
    pub created_at: DateTime<Utc>,
}
