// ==========================================
// stockbook - shared domain types
// ==========================================
// Scalar cell union for parsed spreadsheet rows,
// entity kinds and small status enums
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// CellValue - raw spreadsheet scalar
// ==========================================
// Rows coming out of the workbook parser are a mapping from
// header string to one of these. No other shapes exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Empty,
}

impl CellValue {
    /// True when the cell carries no usable value (empty or blank text).
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Number(_) => false,
        }
    }

    /// Trimmed text rendering. Numbers with no fractional part print
    /// without a decimal point ("12", not "12.0").
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.trim().to_string(),
            CellValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
        }
    }

    /// Permissive numeric read: unparseable text and empty cells are 0.
    pub fn to_number_lossy(&self) -> f64 {
        match self {
            CellValue::Empty => 0.0,
            CellValue::Number(n) => *n,
            CellValue::Text(s) => s.trim().replace(',', "").parse::<f64>().unwrap_or(0.0),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        if s.trim().is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(s.to_string())
        }
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

// ==========================================
// EntityKind - the three importable entities
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Product,
    Purchase,
    Sale,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Product => "Product",
            EntityKind::Purchase => "Purchase",
            EntityKind::Sale => "Sale",
        }
    }

    /// Canonical worksheet name used on export.
    pub fn sheet_name(&self) -> &'static str {
        match self {
            EntityKind::Product => "Product Master",
            EntityKind::Purchase => "Purchase Record",
            EntityKind::Sale => "Sales Record",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ==========================================
// PaymentStatus
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PaymentStatus {
    Paid,
    #[default]
    Pending,
    Partial,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "Paid",
            PaymentStatus::Pending => "Pending",
            PaymentStatus::Partial => "Partial",
        }
    }

    /// Case-insensitive parse; anything unrecognized is Pending.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "paid" => PaymentStatus::Paid,
            "partial" => PaymentStatus::Partial,
            _ => PaymentStatus::Pending,
        }
    }
}

// ==========================================
// Role - role-gated operations
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Staff,
}

impl Role {
    /// Only admins may delete catalog entries.
    pub fn can_delete_products(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_value_blank() {
        assert!(CellValue::Empty.is_blank());
        assert!(CellValue::Text("   ".to_string()).is_blank());
        assert!(!CellValue::Text("x".to_string()).is_blank());
        assert!(!CellValue::Number(0.0).is_blank());
    }

    #[test]
    fn test_cell_value_number_lossy() {
        assert_eq!(CellValue::Text("abc".to_string()).to_number_lossy(), 0.0);
        assert_eq!(CellValue::Text(" 12.5 ".to_string()).to_number_lossy(), 12.5);
        assert_eq!(CellValue::Text("1,250".to_string()).to_number_lossy(), 1250.0);
        assert_eq!(CellValue::Empty.to_number_lossy(), 0.0);
        assert_eq!(CellValue::Number(3.0).to_number_lossy(), 3.0);
    }

    #[test]
    fn test_cell_value_to_text() {
        assert_eq!(CellValue::Number(12.0).to_text(), "12");
        assert_eq!(CellValue::Number(12.5).to_text(), "12.5");
        assert_eq!(CellValue::Text("  hi  ".to_string()).to_text(), "hi");
    }

    #[test]
    fn test_payment_status_parse() {
        assert_eq!(PaymentStatus::parse("PAID"), PaymentStatus::Paid);
        assert_eq!(PaymentStatus::parse(" partial "), PaymentStatus::Partial);
        assert_eq!(PaymentStatus::parse("whatever"), PaymentStatus::Pending);
        assert_eq!(PaymentStatus::parse(""), PaymentStatus::Pending);
    }

    #[test]
    fn test_role_gating() {
        assert!(Role::Admin.can_delete_products());
        assert!(!Role::Staff.can_delete_products());
    }
}
