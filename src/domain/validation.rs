// ==========================================
// stockbook - import result types
// ==========================================
// ValidationError is transient: produced during import, shown to
// the operator, discarded. Never persisted.
// ==========================================

use crate::domain::types::EntityKind;
use serde::{Deserialize, Serialize};

// ==========================================
// ValidationError - one rejected row (or sheet)
// ==========================================
// `row` is the 1-based spreadsheet row (header is row 1, first
// data row is 2). Row 0 marks a sheet-level failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    pub entity: EntityKind,
    pub row: usize,
    pub name: String,
    pub errors: Vec<String>,
}

impl ValidationError {
    pub fn is_sheet_level(&self) -> bool {
        self.row == 0
    }
}

// ==========================================
// EntityOutcome - per-entity import counters
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityOutcome {
    /// Normalized (pre-validation) records, blank rows excluded.
    pub count: usize,
    /// Records that passed validation and were committed.
    pub processed: usize,
    /// Records rejected by validation.
    pub failed: usize,
}

// ==========================================
// ImportReport - whole-workbook result
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub products: EntityOutcome,
    pub purchases: EntityOutcome,
    pub sales: EntityOutcome,
    pub validation_errors: Vec<ValidationError>,
    pub elapsed_ms: u64,
}

impl ImportReport {
    pub fn total_committed(&self) -> usize {
        self.products.processed + self.purchases.processed + self.sales.processed
    }

    pub fn total_failed(&self) -> usize {
        self.products.failed + self.purchases.failed + self.sales.failed
    }
}
