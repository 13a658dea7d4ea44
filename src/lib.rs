// ==========================================
// stockbook - core library
// ==========================================
// Inventory and sales bookkeeping with spreadsheet import/export
// and versioned local persistence.
// ==========================================

// ==========================================
// Module declarations
// ==========================================

// Domain layer - entities and shared types
pub mod domain;

// Engine layer - pure business rules
pub mod engine;

// Import layer - spreadsheet ingestion and export
pub mod importer;

// Store layer - in-memory application state
pub mod store;

// Persistence layer - versioned key/value storage
pub mod persist;

// Logging
pub mod logging;

// API layer - async facade
pub mod api;

// ==========================================
// Re-exports
// ==========================================

pub use domain::types::{CellValue, EntityKind, PaymentStatus, Role};
pub use domain::validation::{EntityOutcome, ImportReport, ValidationError};
pub use domain::{Customer, Document, Product, Purchase, Sale, SalesBill, Supplier, User};

pub use api::ImportApi;
pub use importer::{ImportError, ImportOrchestrator, ImportResult, ParsedWorkbook};
pub use persist::{FileStorage, MemoryStorage, PersistenceLayer, StorageBackend};
pub use store::{InventoryStore, StoreError};

// ==========================================
// Constants
// ==========================================

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const APP_NAME: &str = "stockbook";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
