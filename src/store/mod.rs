// ==========================================
// stockbook - in-memory state
// ==========================================

pub mod error;
pub mod inventory;
pub mod seed;

pub use error::{StoreError, StoreResult};
pub use inventory::InventoryStore;
