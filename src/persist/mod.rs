// ==========================================
// stockbook - persistence
// ==========================================
// Flat key/value persistence with schema versioning, debounced
// writes, corruption recovery and quota eviction.
// ==========================================

pub mod debounce;
pub mod error;
pub mod keys;
pub mod layer;
pub mod migrations;
pub mod storage;

pub use debounce::Debouncer;
pub use error::{StorageError, StorageResult};
pub use layer::PersistenceLayer;
pub use storage::{FileStorage, MemoryStorage, StorageBackend};
