// ==========================================
// stockbook - persistence error types
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage quota exceeded writing key '{key}' ({attempted} bytes)")]
    QuotaExceeded { key: String, attempted: usize },

    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;
