// ==========================================
// stockbook - store error types
// ==========================================

use crate::engine::MovementError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("product not found: {0}")]
    ProductNotFound(String),

    #[error("permission denied: {action} requires an admin account")]
    PermissionDenied { action: String },

    #[error(transparent)]
    Movement(#[from] MovementError),
}

pub type StoreResult<T> = Result<T, StoreError>;
