// ==========================================
// stockbook - stock movement rule
// ==========================================
// Explicit IN/OUT quantity deltas against a product. OUT may
// never drive stock below zero.
// ==========================================

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementKind {
    In,
    Out,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MovementError {
    #[error("stock movement quantity must be positive, got {0}")]
    NonPositiveDelta(i64),

    #[error("cannot move {requested} out, only {available} in stock")]
    InsufficientStock { available: i64, requested: i64 },
}

/// Resulting quantity after applying a movement to `current`.
pub fn apply(current: i64, kind: MovementKind, delta: i64) -> Result<i64, MovementError> {
    if delta <= 0 {
        return Err(MovementError::NonPositiveDelta(delta));
    }

    match kind {
        MovementKind::In => Ok(current + delta),
        MovementKind::Out => {
            if delta > current {
                Err(MovementError::InsufficientStock {
                    available: current,
                    requested: delta,
                })
            } else {
                Ok(current - delta)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_adds() {
        assert_eq!(apply(5, MovementKind::In, 3), Ok(8));
    }

    #[test]
    fn test_out_subtracts() {
        assert_eq!(apply(5, MovementKind::Out, 5), Ok(0));
    }

    #[test]
    fn test_out_beyond_stock_rejected() {
        assert_eq!(
            apply(2, MovementKind::Out, 3),
            Err(MovementError::InsufficientStock {
                available: 2,
                requested: 3
            })
        );
    }

    #[test]
    fn test_non_positive_delta_rejected() {
        assert_eq!(
            apply(2, MovementKind::In, 0),
            Err(MovementError::NonPositiveDelta(0))
        );
        assert_eq!(
            apply(2, MovementKind::Out, -1),
            Err(MovementError::NonPositiveDelta(-1))
        );
    }
}
