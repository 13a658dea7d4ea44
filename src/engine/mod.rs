// ==========================================
// stockbook - engine layer
// ==========================================
// Pure business rules. No I/O, no collection state; the store
// calls in here so every mutation path shares one rule set.
// ==========================================

pub mod derived;
pub mod product_code;
pub mod stock_movement;

pub use derived::DerivedFields;
pub use stock_movement::{MovementError, MovementKind};
