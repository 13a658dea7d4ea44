// ==========================================
// stockbook - domain model layer
// ==========================================
// Plain serde structs, no behavior beyond constructors and
// small accessors. Business rules live in engine/ and store/.
// ==========================================

pub mod document;
pub mod party;
pub mod product;
pub mod trade;
pub mod types;
pub mod user;
pub mod validation;

pub use document::Document;
pub use party::{Customer, Supplier};
pub use product::Product;
pub use trade::{Purchase, Sale, SalesBill, WALK_IN_CUSTOMER};
pub use types::{CellValue, EntityKind, PaymentStatus, Role};
pub use user::User;
pub use validation::{EntityOutcome, ImportReport, ValidationError};
