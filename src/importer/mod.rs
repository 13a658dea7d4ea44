// ==========================================
// stockbook - import/export layer
// ==========================================
// Pipeline: workbook parse -> sheet resolution -> normalization
// -> validation -> commit. Export is the inverse surface over
// the same canonical headers.
// ==========================================

pub mod error;
pub mod exporter;
pub mod normalizer;
pub mod orchestrator;
pub mod sheet_resolver;
pub mod validator;
pub mod workbook;

pub use error::{ImportError, ImportResult};
pub use orchestrator::ImportOrchestrator;
pub use workbook::{ParsedWorkbook, RawRow, Sheet};
