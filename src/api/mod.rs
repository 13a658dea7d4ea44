// ==========================================
// stockbook - API layer
// ==========================================

pub mod import_api;

pub use import_api::ImportApi;
