// ==========================================
// stockbook - import error types
// ==========================================
// Only a top-level file/workbook parse failure surfaces to the
// operator as a blocking error. Row problems become collected
// ValidationErrors, sheet problems become sheet-level entries.
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    // ===== File errors =====
    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("unsupported file format: {0} (expected .xlsx/.xls/.csv)")]
    UnsupportedFormat(String),

    #[error("failed to read file: {0}")]
    FileReadError(String),

    #[error("failed to parse workbook: {0}")]
    WorkbookParseError(String),

    #[error("failed to parse CSV: {0}")]
    CsvParseError(String),

    // ===== Sheet-scoped errors (contained per entity) =====
    #[error("sheet '{sheet}' could not be formatted: {message}")]
    SheetFormatError { sheet: String, message: String },

    // ===== Export errors =====
    #[error("failed to write workbook: {0}")]
    ExportError(String),

    // ===== Concurrency guard =====
    #[error("an import is already in progress")]
    ImportInProgress,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::WorkbookParseError(err.to_string())
    }
}

impl From<calamine::XlsxError> for ImportError {
    fn from(err: calamine::XlsxError) -> Self {
        ImportError::WorkbookParseError(err.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for ImportError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        ImportError::ExportError(err.to_string())
    }
}

/// Result alias for the import pipeline.
pub type ImportResult<T> = Result<T, ImportError>;
