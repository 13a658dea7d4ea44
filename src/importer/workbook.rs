// ==========================================
// stockbook - workbook parsing
// ==========================================
// Capability boundary: file bytes -> named sheets of header-keyed
// scalar rows. The spreadsheet codec itself (calamine/csv) is an
// external dependency; nothing downstream sees it.
// Supported: .xlsx / .xls / .csv
// ==========================================

use crate::domain::types::CellValue;
use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook_auto, Data, Range, Reader, Xlsx};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::io::Cursor;
use std::path::Path;

/// One parsed row: column header -> cell value.
pub type RawRow = HashMap<String, CellValue>;

// ==========================================
// Sheet / ParsedWorkbook
// ==========================================
#[derive(Debug, Clone)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<RawRow>,
}

/// Parsed workbook. Sheet order is preserved as read.
#[derive(Debug, Clone, Default)]
pub struct ParsedWorkbook {
    pub sheets: Vec<Sheet>,
}

impl ParsedWorkbook {
    pub fn new(sheets: Vec<Sheet>) -> Self {
        Self { sheets }
    }

    /// Case-insensitive sheet lookup.
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        let wanted = name.trim().to_lowercase();
        self.sheets
            .iter()
            .find(|s| s.name.trim().to_lowercase() == wanted)
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }
}

// ==========================================
// Entry point - dispatch by extension
// ==========================================
pub fn parse_path<P: AsRef<Path>>(file_path: P) -> ImportResult<ParsedWorkbook> {
    let path = file_path.as_ref();

    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "xlsx" | "xls" => parse_excel(path),
        "csv" => parse_csv(path),
        _ => Err(ImportError::UnsupportedFormat(ext)),
    }
}

// ==========================================
// Excel
// ==========================================
fn parse_excel(path: &Path) -> ImportResult<ParsedWorkbook> {
    let mut workbook =
        open_workbook_auto(path).map_err(|e| ImportError::WorkbookParseError(e.to_string()))?;

    let sheet_names = workbook.sheet_names().to_owned();
    if sheet_names.is_empty() {
        return Err(ImportError::WorkbookParseError(
            "workbook has no sheets".to_string(),
        ));
    }

    let mut sheets = Vec::with_capacity(sheet_names.len());
    for name in sheet_names {
        let range = workbook
            .worksheet_range(&name)
            .map_err(|e| ImportError::WorkbookParseError(e.to_string()))?;
        sheets.push(range_to_sheet(name, &range));
    }

    Ok(ParsedWorkbook::new(sheets))
}

/// Parse in-memory xlsx bytes (uploads, round-trip tests).
pub fn parse_xlsx_bytes(bytes: &[u8]) -> ImportResult<ParsedWorkbook> {
    let cursor = Cursor::new(bytes.to_vec());
    let mut workbook: Xlsx<_> =
        Xlsx::new(cursor).map_err(|e| ImportError::WorkbookParseError(e.to_string()))?;

    let sheet_names = workbook.sheet_names().to_owned();
    let mut sheets = Vec::with_capacity(sheet_names.len());
    for name in sheet_names {
        let range = workbook
            .worksheet_range(&name)
            .map_err(|e| ImportError::WorkbookParseError(e.to_string()))?;
        sheets.push(range_to_sheet(name, &range));
    }

    Ok(ParsedWorkbook::new(sheets))
}

fn range_to_sheet(name: String, range: &Range<Data>) -> Sheet {
    let mut rows_iter = range.rows();

    let headers: Vec<String> = match rows_iter.next() {
        Some(header_row) => header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect(),
        None => return Sheet { name, rows: Vec::new() },
    };

    let mut rows = Vec::new();
    for data_row in rows_iter {
        let mut row_map = RawRow::new();
        for (col_idx, cell) in data_row.iter().enumerate() {
            if let Some(header) = headers.get(col_idx) {
                if header.is_empty() {
                    continue;
                }
                row_map.insert(header.clone(), cell_to_value(cell));
            }
        }

        // Skip rows where every cell is blank.
        if row_map.values().all(|v| v.is_blank()) {
            continue;
        }

        rows.push(row_map);
    }

    Sheet { name, rows }
}

fn cell_to_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                CellValue::Empty
            } else {
                CellValue::Text(trimmed.to_string())
            }
        }
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Text(if *b { "TRUE" } else { "FALSE" }.to_string()),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(_) => CellValue::Empty,
    }
}

// ==========================================
// CSV - one logical sheet named "Sheet1"
// ==========================================
// First line is headers, matched case-insensitively downstream
// against the same alias tables as Excel columns.
fn parse_csv(path: &Path) -> ImportResult<ParsedWorkbook> {
    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let mut row_map = RawRow::new();

        for (col_idx, value) in record.iter().enumerate() {
            if let Some(header) = headers.get(col_idx) {
                if header.is_empty() {
                    continue;
                }
                row_map.insert(header.clone(), CellValue::from(value));
            }
        }

        if row_map.values().all(|v| v.is_blank()) {
            continue;
        }

        rows.push(row_map);
    }

    Ok(ParsedWorkbook::new(vec![Sheet {
        name: "Sheet1".to_string(),
        rows,
    }]))
}
