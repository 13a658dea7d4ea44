// ==========================================
// stockbook - import orchestrator
// ==========================================
// Drives the pipeline: resolve sheets -> normalize rows ->
// validate -> commit valid records, in fixed entity order
// Product -> Purchase -> Sale. A failure inside one sheet is
// contained: it becomes a sheet-level validation error and the
// remaining entities are still processed. No transactionality:
// rows committed before a failure stay committed.
// ==========================================

use crate::domain::types::EntityKind;
use crate::domain::validation::{EntityOutcome, ImportReport, ValidationError};
use crate::importer::sheet_resolver::{self, ResolvedSheets};
use crate::importer::workbook::{ParsedWorkbook, Sheet};
use crate::importer::{normalizer, validator};
use crate::store::InventoryStore;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Spreadsheet row number of the first data row (1-based, row 1
/// is the header).
const HEADER_OFFSET: usize = 2;

pub struct ImportOrchestrator;

impl ImportOrchestrator {
    pub fn new() -> Self {
        Self
    }

    /// Run the full pipeline over an already-parsed workbook,
    /// committing valid records into the store as a side effect.
    pub fn import_workbook(
        &self,
        workbook: &ParsedWorkbook,
        store: &mut InventoryStore,
    ) -> ImportReport {
        let started = Instant::now();
        let mut report = ImportReport::default();

        info!(sheets = workbook.sheets.len(), "starting workbook import");

        let resolved: ResolvedSheets = sheet_resolver::resolve(workbook);

        for entity in [EntityKind::Product, EntityKind::Purchase, EntityKind::Sale] {
            let Some(sheet) = resolved.for_entity(entity) else {
                debug!(entity = %entity, "no sheet resolved, skipping");
                continue;
            };

            debug!(entity = %entity, sheet = %sheet.name, rows = sheet.rows.len(), "processing sheet");

            let result = match entity {
                EntityKind::Product => self.import_products(sheet, store, &mut report.validation_errors),
                EntityKind::Purchase => self.import_purchases(sheet, store, &mut report.validation_errors),
                EntityKind::Sale => self.import_sales(sheet, store, &mut report.validation_errors),
            };

            match result {
                Ok(outcome) => {
                    info!(
                        entity = %entity,
                        count = outcome.count,
                        processed = outcome.processed,
                        failed = outcome.failed,
                        "sheet processed"
                    );
                    *report_slot(&mut report, entity) = outcome;
                }
                Err(e) => {
                    // Contained: report and move on to the next entity.
                    warn!(entity = %entity, sheet = %sheet.name, error = %e, "sheet aborted");
                    report.validation_errors.push(ValidationError {
                        entity,
                        row: 0,
                        name: sheet.name.clone(),
                        errors: vec![format!("Sheet could not be processed: {}", e)],
                    });
                }
            }
        }

        report.elapsed_ms = started.elapsed().as_millis() as u64;
        info!(
            committed = report.total_committed(),
            failed = report.total_failed(),
            errors = report.validation_errors.len(),
            elapsed_ms = report.elapsed_ms,
            "workbook import finished"
        );

        report
    }

    fn import_products(
        &self,
        sheet: &Sheet,
        store: &mut InventoryStore,
        errors: &mut Vec<ValidationError>,
    ) -> anyhow::Result<EntityOutcome> {
        let mut outcome = EntityOutcome::default();

        for (idx, row) in sheet.rows.iter().enumerate() {
            let row_number = idx + HEADER_OFFSET;
            let Some(product) = normalizer::normalize_product(row)? else {
                continue; // blank row
            };
            outcome.count += 1;

            let problems = validator::validate_product(&product);
            if problems.is_empty() {
                store.add_product(product);
                outcome.processed += 1;
            } else {
                outcome.failed += 1;
                errors.push(ValidationError {
                    entity: EntityKind::Product,
                    row: row_number,
                    name: non_empty_or(product.display_name(), "(unnamed product)"),
                    errors: problems,
                });
            }
        }

        Ok(outcome)
    }

    fn import_purchases(
        &self,
        sheet: &Sheet,
        store: &mut InventoryStore,
        errors: &mut Vec<ValidationError>,
    ) -> anyhow::Result<EntityOutcome> {
        let mut outcome = EntityOutcome::default();

        for (idx, row) in sheet.rows.iter().enumerate() {
            let row_number = idx + HEADER_OFFSET;
            let Some(purchase) = normalizer::normalize_purchase(row)? else {
                continue;
            };
            outcome.count += 1;

            let problems = validator::validate_purchase(&purchase);
            if problems.is_empty() {
                store.record_purchase(purchase);
                outcome.processed += 1;
            } else {
                outcome.failed += 1;
                let name = purchase
                    .product_name
                    .clone()
                    .or_else(|| Some(purchase.invoice_no.clone()))
                    .unwrap_or_default();
                errors.push(ValidationError {
                    entity: EntityKind::Purchase,
                    row: row_number,
                    name: non_empty_or(&name, "(unnamed purchase)"),
                    errors: problems,
                });
            }
        }

        Ok(outcome)
    }

    fn import_sales(
        &self,
        sheet: &Sheet,
        store: &mut InventoryStore,
        errors: &mut Vec<ValidationError>,
    ) -> anyhow::Result<EntityOutcome> {
        let mut outcome = EntityOutcome::default();

        for (idx, row) in sheet.rows.iter().enumerate() {
            let row_number = idx + HEADER_OFFSET;

            // Some tools emit trailing rows with only formatting
            // leftovers; skip anything without an identifying column.
            if !sheet_resolver::is_processable_sale_row(row) {
                continue;
            }

            let Some(sale) = normalizer::normalize_sale(row)? else {
                continue;
            };
            outcome.count += 1;

            let problems = validator::validate_sale(&sale);
            if problems.is_empty() {
                store.record_sale(sale);
                outcome.processed += 1;
            } else {
                outcome.failed += 1;
                let name = sale
                    .product_name
                    .clone()
                    .unwrap_or_else(|| sale.customer_name.clone());
                errors.push(ValidationError {
                    entity: EntityKind::Sale,
                    row: row_number,
                    name: non_empty_or(&name, "(unnamed sale)"),
                    errors: problems,
                });
            }
        }

        Ok(outcome)
    }
}

impl Default for ImportOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

fn report_slot(report: &mut ImportReport, entity: EntityKind) -> &mut EntityOutcome {
    match entity {
        EntityKind::Product => &mut report.products,
        EntityKind::Purchase => &mut report.purchases,
        EntityKind::Sale => &mut report.sales,
    }
}

fn non_empty_or(value: &str, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}
