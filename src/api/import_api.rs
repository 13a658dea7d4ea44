// ==========================================
// stockbook - import/export API surface
// ==========================================
// Thin async facade over the import pipeline. File parsing is
// CPU/IO-bound and runs on the blocking pool; committing into the
// store happens on the caller's task. A busy flag serializes
// imports: a second call while one is running is rejected
// immediately instead of queued.
// ==========================================

use crate::domain::validation::ImportReport;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::{workbook, ImportOrchestrator, ParsedWorkbook};
use crate::store::InventoryStore;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct ImportApi {
    busy: Arc<AtomicBool>,
}

/// Clears the busy flag when the import ends, normally or not.
struct BusyGuard(Arc<AtomicBool>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl ImportApi {
    pub fn new() -> Self {
        Self {
            busy: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_processing(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    fn acquire(&self) -> ImportResult<BusyGuard> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(ImportError::ImportInProgress);
        }
        Ok(BusyGuard(Arc::clone(&self.busy)))
    }

    /// Parse a workbook file off-task and commit it into the
    /// store. Rejects with ImportInProgress if an import is
    /// already running.
    pub async fn import_file(
        &self,
        path: impl AsRef<Path>,
        store: &mut InventoryStore,
    ) -> ImportResult<ImportReport> {
        let _guard = self.acquire()?;

        let path: PathBuf = path.as_ref().to_path_buf();
        info!(path = %path.display(), "import requested");

        let parsed: ParsedWorkbook =
            tokio::task::spawn_blocking(move || workbook::parse_path(&path))
                .await
                .map_err(|e| ImportError::Other(anyhow::anyhow!("parse task failed: {e}")))??;

        let report = ImportOrchestrator::new().import_workbook(&parsed, store);
        Ok(report)
    }

    /// Import an already-parsed workbook synchronously, under the
    /// same busy guard.
    pub fn import_workbook(
        &self,
        parsed: &ParsedWorkbook,
        store: &mut InventoryStore,
    ) -> ImportResult<ImportReport> {
        let _guard = self.acquire()?;
        Ok(ImportOrchestrator::new().import_workbook(parsed, store))
    }

    /// Export all collections to an xlsx file on the blocking pool.
    pub async fn export_file(
        &self,
        path: impl AsRef<Path>,
        store: &InventoryStore,
    ) -> ImportResult<()> {
        let path: PathBuf = path.as_ref().to_path_buf();
        let products = store.products().to_vec();
        let purchases = store.purchases().to_vec();
        let sales = store.sales().to_vec();

        tokio::task::spawn_blocking(move || {
            crate::importer::exporter::export_all_to_path(&path, &products, &purchases, &sales)
        })
        .await
        .map_err(|e| ImportError::Other(anyhow::anyhow!("export task failed: {e}")))?
    }
}

impl Default for ImportApi {
    fn default() -> Self {
        Self::new()
    }
}
