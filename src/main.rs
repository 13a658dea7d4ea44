// ==========================================
// stockbook - diagnostic entry point
// ==========================================
// Imports a workbook from the command line, prints the outcome
// per entity, and persists the result to the local data
// directory. Mostly useful for inspecting what a given file will
// do before loading it in the app.
// ==========================================

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use stockbook::persist::FileStorage;
use stockbook::{ImportApi, PersistenceLayer};

#[tokio::main]
async fn main() -> ExitCode {
    stockbook::logging::init();

    tracing::info!("{} v{}", stockbook::APP_NAME, stockbook::VERSION);

    let Some(path) = std::env::args().nth(1).map(PathBuf::from) else {
        eprintln!("usage: stockbook <workbook.xlsx|.xls|.csv>");
        return ExitCode::from(2);
    };

    let Some(data_dir) = FileStorage::default_dir() else {
        tracing::error!("no platform data directory available");
        return ExitCode::FAILURE;
    };
    let backend = match FileStorage::open(data_dir) {
        Ok(backend) => backend,
        Err(e) => {
            tracing::error!(error = %e, "failed to open storage");
            return ExitCode::FAILURE;
        }
    };

    let mut layer = PersistenceLayer::new(backend);
    let mut store = layer.load();

    let api = ImportApi::new();
    let report = match api.import_file(&path, &mut store).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!(error = %e, "import failed");
            return ExitCode::FAILURE;
        }
    };

    println!("import of {} finished in {}ms", path.display(), report.elapsed_ms);
    for (label, outcome) in [
        ("products", &report.products),
        ("purchases", &report.purchases),
        ("sales", &report.sales),
    ] {
        println!(
            "  {:<10} rows={} committed={} failed={}",
            label, outcome.count, outcome.processed, outcome.failed
        );
    }
    for error in &report.validation_errors {
        if error.is_sheet_level() {
            println!("  [{}] sheet '{}': {}", error.entity, error.name, error.errors.join("; "));
        } else {
            println!(
                "  [{}] row {} ({}): {}",
                error.entity,
                error.row,
                error.name,
                error.errors.join("; ")
            );
        }
    }

    layer.sync(&mut store, Instant::now());
    layer.flush_all(&mut store);

    ExitCode::SUCCESS
}
