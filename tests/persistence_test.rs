// ==========================================
// stockbook - persistence integration tests
// ==========================================
// Store + persistence layer working together: debounced writes,
// shutdown flush, corruption recovery, quota eviction and schema
// migration, over both backends.
// ==========================================

#[path = "test_helpers.rs"]
mod test_helpers;

use std::time::{Duration, Instant};

use stockbook::domain::{Document, Product};
use stockbook::persist::keys;
use stockbook::persist::Debouncer;
use stockbook::{FileStorage, InventoryStore, MemoryStorage, PersistenceLayer, StorageBackend};
use test_helpers::init_logging;

fn add_sample_product(store: &mut InventoryStore, name: &str) {
    let mut p = Product::blank(name);
    p.quantity = 2;
    p.unit_rate = 10.0;
    p.sell_rate = 15.0;
    store.add_product(p);
}

#[test]
fn test_file_backend_survives_restart() {
    init_logging();

    let dir = tempfile::tempdir().unwrap();

    {
        let backend = FileStorage::open(dir.path().to_path_buf()).unwrap();
        let mut layer = PersistenceLayer::new(backend);
        let mut store = InventoryStore::new();
        add_sample_product(&mut store, "Hammer");
        layer.flush_all(&mut store);
    }

    // "Restart": a new layer over the same directory.
    let backend = FileStorage::open(dir.path().to_path_buf()).unwrap();
    let mut layer = PersistenceLayer::new(backend);
    let store = layer.load();

    assert_eq!(store.products().len(), 1);
    assert_eq!(store.products()[0].product_name, "Hammer");
    assert_eq!(store.products()[0].total_buy, 20.0);
}

#[test]
fn test_debounce_coalesces_burst_edits() {
    init_logging();

    let debouncer = Debouncer::new(Duration::from_millis(200));
    let mut layer = PersistenceLayer::with_debouncer(MemoryStorage::new(), debouncer);
    let mut store = InventoryStore::new();

    let t0 = Instant::now();

    // A burst of edits inside one window.
    add_sample_product(&mut store, "Hammer");
    layer.sync(&mut store, t0);
    add_sample_product(&mut store, "Wrench");
    layer.sync(&mut store, t0 + Duration::from_millis(100));

    // Still inside the (re-armed) window: nothing written.
    assert!(layer.backend().get(keys::PRODUCTS).is_none());

    // After the window, one write carrying both edits.
    layer.sync(&mut store, t0 + Duration::from_millis(400));
    let stored = layer.backend().get(keys::PRODUCTS).unwrap();
    assert!(stored.contains("Hammer"));
    assert!(stored.contains("Wrench"));
}

#[test]
fn test_flush_all_saves_trailing_edits() {
    init_logging();

    let debouncer = Debouncer::new(Duration::from_secs(60));
    let mut layer = PersistenceLayer::with_debouncer(MemoryStorage::new(), debouncer);
    let mut store = InventoryStore::new();

    add_sample_product(&mut store, "Hammer");
    layer.sync(&mut store, Instant::now());

    // Edit after the last sync, then shut down immediately.
    add_sample_product(&mut store, "Wrench");
    layer.flush_all(&mut store);

    let stored = layer.backend().get(keys::PRODUCTS).unwrap();
    assert!(stored.contains("Wrench"));
}

#[test]
fn test_corrupted_key_recovers_to_default() {
    init_logging();

    let mut backend = MemoryStorage::new();
    backend.set(keys::PRODUCTS, "XX{{corrupt").unwrap();
    backend
        .set(keys::SALES, r#"[{"wrong": "shape"}]"#)
        .unwrap();
    backend.set(keys::USERS, "[]").unwrap();

    let mut layer = PersistenceLayer::new(backend);
    let store = layer.load();

    // Both bad entries discarded, app starts with empty collections.
    assert!(store.products().is_empty());
    assert!(store.sales().is_empty());
    assert!(layer.backend().get(keys::PRODUCTS).is_none());
    assert!(layer.backend().get(keys::SALES).is_none());
}

#[test]
fn test_quota_eviction_prefers_non_critical_data() {
    init_logging();

    let mut layer = PersistenceLayer::new(MemoryStorage::with_quota(8192));
    let mut store = InventoryStore::new();

    // Bulky non-critical documents plus a product catalog.
    store.add_document(Document::new("manual.pdf", "x".repeat(7000)));
    add_sample_product(&mut store, "Hammer");

    // Documents happen to flush first or last; either way the
    // critical products write must land.
    layer.flush_all(&mut store);

    assert!(layer.backend().get(keys::PRODUCTS).is_some());
}

#[test]
fn test_legacy_schema_upgraded_on_load() {
    init_logging();

    let mut backend = MemoryStorage::new();
    let legacy = serde_json::json!([{
        "id": "p1",
        "productCode": "HMR-1",
        "productName": "Hammer",
        "quantity": 2,
        "unitQty": 1,
        "unitRate": 10.0,
        "approximateRate": 0.0,
        "authenticationRate": 0.0,
        "sellRate": 15.0,
        "createdAt": "2024-01-01T00:00:00Z",
        "updatedAt": "2024-01-01T00:00:00Z"
    }]);
    backend.set(keys::PRODUCTS, &legacy.to_string()).unwrap();
    backend
        .set(
            keys::DOCUMENTS,
            r#"[{"id":"d1","name":"a.pdf","content":"","uploadedAt":"2024-01-01T00:00:00Z"}]"#,
        )
        .unwrap();

    let mut layer = PersistenceLayer::new(backend);
    let store = layer.load();

    // Unversioned data is treated as v1 and upgraded in place.
    assert_eq!(store.products().len(), 1);
    assert!(store.products()[0].extras.is_empty());
    assert_eq!(store.documents().len(), 1);
    assert!(store.documents()[0].tags.is_empty());
}
