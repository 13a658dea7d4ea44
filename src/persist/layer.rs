// ==========================================
// stockbook - persistence layer
// ==========================================
// Glue between the in-memory store and a storage backend.
// Responsibilities:
//   - load: parse + migrate every collection, recovering from
//     corrupted entries by discarding them
//   - save: serialize dirty collections, with one eviction+retry
//     round when the backend reports quota exhaustion
//   - debounce: collections are written at most once per window,
//     with a guaranteed flush for shutdown
// Failed saves are logged and swallowed; persistence is best
// effort and must never take the app down.
// ==========================================

use crate::domain::{Customer, Document, Product, Purchase, Sale, SalesBill, Supplier, User};
use crate::persist::debounce::Debouncer;
use crate::persist::error::{StorageError, StorageResult};
use crate::persist::keys::{self, SchemaFamily};
use crate::persist::migrations;
use crate::persist::storage::StorageBackend;
use crate::store::InventoryStore;
use serde::de::DeserializeOwned;
use std::time::Instant;
use tracing::{debug, info, warn};

pub struct PersistenceLayer<B: StorageBackend> {
    backend: B,
    debouncer: Debouncer,
}

impl<B: StorageBackend> PersistenceLayer<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            debouncer: Debouncer::default(),
        }
    }

    pub fn with_debouncer(backend: B, debouncer: Debouncer) -> Self {
        Self { backend, debouncer }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    // ==========================================
    // Load
    // ==========================================

    /// Build a store from whatever the backend holds. A backend
    /// with no known keys at all is a first run and gets seed
    /// data; individual corrupted entries are discarded and
    /// replaced with empty collections.
    pub fn load(&mut self) -> InventoryStore {
        let fresh = keys::ALL_KEYS
            .iter()
            .all(|key| self.backend.get(key).is_none());
        if fresh {
            info!("no stored data found, seeding defaults");
            return InventoryStore::with_seed_data();
        }

        let versions: Vec<(SchemaFamily, u32)> = SchemaFamily::ALL
            .iter()
            .map(|family| (*family, self.stored_version(*family)))
            .collect();

        let products: Vec<Product> = self.load_collection(keys::PRODUCTS, &versions);
        let purchases: Vec<Purchase> = self.load_collection(keys::PURCHASES, &versions);
        let sales: Vec<Sale> = self.load_collection(keys::SALES, &versions);
        let sales_bills: Vec<SalesBill> = self.load_collection(keys::SALES_BILLS, &versions);
        let suppliers: Vec<Supplier> = self.load_collection(keys::SUPPLIERS, &versions);
        let customers: Vec<Customer> = self.load_collection(keys::CUSTOMERS, &versions);
        let documents: Vec<Document> = self.load_collection(keys::DOCUMENTS, &versions);
        let users: Vec<User> = self.load_collection(keys::USERS, &versions);
        let current_user: Option<User> = self.load_collection(keys::CURRENT_USER, &versions);

        // Record that stored data is now at the current schema.
        for family in SchemaFamily::ALL {
            let version = migrations::current_version(*family).to_string();
            if let Err(e) = self.backend.set(&family.version_key(), &version) {
                warn!(family = %family, error = %e, "failed to record schema version");
            }
        }

        info!(
            products = products.len(),
            purchases = purchases.len(),
            sales = sales.len(),
            "store loaded"
        );

        InventoryStore::from_collections(
            products,
            purchases,
            sales,
            sales_bills,
            suppliers,
            customers,
            documents,
            users,
            current_user,
        )
    }

    fn stored_version(&self, family: SchemaFamily) -> u32 {
        match self.backend.get(&family.version_key()) {
            Some(raw) => raw.trim().parse().unwrap_or(1),
            // Data without a version marker predates versioning.
            None => {
                let has_data = family
                    .member_keys()
                    .iter()
                    .any(|key| self.backend.get(key).is_some());
                if has_data {
                    1
                } else {
                    migrations::current_version(family)
                }
            }
        }
    }

    fn family_of(key: &str) -> SchemaFamily {
        SchemaFamily::ALL
            .iter()
            .copied()
            .find(|f| f.member_keys().contains(&key))
            .unwrap_or(SchemaFamily::Inventory)
    }

    /// One collection: get -> migrate raw JSON -> deserialize.
    /// Any failure discards the stored entry and yields the
    /// default, so one bad key cannot poison startup.
    fn load_collection<T: DeserializeOwned + Default>(
        &mut self,
        key: &str,
        versions: &[(SchemaFamily, u32)],
    ) -> T {
        let Some(raw) = self.backend.get(key) else {
            return T::default();
        };

        let family = Self::family_of(key);
        let stored_version = versions
            .iter()
            .find(|(f, _)| *f == family)
            .map(|(_, v)| *v)
            .unwrap_or_else(|| migrations::current_version(family));

        let parsed = serde_json::from_str::<serde_json::Value>(&raw)
            .map(|value| migrations::migrate(family, key, stored_version, value))
            .and_then(serde_json::from_value::<T>);

        match parsed {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "corrupted stored collection, discarding");
                self.backend.remove(key);
                T::default()
            }
        }
    }

    // ==========================================
    // Save
    // ==========================================

    fn serialize_key(store: &InventoryStore, key: &str) -> StorageResult<String> {
        let json = match key {
            keys::PRODUCTS => serde_json::to_string(store.products())?,
            keys::PURCHASES => serde_json::to_string(store.purchases())?,
            keys::SALES => serde_json::to_string(store.sales())?,
            keys::SALES_BILLS => serde_json::to_string(store.sales_bills())?,
            keys::SUPPLIERS => serde_json::to_string(store.suppliers())?,
            keys::CUSTOMERS => serde_json::to_string(store.customers())?,
            keys::DOCUMENTS => serde_json::to_string(store.documents())?,
            keys::USERS => serde_json::to_string(store.users())?,
            keys::CURRENT_USER => serde_json::to_string(&store.current_user())?,
            other => {
                warn!(key = other, "unknown storage key, writing null");
                "null".to_string()
            }
        };
        Ok(json)
    }

    /// Serialize and write one collection. On quota exhaustion,
    /// evict every non-critical key and retry exactly once; a
    /// second failure is logged and swallowed.
    pub fn save_key(&mut self, store: &InventoryStore, key: &str) {
        let json = match Self::serialize_key(store, key) {
            Ok(json) => json,
            Err(e) => {
                warn!(key, error = %e, "failed to serialize collection");
                return;
            }
        };

        match self.backend.set(key, &json) {
            Ok(()) => {}
            Err(StorageError::QuotaExceeded { .. }) => {
                warn!(key, "storage quota exceeded, evicting non-critical data");
                self.evict_non_critical();
                if let Err(e) = self.backend.set(key, &json) {
                    warn!(key, error = %e, "write failed after eviction, data not persisted");
                }
            }
            Err(e) => {
                warn!(key, error = %e, "storage write failed");
            }
        }
    }

    fn evict_non_critical(&mut self) {
        for key in keys::ALL_KEYS {
            if !keys::is_critical(key) {
                debug!(key, "evicting");
                self.backend.remove(key);
            }
        }
    }

    // ==========================================
    // Debounced sync
    // ==========================================

    /// Pull dirty keys from the store, arm their debounce
    /// deadlines, and write whatever came due. Call this on a
    /// tick or after a batch of mutations.
    pub fn sync(&mut self, store: &mut InventoryStore, now: Instant) {
        for key in store.take_dirty() {
            self.debouncer.mark(key, now);
        }
        for key in self.debouncer.take_due(now) {
            self.save_key(store, key);
        }
    }

    /// Write everything still pending, deadlines ignored. Call on
    /// shutdown so trailing edits inside the window are not lost.
    pub fn flush_all(&mut self, store: &mut InventoryStore) {
        let mut pending = self.debouncer.drain_all();
        for key in store.take_dirty() {
            if !pending.contains(&key) {
                pending.push(key);
            }
        }
        for key in pending {
            self.save_key(store, key);
        }
    }
}
