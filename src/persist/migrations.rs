// ==========================================
// stockbook - schema migrations
// ==========================================
// Stored collections carry a per-family schema version. On load,
// any family behind the current version is upgraded step by step
// ("1->2", then "2->3") against the raw JSON, before
// deserialization into domain types. Steps are additive shape
// fixes only; a step that does not recognize a key leaves it
// untouched.
// ==========================================

use crate::persist::keys::{self, SchemaFamily};
use serde_json::{json, Value};
use tracing::{info, warn};

pub fn current_version(family: SchemaFamily) -> u32 {
    match family {
        SchemaFamily::Inventory => 3,
        SchemaFamily::Documents => 2,
        SchemaFamily::Auth => 1,
    }
}

/// Upgrade one collection's JSON from `stored` to the family's
/// current version. Unknown steps are skipped with a warning
/// rather than failing the load.
pub fn migrate(family: SchemaFamily, key: &str, stored: u32, mut value: Value) -> Value {
    let target = current_version(family);
    let mut version = stored;
    while version < target {
        let step = format!("{}->{}", version, version + 1);
        info!(family = %family, key, step = %step, "applying schema migration");
        value = apply_step(family, &step, key, value);
        version += 1;
    }
    value
}

fn apply_step(family: SchemaFamily, step: &str, key: &str, value: Value) -> Value {
    match (family, step) {
        (SchemaFamily::Inventory, "1->2") => inventory_1_to_2(key, value),
        (SchemaFamily::Inventory, "2->3") => inventory_2_to_3(key, value),
        (SchemaFamily::Documents, "1->2") => documents_1_to_2(key, value),
        _ => {
            warn!(family = %family, step, "no migration registered, leaving data as-is");
            value
        }
    }
}

/// v2 introduced the pass-through extras map on products.
fn inventory_1_to_2(key: &str, mut value: Value) -> Value {
    if key != keys::PRODUCTS {
        return value;
    }
    if let Some(items) = value.as_array_mut() {
        for item in items {
            if let Some(obj) = item.as_object_mut() {
                obj.entry("extras").or_insert_with(|| json!({}));
            }
        }
    }
    value
}

/// v3 made every derived field a stored column; older records
/// get zeros here and a real recompute on the first edit.
fn inventory_2_to_3(key: &str, mut value: Value) -> Value {
    if key != keys::PRODUCTS {
        return value;
    }
    if let Some(items) = value.as_array_mut() {
        for item in items {
            if let Some(obj) = item.as_object_mut() {
                for field in [
                    "totalBuy",
                    "stockValue",
                    "potentialValue",
                    "potentialProfit",
                    "profitMargin",
                ] {
                    obj.entry(field).or_insert(json!(0.0));
                }
            }
        }
    }
    value
}

/// v2 added free-form tags to documents.
fn documents_1_to_2(key: &str, mut value: Value) -> Value {
    if key != keys::DOCUMENTS {
        return value;
    }
    if let Some(items) = value.as_array_mut() {
        for item in items {
            if let Some(obj) = item.as_object_mut() {
                obj.entry("tags").or_insert_with(|| json!([]));
            }
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inventory_migration_chain() {
        let v1 = json!([{ "id": "p1", "productName": "Hammer" }]);
        let out = migrate(SchemaFamily::Inventory, keys::PRODUCTS, 1, v1);

        let first = &out[0];
        assert_eq!(first["extras"], json!({}));
        assert_eq!(first["totalBuy"], json!(0.0));
        assert_eq!(first["profitMargin"], json!(0.0));
        // Existing fields untouched.
        assert_eq!(first["productName"], json!("Hammer"));
    }

    #[test]
    fn test_migration_does_not_clobber_existing_values() {
        let v2 = json!([{ "id": "p1", "extras": {"Note": "x"}, "totalBuy": 42.0 }]);
        let out = migrate(SchemaFamily::Inventory, keys::PRODUCTS, 2, v2);
        assert_eq!(out[0]["totalBuy"], json!(42.0));
        assert_eq!(out[0]["extras"]["Note"], json!("x"));
    }

    #[test]
    fn test_documents_gain_tags() {
        let v1 = json!([{ "id": "d1", "name": "invoice.pdf" }]);
        let out = migrate(SchemaFamily::Documents, keys::DOCUMENTS, 1, v1);
        assert_eq!(out[0]["tags"], json!([]));
    }

    #[test]
    fn test_current_version_is_noop() {
        let value = json!([{ "id": "p1" }]);
        let out = migrate(SchemaFamily::Inventory, keys::PRODUCTS, 3, value.clone());
        assert_eq!(out, value);
    }

    #[test]
    fn test_non_target_keys_pass_through() {
        let value = json!([{ "id": "s1", "name": "Acme" }]);
        let out = migrate(SchemaFamily::Inventory, keys::SUPPLIERS, 1, value.clone());
        assert_eq!(out, value);
    }
}
