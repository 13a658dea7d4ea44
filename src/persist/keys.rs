// ==========================================
// stockbook - storage keys
// ==========================================
// Every collection persists under one flat string key. Key names
// are part of the on-disk format and never change; schema changes
// go through versioned migrations instead.
// ==========================================

pub const PRODUCTS: &str = "products";
pub const PURCHASES: &str = "purchases";
pub const SALES: &str = "sales";
pub const SALES_BILLS: &str = "salesBills";
pub const SUPPLIERS: &str = "suppliers";
pub const CUSTOMERS: &str = "customers";
pub const DOCUMENTS: &str = "documents";
pub const USERS: &str = "users";
pub const CURRENT_USER: &str = "currentUser";

pub const ALL_KEYS: &[&str] = &[
    PRODUCTS,
    PURCHASES,
    SALES,
    SALES_BILLS,
    SUPPLIERS,
    CUSTOMERS,
    DOCUMENTS,
    USERS,
    CURRENT_USER,
];

/// Keys that must never be evicted during quota recovery.
pub const CRITICAL_KEYS: &[&str] = &[PRODUCTS, PURCHASES, SALES, USERS, CURRENT_USER];

pub fn is_critical(key: &str) -> bool {
    CRITICAL_KEYS.contains(&key)
}

// ==========================================
// Schema families
// ==========================================
// Collections are versioned in families, not per key: the
// inventory collections migrate together, documents alone,
// auth alone.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaFamily {
    Inventory,
    Documents,
    Auth,
}

impl SchemaFamily {
    pub const ALL: &'static [SchemaFamily] = &[
        SchemaFamily::Inventory,
        SchemaFamily::Documents,
        SchemaFamily::Auth,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaFamily::Inventory => "inventory",
            SchemaFamily::Documents => "documents",
            SchemaFamily::Auth => "auth",
        }
    }

    /// Key the family's schema version is stored under.
    pub fn version_key(&self) -> String {
        format!("schemaVersion.{}", self.as_str())
    }

    /// Collection keys belonging to this family.
    pub fn member_keys(&self) -> &'static [&'static str] {
        match self {
            SchemaFamily::Inventory => &[
                PRODUCTS,
                PURCHASES,
                SALES,
                SALES_BILLS,
                SUPPLIERS,
                CUSTOMERS,
            ],
            SchemaFamily::Documents => &[DOCUMENTS],
            SchemaFamily::Auth => &[USERS, CURRENT_USER],
        }
    }
}

impl std::fmt::Display for SchemaFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
