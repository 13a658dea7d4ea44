// ==========================================
// stockbook - inventory store
// ==========================================
// Owns every collection; there is exactly one of these per
// running app and it is passed by reference, never global.
// All mutation goes through methods here so the derived-field
// recompute happens in one place for every path (form edit,
// import, stock movement).
// ==========================================

use crate::domain::trade::WALK_IN_CUSTOMER;
use crate::domain::types::Role;
use crate::domain::{Customer, Document, Product, Purchase, Sale, SalesBill, Supplier, User};
use crate::engine::{derived, product_code, stock_movement, MovementKind};
use crate::persist::keys;
use crate::store::error::{StoreError, StoreResult};
use chrono::Utc;
use std::collections::BTreeSet;
use tracing::debug;

#[derive(Debug, Default)]
pub struct InventoryStore {
    products: Vec<Product>,
    purchases: Vec<Purchase>,
    sales: Vec<Sale>,
    sales_bills: Vec<SalesBill>,
    suppliers: Vec<Supplier>,
    customers: Vec<Customer>,
    documents: Vec<Document>,
    users: Vec<User>,
    current_user: Option<User>,

    // Collection keys touched since the last persistence sync.
    dirty: BTreeSet<&'static str>,
}

impl InventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with the default catalog and the
    /// built-in admin account.
    pub fn with_seed_data() -> Self {
        let mut store = Self::new();
        for product in super::seed::default_products() {
            store.add_product(product);
        }
        store.add_user(super::seed::default_admin());
        store
    }

    /// Rebuild a store from previously persisted collections.
    #[allow(clippy::too_many_arguments)]
    pub fn from_collections(
        products: Vec<Product>,
        purchases: Vec<Purchase>,
        sales: Vec<Sale>,
        sales_bills: Vec<SalesBill>,
        suppliers: Vec<Supplier>,
        customers: Vec<Customer>,
        documents: Vec<Document>,
        users: Vec<User>,
        current_user: Option<User>,
    ) -> Self {
        Self {
            products,
            purchases,
            sales,
            sales_bills,
            suppliers,
            customers,
            documents,
            users,
            current_user,
            dirty: BTreeSet::new(),
        }
    }

    // ==========================================
    // Products
    // ==========================================

    /// Append a product. Missing codes are generated; derived
    /// fields are recomputed regardless of what the caller set.
    pub fn add_product(&mut self, mut product: Product) -> &Product {
        if product.product_code.trim().is_empty() {
            product.product_code = product_code::generate(
                product.product.as_deref(),
                product.model_no.as_deref(),
                product.material.as_deref(),
            );
        }
        derived::apply(&mut product);

        debug!(code = %product.product_code, name = %product.product_name, "product added");
        self.products.push(product);
        self.mark_dirty(keys::PRODUCTS);
        &self.products[self.products.len() - 1]
    }

    /// Edit a product through a closure. Whatever the closure
    /// touches, derived fields and updated_at are recomputed
    /// afterwards, so the invariant cannot drift.
    pub fn update_product<F>(&mut self, id: &str, mutate: F) -> StoreResult<&Product>
    where
        F: FnOnce(&mut Product),
    {
        let product = self
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::ProductNotFound(id.to_string()))?;

        mutate(product);
        derived::apply(product);
        product.updated_at = Utc::now();

        self.dirty.insert(keys::PRODUCTS);
        Ok(&*product)
    }

    /// Explicit IN/OUT stock adjustment; OUT beyond current
    /// quantity is rejected by the movement rule.
    pub fn adjust_stock(
        &mut self,
        id: &str,
        kind: MovementKind,
        delta: i64,
    ) -> StoreResult<&Product> {
        let product = self
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::ProductNotFound(id.to_string()))?;

        product.quantity = stock_movement::apply(product.quantity, kind, delta)?;
        derived::apply(product);
        product.updated_at = Utc::now();

        self.dirty.insert(keys::PRODUCTS);
        Ok(&*product)
    }

    /// Role-gated delete.
    pub fn delete_product(&mut self, id: &str, actor: &User) -> StoreResult<Product> {
        if !actor.role.can_delete_products() {
            return Err(StoreError::PermissionDenied {
                action: "delete product".to_string(),
            });
        }

        let idx = self
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| StoreError::ProductNotFound(id.to_string()))?;

        self.mark_dirty(keys::PRODUCTS);
        Ok(self.products.remove(idx))
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn product_by_id(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn product_by_code(&self, code: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.product_code == code)
    }

    // ==========================================
    // Purchases - append-only, no update or delete
    // ==========================================

    pub fn record_purchase(&mut self, purchase: Purchase) -> &Purchase {
        if let Some(name) = purchase.supplier.clone() {
            self.upsert_supplier(&name);
        }

        self.purchases.push(purchase);
        self.mark_dirty(keys::PURCHASES);
        &self.purchases[self.purchases.len() - 1]
    }

    pub fn purchases(&self) -> &[Purchase] {
        &self.purchases
    }

    // ==========================================
    // Sales
    // ==========================================

    pub fn record_sale(&mut self, sale: Sale) -> &Sale {
        if sale.customer_name != WALK_IN_CUSTOMER {
            let name = sale.customer_name.clone();
            self.upsert_customer(&name);
        }

        self.sales.push(sale);
        self.mark_dirty(keys::SALES);
        &self.sales[self.sales.len() - 1]
    }

    /// Quick-input path: records the sale and keeps a bill
    /// snapshot for printing.
    pub fn record_quick_sale(&mut self, sale: Sale) -> &SalesBill {
        let bill = SalesBill {
            id: uuid::Uuid::new_v4().to_string(),
            sale_id: sale.id.clone(),
            bill_no: format!("BILL-{:05}", self.sales_bills.len() + 1),
            customer_name: sale.customer_name.clone(),
            total_amount: sale.total_sale,
            created_at: Utc::now(),
        };
        self.record_sale(sale);

        self.sales_bills.push(bill);
        self.mark_dirty(keys::SALES_BILLS);
        &self.sales_bills[self.sales_bills.len() - 1]
    }

    pub fn sales(&self) -> &[Sale] {
        &self.sales
    }

    pub fn sales_bills(&self) -> &[SalesBill] {
        &self.sales_bills
    }

    // ==========================================
    // Suppliers / customers - auto-collected
    // ==========================================

    fn upsert_supplier(&mut self, name: &str) {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return;
        }
        let exists = self
            .suppliers
            .iter()
            .any(|s| s.name.eq_ignore_ascii_case(trimmed));
        if !exists {
            self.suppliers.push(Supplier::new(trimmed));
            self.mark_dirty(keys::SUPPLIERS);
        }
    }

    fn upsert_customer(&mut self, name: &str) {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return;
        }
        let exists = self
            .customers
            .iter()
            .any(|c| c.name.eq_ignore_ascii_case(trimmed));
        if !exists {
            self.customers.push(Customer::new(trimmed));
            self.mark_dirty(keys::CUSTOMERS);
        }
    }

    pub fn suppliers(&self) -> &[Supplier] {
        &self.suppliers
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    // ==========================================
    // Documents
    // ==========================================

    pub fn add_document(&mut self, document: Document) -> &Document {
        self.documents.push(document);
        self.mark_dirty(keys::DOCUMENTS);
        &self.documents[self.documents.len() - 1]
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    // ==========================================
    // Users - plain-text credentials, see domain::user
    // ==========================================

    pub fn add_user(&mut self, user: User) -> &User {
        self.users.push(user);
        self.mark_dirty(keys::USERS);
        &self.users[self.users.len() - 1]
    }

    pub fn login(&mut self, username: &str, password: &str) -> Option<Role> {
        let user = self
            .users
            .iter()
            .find(|u| u.username == username && u.check_password(password))?
            .clone();
        let role = user.role;
        self.current_user = Some(user);
        self.mark_dirty(keys::CURRENT_USER);
        Some(role)
    }

    pub fn logout(&mut self) {
        if self.current_user.take().is_some() {
            self.mark_dirty(keys::CURRENT_USER);
        }
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    // ==========================================
    // Dirty tracking for the persistence layer
    // ==========================================

    fn mark_dirty(&mut self, key: &'static str) {
        self.dirty.insert(key);
    }

    /// Keys mutated since the last call; clears the set.
    pub fn take_dirty(&mut self) -> BTreeSet<&'static str> {
        std::mem::take(&mut self.dirty)
    }

    pub fn has_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }
}
