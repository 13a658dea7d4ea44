// ==========================================
// stockbook - first-run seed data
// ==========================================

use crate::domain::types::Role;
use crate::domain::{Product, User};

/// Small starter catalog so a fresh install is not an empty page.
pub fn default_products() -> Vec<Product> {
    let mut out = Vec::new();

    let mut p = Product::blank("Claw Hammer 500g");
    p.product = Some("Hammer".to_string());
    p.brand = Some("Stanley".to_string());
    p.category = Some("Hand Tools".to_string());
    p.unit = Some("pcs".to_string());
    p.quantity = 12;
    p.unit_rate = 180.0;
    p.sell_rate = 250.0;
    out.push(p);

    let mut p = Product::blank("Cement OPC 53 Grade");
    p.product = Some("Cement".to_string());
    p.brand = Some("UltraTech".to_string());
    p.grade = Some("OPC 53".to_string());
    p.category = Some("Building Material".to_string());
    p.unit = Some("bag".to_string());
    p.quantity = 40;
    p.unit_rate = 380.0;
    p.sell_rate = 420.0;
    out.push(p);

    let mut p = Product::blank("PVC Pipe 1in");
    p.product = Some("Pipe".to_string());
    p.material = Some("PVC".to_string());
    p.size = Some("1in".to_string());
    p.category = Some("Plumbing".to_string());
    p.unit = Some("pcs".to_string());
    p.quantity = 25;
    p.unit_rate = 95.0;
    p.sell_rate = 140.0;
    out.push(p);

    out
}

/// Built-in account so the app is usable before any user is created.
pub fn default_admin() -> User {
    User::new("admin", "admin123", Role::Admin)
}
