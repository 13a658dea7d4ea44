// ==========================================
// stockbook - operator accounts
// ==========================================
// Passwords are stored and compared as plain text. That is the
// documented behavior of this system, not an oversight to patch
// here; there is no real security model.
// ==========================================

use crate::domain::types::Role;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,
    pub password: String, // plain text
    pub role: Role,
}

impl User {
    pub fn new(username: impl Into<String>, password: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            role,
        }
    }

    /// Plain-text comparison.
    pub fn check_password(&self, candidate: &str) -> bool {
        self.password == candidate
    }
}
