//! Account records

use sqlx::FromRow;

/// A registered account, as stored in the `users` table.
///
/// `password` is kept verbatim. Accounts are never updated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Account {
    pub user_id: i32,
    pub username: String,
    pub password: String,
    pub name: Option<String>,
}

impl Account {
    /// Name shown on pages; falls back to the username when no name was given.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.username,
        }
    }
}

/// Fields supplied at registration
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub password: String,
    pub name: String,
}
