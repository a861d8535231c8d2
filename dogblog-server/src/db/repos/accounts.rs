//! Account repository - the `users` table

use sqlx::PgPool;

use crate::db::StoreError;
use crate::models::{Account, NewAccount};

/// Account repository
pub struct AccountRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> AccountRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Look up an account by exact username.
    pub async fn find_by_username(&self, username: &str) -> Result<Option<Account>, StoreError> {
        let account = sqlx::query_as::<_, Account>(
            "SELECT user_id, username, password, name FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(self.pool)
        .await?;

        Ok(account)
    }

    /// Look up an account by exact username AND password in one query.
    pub async fn find_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<Account>, StoreError> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT user_id, username, password, name
            FROM users
            WHERE username = $1 AND password = $2
            ORDER BY user_id
            LIMIT 1
            "#,
        )
        .bind(username)
        .bind(password)
        .fetch_optional(self.pool)
        .await?;

        Ok(account)
    }

    /// Insert a new account.
    ///
    /// A unique-constraint violation on `username` (a registration that lost
    /// the race against the pre-check) becomes `StoreError::DuplicateUsername`.
    pub async fn insert(&self, account: NewAccount) -> Result<Account, StoreError> {
        let inserted = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO users (username, password, name)
            VALUES ($1, $2, $3)
            RETURNING user_id, username, password, name
            "#,
        )
        .bind(&account.username)
        .bind(&account.password)
        .bind(&account.name)
        .fetch_one(self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                StoreError::DuplicateUsername(account.username.clone())
            }
            other => StoreError::Sqlx(other),
        })?;

        Ok(inserted)
    }
}
