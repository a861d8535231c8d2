//! Postgres-backed `BlogStore`

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use super::repos::{AccountRepo, PostRepo};
use super::{BlogStore, StoreResult};
use crate::models::{Account, NewAccount, Post};

/// `BlogStore` over a shared connection pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

/// Pool size used when the config does not name one
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool of at most `max_connections` against the blog database.
    ///
    /// Requests share the pool; when every connection is busy they wait for
    /// one instead of failing.
    pub async fn connect(database_url: &str, max_connections: u32) -> StoreResult<Self> {
        tracing::debug!(max_connections, "connecting to blog database");
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl BlogStore for PgStore {
    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list_posts(&self) -> StoreResult<Vec<Post>> {
        PostRepo::new(&self.pool).list().await
    }

    async fn get_post(&self, blog_id: i32) -> StoreResult<Option<Post>> {
        PostRepo::new(&self.pool).get(blog_id).await
    }

    async fn create_post(&self, title: &str, body: &str, creator_user_id: i32) -> StoreResult<Post> {
        PostRepo::new(&self.pool)
            .create(title, body, creator_user_id)
            .await
    }

    async fn update_post(
        &self,
        blog_id: i32,
        title: &str,
        body: &str,
        requester_id: i32,
    ) -> StoreResult<u64> {
        PostRepo::new(&self.pool)
            .update(blog_id, title, body, requester_id)
            .await
    }

    async fn delete_post(&self, blog_id: i32, requester_id: i32) -> StoreResult<u64> {
        PostRepo::new(&self.pool).delete(blog_id, requester_id).await
    }

    async fn find_account_by_username(&self, username: &str) -> StoreResult<Option<Account>> {
        AccountRepo::new(&self.pool).find_by_username(username).await
    }

    async fn find_account_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> StoreResult<Option<Account>> {
        AccountRepo::new(&self.pool)
            .find_by_credentials(username, password)
            .await
    }

    async fn insert_account(&self, account: NewAccount) -> StoreResult<Account> {
        AccountRepo::new(&self.pool).insert(account).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Run with DATABASE_URL set and sql/schema.sql applied:
    // cargo test -p dogblog-server -- --ignored

    #[tokio::test]
    #[ignore = "requires database"]
    async fn connect_then_ping() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let store = PgStore::connect(&url, 1).await.expect("connect");
        store.ping().await.expect("ping");
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn listings_queue_on_a_small_pool() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let store = std::sync::Arc::new(PgStore::connect(&url, 2).await.expect("connect"));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.list_posts().await.map(|posts| posts.len()) })
            })
            .collect();

        for handle in handles {
            handle.await.expect("task panicked").expect("list posts");
        }
    }
}
