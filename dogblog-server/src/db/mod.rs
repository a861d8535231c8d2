//! Database layer - the store seam, its Postgres and in-memory backends
//!
//! # Design Principles
//!
//! - Connection pool, never a single shared connection
//! - Positional `$n` binding for every caller-supplied value
//! - Ownership lives in the WHERE clause: a mismatched owner affects zero rows
//! - The `users.username` UNIQUE constraint backs up the registration pre-check

pub mod memory;
pub mod postgres;
pub mod repos;

use async_trait::async_trait;

use crate::models::{Account, NewAccount, Post};

pub use memory::MemoryStore;
pub use postgres::{PgStore, DEFAULT_MAX_CONNECTIONS};
pub use repos::{AccountRepo, PostRepo};

/// Storage failure
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("username '{0}' already exists")]
    DuplicateUsername(String),

    #[error("account {0} does not exist")]
    UnknownAccount(i32),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence gateway used by every route handler.
///
/// `update_post` and `delete_post` are ownership-scoped and report the number
/// of rows they touched; zero means the post is missing or belongs to someone
/// else, and is not an error.
#[async_trait]
pub trait BlogStore: Send + Sync + 'static {
    /// Cheap round trip used by the health endpoint.
    async fn ping(&self) -> StoreResult<()>;

    /// All posts, newest `date_created` first.
    async fn list_posts(&self) -> StoreResult<Vec<Post>>;

    async fn get_post(&self, blog_id: i32) -> StoreResult<Option<Post>>;

    /// Insert a post stamped with the current time.
    async fn create_post(&self, title: &str, body: &str, creator_user_id: i32) -> StoreResult<Post>;

    /// Replace title and body and restamp `date_created`, if `requester_id` owns the post.
    async fn update_post(
        &self,
        blog_id: i32,
        title: &str,
        body: &str,
        requester_id: i32,
    ) -> StoreResult<u64>;

    /// Delete the post if `requester_id` owns it.
    async fn delete_post(&self, blog_id: i32, requester_id: i32) -> StoreResult<u64>;

    async fn find_account_by_username(&self, username: &str) -> StoreResult<Option<Account>>;

    /// Exact match on both username and password.
    async fn find_account_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> StoreResult<Option<Account>>;

    /// Insert a new account. Fails with `DuplicateUsername` if the name is taken.
    async fn insert_account(&self, account: NewAccount) -> StoreResult<Account>;
}
