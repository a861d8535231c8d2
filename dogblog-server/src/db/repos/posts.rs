//! Post repository - the `blogs` table
//!
//! Mutations are ownership-scoped: `blog_id` and `creator_user_id` must both
//! match, otherwise the statement touches no rows.

use chrono::Utc;
use sqlx::PgPool;

use crate::db::StoreError;
use crate::models::Post;

const POST_COLUMNS: &str = "blog_id, title, body, creator_user_id, date_created";

/// Post repository
pub struct PostRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> PostRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every post, newest first. Unbounded.
    pub async fn list(&self) -> Result<Vec<Post>, StoreError> {
        let posts = sqlx::query_as::<_, Post>(&format!(
            "SELECT {POST_COLUMNS} FROM blogs ORDER BY date_created DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(posts)
    }

    /// Get a single post by id.
    pub async fn get(&self, blog_id: i32) -> Result<Option<Post>, StoreError> {
        let post = sqlx::query_as::<_, Post>(&format!(
            "SELECT {POST_COLUMNS} FROM blogs WHERE blog_id = $1"
        ))
        .bind(blog_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(post)
    }

    /// Insert a post stamped with the current time.
    pub async fn create(
        &self,
        title: &str,
        body: &str,
        creator_user_id: i32,
    ) -> Result<Post, StoreError> {
        let post = sqlx::query_as::<_, Post>(&format!(
            r#"
            INSERT INTO blogs (title, body, creator_user_id, date_created)
            VALUES ($1, $2, $3, $4)
            RETURNING {POST_COLUMNS}
            "#
        ))
        .bind(title)
        .bind(body)
        .bind(creator_user_id)
        .bind(Utc::now())
        .fetch_one(self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => {
                StoreError::UnknownAccount(creator_user_id)
            }
            other => StoreError::Sqlx(other),
        })?;

        Ok(post)
    }

    /// Update title and body and restamp `date_created`, scoped to the owner.
    pub async fn update(
        &self,
        blog_id: i32,
        title: &str,
        body: &str,
        requester_id: i32,
    ) -> Result<u64, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE blogs
            SET title = $1, body = $2, date_created = $3
            WHERE blog_id = $4 AND creator_user_id = $5
            "#,
        )
        .bind(title)
        .bind(body)
        .bind(Utc::now())
        .bind(blog_id)
        .bind(requester_id)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Delete a post, scoped to the owner.
    pub async fn delete(&self, blog_id: i32, requester_id: i32) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM blogs WHERE blog_id = $1 AND creator_user_id = $2")
            .bind(blog_id)
            .bind(requester_id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
