//! Blog post records

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A post from the `blogs` table
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Post {
    pub blog_id: i32,
    pub title: String,
    pub body: String,
    pub creator_user_id: i32,
    pub date_created: DateTime<Utc>,
}

impl Post {
    pub fn is_owned_by(&self, user_id: i32) -> bool {
        self.creator_user_id == user_id
    }
}
