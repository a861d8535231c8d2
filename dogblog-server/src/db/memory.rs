//! In-process `BlogStore`
//!
//! Mirrors the Postgres semantics (id assignment, newest-first ordering,
//! owner-scoped mutations, unique usernames) without a database. Backs
//! `dogblog serve --memory` and the router tests. Contents are lost on drop.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{BlogStore, StoreError, StoreResult};
use crate::models::{Account, NewAccount, Post};

#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Tables>,
}

#[derive(Default)]
struct Tables {
    users: BTreeMap<i32, Account>,
    blogs: BTreeMap<i32, Post>,
    last_user_id: i32,
    last_blog_id: i32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BlogStore for MemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn list_posts(&self) -> StoreResult<Vec<Post>> {
        let tables = self.inner.read().await;
        let mut posts: Vec<Post> = tables.blogs.values().cloned().collect();
        // Ties on the timestamp fall back to insertion order, newest first
        posts.sort_by(|a, b| {
            b.date_created
                .cmp(&a.date_created)
                .then(b.blog_id.cmp(&a.blog_id))
        });
        Ok(posts)
    }

    async fn get_post(&self, blog_id: i32) -> StoreResult<Option<Post>> {
        Ok(self.inner.read().await.blogs.get(&blog_id).cloned())
    }

    async fn create_post(&self, title: &str, body: &str, creator_user_id: i32) -> StoreResult<Post> {
        let mut tables = self.inner.write().await;
        if !tables.users.contains_key(&creator_user_id) {
            return Err(StoreError::UnknownAccount(creator_user_id));
        }
        tables.last_blog_id += 1;
        let post = Post {
            blog_id: tables.last_blog_id,
            title: title.to_owned(),
            body: body.to_owned(),
            creator_user_id,
            date_created: Utc::now(),
        };
        tables.blogs.insert(post.blog_id, post.clone());
        Ok(post)
    }

    async fn update_post(
        &self,
        blog_id: i32,
        title: &str,
        body: &str,
        requester_id: i32,
    ) -> StoreResult<u64> {
        let mut tables = self.inner.write().await;
        match tables.blogs.get_mut(&blog_id) {
            Some(post) if post.is_owned_by(requester_id) => {
                post.title = title.to_owned();
                post.body = body.to_owned();
                post.date_created = Utc::now();
                Ok(1)
            }
            _ => Ok(0),
        }
    }

    async fn delete_post(&self, blog_id: i32, requester_id: i32) -> StoreResult<u64> {
        let mut tables = self.inner.write().await;
        let owned = tables
            .blogs
            .get(&blog_id)
            .is_some_and(|post| post.is_owned_by(requester_id));
        if owned {
            tables.blogs.remove(&blog_id);
            Ok(1)
        } else {
            Ok(0)
        }
    }

    async fn find_account_by_username(&self, username: &str) -> StoreResult<Option<Account>> {
        let tables = self.inner.read().await;
        Ok(tables
            .users
            .values()
            .find(|a| a.username == username)
            .cloned())
    }

    async fn find_account_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> StoreResult<Option<Account>> {
        let tables = self.inner.read().await;
        Ok(tables
            .users
            .values()
            .find(|a| a.username == username && a.password == password)
            .cloned())
    }

    async fn insert_account(&self, account: NewAccount) -> StoreResult<Account> {
        let mut tables = self.inner.write().await;
        if tables.users.values().any(|a| a.username == account.username) {
            return Err(StoreError::DuplicateUsername(account.username));
        }
        tables.last_user_id += 1;
        let stored = Account {
            user_id: tables.last_user_id,
            username: account.username,
            password: account.password,
            name: Some(account.name),
        };
        tables.users.insert(stored.user_id, stored.clone());
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_account(username: &str) -> NewAccount {
        NewAccount {
            username: username.into(),
            password: "pw".into(),
            name: username.to_uppercase(),
        }
    }

    async fn store_with_accounts(names: &[&str]) -> MemoryStore {
        let store = MemoryStore::new();
        for name in names {
            store.insert_account(new_account(name)).await.unwrap();
        }
        store
    }

    #[tokio::test]
    async fn ids_are_assigned_in_order() {
        let store = MemoryStore::new();
        let a = store.insert_account(new_account("a")).await.unwrap();
        let b = store.insert_account(new_account("b")).await.unwrap();
        assert_eq!((a.user_id, b.user_id), (1, 2));

        let p1 = store.create_post("t1", "b1", a.user_id).await.unwrap();
        let p2 = store.create_post("t2", "b2", b.user_id).await.unwrap();
        assert_eq!((p1.blog_id, p2.blog_id), (1, 2));
    }

    #[tokio::test]
    async fn duplicate_username_rejected() {
        let store = MemoryStore::new();
        store.insert_account(new_account("alice")).await.unwrap();

        let err = store.insert_account(new_account("alice")).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateUsername(_)));
        let tables = store.inner.read().await;
        assert_eq!(tables.users.values().filter(|a| a.username == "alice").count(), 1);
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let store = store_with_accounts(&["alice"]).await;
        let first = store.create_post("first", "", 1).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        let second = store.create_post("second", "", 1).await.unwrap();

        let posts = store.list_posts().await.unwrap();
        assert_eq!(posts[0].blog_id, second.blog_id);
        assert_eq!(posts[1].blog_id, first.blog_id);
    }

    #[tokio::test]
    async fn update_restamps_and_moves_post_to_front() {
        let store = store_with_accounts(&["alice"]).await;
        let old = store.create_post("old", "", 1).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        store.create_post("new", "", 1).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;

        assert_eq!(store.update_post(old.blog_id, "edited", "x", 1).await.unwrap(), 1);

        let posts = store.list_posts().await.unwrap();
        assert_eq!(posts[0].title, "edited");
        assert!(posts[0].date_created > old.date_created);
    }

    #[tokio::test]
    async fn mutations_by_non_owner_are_noops() {
        let store = store_with_accounts(&["alice", "bob"]).await;
        let post = store.create_post("mine", "body", 1).await.unwrap();

        assert_eq!(store.update_post(post.blog_id, "theirs", "x", 2).await.unwrap(), 0);
        assert_eq!(store.delete_post(post.blog_id, 2).await.unwrap(), 0);
        assert_eq!(store.get_post(post.blog_id).await.unwrap(), Some(post));
    }

    #[tokio::test]
    async fn post_requires_existing_creator() {
        let store = MemoryStore::new();
        let err = store.create_post("orphan", "", 7).await.unwrap_err();
        assert!(matches!(err, StoreError::UnknownAccount(7)));
        assert!(store.list_posts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_post_mutations_are_noops() {
        let store = MemoryStore::new();
        assert_eq!(store.update_post(42, "t", "b", 1).await.unwrap(), 0);
        assert_eq!(store.delete_post(42, 1).await.unwrap(), 0);
    }
}
