//! Per-client sessions
//!
//! Each signed-in client holds an opaque token in the `dogblog_session`
//! cookie. The token maps to the signed-in account in a shared keyed store,
//! so one client signing in or out never affects another client.

use std::collections::HashMap;
use std::fmt;

use axum::http::header::COOKIE;
use axum::http::HeaderMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::Account;

/// Name of the cookie carrying the session token
pub const SESSION_COOKIE: &str = "dogblog_session";

/// Opaque session identifier handed to the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionToken(Uuid);

impl SessionToken {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw.trim()).ok().map(Self)
    }

    /// Read the token from the request's `Cookie` headers, if present and well formed.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .filter(|(name, _)| *name == SESSION_COOKIE)
            .find_map(|(_, value)| Self::parse(value))
    }

    /// `Set-Cookie` value that hands this token to the client.
    pub fn cookie(&self) -> String {
        format!("{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax", self.0)
    }

    /// `Set-Cookie` value that removes the session cookie from the client.
    pub fn expired_cookie() -> String {
        format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Concurrent map of live sessions. Lost on restart; no expiry.
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<SessionToken, Account>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new session for `account` and return its token.
    pub async fn create(&self, account: Account) -> SessionToken {
        let token = SessionToken::generate();
        tracing::debug!(user_id = account.user_id, "session created");
        self.sessions.write().await.insert(token, account);
        token
    }

    pub async fn get(&self, token: SessionToken) -> Option<Account> {
        self.sessions.read().await.get(&token).cloned()
    }

    /// End the session; returns whether it existed.
    pub async fn clear(&self, token: SessionToken) -> bool {
        let removed = self.sessions.write().await.remove(&token);
        if let Some(account) = &removed {
            tracing::debug!(user_id = account.user_id, "session cleared");
        }
        removed.is_some()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn account(user_id: i32, username: &str) -> Account {
        Account {
            user_id,
            username: username.into(),
            password: "pw".into(),
            name: None,
        }
    }

    #[tokio::test]
    async fn sessions_are_independent() {
        let store = SessionStore::new();
        let a = store.create(account(1, "alice")).await;
        let b = store.create(account(2, "bob")).await;

        assert_ne!(a, b);
        assert_eq!(store.get(a).await.map(|acc| acc.user_id), Some(1));
        assert_eq!(store.get(b).await.map(|acc| acc.user_id), Some(2));

        assert!(store.clear(b).await);
        assert!(store.get(b).await.is_none());
        assert_eq!(store.get(a).await.map(|acc| acc.user_id), Some(1));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn clearing_unknown_token_is_harmless() {
        let store = SessionStore::new();
        assert!(!store.clear(SessionToken::generate()).await);
        assert!(store.is_empty().await);
    }

    #[test]
    fn token_read_from_cookie_header() {
        let token = SessionToken::generate();
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_str(&format!("theme=dark; {SESSION_COOKIE}={token}; lang=en")).unwrap(),
        );

        assert_eq!(SessionToken::from_headers(&headers), Some(token));
    }

    #[test]
    fn malformed_or_missing_cookie_is_anonymous() {
        let mut headers = HeaderMap::new();
        assert_eq!(SessionToken::from_headers(&headers), None);

        headers.insert(COOKIE, HeaderValue::from_static("dogblog_session=not-a-uuid"));
        assert_eq!(SessionToken::from_headers(&headers), None);
    }

    #[test]
    fn later_valid_session_pair_wins_over_malformed_one() {
        let token = SessionToken::generate();
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_str(&format!("{SESSION_COOKIE}=garbage; {SESSION_COOKIE}={token}"))
                .unwrap(),
        );
        assert_eq!(SessionToken::from_headers(&headers), Some(token));
    }

    #[test]
    fn cookie_round_trips_through_header() {
        let token = SessionToken::generate();
        let set_cookie = token.cookie();
        let pair = set_cookie.split(';').next().unwrap();

        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(pair).unwrap());
        assert_eq!(SessionToken::from_headers(&headers), Some(token));
    }
}
