//! Custom Axum extractors: the auth guard and path parsing

use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use axum::response::Redirect;

use super::error::AppError;
use super::server::AppState;
use crate::models::Account;
use crate::session::SessionToken;

/// Where anonymous clients are sent when they hit a guarded route
pub const SIGNIN_PATH: &str = "/signin";

/// Auth guard: the account signed in on this client.
///
/// Rejects with a redirect to the sign-in page, so the handler never runs
/// for anonymous clients.
pub struct CurrentAccount {
    pub account: Account,
    pub token: SessionToken,
}

impl FromRequestParts<Arc<AppState>> for CurrentAccount {
    type Rejection = Redirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = SessionToken::from_headers(&parts.headers) else {
            return Err(Redirect::to(SIGNIN_PATH));
        };

        match state.sessions.get(token).await {
            Some(account) => Ok(Self { account, token }),
            None => {
                tracing::debug!("stale session cookie, redirecting to sign-in");
                Err(Redirect::to(SIGNIN_PATH))
            }
        }
    }
}

/// The signed-in account if there is one; never rejects.
pub struct MaybeAccount(pub Option<Account>);

impl FromRequestParts<Arc<AppState>> for MaybeAccount {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let account = match SessionToken::from_headers(&parts.headers) {
            Some(token) => state.sessions.get(token).await,
            None => None,
        };
        Ok(Self(account))
    }
}

/// Extract a post id from the path. Anything that is not an integer id
/// cannot name a post, so it is answered as not found.
pub struct PostId(pub i32);

impl<S> FromRequestParts<S> for PostId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::post_not_found(""))?;

        raw.parse::<i32>()
            .map(Self)
            .map_err(|_| AppError::post_not_found(raw))
    }
}
