//! Account endpoints: sign-up, sign-in, logout

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use serde::Deserialize;

use crate::db::StoreError;
use crate::http::error::AppError;
use crate::http::extractors::SIGNIN_PATH;
use crate::http::server::AppState;
use crate::http::views;
use crate::models::NewAccount;
use crate::session::SessionToken;

/// Shown when registration hits an existing username. A normal outcome, not an error.
pub const USERNAME_TAKEN: &str = "Username already taken. Please choose a different one.";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SignupForm {
    pub username: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SigninForm {
    pub username: String,
    pub password: String,
}

/// GET /signup
async fn signup_form() -> Html<String> {
    Html(views::signup_form())
}

/// POST /signup - register, unless the username is already in use
async fn signup(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SignupForm>,
) -> Result<Response, AppError> {
    let existing = state
        .store
        .find_account_by_username(&form.username)
        .await
        .map_err(AppError::storage("checking username"))?;

    if existing.is_some() {
        tracing::info!(username = %form.username, "signup rejected: username taken");
        return Ok((StatusCode::OK, USERNAME_TAKEN).into_response());
    }

    let account = NewAccount {
        username: form.username,
        password: form.password,
        name: form.name,
    };

    match state.store.insert_account(account).await {
        Ok(account) => {
            tracing::info!(user_id = account.user_id, username = %account.username, "account registered");
            Ok(Redirect::to(SIGNIN_PATH).into_response())
        }
        // Lost a race with a concurrent signup for the same name
        Err(StoreError::DuplicateUsername(username)) => {
            tracing::info!(username = %username, "signup rejected: username taken");
            Ok((StatusCode::OK, USERNAME_TAKEN).into_response())
        }
        Err(e) => Err(AppError::storage("registering account")(e)),
    }
}

/// GET /signin
async fn signin_form() -> Html<String> {
    Html(views::signin_form())
}

/// POST /signin - start a session for this client on an exact credential match.
///
/// Wrong password and unknown user look identical to the client.
async fn signin(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Form(form): Form<SigninForm>,
) -> Result<Response, AppError> {
    let account = state
        .store
        .find_account_by_credentials(&form.username, &form.password)
        .await
        .map_err(AppError::storage("signing in"))?;

    let Some(account) = account else {
        tracing::info!(username = %form.username, "sign-in failed");
        return Ok(Redirect::to(SIGNIN_PATH).into_response());
    };

    // Signing in again on the same client replaces its previous session
    if let Some(previous) = SessionToken::from_headers(&headers) {
        state.sessions.clear(previous).await;
    }

    tracing::info!(user_id = account.user_id, "signed in");
    let token = state.sessions.create(account).await;
    Ok(([(SET_COOKIE, token.cookie())], Redirect::to("/")).into_response())
}

/// GET /logout - end this client's session; other clients are unaffected
async fn logout(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    if let Some(token) = SessionToken::from_headers(&headers) {
        if state.sessions.clear(token).await {
            tracing::info!("signed out");
        }
    }

    ([(SET_COOKIE, SessionToken::expired_cookie())], Redirect::to("/")).into_response()
}

/// Account routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/signup", get(signup_form).post(signup))
        .route("/signin", get(signin_form).post(signin))
        .route("/logout", get(logout))
}
