//! Post endpoints
//!
//! Reads are public (home) or guarded but unscoped (edit form). Writes are
//! guarded and owner-scoped; a write against someone else's post changes
//! nothing and still redirects home.

use std::sync::Arc;

use axum::{
    extract::State,
    response::{Html, Redirect},
    routing::{get, post},
    Form, Router,
};
use serde::Deserialize;

use crate::http::error::AppError;
use crate::http::extractors::{CurrentAccount, MaybeAccount, PostId};
use crate::http::server::AppState;
use crate::http::views;

/// Create/edit form body
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PostForm {
    pub title: String,
    pub body: String,
}

/// GET / - every post, newest first
async fn home(
    State(state): State<Arc<AppState>>,
    MaybeAccount(current): MaybeAccount,
) -> Result<Html<String>, AppError> {
    let posts = state
        .store
        .list_posts()
        .await
        .map_err(AppError::storage("fetching posts"))?;

    Ok(Html(views::home(&posts, current.as_ref())))
}

/// GET /create - new post form
async fn create_form(current: CurrentAccount) -> Html<String> {
    Html(views::create_form(&current.account))
}

/// POST /create - publish a post owned by the signed-in account
async fn create_post(
    State(state): State<Arc<AppState>>,
    current: CurrentAccount,
    Form(form): Form<PostForm>,
) -> Result<Redirect, AppError> {
    let post = state
        .store
        .create_post(&form.title, &form.body, current.account.user_id)
        .await
        .map_err(AppError::storage("creating post"))?;

    tracing::info!(blog_id = post.blog_id, user_id = post.creator_user_id, "post created");
    Ok(Redirect::to("/"))
}

/// POST /delete-post/{id}
async fn delete_post(
    State(state): State<Arc<AppState>>,
    current: CurrentAccount,
    PostId(id): PostId,
) -> Result<Redirect, AppError> {
    let user_id = current.account.user_id;
    let affected = state
        .store
        .delete_post(id, user_id)
        .await
        .map_err(AppError::storage("deleting post"))?;

    if affected == 0 {
        tracing::info!(blog_id = id, user_id, "delete matched no owned post; nothing changed");
    } else {
        tracing::info!(blog_id = id, user_id, "post deleted");
    }
    Ok(Redirect::to("/"))
}

/// GET /edit/{id} - edit form. The read is not ownership-checked.
async fn edit_form(
    State(state): State<Arc<AppState>>,
    current: CurrentAccount,
    PostId(id): PostId,
) -> Result<Html<String>, AppError> {
    let post = state
        .store
        .get_post(id)
        .await
        .map_err(AppError::storage("fetching post for editing"))?
        .ok_or_else(|| AppError::post_not_found(id))?;

    Ok(Html(views::edit_form(&post, &current.account)))
}

/// POST /edit/{id}
async fn update_post(
    State(state): State<Arc<AppState>>,
    current: CurrentAccount,
    PostId(id): PostId,
    Form(form): Form<PostForm>,
) -> Result<Redirect, AppError> {
    let user_id = current.account.user_id;
    let affected = state
        .store
        .update_post(id, &form.title, &form.body, user_id)
        .await
        .map_err(AppError::storage("updating post"))?;

    if affected == 0 {
        tracing::info!(blog_id = id, user_id, "update matched no owned post; nothing changed");
    } else {
        tracing::info!(blog_id = id, user_id, "post updated");
    }
    Ok(Redirect::to("/"))
}

/// Post routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(home))
        .route("/create", get(create_form).post(create_post))
        .route("/delete-post/{id}", post(delete_post))
        .route("/edit/{id}", get(edit_form).post(update_post))
}
