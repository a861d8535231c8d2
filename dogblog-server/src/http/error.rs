//! Route error type with IntoResponse
//!
//! Errors become plain-text responses. Storage failures are logged with the
//! operation that failed and answered with a generic 500.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::db::StoreError;

/// Route-level error with automatic HTTP status mapping
#[derive(Debug)]
pub enum AppError {
    /// Referenced resource is absent (404)
    NotFound { resource: &'static str, id: String },

    /// Database failure (500, logged)
    Storage {
        operation: &'static str,
        source: StoreError,
    },
}

impl AppError {
    /// Build a `map_err` adapter that tags a storage failure with what was being done.
    ///
    /// ```ignore
    /// let posts = store.list_posts().await.map_err(AppError::storage("fetching posts"))?;
    /// ```
    pub fn storage(operation: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| Self::Storage { operation, source }
    }

    pub fn post_not_found(id: impl ToString) -> Self {
        Self::NotFound {
            resource: "Post",
            id: id.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound { resource, id } => {
                tracing::debug!(resource, id = %id, "not found");
                (StatusCode::NOT_FOUND, format!("{resource} not found")).into_response()
            }
            Self::Storage { operation, source } => {
                // Log the actual error, return generic message
                tracing::error!(operation, error = %source, "storage error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn not_found_is_404_plain_text() {
        let response = AppError::post_not_found(7).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_text(response).await, "Post not found");
    }

    #[tokio::test]
    async fn storage_error_is_generic_500() {
        let err = AppError::storage("fetching posts")(StoreError::Sqlx(sqlx::Error::PoolTimedOut));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await, "Internal server error");
    }
}
