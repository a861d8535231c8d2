//! HTTP server layer
//!
//! Axum server with:
//! - Cookie-backed per-client sessions and a redirecting auth guard
//! - Server-rendered HTML pages, plain-text errors
//! - Request tracing
//! - Optional static file directory
//! - Graceful shutdown

pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;
pub mod views;

pub use error::AppError;
pub use server::{build_router, run_server, AppState, ServerConfig, ServerError};
