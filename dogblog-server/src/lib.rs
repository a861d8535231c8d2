//! dogblog-server: a small server-rendered blog
//!
//! Accounts sign up and sign in; each signed-in client gets its own session
//! cookie. Posts are listed publicly and can be created, edited, and deleted
//! only by the account that owns them.

pub mod db;
pub mod http;
pub mod models;
pub mod session;

pub use db::{BlogStore, MemoryStore, PgStore, StoreError};
pub use http::{build_router, run_server, AppState, ServerConfig, ServerError};
pub use session::{SessionStore, SessionToken};
