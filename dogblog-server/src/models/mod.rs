//! Domain models shared by the store, session, and HTTP layers

pub mod account;
pub mod post;

pub use account::{Account, NewAccount};
pub use post::Post;
