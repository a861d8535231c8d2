//! Repository implementations for database access
//!
//! Each repository borrows the pool and owns the SQL for one table.
//! Caller input only ever reaches the database through `.bind()`.

pub mod accounts;
pub mod posts;

pub use accounts::AccountRepo;
pub use posts::PostRepo;
