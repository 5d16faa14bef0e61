//! SQLite persistence for emails and sync metadata

mod connection;
mod email_store;
mod migrations;

pub use connection::{ConnectionPool, DatabaseError, create_pool};
pub use email_store::SqliteEmailStore;
pub use migrations::run_migrations;
