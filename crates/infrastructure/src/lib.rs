//! Infrastructure layer for Mailsift
//!
//! Adapters that connect the application ports to the outside world:
//! SQLite persistence for emails and sync metadata, the completion-engine
//! bridge, and configuration loading.

pub mod adapters;
pub mod config;
pub mod persistence;

pub use adapters::CompletionAdapter;
pub use config::{AppConfig, DatabaseConfig};
pub use persistence::{ConnectionPool, DatabaseError, SqliteEmailStore, create_pool};
