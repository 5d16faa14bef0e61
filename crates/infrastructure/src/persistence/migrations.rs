//! Database migrations
//!
//! Manages database schema versioning. Migrations are embedded and run on
//! startup when `run_migrations` is enabled.
//!
//! ## Adding New Migrations
//!
//! 1. Increment the `SCHEMA_VERSION` constant
//! 2. Add a new `migrate_vX` function
//! 3. Update `run_migrations` to call the new function

use rusqlite::Connection;
use tracing::{debug, error, info};

use super::connection::DatabaseError;

/// Current schema version
const SCHEMA_VERSION: i32 = 2;

/// Run all pending migrations
pub fn run_migrations(conn: &Connection) -> Result<(), DatabaseError> {
    let current_version = get_schema_version(conn)?;

    if current_version < SCHEMA_VERSION {
        info!(
            from_version = current_version,
            to_version = SCHEMA_VERSION,
            "Running database migrations"
        );

        if current_version < 1 {
            if let Err(e) = migrate_v1(conn) {
                error!(version = 1, error = %e, "Migration V001 (emails table) failed");
                return Err(e);
            }
        }

        if current_version < 2 {
            if let Err(e) = migrate_v2(conn) {
                error!(version = 2, error = %e, "Migration V002 (sync metadata) failed");
                return Err(e);
            }
        }

        set_schema_version(conn, SCHEMA_VERSION)?;
        info!(version = SCHEMA_VERSION, "Database migrations complete");
    } else {
        debug!(version = current_version, "Database schema is up to date");
    }

    Ok(())
}

/// Get current schema version
fn get_schema_version(conn: &Connection) -> Result<i32, DatabaseError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY
        )",
        [],
    )?;

    let version: i32 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get(0),
        )
        .unwrap_or(0);

    Ok(version)
}

/// Set the schema version
fn set_schema_version(conn: &Connection, version: i32) -> Result<(), DatabaseError> {
    conn.execute("DELETE FROM schema_version", [])?;
    conn.execute("INSERT INTO schema_version (version) VALUES (?1)", [version])?;
    Ok(())
}

/// V1: per-user email table with analysis fields
fn migrate_v1(conn: &Connection) -> Result<(), DatabaseError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS emails (
            id TEXT NOT NULL,
            user_email TEXT NOT NULL,
            thread_id TEXT,
            history_id TEXT,
            from_address TEXT NOT NULL,
            subject TEXT NOT NULL DEFAULT '',
            snippet TEXT NOT NULL DEFAULT '',
            full_body TEXT,
            internal_date INTEGER,
            sentiment TEXT NOT NULL DEFAULT 'INFORMATIONAL',
            priority_level INTEGER NOT NULL DEFAULT 5,
            confidence INTEGER NOT NULL DEFAULT 0,
            analysis_details TEXT,
            requires_immediate_attention INTEGER NOT NULL DEFAULT 0,
            auto_reply_suggested INTEGER NOT NULL DEFAULT 0,
            suggested_reply_body TEXT,
            reply_status TEXT NOT NULL DEFAULT 'Not Replied',
            is_read INTEGER NOT NULL DEFAULT 0,
            is_replied INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            PRIMARY KEY (id, user_email)
        );

        CREATE INDEX IF NOT EXISTS idx_emails_user_date
            ON emails (user_email, internal_date DESC);
        CREATE INDEX IF NOT EXISTS idx_emails_user_sentiment
            ON emails (user_email, sentiment);
        ",
    )?;
    debug!("Migration V001 applied");
    Ok(())
}

/// V2: per-user sync metadata
fn migrate_v2(conn: &Connection) -> Result<(), DatabaseError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS user_sync_metadata (
            user_email TEXT PRIMARY KEY,
            total_emails_count INTEGER NOT NULL DEFAULT 0,
            last_sync_timestamp INTEGER,
            sync_status TEXT NOT NULL DEFAULT 'never_synced',
            initial_batch_synced INTEGER NOT NULL DEFAULT 0,
            next_page_token TEXT
        );
        ",
    )?;
    debug!("Migration V002 applied");
    Ok(())
}
