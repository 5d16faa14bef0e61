//! SQLite email store
//!
//! Implements the `EmailStorePort` over the pooled SQLite connection.
//! Records are keyed by (message id, owning user); upserts are idempotent.

use std::sync::Arc;

use application::{EmailQuery, EmailStoreError, EmailStorePort, StatusUpdate};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::{
    EmailAddress, EmailRecord, PriorityLevel, SentimentCategory, SyncPhase, SyncState,
};
use rusqlite::{Row, params, params_from_iter};
use tokio::task;
use tracing::{debug, instrument};

use super::connection::ConnectionPool;

/// SQLite-based email store
#[derive(Debug, Clone)]
pub struct SqliteEmailStore {
    pool: Arc<ConnectionPool>,
}

impl SqliteEmailStore {
    /// Create a new SQLite email store
    #[must_use]
    pub const fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

const RECORD_COLUMNS: &str = "id, user_email, thread_id, history_id, from_address, subject, \
     snippet, full_body, internal_date, sentiment, priority_level, confidence, \
     analysis_details, requires_immediate_attention, auto_reply_suggested, \
     suggested_reply_body, reply_status, is_read, is_replied, created_at, updated_at";

#[async_trait]
impl EmailStorePort for SqliteEmailStore {
    #[instrument(skip(self, record), fields(email_id = %record.id, user = %record.user_email))]
    async fn upsert_email(&self, record: &EmailRecord) -> Result<(), EmailStoreError> {
        let pool = Arc::clone(&self.pool);
        let record = record.clone();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(unavailable)?;

            let details_json = record
                .analysis_details
                .as_ref()
                .map(serde_json::to_string)
                .transpose()
                .map_err(internal)?;

            conn.execute(
                &format!(
                    "INSERT INTO emails ({RECORD_COLUMNS})
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, \
                             ?16, ?17, ?18, ?19, ?20, ?21)
                     ON CONFLICT (id, user_email) DO UPDATE SET
                        thread_id = excluded.thread_id,
                        history_id = excluded.history_id,
                        from_address = excluded.from_address,
                        subject = excluded.subject,
                        snippet = excluded.snippet,
                        full_body = excluded.full_body,
                        internal_date = excluded.internal_date,
                        sentiment = excluded.sentiment,
                        priority_level = excluded.priority_level,
                        confidence = excluded.confidence,
                        analysis_details = excluded.analysis_details,
                        requires_immediate_attention = excluded.requires_immediate_attention,
                        auto_reply_suggested = excluded.auto_reply_suggested,
                        suggested_reply_body = excluded.suggested_reply_body,
                        reply_status = excluded.reply_status,
                        is_read = excluded.is_read,
                        is_replied = excluded.is_replied,
                        updated_at = excluded.updated_at"
                ),
                params![
                    record.id,
                    record.user_email.as_str(),
                    record.thread_id,
                    record.history_id,
                    record.from_address,
                    record.subject,
                    record.snippet,
                    record.full_body,
                    record.internal_date_ms,
                    record.sentiment.wire_name(),
                    i64::from(record.priority.value()),
                    i64::from(record.confidence),
                    details_json,
                    record.requires_immediate_attention,
                    record.auto_reply_suggested,
                    record.suggested_reply_body,
                    record.reply_status.as_str(),
                    record.is_read,
                    record.is_replied,
                    record.created_at.to_rfc3339(),
                    record.updated_at.to_rfc3339(),
                ],
            )
            .map_err(internal)?;

            debug!("Upserted email record");
            Ok(())
        })
        .await
        .map_err(internal)?
    }

    #[instrument(skip(self), fields(email_id = %id, user = %user))]
    async fn get_email(
        &self,
        id: &str,
        user: &EmailAddress,
    ) -> Result<Option<EmailRecord>, EmailStoreError> {
        let pool = Arc::clone(&self.pool);
        let id = id.to_string();
        let user = user.as_str().to_string();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(unavailable)?;

            conn.query_row(
                &format!("SELECT {RECORD_COLUMNS} FROM emails WHERE id = ?1 AND user_email = ?2"),
                params![id, user],
                row_to_record,
            )
            .optional()
            .map_err(internal)
        })
        .await
        .map_err(internal)?
    }

    #[instrument(skip(self, query), fields(user = %user))]
    async fn list_emails(
        &self,
        user: &EmailAddress,
        query: &EmailQuery,
    ) -> Result<Vec<EmailRecord>, EmailStoreError> {
        let pool = Arc::clone(&self.pool);
        let user = user.as_str().to_string();
        let query = query.clone();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(unavailable)?;

            let mut sql = format!("SELECT {RECORD_COLUMNS} FROM emails WHERE user_email = ?");
            let mut args: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(user)];

            if let Some(sentiment) = query.sentiment {
                sql.push_str(" AND sentiment = ?");
                args.push(Box::new(sentiment.wire_name().to_string()));
            }
            if let Some(status) = query.reply_status {
                sql.push_str(" AND reply_status = ?");
                args.push(Box::new(status.as_str().to_string()));
            }
            if let Some(is_read) = query.is_read {
                sql.push_str(" AND is_read = ?");
                args.push(Box::new(is_read));
            }
            if let Some(is_replied) = query.is_replied {
                sql.push_str(" AND is_replied = ?");
                args.push(Box::new(is_replied));
            }

            sql.push_str(" ORDER BY internal_date DESC LIMIT ? OFFSET ?");
            args.push(Box::new(i64::from(query.limit)));
            args.push(Box::new(i64::from(query.offset)));

            let mut stmt = conn.prepare(&sql).map_err(internal)?;
            let records: Vec<EmailRecord> = stmt
                .query_map(params_from_iter(args), row_to_record)
                .map_err(internal)?
                .filter_map(Result::ok)
                .collect();

            debug!(count = records.len(), "Listed emails");
            Ok(records)
        })
        .await
        .map_err(internal)?
    }

    #[instrument(skip(self), fields(user = %user))]
    async fn count_for_user(&self, user: &EmailAddress) -> Result<u64, EmailStoreError> {
        let pool = Arc::clone(&self.pool);
        let user = user.as_str().to_string();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(unavailable)?;

            let count: i64 = conn
                .query_row(
                    "SELECT COUNT(*) FROM emails WHERE user_email = ?1",
                    params![user],
                    |row| row.get(0),
                )
                .map_err(internal)?;

            Ok(count.max(0).unsigned_abs())
        })
        .await
        .map_err(internal)?
    }

    #[instrument(skip(self, update), fields(email_id = %id, user = %user))]
    async fn update_status(
        &self,
        id: &str,
        user: &EmailAddress,
        update: &StatusUpdate,
    ) -> Result<bool, EmailStoreError> {
        if update.is_empty() {
            return Ok(false);
        }

        let pool = Arc::clone(&self.pool);
        let id = id.to_string();
        let user = user.as_str().to_string();
        let update = *update;

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(unavailable)?;

            let mut sets: Vec<&str> = Vec::new();
            let mut args: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

            if let Some(is_read) = update.is_read {
                sets.push("is_read = ?");
                args.push(Box::new(is_read));
            }
            if let Some(is_replied) = update.is_replied {
                sets.push("is_replied = ?");
                args.push(Box::new(is_replied));
            }
            if let Some(status) = update.reply_status {
                sets.push("reply_status = ?");
                args.push(Box::new(status.as_str().to_string()));
            }

            let sql = format!(
                "UPDATE emails SET {}, updated_at = ? WHERE id = ? AND user_email = ?",
                sets.join(", ")
            );
            args.push(Box::new(Utc::now().to_rfc3339()));
            args.push(Box::new(id));
            args.push(Box::new(user));

            let affected = conn
                .execute(&sql, params_from_iter(args))
                .map_err(internal)?;

            debug!(updated = affected > 0, "Applied status update");
            Ok(affected > 0)
        })
        .await
        .map_err(internal)?
    }

    #[instrument(skip(self), fields(user = %user))]
    async fn get_sync_state(
        &self,
        user: &EmailAddress,
    ) -> Result<Option<SyncState>, EmailStoreError> {
        let pool = Arc::clone(&self.pool);
        let user = user.as_str().to_string();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(unavailable)?;

            conn.query_row(
                "SELECT user_email, total_emails_count, last_sync_timestamp, sync_status, \
                        initial_batch_synced, next_page_token
                 FROM user_sync_metadata WHERE user_email = ?1",
                params![user],
                row_to_sync_state,
            )
            .optional()
            .map_err(internal)
        })
        .await
        .map_err(internal)?
    }

    #[instrument(skip(self, state), fields(user = %state.user_email, phase = %state.phase))]
    async fn put_sync_state(&self, state: &SyncState) -> Result<(), EmailStoreError> {
        let pool = Arc::clone(&self.pool);
        let state = state.clone();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(unavailable)?;

            conn.execute(
                "INSERT INTO user_sync_metadata (user_email, total_emails_count, \
                        last_sync_timestamp, sync_status, initial_batch_synced, next_page_token)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                 ON CONFLICT (user_email) DO UPDATE SET
                    total_emails_count = excluded.total_emails_count,
                    last_sync_timestamp = excluded.last_sync_timestamp,
                    sync_status = excluded.sync_status,
                    initial_batch_synced = excluded.initial_batch_synced,
                    next_page_token = excluded.next_page_token",
                params![
                    state.user_email.as_str(),
                    i64::try_from(state.total_remote_messages).unwrap_or(i64::MAX),
                    state.last_sync_timestamp,
                    state.phase.as_str(),
                    state.initial_batch_synced,
                    state.next_page_token,
                ],
            )
            .map_err(internal)?;

            debug!("Stored sync state");
            Ok(())
        })
        .await
        .map_err(internal)?
    }
}

/// Convert a database row to an `EmailRecord`
fn row_to_record(row: &Row<'_>) -> rusqlite::Result<EmailRecord> {
    let user_email_str: String = row.get(1)?;
    let user_email = EmailAddress::new(user_email_str).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
    })?;

    let sentiment_str: String = row.get(9)?;
    let priority_value: i64 = row.get(10)?;
    let confidence: i64 = row.get(11)?;
    let details_json: Option<String> = row.get(12)?;
    let reply_status_str: String = row.get(16)?;
    let created_at_str: String = row.get(19)?;
    let updated_at_str: String = row.get(20)?;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Ok(EmailRecord {
        id: row.get(0)?,
        user_email,
        thread_id: row.get(2)?,
        history_id: row.get(3)?,
        from_address: row.get(4)?,
        subject: row.get(5)?,
        snippet: row.get(6)?,
        full_body: row.get(7)?,
        internal_date_ms: row.get(8)?,
        // Tolerate unknown stored values rather than failing the whole row
        sentiment: SentimentCategory::lookup(&sentiment_str).unwrap_or_default(),
        priority: PriorityLevel::from_value_clamped(priority_value),
        confidence: confidence.clamp(0, 100) as u8,
        analysis_details: details_json.and_then(|json| serde_json::from_str(&json).ok()),
        requires_immediate_attention: row.get(13)?,
        auto_reply_suggested: row.get(14)?,
        suggested_reply_body: row.get(15)?,
        reply_status: reply_status_str.parse().unwrap_or_default(),
        is_read: row.get(17)?,
        is_replied: row.get(18)?,
        created_at: parse_timestamp(&created_at_str),
        updated_at: parse_timestamp(&updated_at_str),
    })
}

/// Convert a database row to a `SyncState`
fn row_to_sync_state(row: &Row<'_>) -> rusqlite::Result<SyncState> {
    let user_email_str: String = row.get(0)?;
    let user_email = EmailAddress::new(user_email_str).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;

    let total: i64 = row.get(1)?;
    let phase_str: String = row.get(3)?;

    Ok(SyncState {
        user_email,
        total_remote_messages: total.max(0).unsigned_abs(),
        last_sync_timestamp: row.get(2)?,
        phase: phase_str.parse().unwrap_or(SyncPhase::NeverSynced),
        initial_batch_synced: row.get(4)?,
        next_page_token: row.get(5)?,
    })
}

fn parse_timestamp(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw).map_or_else(|_| Utc::now(), |dt| dt.with_timezone(&Utc))
}

fn unavailable(err: r2d2::Error) -> EmailStoreError {
    EmailStoreError::Unavailable(err.to_string())
}

fn internal(err: impl std::fmt::Display) -> EmailStoreError {
    EmailStoreError::OperationFailed(err.to_string())
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>, rusqlite::Error>;
}

impl<T> OptionalExt<T> for Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>, rusqlite::Error> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
