//! Email store port
//!
//! Defines the interface to the persistent email table and the per-user
//! sync metadata. Implemented by adapters in the infrastructure layer.
//! Upserts are idempotent and keyed by (message id, owning user).

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

use domain::{EmailAddress, EmailRecord, ReplyStatus, SentimentCategory, SyncState};

/// Email store errors
#[derive(Debug, Error)]
pub enum EmailStoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Email not found: {0}")]
    NotFound(String),

    #[error("Store operation failed: {0}")]
    OperationFailed(String),
}

/// Filter and pagination options for listing emails
#[derive(Debug, Clone, PartialEq)]
pub struct EmailQuery {
    /// Restrict to one sentiment category
    pub sentiment: Option<SentimentCategory>,
    /// Restrict to one reply status
    pub reply_status: Option<ReplyStatus>,
    /// Restrict by read flag
    pub is_read: Option<bool>,
    /// Restrict by replied flag
    pub is_replied: Option<bool>,
    /// Maximum number of records to return
    pub limit: u32,
    /// Offset for pagination
    pub offset: u32,
}

impl Default for EmailQuery {
    fn default() -> Self {
        Self {
            sentiment: None,
            reply_status: None,
            is_read: None,
            is_replied: None,
            limit: 50,
            offset: 0,
        }
    }
}

impl EmailQuery {
    /// Restrict to one sentiment category
    #[must_use]
    pub const fn with_sentiment(mut self, sentiment: SentimentCategory) -> Self {
        self.sentiment = Some(sentiment);
        self
    }

    /// Restrict to one reply status
    #[must_use]
    pub const fn with_reply_status(mut self, status: ReplyStatus) -> Self {
        self.reply_status = Some(status);
        self
    }

    /// Restrict by read flag
    #[must_use]
    pub const fn with_is_read(mut self, is_read: bool) -> Self {
        self.is_read = Some(is_read);
        self
    }

    /// Restrict by replied flag
    #[must_use]
    pub const fn with_is_replied(mut self, is_replied: bool) -> Self {
        self.is_replied = Some(is_replied);
        self
    }

    /// Set limit and offset
    #[must_use]
    pub const fn with_page(mut self, limit: u32, offset: u32) -> Self {
        self.limit = limit;
        self.offset = offset;
        self
    }
}

/// Partial status update for one email
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusUpdate {
    /// New read flag
    pub is_read: Option<bool>,
    /// New replied flag
    pub is_replied: Option<bool>,
    /// New reply status
    pub reply_status: Option<ReplyStatus>,
}

impl StatusUpdate {
    /// True when no field would change
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.is_read.is_none() && self.is_replied.is_none() && self.reply_status.is_none()
    }

    /// Set the read flag
    #[must_use]
    pub const fn with_is_read(mut self, is_read: bool) -> Self {
        self.is_read = Some(is_read);
        self
    }

    /// Set the replied flag
    #[must_use]
    pub const fn with_is_replied(mut self, is_replied: bool) -> Self {
        self.is_replied = Some(is_replied);
        self
    }

    /// Set the reply status
    #[must_use]
    pub const fn with_reply_status(mut self, status: ReplyStatus) -> Self {
        self.reply_status = Some(status);
        self
    }
}

/// Email store port trait
///
/// All operations are scoped to an owning user; no call can observe or
/// modify another user's records.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait EmailStorePort: Send + Sync {
    /// Insert or update one email record, keyed by (id, owning user)
    async fn upsert_email(&self, record: &EmailRecord) -> Result<(), EmailStoreError>;

    /// Fetch one email by id for a user
    async fn get_email(
        &self,
        id: &str,
        user: &EmailAddress,
    ) -> Result<Option<EmailRecord>, EmailStoreError>;

    /// List a user's emails, newest first
    async fn list_emails(
        &self,
        user: &EmailAddress,
        query: &EmailQuery,
    ) -> Result<Vec<EmailRecord>, EmailStoreError>;

    /// Count all stored emails for a user
    async fn count_for_user(&self, user: &EmailAddress) -> Result<u64, EmailStoreError>;

    /// Apply a partial status update; returns false when nothing matched
    async fn update_status(
        &self,
        id: &str,
        user: &EmailAddress,
        update: &StatusUpdate,
    ) -> Result<bool, EmailStoreError>;

    /// Read a user's sync state
    async fn get_sync_state(
        &self,
        user: &EmailAddress,
    ) -> Result<Option<SyncState>, EmailStoreError>;

    /// Write a user's sync state (idempotent upsert)
    async fn put_sync_state(&self, state: &SyncState) -> Result<(), EmailStoreError>;
}
