//! Inbox service
//!
//! Glue between the triage engine and the persistent store: ingests
//! already-fetched provider messages, keeps per-user sync state current,
//! and exposes the read/update operations a frontend needs. Fetching from
//! the mail provider is the caller's business.

use std::{fmt, sync::Arc};

use chrono::Utc;
use tracing::{debug, info, instrument};

use domain::{
    DomainError, EmailAddress, EmailRecord, IncomingMessage, SyncPhase, SyncState,
};

use crate::{
    error::ApplicationError,
    ports::{EmailQuery, EmailStoreError, EmailStorePort, StatusUpdate},
    services::TriageService,
};

/// Result of one ingestion batch
#[derive(Debug, Clone)]
pub struct IngestOutcome {
    /// Number of messages analyzed and stored
    pub ingested: u32,
    /// Sync state after the batch completed
    pub sync_state: SyncState,
}

/// One page of a user's stored inbox
#[derive(Debug, Clone)]
pub struct InboxPage {
    /// Matching records, newest first
    pub emails: Vec<EmailRecord>,
    /// Total stored emails for the user (unfiltered)
    pub total_count: u64,
    /// Requested page size
    pub limit: u32,
    /// Requested offset
    pub offset: u32,
    /// Whether another page may exist
    pub has_more: bool,
    /// Current sync phase for the user
    pub sync_phase: SyncPhase,
}

/// Inbox orchestration service
pub struct InboxService {
    store: Arc<dyn EmailStorePort>,
    triage: Arc<TriageService>,
}

impl fmt::Debug for InboxService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InboxService").finish_non_exhaustive()
    }
}

impl InboxService {
    /// Create a new inbox service
    pub fn new(store: Arc<dyn EmailStorePort>, triage: Arc<TriageService>) -> Self {
        Self { store, triage }
    }

    /// Ingest one batch of fetched messages for a user
    ///
    /// Marks the user as syncing, analyzes and upserts every message, then
    /// records the completed sync with the provider's counters. A store
    /// failure mid-batch records the error phase before propagating.
    #[instrument(skip(self, messages), fields(user = %user, count = messages.len()))]
    pub async fn ingest_batch(
        &self,
        user: &EmailAddress,
        messages: Vec<IncomingMessage>,
        total_remote_messages: u64,
        next_page_token: Option<String>,
    ) -> Result<IngestOutcome, ApplicationError> {
        info!("Ingesting message batch");

        let state = self.load_or_init_state(user).await?.begin_sync();
        self.store
            .put_sync_state(&state)
            .await
            .map_err(map_store_error)?;

        let mut ingested = 0_u32;
        for message in messages {
            if let Err(e) = self.analyze_and_store(user, message).await {
                self.record_sync_failure(state.clone()).await;
                return Err(e);
            }
            ingested += 1;
        }

        let completed =
            state.complete(total_remote_messages, Utc::now().timestamp(), next_page_token);
        self.store
            .put_sync_state(&completed)
            .await
            .map_err(map_store_error)?;

        info!(ingested, "Batch ingestion complete");
        Ok(IngestOutcome {
            ingested,
            sync_state: completed,
        })
    }

    /// Analyze and upsert a single message without touching sync state
    ///
    /// Used for fetch-by-id refreshes.
    #[instrument(skip(self, message), fields(user = %user, email_id = %message.id))]
    pub async fn refresh_message(
        &self,
        user: &EmailAddress,
        message: IncomingMessage,
    ) -> Result<EmailRecord, ApplicationError> {
        self.analyze_and_store(user, message).await
    }

    /// List a page of stored emails
    pub async fn list(
        &self,
        user: &EmailAddress,
        query: EmailQuery,
    ) -> Result<InboxPage, ApplicationError> {
        let emails = self
            .store
            .list_emails(user, &query)
            .await
            .map_err(map_store_error)?;
        let total_count = self
            .store
            .count_for_user(user)
            .await
            .map_err(map_store_error)?;
        let sync_phase = self
            .store
            .get_sync_state(user)
            .await
            .map_err(map_store_error)?
            .map_or(SyncPhase::NeverSynced, |s| s.phase);

        let has_more = emails.len() as u32 == query.limit;
        Ok(InboxPage {
            emails,
            total_count,
            limit: query.limit,
            offset: query.offset,
            has_more,
            sync_phase,
        })
    }

    /// Fetch one stored email
    pub async fn get(
        &self,
        id: &str,
        user: &EmailAddress,
    ) -> Result<EmailRecord, ApplicationError> {
        self.store
            .get_email(id, user)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| DomainError::not_found("EmailRecord", id).into())
    }

    /// Apply a partial status update to one stored email
    pub async fn update_status(
        &self,
        id: &str,
        user: &EmailAddress,
        update: StatusUpdate,
    ) -> Result<(), ApplicationError> {
        if update.is_empty() {
            return Err(DomainError::ValidationError("nothing to update".to_string()).into());
        }

        let updated = self
            .store
            .update_status(id, user, &update)
            .await
            .map_err(map_store_error)?;

        if updated {
            Ok(())
        } else {
            Err(DomainError::not_found("EmailRecord", id).into())
        }
    }

    /// Current sync state for a user, defaulting to never-synced
    pub async fn sync_status(&self, user: &EmailAddress) -> Result<SyncState, ApplicationError> {
        Ok(self
            .store
            .get_sync_state(user)
            .await
            .map_err(map_store_error)?
            .unwrap_or_else(|| SyncState::never_synced(user.clone())))
    }

    async fn analyze_and_store(
        &self,
        user: &EmailAddress,
        message: IncomingMessage,
    ) -> Result<EmailRecord, ApplicationError> {
        let analysis = self.triage.analyze(&message).await;

        let mut record = match self
            .store
            .get_email(&message.id, user)
            .await
            .map_err(map_store_error)?
        {
            // Re-ingest: refresh content, keep read/replied state and created_at
            Some(mut existing) => {
                existing.thread_id = message.thread_id;
                existing.history_id = message.history_id;
                existing.from_address = message.from;
                existing.subject = message.subject;
                existing.snippet = message.snippet;
                if message.full_body.is_some() {
                    existing.full_body = message.full_body;
                }
                existing.internal_date_ms = message.internal_date_ms;
                existing
            },
            None => EmailRecord::from_message(user.clone(), message),
        };

        record.apply_analysis(&analysis);
        self.store
            .upsert_email(&record)
            .await
            .map_err(map_store_error)?;

        debug!(email_id = %record.id, sentiment = %record.sentiment, "Stored analyzed email");
        Ok(record)
    }

    async fn load_or_init_state(
        &self,
        user: &EmailAddress,
    ) -> Result<SyncState, ApplicationError> {
        Ok(self
            .store
            .get_sync_state(user)
            .await
            .map_err(map_store_error)?
            .unwrap_or_else(|| SyncState::never_synced(user.clone())))
    }

    /// Best-effort error marker; the original failure wins over any
    /// secondary store problem
    async fn record_sync_failure(&self, state: SyncState) {
        if self.store.put_sync_state(&state.fail()).await.is_err() {
            debug!("Could not record sync failure state");
        }
    }
}

/// Map store errors to application errors
fn map_store_error(err: EmailStoreError) -> ApplicationError {
    match err {
        EmailStoreError::Unavailable(msg) | EmailStoreError::OperationFailed(msg) => {
            ApplicationError::Store(msg)
        },
        EmailStoreError::NotFound(id) => DomainError::not_found("EmailRecord", id).into(),
    }
}
