//! Per-user mailbox synchronization state

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{errors::DomainError, value_objects::EmailAddress};

/// Phase of a user's mailbox synchronization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SyncPhase {
    /// No sync has ever been attempted
    #[default]
    NeverSynced,
    /// A sync is in flight
    Syncing,
    /// The last sync completed
    Synced,
    /// The last sync failed
    Error,
}

impl SyncPhase {
    /// Stable storage string
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NeverSynced => "never_synced",
            Self::Syncing => "syncing",
            Self::Synced => "synced",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for SyncPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SyncPhase {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "never_synced" => Ok(Self::NeverSynced),
            "syncing" => Ok(Self::Syncing),
            "synced" => Ok(Self::Synced),
            "error" => Ok(Self::Error),
            other => Err(DomainError::ValidationError(format!(
                "unknown sync phase: {other}"
            ))),
        }
    }
}

/// Sync progress for one user's mailbox
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncState {
    /// Owning user
    pub user_email: EmailAddress,
    /// Total messages reported by the provider at last sync
    pub total_remote_messages: u64,
    /// Epoch seconds of the last completed sync
    pub last_sync_timestamp: Option<i64>,
    /// Current phase
    pub phase: SyncPhase,
    /// Whether the initial latest-messages batch has been synced
    pub initial_batch_synced: bool,
    /// Provider pagination token for loading older messages
    pub next_page_token: Option<String>,
}

impl SyncState {
    /// Initial state for a user who has never synced
    #[must_use]
    pub const fn never_synced(user_email: EmailAddress) -> Self {
        Self {
            user_email,
            total_remote_messages: 0,
            last_sync_timestamp: None,
            phase: SyncPhase::NeverSynced,
            initial_batch_synced: false,
            next_page_token: None,
        }
    }

    /// Transition into the in-flight phase
    #[must_use]
    pub fn begin_sync(mut self) -> Self {
        self.phase = SyncPhase::Syncing;
        self
    }

    /// Record a completed sync
    #[must_use]
    pub fn complete(
        mut self,
        total_remote_messages: u64,
        timestamp: i64,
        next_page_token: Option<String>,
    ) -> Self {
        self.total_remote_messages = total_remote_messages;
        self.last_sync_timestamp = Some(timestamp);
        self.phase = SyncPhase::Synced;
        self.initial_batch_synced = true;
        self.next_page_token = next_page_token;
        self
    }

    /// Record a failed sync, keeping prior counters
    #[must_use]
    pub fn fail(mut self) -> Self {
        self.phase = SyncPhase::Error;
        self
    }
}
