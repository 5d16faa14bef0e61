//! Email entities: the raw ingested message and the persisted record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    entities::email_analysis::{AnalysisDetails, EmailAnalysis},
    value_objects::{EmailAddress, PriorityLevel, ReplyStatus, SentimentCategory},
};

/// A message as fetched from the mail provider, before triage
///
/// Identity fields (`id`, `thread_id`, `history_id`) pass through the
/// pipeline untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomingMessage {
    /// Provider-assigned message id
    pub id: String,
    /// Provider thread id, when available
    pub thread_id: Option<String>,
    /// Provider history id, when available
    pub history_id: Option<String>,
    /// Raw sender header (may contain a display name)
    pub from: String,
    /// Subject line
    pub subject: String,
    /// Short body excerpt
    pub snippet: String,
    /// Full body, when fetched
    pub full_body: Option<String>,
    /// Receive time in epoch milliseconds, when the provider supplied one
    pub internal_date_ms: Option<i64>,
}

impl IncomingMessage {
    /// Create a message with the mandatory fields
    pub fn new(id: impl Into<String>, from: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            thread_id: None,
            history_id: None,
            from: from.into(),
            subject: subject.into(),
            snippet: String::new(),
            full_body: None,
            internal_date_ms: None,
        }
    }

    /// Set the snippet/preview text
    #[must_use]
    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippet = snippet.into();
        self
    }

    /// Set the full body
    #[must_use]
    pub fn with_full_body(mut self, body: impl Into<String>) -> Self {
        self.full_body = Some(body.into());
        self
    }

    /// Set the thread id
    #[must_use]
    pub fn with_thread_id(mut self, thread_id: impl Into<String>) -> Self {
        self.thread_id = Some(thread_id.into());
        self
    }

    /// Set the history id
    #[must_use]
    pub fn with_history_id(mut self, history_id: impl Into<String>) -> Self {
        self.history_id = Some(history_id.into());
        self
    }

    /// Set the receive timestamp (epoch milliseconds)
    #[must_use]
    pub const fn with_internal_date_ms(mut self, ms: i64) -> Self {
        self.internal_date_ms = Some(ms);
        self
    }
}

/// A triaged email as persisted per user
///
/// Created on first ingestion; the analysis fields are overwritten as a
/// whole on every re-analysis. Deletion is store-level housekeeping and
/// never happens here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailRecord {
    /// Provider-assigned message id
    pub id: String,
    /// Owning user
    pub user_email: EmailAddress,
    /// Provider thread id
    pub thread_id: Option<String>,
    /// Provider history id
    pub history_id: Option<String>,
    /// Raw sender header
    pub from_address: String,
    /// Subject line
    pub subject: String,
    /// Short body excerpt
    pub snippet: String,
    /// Full body, when fetched
    pub full_body: Option<String>,
    /// Receive time in epoch milliseconds
    pub internal_date_ms: Option<i64>,
    /// Resolved sentiment category
    pub sentiment: SentimentCategory,
    /// Final priority level
    pub priority: PriorityLevel,
    /// Classifier confidence, 0-100
    pub confidence: u8,
    /// Explainability payload from the last analysis pass
    pub analysis_details: Option<AnalysisDetails>,
    /// True when the last analysis landed on priority 1 or 2
    pub requires_immediate_attention: bool,
    /// True when the last analysis recommended auto-reply
    pub auto_reply_suggested: bool,
    /// AI-drafted reply suggestion
    pub suggested_reply_body: Option<String>,
    /// Reply state
    pub reply_status: ReplyStatus,
    /// Read flag
    pub is_read: bool,
    /// Replied flag
    pub is_replied: bool,
    /// When the record was first created
    pub created_at: DateTime<Utc>,
    /// When the record was last written
    pub updated_at: DateTime<Utc>,
}

impl EmailRecord {
    /// Create a fresh, not-yet-analyzed record from an ingested message
    pub fn from_message(user_email: EmailAddress, message: IncomingMessage) -> Self {
        let now = Utc::now();
        Self {
            id: message.id,
            user_email,
            thread_id: message.thread_id,
            history_id: message.history_id,
            from_address: message.from,
            subject: message.subject,
            snippet: message.snippet,
            full_body: message.full_body,
            internal_date_ms: message.internal_date_ms,
            sentiment: SentimentCategory::default(),
            priority: PriorityLevel::default(),
            confidence: 0,
            analysis_details: None,
            requires_immediate_attention: false,
            auto_reply_suggested: false,
            suggested_reply_body: None,
            reply_status: ReplyStatus::default(),
            is_read: false,
            is_replied: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge one analysis pass onto this record
    ///
    /// Overwrites every analysis field and touches `updated_at`; identity
    /// and read/replied state are left alone.
    pub fn apply_analysis(&mut self, analysis: &EmailAnalysis) {
        self.sentiment = analysis.category;
        self.priority = analysis.priority;
        self.confidence = analysis.confidence;
        self.analysis_details = Some(analysis.details.clone());
        self.requires_immediate_attention = analysis.requires_immediate_attention;
        self.auto_reply_suggested = analysis.auto_reply_suggested;
        self.suggested_reply_body = analysis.suggested_reply_body.clone();
        self.reply_status = analysis.reply_status;
        self.updated_at = Utc::now();
    }

    /// Display label of the stored sentiment
    #[must_use]
    pub const fn sentiment_display(&self) -> &'static str {
        self.sentiment.label()
    }

    /// Name of the stored priority level
    #[must_use]
    pub const fn priority_name(&self) -> &'static str {
        self.priority.name()
    }
}
