//! Result of one triage pass over a single email
//!
//! [`EmailAnalysis`] is a transient value object: the triage pipeline builds
//! it and the orchestrator copies its fields onto an
//! [`EmailRecord`](crate::EmailRecord) for persistence.

use serde::{Deserialize, Serialize};

use crate::value_objects::{PriorityLevel, ReplyStatus, SentimentCategory};

/// Per-factor contributions to the final priority score
///
/// `sentiment_priority` is the category's base priority; the remaining
/// fields are zero-or-negative adjustments (more negative = more urgent).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct PriorityFactors {
    /// Base priority contributed by the sentiment category
    pub sentiment_priority: f64,
    /// Recency boost for emails received within the last day
    pub time_factor: f64,
    /// Boost for senders on the important-domain list
    pub sender_importance: f64,
    /// Boost from urgency keywords in subject/snippet
    pub keyword_urgency: f64,
    /// Boost when the sender expects a response
    pub response_expectation: f64,
}

impl PriorityFactors {
    /// Create a breakdown holding only the category's base priority
    #[must_use]
    pub const fn from_base(base: f64) -> Self {
        Self {
            sentiment_priority: base,
            time_factor: 0.0,
            sender_importance: 0.0,
            keyword_urgency: 0.0,
            response_expectation: 0.0,
        }
    }

    /// Sum of all adjustments, excluding the base priority
    #[must_use]
    pub fn adjustment_sum(&self) -> f64 {
        self.time_factor + self.sender_importance + self.keyword_urgency + self.response_expectation
    }

    /// Raw (unclamped, unrounded) priority score
    #[must_use]
    pub fn raw_score(&self) -> f64 {
        self.sentiment_priority + self.adjustment_sum()
    }
}

/// Explainability payload attached to every analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisDetails {
    /// Why the classifier chose the category
    pub reasoning: String,
    /// Factor breakdown behind the final priority
    pub priority_factors: PriorityFactors,
    /// Whether the category is eligible for auto-reply drafting
    pub auto_reply_enabled: bool,
    /// Whether the category is eligible for user notification
    pub notification_enabled: bool,
}

impl AnalysisDetails {
    /// Build details for a category with the given reasoning and factors
    pub fn new(
        category: SentimentCategory,
        reasoning: impl Into<String>,
        priority_factors: PriorityFactors,
    ) -> Self {
        Self {
            reasoning: reasoning.into(),
            priority_factors,
            auto_reply_enabled: category.auto_reply_eligible(),
            notification_enabled: category.notification_eligible(),
        }
    }
}

/// Outcome of one triage pass over a single email
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailAnalysis {
    /// Resolved sentiment category
    pub category: SentimentCategory,
    /// Final clamped priority level
    pub priority: PriorityLevel,
    /// Classifier confidence, 0-100
    pub confidence: u8,
    /// Explainability payload
    pub details: AnalysisDetails,
    /// Invariant: true exactly when `priority` is level 1 or 2
    pub requires_immediate_attention: bool,
    /// Invariant: true only when the category is auto-reply eligible and
    /// `priority` is level 1 or 2
    pub auto_reply_suggested: bool,
    /// AI-drafted reply, when the drafting trigger fired and succeeded
    pub suggested_reply_body: Option<String>,
    /// Reply state resulting from the drafting step
    pub reply_status: ReplyStatus,
}

impl EmailAnalysis {
    /// Assemble an analysis, deriving the invariant flags from category and
    /// priority
    pub fn new(
        category: SentimentCategory,
        priority: PriorityLevel,
        confidence: u8,
        details: AnalysisDetails,
    ) -> Self {
        Self {
            category,
            priority,
            confidence: confidence.min(100),
            details,
            requires_immediate_attention: priority.is_urgent(),
            auto_reply_suggested: category.auto_reply_eligible() && priority.is_urgent(),
            suggested_reply_body: None,
            reply_status: ReplyStatus::NotReplied,
        }
    }

    /// The degraded default: informational, zero confidence, base priority
    ///
    /// Used when no completion capability is configured or when the
    /// pipeline fails in an unexpected way.
    pub fn default_informational(reasoning: impl Into<String>) -> Self {
        let category = SentimentCategory::Informational;
        let details = AnalysisDetails::new(category, reasoning, PriorityFactors::default());
        Self::new(category, category.base_priority(), 0, details)
    }

    /// Attach a successfully drafted reply suggestion
    #[must_use]
    pub fn with_suggested_reply(mut self, body: impl Into<String>) -> Self {
        self.suggested_reply_body = Some(body.into());
        self.reply_status = ReplyStatus::AiReplySuggested;
        self
    }

    /// Mark that drafting was warranted but failed; a human must follow up
    #[must_use]
    pub fn with_reply_needed(mut self) -> Self {
        self.suggested_reply_body = None;
        self.reply_status = ReplyStatus::ReplyNeeded;
        self
    }

    /// Display label of the resolved category
    #[must_use]
    pub const fn display_label(&self) -> &'static str {
        self.category.label()
    }

    /// Name of the final priority level
    #[must_use]
    pub const fn priority_name(&self) -> &'static str {
        self.priority.name()
    }
}
