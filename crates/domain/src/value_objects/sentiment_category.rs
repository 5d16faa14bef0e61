//! Sentiment category value object
//!
//! The fixed catalog of categories an email can be triaged into. Each
//! category carries a base priority and the auto-reply/notification
//! eligibility used by the triage pipeline.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{errors::DomainError, value_objects::PriorityLevel};

/// Sentiment category of an analyzed email
///
/// The set is closed: categories are defined at compile time and never
/// created at runtime. Wire names (`URGENT_COMPLAINT`, ...) are the values
/// the remote classifier is prompted with and the store persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SentimentCategory {
    /// Angry customer, serious complaint, or escalated issue
    UrgentComplaint,
    /// Customer dissatisfaction or problem report
    Complaint,
    /// Request for information or help
    Question,
    /// Action item or specific request
    Request,
    /// Gratitude, praise, or positive feedback
    Appreciation,
    /// Business opportunity or potential deal
    Opportunity,
    /// Meeting invitation or scheduling
    MeetingInvite,
    /// News, updates, or informational content
    #[default]
    Informational,
}

impl SentimentCategory {
    /// All categories in registration order
    ///
    /// This order doubles as the tie-break for the keyword fallback
    /// classifier: on equal scores the earlier entry wins.
    #[must_use]
    pub const fn all() -> [Self; 8] {
        [
            Self::UrgentComplaint,
            Self::Complaint,
            Self::Question,
            Self::Request,
            Self::Appreciation,
            Self::Opportunity,
            Self::MeetingInvite,
            Self::Informational,
        ]
    }

    /// Stable wire name, as prompted to the classifier and persisted
    #[must_use]
    pub const fn wire_name(&self) -> &'static str {
        match self {
            Self::UrgentComplaint => "URGENT_COMPLAINT",
            Self::Complaint => "COMPLAINT",
            Self::Question => "QUESTION",
            Self::Request => "REQUEST",
            Self::Appreciation => "APPRECIATION",
            Self::Opportunity => "OPPORTUNITY",
            Self::MeetingInvite => "MEETING_INVITE",
            Self::Informational => "INFORMATIONAL",
        }
    }

    /// Human-readable display label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::UrgentComplaint => "Urgent Issue",
            Self::Complaint => "Complaint",
            Self::Question => "Question",
            Self::Request => "Request",
            Self::Appreciation => "Thank You",
            Self::Opportunity => "Opportunity",
            Self::MeetingInvite => "Meeting",
            Self::Informational => "Info/Update",
        }
    }

    /// One-line description, used when prompting the remote classifier
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::UrgentComplaint => "Angry customer, serious issue, escalated problem",
            Self::Complaint => "Customer dissatisfaction, problem report, negative feedback",
            Self::Question => "Request for information, asking for help, inquiry",
            Self::Request => "Action item, task request, asking for something specific",
            Self::Appreciation => "Thank you, praise, positive feedback, gratitude",
            Self::Opportunity => "Business opportunity, potential deal, sales lead",
            Self::MeetingInvite => "Meeting invitation, calendar invite, scheduling",
            Self::Informational => "Updates, news, announcements, FYI content",
        }
    }

    /// Base priority before per-email adjustments
    #[must_use]
    pub const fn base_priority(&self) -> PriorityLevel {
        match self {
            Self::UrgentComplaint => PriorityLevel::Critical,
            Self::Complaint | Self::Opportunity => PriorityLevel::High,
            Self::Question | Self::Request | Self::MeetingInvite => PriorityLevel::Medium,
            Self::Appreciation => PriorityLevel::Low,
            Self::Informational => PriorityLevel::VeryLow,
        }
    }

    /// Whether an automatic reply suggestion may be drafted for this category
    #[must_use]
    pub const fn auto_reply_eligible(&self) -> bool {
        matches!(self, Self::UrgentComplaint | Self::Complaint)
    }

    /// Whether the user should be notified about emails in this category
    #[must_use]
    pub const fn notification_eligible(&self) -> bool {
        matches!(self, Self::UrgentComplaint | Self::Complaint | Self::Opportunity)
    }

    /// Look up a category by its wire name
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::UnknownCategory`] when the name is not in the
    /// catalog.
    pub fn lookup(name: &str) -> Result<Self, DomainError> {
        Self::all()
            .into_iter()
            .find(|c| c.wire_name() == name)
            .ok_or_else(|| DomainError::UnknownCategory(name.to_string()))
    }
}

impl fmt::Display for SentimentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

impl FromStr for SentimentCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s)
    }
}
