//! Reply status value object

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Reply state of a triaged email
///
/// Serialized as the human-readable strings the store and frontend share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ReplyStatus {
    /// No reply has been made or suggested
    #[default]
    #[serde(rename = "Not Replied")]
    NotReplied,
    /// The drafting step was triggered but failed; a human must follow up
    #[serde(rename = "Reply Needed")]
    ReplyNeeded,
    /// An AI-drafted reply suggestion is attached
    #[serde(rename = "AI Reply Suggested")]
    AiReplySuggested,
    /// The user has replied
    #[serde(rename = "Replied")]
    Replied,
}

impl ReplyStatus {
    /// The display/storage string for this status
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotReplied => "Not Replied",
            Self::ReplyNeeded => "Reply Needed",
            Self::AiReplySuggested => "AI Reply Suggested",
            Self::Replied => "Replied",
        }
    }
}

impl fmt::Display for ReplyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReplyStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Not Replied" => Ok(Self::NotReplied),
            "Reply Needed" => Ok(Self::ReplyNeeded),
            "AI Reply Suggested" => Ok(Self::AiReplySuggested),
            "Replied" => Ok(Self::Replied),
            other => Err(DomainError::UnknownReplyStatus(other.to_string())),
        }
    }
}
