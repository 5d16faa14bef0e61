//! Application services - the triage engine and its glue

mod inbox_service;
mod keyword_classifier;
mod priority_scorer;
mod triage_service;

pub use inbox_service::{InboxPage, InboxService, IngestOutcome};
pub use keyword_classifier::classify_keywords;
pub use priority_scorer::PriorityScorer;
pub use triage_service::{TriageConfig, TriageService};
