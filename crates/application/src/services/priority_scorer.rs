//! Priority scorer
//!
//! Computes the final 1-5 priority of an email from the category's base
//! priority plus weighted adjustment factors (recency, sender reputation,
//! urgency keywords, response-expectation phrases). All adjustments are
//! negative: more negative means more urgent.

use std::sync::LazyLock;

use aho_corasick::AhoCorasick;
use chrono::{DateTime, Duration, Utc};

use domain::{IncomingMessage, PriorityFactors, PriorityLevel, SentimentCategory};

/// Urgency keywords scanned in subject + snippet
const URGENT_KEYWORDS: [&str; 6] = [
    "urgent",
    "asap",
    "emergency",
    "critical",
    "immediate",
    "deadline",
];

/// Phrases signalling the sender expects a response
const RESPONSE_KEYWORDS: [&str; 4] = ["please reply", "need response", "waiting for", "follow up"];

/// Pre-compiled automaton for urgency keyword counting
static URGENCY_MATCHER: LazyLock<AhoCorasick> = LazyLock::new(|| {
    #[allow(clippy::expect_used)] // Infallible with valid static patterns
    AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .build(URGENT_KEYWORDS)
        .expect("Failed to build urgency matcher")
});

/// Pre-compiled automaton for response-expectation phrases
static RESPONSE_MATCHER: LazyLock<AhoCorasick> = LazyLock::new(|| {
    #[allow(clippy::expect_used)] // Infallible with valid static patterns
    AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .build(RESPONSE_KEYWORDS)
        .expect("Failed to build response matcher")
});

/// Multi-factor priority scorer
///
/// Deterministic and free of I/O. The only configurable input is the
/// important-domain allow-list; the keyword tables are fixed.
#[derive(Debug, Clone)]
pub struct PriorityScorer {
    important_domains: Vec<String>,
}

impl PriorityScorer {
    /// Weight of one urgency keyword occurrence
    const URGENCY_WEIGHT: f64 = -0.3;
    /// Saturation floor for the urgency factor
    const URGENCY_FLOOR: f64 = -1.0;

    /// Create a scorer with the given important-domain allow-list
    ///
    /// Domains are matched as lowercase substrings of the sender address
    /// (e.g. `"@gmail.com"`).
    #[must_use]
    pub fn new(important_domains: Vec<String>) -> Self {
        Self {
            important_domains: important_domains
                .into_iter()
                .map(|d| d.to_lowercase())
                .collect(),
        }
    }

    /// Score an email against the current wall clock
    #[must_use]
    pub fn score(
        &self,
        email: &IncomingMessage,
        category: SentimentCategory,
    ) -> (PriorityLevel, PriorityFactors) {
        self.score_at(email, category, Utc::now())
    }

    /// Score an email against an explicit "now"
    ///
    /// Never fails for well-formed input: a missing or unparseable
    /// timestamp simply earns no recency bonus.
    #[must_use]
    pub fn score_at(
        &self,
        email: &IncomingMessage,
        category: SentimentCategory,
        now: DateTime<Utc>,
    ) -> (PriorityLevel, PriorityFactors) {
        let base = f64::from(category.base_priority().value());
        let content = format!("{} {}", email.subject, email.snippet);

        let factors = PriorityFactors {
            sentiment_priority: base,
            time_factor: Self::time_factor(email.internal_date_ms, now),
            sender_importance: self.sender_factor(&email.from),
            keyword_urgency: Self::urgency_factor(&content),
            response_expectation: Self::response_factor(&content),
        };

        (PriorityLevel::from_score(factors.raw_score()), factors)
    }

    /// Recency boost: <2h earns -0.5, <24h earns -0.2
    fn time_factor(internal_date_ms: Option<i64>, now: DateTime<Utc>) -> f64 {
        let Some(received) = internal_date_ms.and_then(DateTime::from_timestamp_millis) else {
            return 0.0;
        };

        let age = now - received;
        if age < Duration::hours(2) {
            -0.5
        } else if age < Duration::hours(24) {
            -0.2
        } else {
            0.0
        }
    }

    /// Important-sender boost
    fn sender_factor(&self, sender: &str) -> f64 {
        let sender = sender.to_lowercase();
        if self.important_domains.iter().any(|d| sender.contains(d)) {
            -0.3
        } else {
            0.0
        }
    }

    /// Urgency keyword boost, saturating at the floor
    ///
    /// Counts total case-insensitive occurrences; four or more matches all
    /// score the floor value.
    fn urgency_factor(content: &str) -> f64 {
        #[allow(clippy::cast_precision_loss)] // Occurrence counts are tiny
        let count = URGENCY_MATCHER.find_iter(content).count() as f64;
        if count > 0.0 {
            (Self::URGENCY_WEIGHT * count).max(Self::URGENCY_FLOOR)
        } else {
            0.0
        }
    }

    /// Response-expectation boost
    fn response_factor(content: &str) -> f64 {
        if RESPONSE_MATCHER.is_match(content) {
            -0.5
        } else {
            0.0
        }
    }
}

impl Default for PriorityScorer {
    fn default() -> Self {
        Self::new(vec![
            "@gmail.com".to_string(),
            "@company.com".to_string(),
            "@important-client.com".to_string(),
        ])
    }
}
