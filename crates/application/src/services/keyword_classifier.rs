//! Keyword fallback classifier
//!
//! Deterministic, dependency-free categorization used whenever the remote
//! classifier is unavailable or returns something unusable. Scores each
//! category by how many of its trigger keywords appear in the text;
//! ties resolve to the category registered earlier in the table, which
//! matches [`SentimentCategory::all`] order.

use domain::SentimentCategory;

/// Trigger keywords per category, in registration order
///
/// Matching is plain substring containment over the lowercased input, no
/// stemming. Informational carries no keywords; it is the zero-score
/// default.
const KEYWORD_TABLE: &[(SentimentCategory, &[&str])] = &[
    (
        SentimentCategory::UrgentComplaint,
        &[
            "angry",
            "furious",
            "unacceptable",
            "terrible",
            "worst",
            "hate",
            "disgusted",
            "urgent complaint",
        ],
    ),
    (
        SentimentCategory::Complaint,
        &[
            "disappointed",
            "unsatisfied",
            "problem",
            "issue",
            "wrong",
            "error",
            "complaint",
            "not working",
        ],
    ),
    (
        SentimentCategory::Question,
        &[
            "?", "how to", "can you", "could you", "what is", "why", "when", "where", "help me",
        ],
    ),
    (
        SentimentCategory::Request,
        &[
            "please",
            "can you please",
            "need you to",
            "request",
            "asking for",
            "require",
        ],
    ),
    (
        SentimentCategory::Appreciation,
        &[
            "thank you",
            "thanks",
            "grateful",
            "appreciate",
            "excellent",
            "great job",
            "well done",
        ],
    ),
    (
        SentimentCategory::Opportunity,
        &[
            "opportunity",
            "deal",
            "proposal",
            "partnership",
            "collaboration",
            "business",
        ],
    ),
    (
        SentimentCategory::MeetingInvite,
        &[
            "meeting",
            "calendar",
            "schedule",
            "invite",
            "appointment",
            "call",
        ],
    ),
];

/// Classify text by keyword presence
///
/// Pure and side-effect free. The score of a category is the number of its
/// keywords present in the lowercased input (presence, not occurrence
/// count). The strictly highest score wins; ties go to the earlier table
/// entry. An all-zero score returns [`SentimentCategory::Informational`].
#[must_use]
pub fn classify_keywords(text: &str) -> SentimentCategory {
    let text = text.to_lowercase();

    let mut best = SentimentCategory::Informational;
    let mut best_score = 0_usize;

    for (category, keywords) in KEYWORD_TABLE {
        let score = keywords.iter().filter(|k| text.contains(*k)).count();
        if score > best_score {
            best = *category;
            best_score = score;
        }
    }

    best
}
