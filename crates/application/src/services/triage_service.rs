//! Triage service
//!
//! The single entry point of the classification pipeline: remote
//! classification with keyword fallback, multi-factor priority scoring,
//! and the conditional reply-drafting step. [`TriageService::analyze`]
//! never fails; every failure mode degrades to a usable analysis.

use std::{fmt, sync::Arc};

use serde::Deserialize;
use tracing::{debug, instrument, warn};

use domain::{AnalysisDetails, EmailAnalysis, IncomingMessage, SentimentCategory};

use crate::{
    ports::{CompletionParams, CompletionPort},
    services::{PriorityScorer, classify_keywords},
};

/// System prompt for the classification call
const CLASSIFY_SYSTEM_PROMPT: &str = "You are an expert email analyst. Categorize emails \
     accurately based on content and tone. Always respond with valid JSON only.";

/// Classification favors determinism: low temperature, short output
const CLASSIFY_PARAMS: CompletionParams = CompletionParams::new(0.2, 150);

/// Reply drafting allows some variety
const REPLY_PARAMS: CompletionParams = CompletionParams::new(0.7, 300);

/// Confidence assigned to keyword-fallback classifications
const FALLBACK_CONFIDENCE: u8 = 30;

/// Configuration for the triage pipeline
#[derive(Debug, Clone, Deserialize)]
pub struct TriageConfig {
    /// Sender domains treated as important by the priority scorer
    #[serde(default = "default_important_domains")]
    pub important_domains: Vec<String>,
    /// How many snippet characters are embedded in the classification prompt
    #[serde(default = "default_snippet_limit")]
    pub snippet_limit: usize,
}

fn default_important_domains() -> Vec<String> {
    vec![
        "@gmail.com".to_string(),
        "@company.com".to_string(),
        "@important-client.com".to_string(),
    ]
}

const fn default_snippet_limit() -> usize {
    500
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            important_domains: default_important_domains(),
            snippet_limit: default_snippet_limit(),
        }
    }
}

/// JSON shape the classifier is asked to produce
#[derive(Debug, Deserialize)]
struct ClassifierVerdict {
    category: String,
    #[serde(default = "default_confidence")]
    confidence: i64,
    #[serde(default = "default_reasoning")]
    reasoning: String,
}

const fn default_confidence() -> i64 {
    50
}

fn default_reasoning() -> String {
    "AI analysis".to_string()
}

/// Email triage pipeline
///
/// The completion capability is injected so tests can substitute a fake;
/// when absent every email degrades to the informational default.
pub struct TriageService {
    completion: Option<Arc<dyn CompletionPort>>,
    scorer: PriorityScorer,
    config: TriageConfig,
}

impl fmt::Debug for TriageService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TriageService")
            .field("has_completion", &self.completion.is_some())
            .finish_non_exhaustive()
    }
}

impl TriageService {
    /// Create a triage service
    pub fn new(completion: Option<Arc<dyn CompletionPort>>, config: TriageConfig) -> Self {
        let scorer = PriorityScorer::new(config.important_domains.clone());
        Self {
            completion,
            scorer,
            config,
        }
    }

    /// Create a service with no remote capability (fallback-only)
    #[must_use]
    pub fn without_capability() -> Self {
        Self::new(None, TriageConfig::default())
    }

    /// Analyze one email
    ///
    /// Runs classification, priority scoring and the conditional reply
    /// drafting step. Never returns an error: capability failures,
    /// unusable responses and malformed input all degrade to a valid
    /// analysis.
    #[instrument(skip(self, email), fields(email_id = %email.id))]
    pub async fn analyze(&self, email: &IncomingMessage) -> EmailAnalysis {
        let Some(completion) = self.completion.clone() else {
            debug!("No completion capability configured, using default categorization");
            return EmailAnalysis::default_informational("no completion capability configured");
        };

        let analysis = self.classify_remote(completion.as_ref(), email).await;
        debug!(
            category = %analysis.category,
            priority = analysis.priority.value(),
            "Classification complete"
        );
        self.maybe_draft_reply(completion.as_ref(), email, analysis)
            .await
    }

    /// Remote classification with keyword fallback
    async fn classify_remote(
        &self,
        completion: &dyn CompletionPort,
        email: &IncomingMessage,
    ) -> EmailAnalysis {
        let prompt = self.classification_prompt(email);

        let (category, confidence, reasoning) = match completion
            .complete(CLASSIFY_SYSTEM_PROMPT, &prompt, CLASSIFY_PARAMS)
            .await
        {
            Ok(response) => match parse_verdict(&response) {
                Ok(verdict) => verdict,
                Err(reason) => {
                    warn!(%reason, "Unusable classifier response, falling back to keywords");
                    Self::keyword_fallback(email)
                },
            },
            Err(error) => {
                warn!(%error, "Classification call failed, falling back to keywords");
                Self::keyword_fallback(email)
            },
        };

        let (priority, factors) = self.scorer.score(email, category);
        let details = AnalysisDetails::new(category, reasoning, factors);
        EmailAnalysis::new(category, priority, confidence, details)
    }

    /// Deterministic fallback over subject + snippet
    fn keyword_fallback(email: &IncomingMessage) -> (SentimentCategory, u8, String) {
        let content = format!("{} {}", email.subject, email.snippet).to_lowercase();
        (
            classify_keywords(&content),
            FALLBACK_CONFIDENCE,
            "fallback keyword analysis".to_string(),
        )
    }

    /// Draft a reply suggestion when the trigger rule is met
    ///
    /// Drafts only for complaints at urgent priority. A drafting failure
    /// leaves the body empty and flags the email for human follow-up
    /// instead of propagating an error.
    async fn maybe_draft_reply(
        &self,
        completion: &dyn CompletionPort,
        email: &IncomingMessage,
        analysis: EmailAnalysis,
    ) -> EmailAnalysis {
        let triggered = matches!(
            analysis.category,
            SentimentCategory::UrgentComplaint | SentimentCategory::Complaint
        ) && analysis.priority.is_urgent();

        if !triggered {
            return analysis;
        }

        let (system_prompt, user_prompt) = reply_prompt(analysis.category, email);
        match completion
            .complete(&system_prompt, &user_prompt, REPLY_PARAMS)
            .await
        {
            Ok(body) => {
                debug!(category = %analysis.category, "Generated reply suggestion");
                analysis.with_suggested_reply(body.trim())
            },
            Err(error) => {
                warn!(%error, "Reply drafting failed, flagging for human follow-up");
                analysis.with_reply_needed()
            },
        }
    }

    /// Build the classification prompt for one email
    fn classification_prompt(&self, email: &IncomingMessage) -> String {
        let mut categories = String::new();
        for category in SentimentCategory::all() {
            categories.push_str(&format!(
                "- {}: {}\n",
                category.wire_name(),
                category.description()
            ));
        }

        let excerpt: String = email.snippet.chars().take(self.config.snippet_limit).collect();

        format!(
            "Analyze this email and categorize it. Respond with ONLY a JSON object in this \
             exact format:\n\
             {{\"category\": \"CATEGORY_NAME\", \"confidence\": 85, \"reasoning\": \"brief explanation\"}}\n\
             \n\
             Available categories:\n\
             {categories}\
             \n\
             Email details:\n\
             From: {}\n\
             Subject: {}\n\
             Content: {excerpt}\n\
             \n\
             Consider urgency indicators like: urgent, ASAP, deadline, emergency, critical, \
             angry tone, complaint words.",
            email.from, email.subject
        )
    }
}

/// Category-specific prompts for the drafting step
fn reply_prompt(category: SentimentCategory, email: &IncomingMessage) -> (String, String) {
    let system = match category {
        SentimentCategory::UrgentComplaint => {
            "You are a senior customer service manager responding to an urgent complaint. \
             Be empathetic, professional, take immediate responsibility, and outline clear \
             next steps. Show urgency in your response."
        },
        _ => {
            "You are a customer service representative responding to a complaint. \
             Be understanding, professional, and solution-focused. Acknowledge the issue \
             and provide next steps."
        },
    };

    let tone = if category == SentimentCategory::UrgentComplaint {
        "an urgent"
    } else {
        "a professional"
    };

    let user = format!(
        "Draft {tone} response to this complaint:\n\nFrom: {}\nSubject: {}\nContent: {}",
        email.from, email.subject, email.snippet
    );

    (system.to_string(), user)
}

/// Parse the classifier response into (category, confidence, reasoning)
///
/// Strips surrounding code fences, extracts the outermost JSON object and
/// validates the category against the catalog. Any failure is reported as
/// a reason string so the caller can fall back.
fn parse_verdict(response: &str) -> Result<(SentimentCategory, u8, String), String> {
    let json = extract_json(response);

    let verdict: ClassifierVerdict =
        serde_json::from_str(json).map_err(|e| format!("JSON parse error: {e}"))?;

    let category = SentimentCategory::lookup(&verdict.category)
        .map_err(|_| format!("unknown category '{}'", verdict.category))?;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let confidence = verdict.confidence.clamp(0, 100) as u8;

    Ok((category, confidence, verdict.reasoning))
}

/// Extract JSON from a potentially markdown-wrapped response
fn extract_json(response: &str) -> &str {
    let response = response.trim();

    // Handle ```json ... ``` blocks
    if let Some(start) = response.find("```json") {
        if let Some(end) = response[start + 7..].find("```") {
            return response[start + 7..start + 7 + end].trim();
        }
    }

    // Handle ``` ... ``` blocks
    if let Some(start) = response.find("```") {
        if let Some(end) = response[start + 3..].find("```") {
            return response[start + 3..start + 3 + end].trim();
        }
    }

    // Handle { ... } directly
    // Ensure start <= end to avoid panics with malformed input like "} {"
    if let Some(start) = response.find('{') {
        if let Some(end) = response.rfind('}') {
            if start <= end {
                return &response[start..=end];
            }
        }
    }

    response
}

#[cfg(test)]
mod tests {
    use domain::{PriorityLevel, ReplyStatus};

    use super::*;
    use crate::ports::MockCompletionPort;

    /// Timestamp old enough to earn no recency bonus
    const STALE_MS: i64 = 1_600_000_000_000;

    fn urgent_complaint_email() -> IncomingMessage {
        IncomingMessage::new("test1", "angry.customer@example.com", "URGENT: Your service is terrible!")
            .with_snippet(
                "I am absolutely furious with your service. This is unacceptable and I \
                 demand immediate action!",
            )
            .with_internal_date_ms(STALE_MS)
    }

    fn question_email() -> IncomingMessage {
        IncomingMessage::new("test2", "client@business.org", "Question about your pricing")
            .with_snippet(
                "Hi, I was wondering if you could help me understand your pricing structure?",
            )
            .with_internal_date_ms(STALE_MS)
    }

    fn appreciation_email() -> IncomingMessage {
        IncomingMessage::new("test3", "partner@example.org", "Thank you for the excellent service")
            .with_snippet("I wanted to thank you for the outstanding support.")
            .with_internal_date_ms(STALE_MS)
    }

    fn service_with(mock: MockCompletionPort) -> TriageService {
        TriageService::new(Some(Arc::new(mock)), TriageConfig::default())
    }

    #[tokio::test]
    async fn absent_capability_returns_default_analysis() {
        let service = TriageService::without_capability();
        let analysis = service.analyze(&question_email()).await;

        assert_eq!(analysis.category, SentimentCategory::Informational);
        assert_eq!(analysis.confidence, 0);
        assert_eq!(analysis.priority, PriorityLevel::VeryLow);
        assert_eq!(analysis.reply_status, ReplyStatus::NotReplied);
        assert!(!analysis.requires_immediate_attention);
        assert!(analysis.details.reasoning.contains("no completion capability"));
    }

    #[tokio::test]
    async fn valid_response_is_used_directly() {
        let mut mock = MockCompletionPort::new();
        mock.expect_complete()
            .withf(|system, _, _| system == CLASSIFY_SYSTEM_PROMPT)
            .returning(|_, _, _| {
                Ok(r#"{"category": "QUESTION", "confidence": 88, "reasoning": "pricing inquiry"}"#
                    .to_string())
            });

        let service = service_with(mock);
        let analysis = service.analyze(&question_email()).await;

        assert_eq!(analysis.category, SentimentCategory::Question);
        assert_eq!(analysis.confidence, 88);
        assert_eq!(analysis.priority, PriorityLevel::Medium);
        assert_eq!(analysis.details.reasoning, "pricing inquiry");
        assert!(!analysis.auto_reply_suggested);
        assert_eq!(analysis.reply_status, ReplyStatus::NotReplied);
    }

    #[tokio::test]
    async fn fenced_response_is_parsed() {
        let mut mock = MockCompletionPort::new();
        mock.expect_complete()
            .withf(|system, _, _| system == CLASSIFY_SYSTEM_PROMPT)
            .returning(|_, _, _| {
                Ok("```json\n{\"category\": \"APPRECIATION\", \"confidence\": 92, \
                    \"reasoning\": \"gratitude\"}\n```"
                    .to_string())
            });

        let service = service_with(mock);
        let analysis = service.analyze(&appreciation_email()).await;

        assert_eq!(analysis.category, SentimentCategory::Appreciation);
        assert_eq!(analysis.confidence, 92);
        assert_eq!(analysis.priority, PriorityLevel::Low);
        assert_eq!(analysis.reply_status, ReplyStatus::NotReplied);
    }

    #[tokio::test]
    async fn unknown_category_falls_back_to_keywords() {
        let mut mock = MockCompletionPort::new();
        mock.expect_complete()
            .withf(|system, _, _| system == CLASSIFY_SYSTEM_PROMPT)
            .returning(|_, _, _| {
                Ok(r#"{"category": "BOGUS", "confidence": 99, "reasoning": "?"}"#.to_string())
            });
        // Fallback resolves to UrgentComplaint, which triggers drafting
        mock.expect_complete()
            .withf(|system, _, _| system != CLASSIFY_SYSTEM_PROMPT)
            .returning(|_, _, _| Ok("We sincerely apologize.".to_string()));

        let service = service_with(mock);
        let analysis = service.analyze(&urgent_complaint_email()).await;

        assert_eq!(analysis.category, SentimentCategory::UrgentComplaint);
        assert_eq!(analysis.confidence, 30);
        assert_eq!(analysis.details.reasoning, "fallback keyword analysis");
        assert!(analysis.priority.is_urgent());
        assert!(analysis.requires_immediate_attention);
    }

    #[tokio::test]
    async fn garbage_response_falls_back_to_keywords() {
        let mut mock = MockCompletionPort::new();
        mock.expect_complete()
            .withf(|system, _, _| system == CLASSIFY_SYSTEM_PROMPT)
            .returning(|_, _, _| Ok("I think this email is probably a question.".to_string()));

        let service = service_with(mock);
        let analysis = service.analyze(&question_email()).await;

        assert_eq!(analysis.category, SentimentCategory::Question);
        assert_eq!(analysis.confidence, 30);
        assert_eq!(analysis.details.reasoning, "fallback keyword analysis");
    }

    #[tokio::test]
    async fn transient_failure_falls_back_to_keywords() {
        use crate::ports::CompletionCallError;

        let mut mock = MockCompletionPort::new();
        mock.expect_complete()
            .withf(|system, _, _| system == CLASSIFY_SYSTEM_PROMPT)
            .returning(|_, _, _| Err(CompletionCallError::Transient("timeout".to_string())));
        mock.expect_complete()
            .withf(|system, _, _| system != CLASSIFY_SYSTEM_PROMPT)
            .returning(|_, _, _| Err(CompletionCallError::Transient("timeout".to_string())));

        let service = service_with(mock);
        let analysis = service.analyze(&urgent_complaint_email()).await;

        // Classification degraded but still fully populated
        assert_eq!(analysis.category, SentimentCategory::UrgentComplaint);
        assert_eq!(analysis.confidence, 30);
        // Drafting also failed, so the email is flagged for a human
        assert_eq!(analysis.reply_status, ReplyStatus::ReplyNeeded);
        assert!(analysis.suggested_reply_body.is_none());
    }

    #[tokio::test]
    async fn urgent_complaint_gets_drafted_reply() {
        let mut mock = MockCompletionPort::new();
        mock.expect_complete()
            .withf(|system, _, _| system == CLASSIFY_SYSTEM_PROMPT)
            .returning(|_, _, _| {
                Ok(r#"{"category": "URGENT_COMPLAINT", "confidence": 95, "reasoning": "very angry"}"#
                    .to_string())
            });
        mock.expect_complete()
            .withf(|system, user, params| {
                system.contains("senior customer service manager")
                    && user.contains("URGENT: Your service is terrible!")
                    && params.max_tokens == 300
            })
            .returning(|_, _, _| Ok("  We are truly sorry and are escalating now.  ".to_string()));

        let service = service_with(mock);
        let analysis = service.analyze(&urgent_complaint_email()).await;

        assert_eq!(analysis.category, SentimentCategory::UrgentComplaint);
        assert!(analysis.auto_reply_suggested);
        assert_eq!(analysis.reply_status, ReplyStatus::AiReplySuggested);
        assert_eq!(
            analysis.suggested_reply_body.as_deref(),
            Some("We are truly sorry and are escalating now.")
        );
    }

    #[tokio::test]
    async fn drafting_failure_flags_reply_needed() {
        use crate::ports::CompletionCallError;

        let mut mock = MockCompletionPort::new();
        mock.expect_complete()
            .withf(|system, _, _| system == CLASSIFY_SYSTEM_PROMPT)
            .returning(|_, _, _| {
                Ok(r#"{"category": "COMPLAINT", "confidence": 80, "reasoning": "dissatisfied"}"#
                    .to_string())
            });
        mock.expect_complete()
            .withf(|system, _, _| system != CLASSIFY_SYSTEM_PROMPT)
            .returning(|_, _, _| Err(CompletionCallError::Service("status 500".to_string())));

        let service = service_with(mock);
        let email = IncomingMessage::new("c1", "customer@example.org", "Order arrived broken")
            .with_snippet("The product is not working and I am disappointed.")
            .with_internal_date_ms(STALE_MS);
        let analysis = service.analyze(&email).await;

        assert_eq!(analysis.category, SentimentCategory::Complaint);
        assert_eq!(analysis.priority, PriorityLevel::High);
        assert_eq!(analysis.reply_status, ReplyStatus::ReplyNeeded);
        assert!(analysis.suggested_reply_body.is_none());
    }

    #[tokio::test]
    async fn non_urgent_complaint_skips_drafting() {
        // Complaint classified, but priority lands below the urgency bar
        let mut mock = MockCompletionPort::new();
        mock.expect_complete()
            .withf(|system, _, _| system == CLASSIFY_SYSTEM_PROMPT)
            .times(1)
            .returning(|_, _, _| {
                Ok(r#"{"category": "QUESTION", "confidence": 70, "reasoning": "asking"}"#
                    .to_string())
            });

        let service = service_with(mock);
        let analysis = service.analyze(&question_email()).await;

        assert_eq!(analysis.reply_status, ReplyStatus::NotReplied);
        assert!(analysis.suggested_reply_body.is_none());
    }

    #[tokio::test]
    async fn prompt_embeds_category_catalog_and_email() {
        let mut mock = MockCompletionPort::new();
        mock.expect_complete()
            .withf(|system, user, params| {
                system == CLASSIFY_SYSTEM_PROMPT
                    && user.contains("URGENT_COMPLAINT")
                    && user.contains("MEETING_INVITE")
                    && user.contains("From: client@business.org")
                    && user.contains("Subject: Question about your pricing")
                    && params.max_tokens == 150
                    && (params.temperature - 0.2).abs() < f32::EPSILON
            })
            .returning(|_, _, _| {
                Ok(r#"{"category": "QUESTION", "confidence": 70, "reasoning": "ok"}"#.to_string())
            });

        let service = service_with(mock);
        let analysis = service.analyze(&question_email()).await;
        assert_eq!(analysis.category, SentimentCategory::Question);
    }

    #[tokio::test]
    async fn long_snippet_is_truncated_in_prompt() {
        let mut mock = MockCompletionPort::new();
        mock.expect_complete()
            .withf(|system, user, _| {
                system == CLASSIFY_SYSTEM_PROMPT && !user.contains("TAIL_MARKER")
            })
            .returning(|_, _, _| {
                Ok(r#"{"category": "INFORMATIONAL", "confidence": 60, "reasoning": "ok"}"#
                    .to_string())
            });

        let snippet = format!("{}TAIL_MARKER", "x".repeat(600));
        let email = IncomingMessage::new("t", "a@b.com", "subject")
            .with_snippet(snippet)
            .with_internal_date_ms(STALE_MS);

        let service = service_with(mock);
        let analysis = service.analyze(&email).await;
        assert_eq!(analysis.category, SentimentCategory::Informational);
    }

    #[tokio::test]
    async fn missing_confidence_and_reasoning_default() {
        let mut mock = MockCompletionPort::new();
        mock.expect_complete()
            .withf(|system, _, _| system == CLASSIFY_SYSTEM_PROMPT)
            .returning(|_, _, _| Ok(r#"{"category": "REQUEST"}"#.to_string()));

        let service = service_with(mock);
        let email = IncomingMessage::new("r1", "a@b.com", "Access request")
            .with_snippet("please grant access")
            .with_internal_date_ms(STALE_MS);
        let analysis = service.analyze(&email).await;

        assert_eq!(analysis.category, SentimentCategory::Request);
        assert_eq!(analysis.confidence, 50);
        assert_eq!(analysis.details.reasoning, "AI analysis");
    }

    #[tokio::test]
    async fn out_of_range_confidence_is_clamped() {
        let mut mock = MockCompletionPort::new();
        mock.expect_complete()
            .withf(|system, _, _| system == CLASSIFY_SYSTEM_PROMPT)
            .returning(|_, _, _| {
                Ok(r#"{"category": "QUESTION", "confidence": 400, "reasoning": "x"}"#.to_string())
            });

        let service = service_with(mock);
        let analysis = service.analyze(&question_email()).await;
        assert_eq!(analysis.confidence, 100);
    }

    // =========================================================================
    // extract_json
    // =========================================================================

    #[test]
    fn extract_json_plain() {
        let json = r#"{"category":"QUESTION"}"#;
        assert_eq!(extract_json(json), json);
    }

    #[test]
    fn extract_json_with_code_block() {
        let response = "```json\n{\"category\":\"QUESTION\"}\n```";
        assert_eq!(extract_json(response), r#"{"category":"QUESTION"}"#);
    }

    #[test]
    fn extract_json_with_plain_code_block() {
        let response = "```\n{\"category\":\"REQUEST\"}\n```";
        assert_eq!(extract_json(response), r#"{"category":"REQUEST"}"#);
    }

    #[test]
    fn extract_json_with_surrounding_text() {
        let response = r#"Here is my verdict: {"category":"COMPLAINT"} as requested."#;
        assert_eq!(extract_json(response), r#"{"category":"COMPLAINT"}"#);
    }

    #[test]
    fn extract_json_malformed_braces_do_not_panic() {
        // No valid object span; the input comes back unchanged
        let response = "} {";
        assert_eq!(extract_json(response), "} {");
    }

    #[test]
    fn parse_verdict_rejects_garbage() {
        let result = parse_verdict("not json at all");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("JSON parse error"));
    }

    #[test]
    fn parse_verdict_rejects_unknown_category() {
        let result = parse_verdict(r#"{"category": "SPAM", "confidence": 10, "reasoning": "x"}"#);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("unknown category"));
    }

    #[test]
    fn parse_verdict_clamps_negative_confidence() {
        let (_, confidence, _) =
            parse_verdict(r#"{"category": "QUESTION", "confidence": -5, "reasoning": "x"}"#)
                .unwrap();
        assert_eq!(confidence, 0);
    }

    #[test]
    fn classification_prompt_lists_all_categories() {
        let service = TriageService::without_capability();
        let prompt = service.classification_prompt(&question_email());
        for category in SentimentCategory::all() {
            assert!(prompt.contains(category.wire_name()));
        }
    }

    #[test]
    fn reply_prompt_tone_differs_by_category() {
        let email = urgent_complaint_email();

        let (urgent_system, urgent_user) =
            reply_prompt(SentimentCategory::UrgentComplaint, &email);
        assert!(urgent_system.contains("senior customer service manager"));
        assert!(urgent_user.starts_with("Draft an urgent response"));

        let (system, user) = reply_prompt(SentimentCategory::Complaint, &email);
        assert!(system.contains("customer service representative"));
        assert!(user.starts_with("Draft a professional response"));
    }

    #[test]
    fn debug_does_not_leak_internals() {
        let service = TriageService::without_capability();
        let debug = format!("{service:?}");
        assert!(debug.contains("TriageService"));
        assert!(debug.contains("has_completion: false"));
    }

    // =========================================================================
    // Property-Based Tests (proptest)
    // =========================================================================

    mod proptest_tests {
        use proptest::prelude::*;

        use super::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(100))]

            // extract_json should never panic on arbitrary input
            #[test]
            fn extract_json_never_panics(input in ".*") {
                let _ = extract_json(&input);
            }

            // parse_verdict should reject garbage without panicking
            #[test]
            fn parse_verdict_handles_garbage(garbage in "[^{}]*") {
                let result = parse_verdict(&garbage);
                prop_assert!(result.is_err());
            }

            // Any verdict naming a catalog category parses, with the
            // confidence clamped into 0-100
            #[test]
            fn valid_verdicts_parse_with_clamped_confidence(
                index in 0usize..8,
                confidence in -1000i64..1000i64
            ) {
                let category = SentimentCategory::all()[index];
                let json = format!(
                    r#"{{"category":"{}","confidence":{confidence},"reasoning":"r"}}"#,
                    category.wire_name()
                );
                let result = parse_verdict(&json);
                prop_assert!(result.is_ok());
                let (parsed, clamped, _) = result.unwrap();
                prop_assert_eq!(parsed, category);
                prop_assert!(clamped <= 100);
            }

            // JSON with extra fields still parses (forward compatibility)
            #[test]
            fn extra_fields_ignored(
                extra_key in "[a-z]{3,10}",
                extra_value in "[a-z0-9]{1,20}"
            ) {
                // Duplicate keys would overwrite the real fields
                prop_assume!(
                    extra_key != "category"
                        && extra_key != "confidence"
                        && extra_key != "reasoning"
                );
                let json = format!(
                    r#"{{"category":"QUESTION","{extra_key}":"{extra_value}"}}"#
                );
                prop_assert!(parse_verdict(&json).is_ok());
            }
        }
    }
}
