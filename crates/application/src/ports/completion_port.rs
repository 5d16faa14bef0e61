//! Completion port - Interface for text-completion calls
//!
//! The triage pipeline consumes this capability for classification and
//! reply drafting. Both failure kinds are treated identically by callers
//! (degrade to the keyword fallback); the split exists so adapters can
//! log and count them separately.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

/// Failure of a single completion call
#[derive(Debug, Error)]
pub enum CompletionCallError {
    /// Timeout or network-level failure; retrying may help
    #[error("Transient completion failure: {0}")]
    Transient(String),

    /// The service answered with a non-success status
    #[error("Completion service error: {0}")]
    Service(String),
}

/// Sampling parameters for one completion call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionParams {
    /// Sampling temperature (0.0 - 2.0)
    pub temperature: f32,
    /// Maximum tokens to generate
    pub max_tokens: u32,
}

impl CompletionParams {
    /// Create parameters with the given temperature and output bound
    #[must_use]
    pub const fn new(temperature: f32, max_tokens: u32) -> Self {
        Self {
            temperature,
            max_tokens,
        }
    }
}

/// Port for text-completion operations
///
/// One call per invocation; timeouts are the adapter's responsibility and
/// surface as [`CompletionCallError::Transient`].
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CompletionPort: Send + Sync {
    /// Run one completion with a system prompt and a user prompt
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        params: CompletionParams,
    ) -> Result<String, CompletionCallError>;
}
