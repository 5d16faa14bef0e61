//! Completion adapter
//!
//! Bridges the `ai_core` completion engine to the application's
//! `CompletionPort`, mapping engine errors onto the transient/service
//! taxonomy the triage pipeline expects.

use std::sync::Arc;

use ai_core::{CompletionEngine, CompletionRequest};
use application::{CompletionCallError, CompletionParams, CompletionPort};
use async_trait::async_trait;
use tracing::instrument;

/// Adapter exposing a completion engine as a `CompletionPort`
pub struct CompletionAdapter {
    engine: Arc<dyn CompletionEngine>,
}

impl std::fmt::Debug for CompletionAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionAdapter")
            .field("model", &self.engine.default_model())
            .finish_non_exhaustive()
    }
}

impl CompletionAdapter {
    /// Create a new adapter around an engine
    pub fn new(engine: Arc<dyn CompletionEngine>) -> Self {
        Self { engine }
    }
}

#[async_trait]
impl CompletionPort for CompletionAdapter {
    #[instrument(skip(self, system_prompt, user_prompt))]
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        params: CompletionParams,
    ) -> Result<String, CompletionCallError> {
        let request = CompletionRequest::with_system(system_prompt, user_prompt)
            .with_temperature(params.temperature)
            .with_max_tokens(params.max_tokens);

        let response = self.engine.complete(request).await.map_err(|e| {
            if e.is_transient() {
                CompletionCallError::Transient(e.to_string())
            } else {
                CompletionCallError::Service(e.to_string())
            }
        })?;

        Ok(response.content)
    }
}
