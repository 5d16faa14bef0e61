//! AI Core - Chat-completion client
//!
//! Provides the completion-engine abstraction used for email
//! classification and reply drafting, plus a client for OpenAI-compatible
//! chat-completions endpoints (Groq by default).

pub mod config;
pub mod error;
pub mod groq;
pub mod ports;

pub use config::CompletionConfig;
pub use error::CompletionError;
pub use groq::GroqCompletionEngine;
pub use ports::{ChatTurn, CompletionEngine, CompletionRequest, CompletionResponse, TokenUsage};
