//! Groq (OpenAI-compatible) completion engine

mod client;

pub use client::GroqCompletionEngine;
