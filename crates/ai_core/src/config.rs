//! Configuration for the completion engine

use serde::{Deserialize, Serialize};

/// Configuration for the completion engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    /// Base URL of the OpenAI-compatible API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer token for the API, when required
    #[serde(default)]
    pub api_key: Option<String>,

    /// Default model to use
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum tokens to generate when a request does not specify one
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Temperature for sampling when a request does not specify one
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_base_url() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

fn default_model() -> String {
    "llama3-8b-8192".to_string()
}

const fn default_timeout_ms() -> u64 {
    30000 // 30 seconds
}

const fn default_max_tokens() -> u32 {
    1024
}

const fn default_temperature() -> f32 {
    0.7
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            default_model: default_model(),
            timeout_ms: default_timeout_ms(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
        }
    }
}

impl CompletionConfig {
    /// Config for Groq with an API key
    pub fn groq(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_sensible_values() {
        let config = CompletionConfig::default();
        assert_eq!(config.base_url, "https://api.groq.com/openai/v1");
        assert_eq!(config.default_model, "llama3-8b-8192");
        assert_eq!(config.timeout_ms, 30000);
        assert_eq!(config.max_tokens, 1024);
        assert!((config.temperature - 0.7).abs() < 0.01);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn groq_config_carries_key() {
        let config = CompletionConfig::groq("gsk_test");
        assert_eq!(config.api_key.as_deref(), Some("gsk_test"));
        assert_eq!(config.default_model, "llama3-8b-8192");
    }

    #[test]
    fn config_serialization() {
        let config = CompletionConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("base_url"));
        assert!(json.contains("default_model"));
    }

    #[test]
    fn config_deserialization_with_defaults() {
        let json = r#"{}"#;
        let config: CompletionConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.base_url, "https://api.groq.com/openai/v1");
        assert_eq!(config.timeout_ms, 30000);
    }

    #[test]
    fn config_deserialization_with_overrides() {
        let json = r#"{"base_url":"http://localhost:8080/v1","default_model":"my-model","api_key":"k"}"#;
        let config: CompletionConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.base_url, "http://localhost:8080/v1");
        assert_eq!(config.default_model, "my-model");
        assert_eq!(config.api_key.as_deref(), Some("k"));
    }

    #[test]
    fn config_has_debug_impl() {
        let config = CompletionConfig::default();
        let debug = format!("{config:?}");
        assert!(debug.contains("CompletionConfig"));
        assert!(debug.contains("base_url"));
    }
}
