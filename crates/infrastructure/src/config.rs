//! Application configuration
//!
//! Aggregates the database, completion and triage settings. Values come
//! from an optional `config.toml` plus `MAILSIFT__`-prefixed environment
//! overrides (e.g. `MAILSIFT__DATABASE__PATH`).

use ai_core::CompletionConfig;
use application::TriageConfig;
use serde::Deserialize;

/// SQLite database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file
    #[serde(default = "default_db_path")]
    pub path: String,

    /// Maximum number of concurrent database connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Whether to run pending migrations on startup (default: true)
    #[serde(default = "default_true")]
    pub run_migrations: bool,
}

fn default_db_path() -> String {
    "mailsift.db".to_string()
}

const fn default_max_connections() -> u32 {
    5
}

const fn default_true() -> bool {
    true
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: default_max_connections(),
            run_migrations: true,
        }
    }
}

/// Top-level application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Database settings
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Completion engine settings; absent means triage runs fallback-only
    #[serde(default)]
    pub completion: Option<CompletionConfig>,

    /// Triage pipeline settings
    #[serde(default)]
    pub triage: TriageConfig,
}

impl AppConfig {
    /// Load configuration from an optional `config` file and environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a named file (without extension) and
    /// environment overrides
    pub fn load_from(file: &str) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name(file).required(false))
            .add_source(
                config::Environment::with_prefix("MAILSIFT")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }
}
