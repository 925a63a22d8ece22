//! Runtime configuration.
//!
//! Everything comes from the process environment, optionally seeded from a
//! `.env` file in the working directory. Only the LLM key has no default;
//! without it the bot still starts but cannot translate questions.

use serde::Serialize;

use crate::error::BotError;
use crate::output::{RenderOptions, DEFAULT_MAX_ROWS};
use crate::Result;

/// Default Anthropic model used for SQL generation
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// Default Anthropic API root
pub const DEFAULT_ANTHROPIC_URL: &str = "https://api.anthropic.com";

/// Default chat command prefix
pub const DEFAULT_PREFIX: &str = "!wca";

/// Connection settings for the WCA MySQL database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub name: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 3306,
            user: "root".to_string(),
            password: String::new(),
            name: "wca".to_string(),
        }
    }
}

/// Bot configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BotConfig {
    /// Anthropic API key (`ANTHROPIC_API_KEY`)
    #[serde(skip_serializing)]
    pub anthropic_api_key: Option<String>,
    /// Model name (`ANTHROPIC_MODEL`)
    pub anthropic_model: String,
    /// API root (`ANTHROPIC_BASE_URL`)
    pub anthropic_base_url: String,
    /// Database connection (`DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASSWORD`, `DB_NAME`)
    pub database: DatabaseConfig,
    /// Chat command prefix (`COMMAND_PREFIX`)
    pub command_prefix: String,
    /// Rows shown per answer (`MAX_QUERY_RESULTS`)
    pub max_query_results: usize,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            anthropic_api_key: None,
            anthropic_model: DEFAULT_MODEL.to_string(),
            anthropic_base_url: DEFAULT_ANTHROPIC_URL.to_string(),
            database: DatabaseConfig::default(),
            command_prefix: DEFAULT_PREFIX.to_string(),
            max_query_results: DEFAULT_MAX_ROWS,
        }
    }
}

impl BotConfig {
    /// Create new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `.env` (if present) and read the environment.
    pub fn from_env() -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!("loaded environment from {}", path.display());
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unset keys keep their defaults;
    /// empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        config.anthropic_api_key = get("ANTHROPIC_API_KEY");
        if let Some(model) = get("ANTHROPIC_MODEL") {
            config.anthropic_model = model;
        }
        if let Some(url) = get("ANTHROPIC_BASE_URL") {
            config.anthropic_base_url = url.trim_end_matches('/').to_string();
        }

        if let Some(host) = get("DB_HOST") {
            config.database.host = host;
        }
        if let Some(port) = get("DB_PORT") {
            config.database.port = parse_number("DB_PORT", &port)?;
        }
        if let Some(user) = get("DB_USER") {
            config.database.user = user;
        }
        if let Some(password) = lookup("DB_PASSWORD") {
            config.database.password = password;
        }
        if let Some(name) = get("DB_NAME") {
            config.database.name = name;
        }

        if let Some(prefix) = get("COMMAND_PREFIX") {
            config.command_prefix = prefix;
        }
        if let Some(max) = get("MAX_QUERY_RESULTS") {
            config.max_query_results = parse_number("MAX_QUERY_RESULTS", &max)?;
        }

        Ok(config)
    }

    /// Builder: set the API key
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.anthropic_api_key = Some(key.into());
        self
    }

    /// Builder: set the API root
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.anthropic_base_url = url.into();
        self
    }

    /// Builder: set the model
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.anthropic_model = model.into();
        self
    }

    /// Builder: set the command prefix
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.command_prefix = prefix.into();
        self
    }

    /// Builder: set rows shown per answer
    pub fn max_results(mut self, max: usize) -> Self {
        self.max_query_results = max;
        self
    }

    /// Table layout options derived from this configuration.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions::new().max_rows(self.max_query_results)
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e: T::Err| BotError::config(key, format!("'{}': {}", raw, e)))
}

/// Mask a secret for display, keeping only its ends.
pub fn mask_secret(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() > 20 {
        let head: String = chars[..10].iter().collect();
        let tail: String = chars[chars.len() - 10..].iter().collect();
        format!("{}...{}", head, tail)
    } else {
        "***".to_string()
    }
}
