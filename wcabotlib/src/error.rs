//! Error types for wcabotlib

use thiserror::Error;

/// Errors that can occur while answering a question
#[derive(Error, Debug)]
pub enum BotError {
    /// Missing or malformed configuration value
    #[error("invalid configuration for {key}: {message}")]
    Config { key: String, message: String },

    /// Transport-level failure talking to the LLM provider
    #[error("LLM request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The LLM provider answered with a non-success status or an unexpected body
    #[error("LLM HTTP {status}: {body}")]
    Llm { status: u16, body: String },

    /// The model could not (or would not) produce SQL for the question
    #[error("could not translate question to SQL: {0}")]
    Untranslatable(String),

    /// Database connection or execution error
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Malformed JSON input or response
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BotError {
    /// Shorthand for a configuration error on `key`.
    pub fn config(key: impl Into<String>, message: impl Into<String>) -> Self {
        BotError::Config {
            key: key.into(),
            message: message.into(),
        }
    }
}
