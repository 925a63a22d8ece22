//! Natural language → SQL via the Anthropic Messages API.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::prompt::{system_prompt, user_prompt, REFUSAL_PREFIX};
use crate::config::BotConfig;
use crate::error::BotError;
use crate::Result;

const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 500;
const TEMPERATURE: f32 = 0.3;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Anything that can turn a question into a SQL string.
#[async_trait]
pub trait SqlTranslator: Send + Sync {
    /// Translate `question` into a single SQL statement.
    async fn translate(&self, question: &str) -> Result<String>;
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: String,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

/// Translator backed by Anthropic's Messages endpoint.
#[derive(Debug, Clone)]
pub struct AnthropicTranslator {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl AnthropicTranslator {
    /// Build a translator from configuration.
    ///
    /// Fails when no API key is configured.
    pub fn from_config(config: &BotConfig) -> Result<Self> {
        let api_key = config
            .anthropic_api_key
            .clone()
            .ok_or_else(|| BotError::config("ANTHROPIC_API_KEY", "not set"))?;
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            api_key,
            model: config.anthropic_model.clone(),
            base_url: config.anthropic_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/messages", self.base_url)
    }
}

#[async_trait]
impl SqlTranslator for AnthropicTranslator {
    async fn translate(&self, question: &str) -> Result<String> {
        let request = MessagesRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            system: system_prompt(),
            messages: vec![Message {
                role: "user",
                content: user_prompt(question),
            }],
        };

        debug!(model = %self.model, "requesting SQL translation");
        let response = self
            .http
            .post(self.endpoint())
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BotError::Llm {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        let body: MessagesResponse = response.json().await?;
        let text = body
            .content
            .into_iter()
            .find_map(|block| block.text)
            .unwrap_or_default();

        clean_sql_response(&text)
    }
}

/// Strip code fences from a model reply and reject refusals.
///
/// ```rust
/// use wcabotlib::query::clean_sql_response;
///
/// let sql = clean_sql_response("```sql\nSELECT 1\n```").unwrap();
/// assert_eq!(sql, "SELECT 1");
/// assert!(clean_sql_response("ERROR: Cannot be answered with SQL").is_err());
/// ```
pub fn clean_sql_response(raw: &str) -> Result<String> {
    let mut sql = raw.trim();

    if sql.starts_with("```") {
        sql = sql.split("```").nth(1).unwrap_or_default();
        sql = sql.strip_prefix("sql").unwrap_or(sql);
        sql = sql.trim();
    }

    if sql.starts_with(REFUSAL_PREFIX) {
        warn!("translation refused: {}", sql);
        return Err(BotError::Untranslatable(sql.to_string()));
    }
    if sql.is_empty() {
        return Err(BotError::Untranslatable("empty response".to_string()));
    }

    Ok(sql.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_sql() {
        assert_eq!(
            clean_sql_response("  SELECT * FROM persons LIMIT 1\n").unwrap(),
            "SELECT * FROM persons LIMIT 1"
        );
    }

    #[test]
    fn test_fenced_sql() {
        let raw = "```sql\nSELECT name FROM persons\n```";
        assert_eq!(clean_sql_response(raw).unwrap(), "SELECT name FROM persons");

        let raw = "```\nSELECT 1\n```\nThis returns one.";
        assert_eq!(clean_sql_response(raw).unwrap(), "SELECT 1");
    }

    #[test]
    fn test_refusal() {
        let err = clean_sql_response("ERROR: Cannot be answered with SQL").unwrap_err();
        assert!(matches!(err, BotError::Untranslatable(_)));
    }

    #[test]
    fn test_empty() {
        assert!(clean_sql_response("   ").is_err());
        assert!(clean_sql_response("```\n```").is_err());
    }

    #[test]
    fn test_requires_api_key() {
        let err = AnthropicTranslator::from_config(&BotConfig::new()).unwrap_err();
        assert!(matches!(err, BotError::Config { .. }));
    }
}
