//! Question → SQL → rows → table → chat messages.
//!
//! `QueryPipeline` is the application context: it owns the translator, the
//! query engine (and therefore the connection pool) and the layout options.
//! Every call builds its rows and text fresh; nothing is cached between
//! questions.

use std::sync::Arc;

use tracing::{error, info, warn};

use super::engine::{execute_query, MySqlEngine, QueryEngine};
use super::postprocess::post_process;
use super::translate::{AnthropicTranslator, SqlTranslator};
use crate::config::BotConfig;
use crate::data::ResultSet;
use crate::error::BotError;
use crate::output::{render_records, to_messages, RenderOptions};
use crate::Result;

/// Reply when the model produced no usable SQL.
pub const UNTRANSLATABLE_REPLY: &str = "❌ Could not generate a valid SQL query from your question.";

/// Reply when the query ran but returned nothing.
pub const EMPTY_REPLY: &str = "❌ No results found for your query.";

/// Translator used when no LLM is configured: every question fails to translate.
struct DisabledTranslator;

#[async_trait::async_trait]
impl SqlTranslator for DisabledTranslator {
    async fn translate(&self, _question: &str) -> Result<String> {
        error!("Anthropic client not initialized. Cannot translate to SQL.");
        Err(BotError::config("ANTHROPIC_API_KEY", "not set"))
    }
}

/// What one question produced.
#[derive(Debug, Clone)]
pub struct Answer {
    /// SQL that was run, if translation succeeded
    pub sql: Option<String>,
    /// Post-processed rows, if the query ran
    pub rows: Option<ResultSet>,
    /// Chat messages to send, in order
    pub messages: Vec<String>,
}

impl Answer {
    fn reply(message: impl Into<String>) -> Self {
        Self {
            sql: None,
            rows: None,
            messages: vec![message.into()],
        }
    }
}

/// The text-to-SQL pipeline and its collaborators.
#[derive(Clone)]
pub struct QueryPipeline {
    translator: Arc<dyn SqlTranslator>,
    engine: Arc<dyn QueryEngine>,
    options: RenderOptions,
    prefix: String,
}

impl QueryPipeline {
    /// Assemble a pipeline from explicit collaborators.
    pub fn new(translator: Arc<dyn SqlTranslator>, engine: Arc<dyn QueryEngine>) -> Self {
        Self {
            translator,
            engine,
            options: RenderOptions::default(),
            prefix: crate::config::DEFAULT_PREFIX.to_string(),
        }
    }

    /// Production pipeline: Anthropic translator and a lazy MySQL pool.
    ///
    /// A missing API key is not fatal; questions are then answered with the
    /// "could not generate" reply. Must be called inside a tokio runtime.
    pub fn from_config(config: &BotConfig) -> Result<Self> {
        let translator: Arc<dyn SqlTranslator> = match AnthropicTranslator::from_config(config) {
            Ok(t) => Arc::new(t),
            Err(BotError::Config { .. }) => {
                warn!("ANTHROPIC_API_KEY not set. NL-to-SQL translation will not work.");
                Arc::new(DisabledTranslator)
            }
            Err(e) => return Err(e),
        };
        let engine = Arc::new(MySqlEngine::connect_lazy(&config.database));

        Ok(Self::new(translator, engine)
            .options(config.render_options())
            .prefix(config.command_prefix.clone()))
    }

    /// Builder: set layout options
    pub fn options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Builder: set the command prefix used in usage hints
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Answer a natural-language question.
    pub async fn answer(&self, question: &str) -> Answer {
        let question = question.trim();
        if question.is_empty() {
            return Answer::reply(format!(
                "Please provide a question! Usage: `{} query <your question>`",
                self.prefix
            ));
        }

        info!("User question: {}", question);
        let sql = match self.translator.translate(question).await {
            Ok(sql) => sql,
            Err(e) => {
                error!("Error translating to SQL: {}", e);
                return Answer::reply(UNTRANSLATABLE_REPLY);
            }
        };
        info!("Generated SQL: {}", sql);

        let mut answer = self.run_sql(&sql).await;
        answer.sql = Some(sql);
        answer
    }

    /// Run SQL directly and render the rows.
    pub async fn run_sql(&self, sql: &str) -> Answer {
        let rows = execute_query(self.engine.as_ref(), sql).await;
        if rows.is_empty() {
            return Answer {
                sql: Some(sql.to_string()),
                rows: Some(rows),
                messages: vec![EMPTY_REPLY.to_string()],
            };
        }

        let rows = post_process(rows);
        let text = render_records(&rows, &self.options);
        Answer {
            sql: Some(sql.to_string()),
            messages: to_messages(&text),
            rows: Some(rows),
        }
    }

    /// Release the connection pool.
    pub async fn close(&self) {
        self.engine.close().await;
    }
}

impl std::fmt::Debug for QueryPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryPipeline")
            .field("options", &self.options)
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}
