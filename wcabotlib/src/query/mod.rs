//! Query processing: translate, execute and format.
//!
//! This module handles the middle of the pipeline - getting from a question
//! to formatted rows. It provides:
//!
//! - **Translation**: `SqlTranslator` and the Anthropic-backed implementation
//! - **Execution**: `QueryEngine` and the MySQL-backed implementation
//! - **Post-processing**: Time and name formatting by column name
//! - **Pipeline**: `QueryPipeline`, which ties the stages together
//!
//! ## Example
//!
//! ```rust,ignore
//! use wcabotlib::{BotConfig, QueryPipeline};
//!
//! let pipeline = QueryPipeline::from_config(&BotConfig::from_env()?)?;
//! let answer = pipeline.answer("What is the world record for 3x3?").await;
//! for message in answer.messages {
//!     println!("{}", message);
//! }
//! ```

pub mod engine;
pub mod pipeline;
pub mod postprocess;
pub mod prompt;
pub mod translate;

pub use engine::{execute_query, MySqlEngine, QueryEngine};
pub use pipeline::{Answer, QueryPipeline, EMPTY_REPLY, UNTRANSLATABLE_REPLY};
pub use postprocess::{post_process, process_cell, process_record};
pub use translate::{clean_sql_response, AnthropicTranslator, SqlTranslator};
