//! # wcabotlib
//!
//! Answer plain-English questions about World Cube Association results with
//! SQL, and lay the answer out as a fixed-width text table for chat.
//!
//! ## Overview
//!
//! A question goes through four stages:
//!
//! 1. **Translate**: an LLM turns the question into SQL against the WCA export
//! 2. **Execute**: the SQL runs on MySQL; rows come back as ordered records
//! 3. **Post-process**: centisecond times become `12.34s` / `1:02.03` / `DNF`,
//!    competitor names lose native-script annotations and become ASCII
//! 4. **Render**: a `Results:` table padded by terminal display width, split
//!    into fenced messages that fit the chat transport
//!
//! The formatting core (stages 3 and 4) is pure and synchronous. Translation
//! and execution sit behind the `SqlTranslator` and `QueryEngine` traits so
//! they can be swapped or mocked.
//!
//! ## Example
//!
//! ```rust
//! use wcabotlib::{post_process, render_table, Record};
//!
//! let rows = vec![
//!     Record::new().with("name", "Max Park").with("best", 4690),
//!     Record::new().with("name", "Tymon Kolasiński").with("best", 4899),
//! ];
//! let text = render_table(&post_process(rows), 10);
//!
//! assert!(text.contains("Tymon Kolasinski | 48.99s"));
//! ```

pub mod chat;
pub mod config;
pub mod data;
pub mod error;
pub mod format;
pub mod output;
pub mod query;

pub use chat::{parse_command, BotCommand, ChatBot};
pub use config::{BotConfig, DatabaseConfig};
pub use data::{CellValue, Record, ResultSet};
pub use error::BotError;
pub use format::{display_width, format_duration, normalize_name};
pub use output::{
    execution_error, render_records, render_table, to_messages, RenderOptions, ResultTable,
};
pub use query::{
    post_process, AnthropicTranslator, Answer, MySqlEngine, QueryEngine, QueryPipeline,
    SqlTranslator,
};

/// Result type for wcabotlib operations
pub type Result<T> = std::result::Result<T, BotError>;
