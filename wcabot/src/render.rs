//! Template contexts and theme for CLI output

use console::Style;
use outstanding::Theme;
use serde::Serialize;
use serde_json::json;
use wcabotlib::config::mask_secret;
use wcabotlib::{Answer, BotConfig, ResultSet};

/// Include templates at compile time
pub const ANSWER_TEMPLATE: &str = include_str!("../templates/answer.jinja");
pub const TABLE_TEMPLATE: &str = include_str!("../templates/table.jinja");
pub const CHECK_TEMPLATE: &str = include_str!("../templates/check.jinja");

/// Data context for the answer template
#[derive(Debug, Serialize)]
pub struct AnswerContext {
    /// SQL that produced the rows, shown above the messages
    pub sql: Option<String>,
    /// Chat messages, already fenced
    pub messages: Vec<String>,
}

impl AnswerContext {
    pub fn from_answer(answer: Answer) -> Self {
        Self {
            sql: answer.sql,
            messages: answer.messages,
        }
    }
}

/// Structured form of an answer for `--output json`.
pub fn answer_json(question: Option<&str>, answer: &Answer) -> serde_json::Value {
    json!({
        "question": question,
        "sql": answer.sql,
        "rows": answer.rows,
        "messages": answer.messages,
    })
}

/// Data context for the table template: the rendered block, line by line
#[derive(Debug, Serialize)]
pub struct TableContext {
    pub lines: Vec<String>,
}

impl TableContext {
    pub fn new(text: &str) -> Self {
        Self {
            lines: text.split('\n').map(str::to_string).collect(),
        }
    }
}

/// Structured form of a rendered result set.
pub fn table_json(rows: &ResultSet, text: &str) -> serde_json::Value {
    json!({
        "rows": rows,
        "text": text,
    })
}

/// One `[OK]` / `[FAIL]` line of the setup report
#[derive(Debug, Serialize)]
pub struct CheckLine {
    pub ok: bool,
    pub status: &'static str,
    pub label: String,
    pub value: String,
}

impl CheckLine {
    pub fn ok(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            ok: true,
            status: "[OK]",
            label: label.into(),
            value: value.into(),
        }
    }

    pub fn fail(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            ok: false,
            status: "[FAIL]",
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Data context for the setup report
#[derive(Debug, Serialize)]
pub struct CheckContext {
    pub rule: String,
    pub settings: Vec<CheckLine>,
    pub translations: Vec<CheckLine>,
    pub all_ok: bool,
}

impl CheckContext {
    pub fn new(settings: Vec<CheckLine>, translations: Vec<CheckLine>) -> Self {
        let all_ok = settings.iter().chain(&translations).all(|line| line.ok);
        Self {
            rule: "=".repeat(60),
            settings,
            translations,
            all_ok,
        }
    }
}

/// Configuration lines of the setup report. Secrets are masked.
pub fn config_lines(config: &BotConfig) -> Vec<CheckLine> {
    let key = match &config.anthropic_api_key {
        Some(key) => CheckLine::ok("Anthropic API Key", mask_secret(key)),
        None => CheckLine::fail("Anthropic API Key", "NOT SET"),
    };
    let db = &config.database;
    let password = if db.password.is_empty() {
        "(empty)".to_string()
    } else {
        mask_secret(&db.password)
    };

    vec![
        key,
        CheckLine::ok("Anthropic Model", &config.anthropic_model),
        CheckLine::ok("Anthropic Base URL", &config.anthropic_base_url),
        CheckLine::ok(
            "Database",
            format!("{}@{}:{}/{}", db.user, db.host, db.port, db.name),
        ),
        CheckLine::ok("Database Password", password),
        CheckLine::ok("Command Prefix", &config.command_prefix),
        CheckLine::ok("Max Query Results", config.max_query_results.to_string()),
    ]
}

/// Create the theme with styles
pub fn create_theme() -> Theme {
    Theme::new()
        .add("title", Style::new().bold())
        .add("sql", Style::new().cyan())
        .add("ok", Style::new().green())
        .add("fail", Style::new().red().bold())
}
