//! # wcabot
//!
//! Ask questions about World Cube Association results in plain English.
//!
//! ## Overview
//!
//! wcabot is built on top of wcabotlib. A question is translated to SQL by an
//! LLM, run against a MySQL copy of the WCA results export, and the rows come
//! back as a fixed-width table split into chat-sized messages.
//!
//! ## Usage
//!
//! ```bash
//! # Ask a question (the default command)
//! wcabot What is the world record for 3x3?
//! wcabot ask Who has the most world records?
//!
//! # Run SQL directly
//! wcabot sql "SELECT name, country_id FROM persons LIMIT 5"
//!
//! # Render rows from a JSON array of objects, no network needed
//! wcabot render rows.json --max-rows 10
//! cat rows.json | wcabot render -
//!
//! # Console chat: lines on stdin are chat messages
//! wcabot chat
//!
//! # Verify configuration
//! wcabot check --translate
//!
//! # Output as JSON
//! wcabot ask --output json Fastest 2x2 single
//! ```
//!
//! Configuration comes from the environment and an optional `.env` file:
//! `ANTHROPIC_API_KEY`, `ANTHROPIC_MODEL`, `DB_HOST`, `DB_PORT`, `DB_USER`,
//! `DB_PASSWORD`, `DB_NAME`, `COMMAND_PREFIX`, `MAX_QUERY_RESULTS`.

mod logging;
mod render;

use std::io::Read;
use std::process::ExitCode;

use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use outstanding::cli::{App, CommandContext, HandlerResult, Output, RunResult};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;
use wcabotlib::chat::THINKING_MESSAGE;
use wcabotlib::{
    execution_error, post_process, render_records, AnthropicTranslator, BotConfig, ChatBot,
    QueryPipeline, Record, RenderOptions, ResultSet, SqlTranslator,
};

use crate::render::{
    answer_json, config_lines, create_theme, table_json, AnswerContext, CheckContext, CheckLine,
    TableContext, ANSWER_TEMPLATE, CHECK_TEMPLATE, TABLE_TEMPLATE,
};

/// Questions tried by `check --translate`
const SAMPLE_QUESTIONS: &[&str] = &[
    "What is the world record for 3x3?",
    "Show me the top 5 rankings for 2x2",
    "Who has the best average for Megaminx?",
];

/// Author name the console transport reports for every message
const CONSOLE_AUTHOR: &str = "console";

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("wcabot")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Arthur Debert")
        .about("Ask WCA statistics questions in plain English")
        .args_conflicts_with_subcommands(true)
        .arg(
            Arg::new("question")
                .help("Question to answer (same as `wcabot ask`)")
                .num_args(0..)
                .trailing_var_arg(true),
        )
        .subcommand(
            Command::new("ask")
                .about("Answer a question with a results table (default command)")
                .arg(
                    Arg::new("question")
                        .help("The question, in plain English")
                        .required(true)
                        .num_args(1..)
                        .trailing_var_arg(true),
                ),
        )
        .subcommand(
            Command::new("sql")
                .about("Run a SQL statement and show the results table")
                .arg(
                    Arg::new("statement")
                        .help("SQL to run against the WCA database")
                        .required(true)
                        .num_args(1..)
                        .trailing_var_arg(true),
                ),
        )
        .subcommand(
            Command::new("render")
                .about("Render a JSON array of result rows as a table")
                .arg(
                    Arg::new("file")
                        .help("JSON file to read ('-' for stdin)")
                        .default_value("-"),
                )
                .arg(
                    Arg::new("max-rows")
                        .short('n')
                        .long("max-rows")
                        .value_parser(value_parser!(usize))
                        .default_value("50")
                        .help("Rows to show before the \"more results\" notice"),
                )
                .arg(
                    Arg::new("raw")
                        .long("raw")
                        .action(ArgAction::SetTrue)
                        .help("Skip time and name formatting"),
                ),
        )
        .subcommand(
            Command::new("chat")
                .about("Console chat: read messages from stdin, answer prefixed commands"),
        )
        .subcommand(
            Command::new("check")
                .about("Verify configuration")
                .arg(
                    Arg::new("translate")
                        .long("translate")
                        .action(ArgAction::SetTrue)
                        .help("Also translate a few sample questions"),
                ),
        )
}

/// Join a multi-word positional argument
fn joined(matches: &ArgMatches, id: &str) -> String {
    matches
        .get_many::<String>(id)
        .map(|words| words.map(String::as_str).collect::<Vec<_>>().join(" "))
        .unwrap_or_default()
}

fn runtime() -> std::io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
}

/// Turn the one-record error set into a command failure, so every command
/// that runs a query exits non-zero when execution failed.
fn fail_on_execution_error(rows: &[Record]) -> anyhow::Result<()> {
    match execution_error(rows) {
        Some(message) => Err(anyhow::anyhow!(message)),
        None => Ok(()),
    }
}

/// Handler for ask command
fn ask_handler(matches: &ArgMatches, ctx: &CommandContext) -> HandlerResult<serde_json::Value> {
    let question = joined(matches, "question");
    let config = BotConfig::from_env()?;

    let answer = runtime()?.block_on(async {
        let pipeline = QueryPipeline::from_config(&config)?;
        let answer = pipeline.answer(&question).await;
        pipeline.close().await;
        Ok::<_, wcabotlib::BotError>(answer)
    })?;
    fail_on_execution_error(answer.rows.as_deref().unwrap_or_default())?;

    if ctx.output_mode.is_structured() {
        return Ok(Output::Render(answer_json(Some(question.as_str()), &answer)));
    }
    Ok(Output::Render(serde_json::to_value(
        AnswerContext::from_answer(answer),
    )?))
}

/// Handler for sql command
fn sql_handler(matches: &ArgMatches, ctx: &CommandContext) -> HandlerResult<serde_json::Value> {
    let sql = joined(matches, "statement");
    let config = BotConfig::from_env()?;

    let answer = runtime()?.block_on(async {
        let pipeline = QueryPipeline::from_config(&config)?;
        let answer = pipeline.run_sql(&sql).await;
        pipeline.close().await;
        Ok::<_, wcabotlib::BotError>(answer)
    })?;
    fail_on_execution_error(answer.rows.as_deref().unwrap_or_default())?;

    if ctx.output_mode.is_structured() {
        return Ok(Output::Render(answer_json(None, &answer)));
    }
    Ok(Output::Render(serde_json::to_value(
        AnswerContext::from_answer(answer),
    )?))
}

/// Read a JSON result set from a file or stdin
fn read_rows(path: &str) -> anyhow::Result<ResultSet> {
    let input = if path == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        buf
    } else {
        std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path))?
    };

    serde_json::from_str(&input).with_context(|| format!("{} is not a JSON array of objects", path))
}

/// Handler for render command
fn render_handler(matches: &ArgMatches, ctx: &CommandContext) -> HandlerResult<serde_json::Value> {
    let path = matches
        .get_one::<String>("file")
        .map(|s| s.as_str())
        .unwrap_or("-");
    let max_rows = matches.get_one::<usize>("max-rows").copied().unwrap_or(50);

    let mut rows = read_rows(path)?;
    if !matches.get_flag("raw") {
        rows = post_process(rows);
    }
    fail_on_execution_error(&rows)?;
    let text = render_records(&rows, &RenderOptions::new().max_rows(max_rows));

    if ctx.output_mode.is_structured() {
        return Ok(Output::Render(table_json(&rows, &text)));
    }
    Ok(Output::Render(serde_json::to_value(TableContext::new(
        &text,
    ))?))
}

async fn send<W: AsyncWriteExt + Unpin>(out: &mut W, message: &str) -> std::io::Result<()> {
    out.write_all(message.as_bytes()).await?;
    out.write_all(b"\n").await?;
    out.flush().await
}

/// Console chat transport: one chat message per stdin line.
async fn chat_loop(config: BotConfig) -> anyhow::Result<()> {
    let pipeline = QueryPipeline::from_config(&config)?;
    let bot = ChatBot::new(pipeline, config.command_prefix.clone());
    info!("Bot is ready, listening on stdin with prefix {}", bot.prefix());

    let mut out = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                send(&mut out, &format!("❌ An error occurred: {}", e)).await?;
                break;
            }
        };

        if bot.command(&line).is_some_and(|command| command.is_query()) {
            send(&mut out, THINKING_MESSAGE).await?;
        }
        if let Some(reply) = bot.respond(CONSOLE_AUTHOR, &line).await {
            for message in reply {
                send(&mut out, &message).await?;
            }
        }
    }

    bot.shutdown().await;
    info!("Bot shut down");
    Ok(())
}

/// Handler for chat command
fn chat_handler(_matches: &ArgMatches, _ctx: &CommandContext) -> HandlerResult<serde_json::Value> {
    let config = BotConfig::from_env()?;
    runtime()?.block_on(chat_loop(config))?;
    Ok(Output::Silent)
}

/// Translate the sample questions, one report line each
async fn translation_lines(config: &BotConfig) -> Vec<CheckLine> {
    let translator = match AnthropicTranslator::from_config(config) {
        Ok(translator) => translator,
        Err(e) => return vec![CheckLine::fail("Anthropic client not initialized", e.to_string())],
    };

    let mut lines = Vec::with_capacity(SAMPLE_QUESTIONS.len());
    for question in SAMPLE_QUESTIONS {
        let line = match translator.translate(question).await {
            Ok(sql) => CheckLine::ok(*question, sql),
            Err(e) => CheckLine::fail(*question, format!("Error: {}", e)),
        };
        lines.push(line);
    }
    lines
}

/// Handler for check command
fn check_handler(matches: &ArgMatches, ctx: &CommandContext) -> HandlerResult<serde_json::Value> {
    let config = BotConfig::from_env()?;

    let translations = if matches.get_flag("translate") {
        runtime()?.block_on(translation_lines(&config))
    } else {
        Vec::new()
    };
    let report = CheckContext::new(config_lines(&config), translations);

    if ctx.output_mode.is_structured() {
        return Ok(Output::Render(serde_json::json!({
            "config": config,
            "report": report,
        })));
    }
    Ok(Output::Render(serde_json::to_value(&report)?))
}

fn main() -> ExitCode {
    logging::init_logging();

    let cmd = build_command();
    let theme = create_theme();

    // Build the outstanding app with command handlers and run
    let result = App::builder()
        .theme(theme)
        .command("ask", ask_handler, ANSWER_TEMPLATE)
        .command("sql", sql_handler, ANSWER_TEMPLATE)
        .command("render", render_handler, TABLE_TEMPLATE)
        .command("chat", chat_handler, "")
        .command("check", check_handler, CHECK_TEMPLATE)
        .run_to_string(cmd, std::env::args());

    match result {
        RunResult::Handled(output) => {
            if !output.is_empty() {
                // Handler errors come back as text
                if output.starts_with("Error:") {
                    eprintln!("{}", output);
                    return ExitCode::FAILURE;
                }
                print!("{}", output);
            }
            ExitCode::SUCCESS
        }
        RunResult::Binary(_, _) => ExitCode::SUCCESS,
        RunResult::NoMatch(matches) => {
            // Root command (no subcommand) - treat as ask
            if matches.get_many::<String>("question").is_none() {
                let mut cmd = build_command();
                return match cmd.print_help() {
                    Ok(()) => ExitCode::SUCCESS,
                    Err(_) => ExitCode::FAILURE,
                };
            }

            let output_mode = matches
                .get_one::<String>("_output_mode")
                .map(|s| match s.as_str() {
                    "json" => outstanding::OutputMode::Json,
                    "text" => outstanding::OutputMode::Text,
                    "term-debug" => outstanding::OutputMode::TermDebug,
                    "term" => outstanding::OutputMode::Term,
                    _ => outstanding::OutputMode::Auto,
                })
                .unwrap_or(outstanding::OutputMode::Auto);

            let ctx = CommandContext {
                output_mode,
                command_path: vec![],
            };

            match ask_handler(&matches, &ctx) {
                Ok(Output::Render(value)) => {
                    if output_mode.is_structured() {
                        println!(
                            "{}",
                            serde_json::to_string_pretty(&value).unwrap_or_default()
                        );
                    } else {
                        let theme = create_theme();
                        match outstanding::render(ANSWER_TEMPLATE, &value, &theme) {
                            Ok(output) => print!("{}", output),
                            Err(e) => {
                                eprintln!("Error: {e}");
                                return ExitCode::FAILURE;
                            }
                        }
                    }
                    ExitCode::SUCCESS
                }
                Ok(Output::Silent) => ExitCode::SUCCESS,
                Ok(Output::Binary { .. }) => ExitCode::SUCCESS,
                Err(e) => {
                    logging::report_failure("ask", &e);
                    eprintln!("Error: {e}");
                    ExitCode::FAILURE
                }
            }
        }
    }
}
