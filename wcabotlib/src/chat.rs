//! Chat command routing.
//!
//! The chat platform is external; whatever transport delivers messages hands
//! their text to [`ChatBot::respond`] and sends back the returned messages in
//! order. Messages that do not start with the command prefix, and unknown
//! commands, get no reply at all.

use std::time::Instant;

use tracing::info;

use crate::query::QueryPipeline;

/// Shown by the transport while a question is being answered.
pub const THINKING_MESSAGE: &str = "🤔 Processing your question...";

/// Reply to a query command without a question.
pub const MISSING_QUESTION: &str = "Missing required argument: question";

/// A recognized chat command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotCommand {
    /// `query`, `q` or `ask` followed by the question (may be empty)
    Query(String),
    /// `help` or `h`
    Help,
    /// `ping`
    Ping,
}

impl BotCommand {
    /// Whether answering this command goes through the query pipeline.
    /// A query without a question is answered directly.
    pub fn is_query(&self) -> bool {
        matches!(self, BotCommand::Query(question) if !question.is_empty())
    }
}

/// Parse a chat message addressed to the bot.
///
/// ```rust
/// use wcabotlib::chat::{parse_command, BotCommand};
///
/// assert_eq!(
///     parse_command("!wca", "!wca q top 5 2x2"),
///     Some(BotCommand::Query("top 5 2x2".to_string()))
/// );
/// assert_eq!(parse_command("!wca", "hello"), None);
/// ```
pub fn parse_command(prefix: &str, content: &str) -> Option<BotCommand> {
    let rest = content.strip_prefix(prefix)?.trim_start();
    let (name, args) = match rest.find(char::is_whitespace) {
        Some(at) => (&rest[..at], rest[at..].trim()),
        None => (rest, ""),
    };

    match name {
        "query" | "q" | "ask" => Some(BotCommand::Query(args.to_string())),
        "help" | "h" => Some(BotCommand::Help),
        "ping" => Some(BotCommand::Ping),
        _ => None,
    }
}

/// Help text listing commands and example questions.
pub fn help_text(prefix: &str) -> String {
    format!(
        "**WCA Statistics Bot Help**\n\
         \n\
         **Commands:**\n\
         `{p} query <question>` - Ask a question about WCA statistics\n\
         \x20 Examples:\n\
         \x20   - `{p} query What is the world record for 3x3?`\n\
         \x20   - `{p} query Who has the most world records?`\n\
         \x20   - `{p} query Show me the top 10 fastest times for 2x2`\n\
         \n\
         `{p} help` - Show this help message\n\
         \n\
         **Tips:**\n\
         - Be specific in your questions\n\
         - You can ask about records, rankings, competitions, and more\n\
         - The bot translates your question to SQL and queries the WCA database",
        p = prefix
    )
}

/// Routes chat messages to the pipeline.
#[derive(Debug, Clone)]
pub struct ChatBot {
    pipeline: QueryPipeline,
    prefix: String,
}

impl ChatBot {
    pub fn new(pipeline: QueryPipeline, prefix: impl Into<String>) -> Self {
        Self {
            pipeline,
            prefix: prefix.into(),
        }
    }

    /// The command prefix this bot answers to.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Parse a message without answering it.
    pub fn command(&self, content: &str) -> Option<BotCommand> {
        parse_command(&self.prefix, content)
    }

    /// Answer one message. `None` means the message is not for the bot.
    pub async fn respond(&self, author: &str, content: &str) -> Option<Vec<String>> {
        let received = Instant::now();
        let preview: String = content.chars().take(50).collect();
        info!("Message received from {}: {}", author, preview);

        let command = self.command(content)?;
        let reply = match command {
            BotCommand::Query(question) if question.is_empty() => {
                vec![MISSING_QUESTION.to_string()]
            }
            BotCommand::Query(question) => {
                info!(
                    "Query command invoked by {} with question: {}",
                    author, question
                );
                self.pipeline.answer(&question).await.messages
            }
            BotCommand::Help => vec![help_text(&self.prefix)],
            BotCommand::Ping => {
                info!("Ping command invoked by {}", author);
                vec![format!(
                    "Pong! Latency: {}ms",
                    received.elapsed().as_millis()
                )]
            }
        };
        Some(reply)
    }

    /// Release pipeline resources.
    pub async fn shutdown(&self) {
        self.pipeline.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_aliases() {
        for alias in ["query", "q", "ask"] {
            let message = format!("!wca {} fastest 3x3 single", alias);
            assert_eq!(
                parse_command("!wca", &message),
                Some(BotCommand::Query("fastest 3x3 single".to_string()))
            );
        }
    }

    #[test]
    fn test_query_without_question() {
        assert_eq!(
            parse_command("!wca", "!wca query"),
            Some(BotCommand::Query(String::new()))
        );
        assert_eq!(
            parse_command("!wca", "!wca query    "),
            Some(BotCommand::Query(String::new()))
        );
    }

    #[test]
    fn test_only_real_questions_reach_the_pipeline() {
        assert!(BotCommand::Query("top 5 2x2".to_string()).is_query());
        assert!(!BotCommand::Query(String::new()).is_query());
        assert!(!BotCommand::Help.is_query());
        assert!(!BotCommand::Ping.is_query());
    }

    #[test]
    fn test_help_and_ping() {
        assert_eq!(parse_command("!wca", "!wca help"), Some(BotCommand::Help));
        assert_eq!(parse_command("!wca", "!wca h"), Some(BotCommand::Help));
        assert_eq!(parse_command("!wca", "!wca ping"), Some(BotCommand::Ping));
    }

    #[test]
    fn test_ignored_messages() {
        assert_eq!(parse_command("!wca", "what is the 3x3 record?"), None);
        assert_eq!(parse_command("!wca", "!wca dance"), None);
        assert_eq!(parse_command("!wca", "!wca"), None);
        assert_eq!(parse_command("!wca", "!WCA help"), None);
    }

    #[test]
    fn test_multiline_question_kept() {
        assert_eq!(
            parse_command("?", "?ask top 3\nfor 4x4"),
            Some(BotCommand::Query("top 3\nfor 4x4".to_string()))
        );
    }

    #[test]
    fn test_help_text_uses_prefix() {
        let text = help_text("?cube");
        assert!(text.contains("`?cube query <question>`"));
        assert!(text.contains("`?cube help`"));
    }
}
