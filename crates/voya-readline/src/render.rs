//! Terminal rendering of conversations, answers, and the history panel.
//!
//! The service answers in Markdown (section titles in bold, bullet
//! lists); rendering styles those line-wise rather than running a full
//! Markdown engine.

use chrono::{DateTime, NaiveDateTime};
use colored::Colorize;

use voya_core::chat::{ChatExchange, ExchangeStatus};
use voya_core::conversation::Conversation;

pub fn print_greeting() {
    println!("{}", "=== Voya ===".bright_magenta().bold());
    println!(
        "{}",
        "Ask anything about travel documents. Type /help for commands, 'quit' to exit."
            .bright_black()
    );
    println!();
}

pub fn print_help() {
    println!("{}", "Commands:".bold());
    println!("  {}     list past conversations", "/history".bright_cyan());
    println!("  {}    load conversation <n> from the list", "/load <n>".bright_cyan());
    println!("  {}         start a new chat", "/new".bright_cyan());
    println!("  {}        show this help", "/help".bright_cyan());
    println!("  {}         leave voya", "quit".bright_cyan());
}

/// Prints a full exchange: the query line followed by its answer.
pub fn print_exchange(exchange: &ChatExchange) {
    println!("{}", format!("> {}", exchange.query).green());
    print_answer(exchange);
}

/// Prints only the answer part of an exchange.
pub fn print_answer(exchange: &ChatExchange) {
    match &exchange.status {
        ExchangeStatus::Pending => {
            println!("{}", "Loading...".bright_black());
        }
        ExchangeStatus::Answered(text) => {
            for line in text.lines() {
                print_answer_line(line);
            }
        }
        ExchangeStatus::Failed(message) => {
            println!("{}", format!("✗ {}", message).red());
        }
    }
    println!();
}

/// Prints all exchanges of the active conversation, oldest first.
pub fn print_conversation(exchanges: &[ChatExchange]) {
    if exchanges.is_empty() {
        println!("{}", "Start by asking a question ...".bright_black());
        println!();
        return;
    }
    for exchange in exchanges {
        print_exchange(exchange);
    }
}

pub fn print_error_banner(message: &str) {
    println!("{} {}", "Error:".red().bold(), message.red());
    println!();
}

/// Prints the history panel: one numbered row per conversation.
pub fn print_history_panel(conversations: &[Conversation]) {
    println!("{}", "Query History".bold());
    if conversations.is_empty() {
        println!("{}", "No history found.".bright_black());
        println!();
        return;
    }
    for (index, conversation) in conversations.iter().enumerate() {
        let when = conversation
            .latest_activity()
            .map(format_timestamp)
            .unwrap_or_default();
        let count = if conversation.len() == 1 {
            "1 message".to_string()
        } else {
            format!("{} messages", conversation.len())
        };
        println!("  {} {}", format!("{}.", index + 1).bright_cyan(), conversation.title.bold());
        println!("     {}", format!("{} · {}", when, count).bright_black());
    }
    println!("{}", "Type /load <n> to open a conversation.".bright_black());
    println!();
}

/// Styles a single Markdown line of an answer.
fn print_answer_line(line: &str) {
    let trimmed = line.trim_start();
    if trimmed.starts_with('#') {
        let heading = trimmed.trim_start_matches('#').trim_start();
        println!("{}", heading.bright_blue().bold());
    } else if trimmed.starts_with("**") && trimmed.trim_end().ends_with("**") {
        // Section titles like **Passport Requirements:**
        println!("{}", line.replace("**", "").bright_blue().bold());
    } else if trimmed.starts_with("- ") {
        let indent = &line[..line.len() - trimmed.len()];
        println!("{}{} {}", indent, "•".bright_cyan(), trimmed[2..].bright_blue());
    } else {
        println!("{}", line.bright_blue());
    }
}

/// Formats an ISO 8601 timestamp for the panel; unparseable values are
/// shown as-is.
fn format_timestamp(raw: &str) -> String {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.format("%Y-%m-%d %H:%M").to_string();
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return parsed.format("%Y-%m-%d %H:%M").to_string();
    }
    raw.to_string()
}
