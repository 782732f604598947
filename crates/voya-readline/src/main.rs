//! The main entry point for the voya terminal client.
//!
//! Sets up logging, loads configuration and the persistent identity,
//! fetches the initial history, then runs a rustyline REPL. Plain
//! input is submitted as a query; slash commands drive the history
//! panel and chat lifecycle.

use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::FileHistory;

use voya_application::ChatService;
use voya_core::backend::QnaBackend;
use voya_core::user::IdentityStore;
use voya_infrastructure::{ConfigService, FileIdentityStore, VoyaPaths};
use voya_interaction::QnaClient;

mod helper;
mod render;

use helper::CliHelper;

/// Routes log output to a daily-rolling file under the client's log
/// directory so the REPL stays clean. Returns the writer guard that
/// must stay alive for the duration of the program.
fn init_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let logs_dir = VoyaPaths::logs_dir().ok()?;
    let appender = tracing_appender::rolling::daily(logs_dir, "voya.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Some(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    let _guard = init_logging();

    // ===== Backend Initialization =====
    let base_url = ConfigService::new().base_url();
    let identity_store = FileIdentityStore::new()?;
    let user_id = identity_store.load_or_create()?;
    tracing::info!("Starting voya against {} as {}", base_url, user_id);

    let backend: Arc<dyn QnaBackend> = Arc::new(QnaClient::new(base_url));
    let mut service = ChatService::new(backend, user_id);

    // Initial history load; a failure degrades to the banner.
    service.refresh_history().await;

    // ===== REPL Setup =====
    let helper = CliHelper::new();
    let mut rl: Editor<CliHelper, FileHistory> = Editor::new()?;
    rl.set_helper(Some(helper));

    render::print_greeting();
    if let Some(message) = service.state().error() {
        render::print_error_banner(message);
    }

    // ===== Main REPL Loop =====
    loop {
        let readline = rl.readline(">> ");

        match readline {
            Ok(line) => {
                let trimmed = line.trim();

                if trimmed == "quit" || trimmed == "exit" {
                    println!("{}", "Goodbye!".bright_green());
                    break;
                }

                if trimmed.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(&line);

                if let Some(arg) = trimmed.strip_prefix("/load") {
                    handle_load(&mut service, arg.trim());
                    continue;
                }

                match trimmed {
                    "/help" => render::print_help(),
                    "/new" => {
                        service.start_new_chat();
                        println!("{}", "Started a new chat.".bright_green());
                        println!();
                    }
                    "/history" => render::print_history_panel(service.conversations()),
                    _ if trimmed.starts_with('/') => {
                        println!(
                            "{}",
                            "Unknown command. Type /help for the list.".bright_black()
                        );
                    }
                    _ => {
                        // Echo the query, then block on the submission;
                        // no second query can start while one is in flight.
                        println!("{}", format!("> {}", trimmed).green());
                        service.submit(trimmed).await;
                        render_outcome(&service);
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    Ok(())
}

/// Handles `/load <n>`: loads the n-th conversation from the panel
/// listing and re-renders the whole thread.
fn handle_load(service: &mut ChatService, arg: &str) {
    match arg.parse::<usize>() {
        Ok(number) if number >= 1 => match service.load_conversation(number - 1) {
            Some(title) => {
                println!("{}", format!("Loaded conversation: {}", title).bright_green());
                println!();
                render::print_conversation(service.state().exchanges());
            }
            None => println!(
                "{}",
                "No conversation with that number. Type /history to list them.".yellow()
            ),
        },
        _ => println!("{}", "Usage: /load <number>".yellow()),
    }
}

/// Prints the outcome of a submission: the latest answer (or failure
/// marker) and the error banner, if raised.
fn render_outcome(service: &ChatService) {
    if let Some(exchange) = service.state().exchanges().last() {
        render::print_answer(exchange);
    }
    if let Some(message) = service.state().error() {
        render::print_error_banner(message);
    }
}
