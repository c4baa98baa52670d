//! Main chat loop orchestration.
//!
//! Shows the banner and greeting, offers starter questions until the first
//! message goes out, then reads lines until the user exits. Every send goes
//! through `ChatSession`, which owns the log and the busy flag.

use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

use folio_core::chat::session::{IgnoreReason, SendOutcome};

use crate::cli::remote::history_table;
use crate::state::AppState;

use super::banner::print_welcome_banner;
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};
use super::renderer::ChatRenderer;

/// Run the interactive chat loop.
///
/// With `fresh`, the stored session is replaced before the banner is shown.
pub async fn run_chat_loop(state: &AppState, fresh: bool) -> anyhow::Result<()> {
    let session = &state.session;
    if fresh {
        session.reset().await;
    }

    let event_logger = spawn_event_logger(state);

    let snapshot = session.snapshot().await;
    print_welcome_banner(&state.config.api_url, snapshot.session_id.short());
    info!(session_id = %snapshot.session_id, "Chat session started");

    let renderer = ChatRenderer::new();
    for message in &snapshot.messages {
        renderer.print_message(message);
    }

    // Starter questions stay on offer until the first message goes out.
    let mut offer_suggestions = snapshot.messages.len() <= 1;
    if offer_suggestions {
        renderer.print_suggestions(session.suggested_questions());
    }

    let prompt = format!("  {} ", style("You >").green().bold());
    let (mut chat_input, _writer) = ChatInput::new(prompt)
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    loop {
        let text = match chat_input.read_line().await {
            InputEvent::Eof => {
                println!("\n  {}", style("Session ended.").dim());
                break;
            }
            InputEvent::Interrupted => {
                println!("  {}", style("Press Ctrl+D or type /exit to quit.").dim());
                continue;
            }
            InputEvent::Message(text) if text.is_empty() => continue,
            InputEvent::Message(text) => text,
        };

        let question = if let Some(command) = commands::parse(&text) {
            match command {
                ChatCommand::Help => {
                    commands::print_help();
                    continue;
                }
                ChatCommand::Clear => {
                    chat_input.clear();
                    continue;
                }
                ChatCommand::Exit => {
                    println!("\n  {}", style("Session ended.").dim());
                    break;
                }
                ChatCommand::New => {
                    let snapshot = session.reset().await;
                    println!();
                    println!(
                        "  {} New session {}",
                        style("✓").green().bold(),
                        style(snapshot.session_id.short()).cyan()
                    );
                    for message in &snapshot.messages {
                        renderer.print_message(message);
                    }
                    offer_suggestions = true;
                    renderer.print_suggestions(session.suggested_questions());
                    continue;
                }
                ChatCommand::History => {
                    println!();
                    for message in session.messages().await {
                        renderer.print_message(&message);
                    }
                    continue;
                }
                ChatCommand::Remote => {
                    print_remote_history(state).await;
                    continue;
                }
                ChatCommand::Suggest(None) => {
                    println!();
                    renderer.print_suggestions(session.suggested_questions());
                    continue;
                }
                ChatCommand::Suggest(Some(index)) => {
                    match pick_suggestion(session.suggested_questions(), index) {
                        Some(question) => question,
                        None => {
                            println!(
                                "  {} There is no suggestion number {index}.",
                                style("!").yellow().bold()
                            );
                            continue;
                        }
                    }
                }
                ChatCommand::Unknown(cmd) => {
                    println!(
                        "  {} Unknown command: {}. Type /help for available commands.",
                        style("?").yellow().bold(),
                        cmd
                    );
                    continue;
                }
            }
        } else if offer_suggestions {
            text.parse::<usize>()
                .ok()
                .and_then(|index| pick_suggestion(session.suggested_questions(), index))
                .unwrap_or_else(|| text.clone())
        } else {
            text.clone()
        };

        // Picked suggestions are echoed; typed text is already on screen.
        if question != text {
            println!("  {} {}", style("You >").green().bold(), question);
        }

        let outcome = send_with_spinner(state, &question).await;
        if !matches!(outcome, SendOutcome::Ignored(_)) {
            offer_suggestions = false;
        }
        render_outcome(&renderer, &outcome);
    }

    chat_input.flush();
    event_logger.abort();
    info!(session_id = %session.session_id().await, "Chat session closed");
    Ok(())
}

/// Resolve a 1-based suggestion index.
fn pick_suggestion(questions: &[String], index: usize) -> Option<String> {
    index
        .checked_sub(1)
        .and_then(|i| questions.get(i))
        .cloned()
}

async fn send_with_spinner(state: &AppState, question: &str) -> SendOutcome {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("thinking...");
    spinner.enable_steady_tick(Duration::from_millis(80));

    let outcome = state.session.send(question).await;
    spinner.finish_and_clear();
    outcome
}

fn render_outcome(renderer: &ChatRenderer, outcome: &SendOutcome) {
    match outcome {
        SendOutcome::Replied(reply) => renderer.print_message(reply),
        SendOutcome::Failed { notice, .. } => {
            renderer.print_message(notice);
            println!(
                "  {}",
                style("Type a message to retry, /exit to quit.").dim()
            );
            println!();
        }
        SendOutcome::Ignored(IgnoreReason::EmptyInput) => {}
        SendOutcome::Ignored(IgnoreReason::Busy) => {
            println!(
                "  {} Still waiting for the previous answer.",
                style("!").yellow().bold()
            );
        }
        SendOutcome::Stale => {
            println!(
                "  {}",
                style("The conversation was reset before the answer arrived.").dim()
            );
        }
    }
}

async fn print_remote_history(state: &AppState) {
    let session_id = state.session.session_id().await;
    match state.session.endpoint().history(&session_id).await {
        Ok(entries) if entries.is_empty() => {
            println!(
                "\n  {} The server has no messages for this session yet.\n",
                style("i").blue().bold()
            );
        }
        Ok(entries) => {
            println!();
            println!("{}", history_table(&entries));
            println!();
        }
        Err(e) => {
            warn!(error = %e, "Failed to fetch remote history");
            println!(
                "\n  {} Could not load history: {}\n",
                style("!").red().bold(),
                e.user_message()
            );
        }
    }
}

/// Log every session event at debug level for the life of the loop.
fn spawn_event_logger(state: &AppState) -> tokio::task::JoinHandle<()> {
    let mut events = state.session.subscribe();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => debug!(?event, "Session event"),
                Err(RecvError::Lagged(skipped)) => {
                    debug!(skipped, "Session event logger lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn questions() -> Vec<String> {
        vec!["First?".to_string(), "Second?".to_string()]
    }

    #[test]
    fn test_pick_suggestion_is_one_based() {
        assert_eq!(pick_suggestion(&questions(), 1).as_deref(), Some("First?"));
        assert_eq!(pick_suggestion(&questions(), 2).as_deref(), Some("Second?"));
    }

    #[test]
    fn test_pick_suggestion_out_of_range() {
        assert_eq!(pick_suggestion(&questions(), 0), None);
        assert_eq!(pick_suggestion(&questions(), 3), None);
        assert_eq!(pick_suggestion(&[], 1), None);
    }
}
