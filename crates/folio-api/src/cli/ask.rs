//! One-shot question: send a single message and print the reply.

use anyhow::{Result, bail};
use console::style;

use folio_core::chat::session::{IgnoreReason, SendOutcome};

use crate::cli::chat::renderer::ChatRenderer;
use crate::cli::format::print_json;
use crate::state::AppState;

/// Send `message` through the stored session and print the assistant's answer.
///
/// Exits with an error when the request fails so scripts can detect it.
///
/// # Examples
///
/// ```bash
/// folio ask "What projects has Alex built?"
/// folio ask --json "What's his tech stack?"
/// ```
pub async fn ask(state: &AppState, message: &str, json: bool, quiet: bool) -> Result<()> {
    let spinner = (!json && !quiet).then(|| {
        let spinner = indicatif::ProgressBar::new_spinner();
        spinner.set_style(
            indicatif::ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| indicatif::ProgressStyle::default_spinner()),
        );
        spinner.set_message("thinking...");
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        spinner
    });

    let outcome = state.session.send(message).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    if json {
        let snapshot = state.session.snapshot().await;
        print_json(&serde_json::json!({
            "session_id": snapshot.session_id,
            "question": message.trim(),
            "reply": outcome.reply().map(|m| m.content.as_str()),
            "error": snapshot.last_error,
        }))?;
    }

    match outcome {
        SendOutcome::Replied(reply) => {
            if !json {
                let renderer = ChatRenderer::new();
                println!();
                println!("  {}", renderer.render_markdown(&reply.content).trim_end());
                println!();
            }
            Ok(())
        }
        SendOutcome::Failed { error, .. } => bail!("{error}"),
        SendOutcome::Ignored(IgnoreReason::EmptyInput) => {
            bail!("Nothing to send: the message is empty")
        }
        SendOutcome::Ignored(IgnoreReason::Busy) | SendOutcome::Stale => {
            if !json && !quiet {
                eprintln!(
                    "  {} The session changed before a reply arrived.",
                    style("!").yellow().bold()
                );
            }
            Ok(())
        }
    }
}
