//! Session CLI commands: show, reset, suggestions.

use anyhow::Result;
use console::style;

use folio_infra::paths;
use folio_types::config::StoreKind;

use crate::cli::format::print_json;
use crate::state::AppState;

/// Where the session identifier for `kind` lives, for display.
fn store_location(state: &AppState, kind: StoreKind) -> String {
    match kind {
        StoreKind::File => paths::session_file_path(&state.data_dir).display().to_string(),
        StoreKind::Sqlite => paths::database_path(&state.data_dir).display().to_string(),
        StoreKind::Memory => "(in memory, not persisted)".to_string(),
    }
}

/// Print the active session identifier and its backing store.
///
/// # Examples
///
/// ```bash
/// folio session show
/// folio session show --json
/// ```
pub async fn show_session(state: &AppState, json: bool) -> Result<()> {
    let session_id = state.session.session_id().await;
    let kind = state.session.store().kind();
    let location = store_location(state, kind);

    if json {
        return print_json(&serde_json::json!({
            "session_id": session_id,
            "store": kind.to_string(),
            "location": location,
            "api_url": state.config.api_url,
        }));
    }

    println!();
    println!("  {}  {}", style("Session:").bold(), style(&session_id).cyan());
    println!("  {}    {} {}", style("Store:").bold(), kind, style(&location).dim());
    println!("  {}      {}", style("API:").bold(), style(&state.config.api_url).dim());
    println!();
    Ok(())
}

/// Start a fresh session and persist its identifier.
pub async fn reset_session(state: &AppState, json: bool, quiet: bool) -> Result<()> {
    let previous = state.session.session_id().await;
    let snapshot = state.session.reset().await;

    if json {
        return print_json(&serde_json::json!({
            "previous_session_id": previous,
            "session_id": snapshot.session_id,
        }));
    }

    if !quiet {
        println!();
        println!(
            "  {} Started a new session {} (was {})",
            style("✓").green().bold(),
            style(snapshot.session_id.short()).cyan(),
            style(previous.short()).dim()
        );
        println!();
    }
    Ok(())
}

/// Print the suggested starter questions.
pub fn list_suggestions(state: &AppState, json: bool) -> Result<()> {
    let questions = state.session.suggested_questions();

    if json {
        return print_json(questions);
    }

    println!();
    println!("  {}", style("Try asking:").bold());
    for (index, question) in questions.iter().enumerate() {
        println!("  {} {}", style(format!("{}.", index + 1)).dim(), question);
    }
    println!();
    Ok(())
}
