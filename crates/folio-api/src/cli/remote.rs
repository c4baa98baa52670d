//! Commands that query the portfolio API directly: history and health.

use anyhow::{Result, bail};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use folio_types::wire::HistoryEntry;

use crate::cli::format::{check_mark, format_timestamp, print_json, truncate};
use crate::state::AppState;

/// Build the transcript table shown by `folio history` and `/remote`.
pub fn history_table(entries: &[HistoryEntry]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("#").fg(Color::White),
        Cell::new("Role").fg(Color::White),
        Cell::new("Message").fg(Color::White),
        Cell::new("Sent").fg(Color::White),
    ]);

    for (index, entry) in entries.iter().enumerate() {
        let role_color = if entry.role.eq_ignore_ascii_case("user") {
            Color::Green
        } else {
            Color::Cyan
        };
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(&entry.role).fg(role_color),
            Cell::new(truncate(&entry.content, 80)),
            Cell::new(format_timestamp(entry.created_at.as_deref())),
        ]);
    }

    table
}

/// Print the server-side transcript for the current session.
///
/// # Examples
///
/// ```bash
/// folio history
/// folio history --json
/// ```
pub async fn show_history(state: &AppState, json: bool) -> Result<()> {
    let session_id = state.session.session_id().await;
    let entries = match state.session.endpoint().history(&session_id).await {
        Ok(entries) => entries,
        Err(e) => bail!("Could not load history: {}", e.user_message()),
    };

    if json {
        return print_json(&entries);
    }

    if entries.is_empty() {
        println!();
        println!(
            "  {} No messages recorded for session {}. Start one with: {}",
            style("i").blue().bold(),
            style(session_id.short()).cyan(),
            style("folio chat").yellow()
        );
        println!();
        return Ok(());
    }

    println!();
    println!("{}", history_table(&entries));
    println!();
    println!(
        "  {} message(s) in session {}",
        style(entries.len()).bold(),
        style(session_id.short()).cyan()
    );
    println!();
    Ok(())
}

/// Check that the API answers its health endpoint.
///
/// Fails when the API is unreachable or reports anything but healthy.
pub async fn check_health(state: &AppState, json: bool) -> Result<()> {
    let api_url = state.config.api_url.as_str();
    let result = state.session.endpoint().health().await;

    if json {
        let body = match &result {
            Ok(health) => serde_json::json!({
                "api_url": api_url,
                "reachable": true,
                "healthy": health.is_healthy(),
                "status": health.status,
                "timestamp": health.timestamp,
            }),
            Err(e) => serde_json::json!({
                "api_url": api_url,
                "reachable": false,
                "healthy": false,
                "error": e.to_string(),
            }),
        };
        print_json(&body)?;
    } else {
        println!();
        println!(
            "  {} Health check for {}",
            style("🔍").bold(),
            style(api_url).cyan()
        );
        println!();
        match &result {
            Ok(health) => {
                println!("  {} API reachable", check_mark(true));
                println!(
                    "  {} Status: {}",
                    check_mark(health.is_healthy()),
                    health.status
                );
                if let Some(ts) = &health.timestamp {
                    println!("  {}", style(format!("Server time: {ts}")).dim());
                }
            }
            Err(e) => {
                println!("  {} API reachable", check_mark(false));
                println!("  {}", style(e.to_string()).dim());
            }
        }
        println!();
    }

    match result {
        Ok(health) if health.is_healthy() => Ok(()),
        Ok(health) => bail!("API at {api_url} reported status '{}'", health.status),
        Err(e) => bail!("API at {api_url} is unreachable: {}", e.user_message()),
    }
}
