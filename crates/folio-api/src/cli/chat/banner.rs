//! Welcome banner display for chat sessions.

use console::style;

/// Print the welcome banner at the start of a chat session.
///
/// Shows the panel title with its AI badge, the API being talked to and
/// the short form of the session identifier.
pub fn print_welcome_banner(api_url: &str, short_session_id: &str) {
    println!();
    println!(
        "  {} {}",
        style("Ask about Alex").cyan().bold(),
        style(" AI ").black().on_cyan().bold()
    );
    println!("  {}", style("Questions about projects, skills and experience").dim());
    println!();
    println!("  {}      {}", style("API:").bold(), style(api_url).dim());
    println!(
        "  {}  {}",
        style("Session:").bold(),
        style(short_session_id).dim()
    );
    println!();
    println!("  {}", style("Type /help for commands, Ctrl+D to exit").dim());
    println!("  {}", style("---").dim());
    println!();
}
