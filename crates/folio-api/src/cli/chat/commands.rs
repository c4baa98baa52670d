//! Slash command parsing for the chat loop.
//!
//! Commands start with `/` and control the session rather than being sent
//! to the assistant.

use console::style;

/// Available slash commands in the chat loop.
#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    /// Show available commands.
    Help,
    /// Clear the terminal screen.
    Clear,
    /// Exit the chat session.
    Exit,
    /// Start a new session.
    New,
    /// Show the local conversation log.
    History,
    /// Show the transcript stored by the server.
    Remote,
    /// List starter questions, or send the n-th one (1-based).
    Suggest(Option<usize>),
    /// Unknown command or bad argument.
    Unknown(String),
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let parts: Vec<&str> = trimmed.splitn(2, ' ').collect();
    let cmd = parts[0].to_lowercase();
    let arg = parts.get(1).map(|s| s.trim()).filter(|s| !s.is_empty());

    match cmd.as_str() {
        "/help" | "/h" | "/?" => Some(ChatCommand::Help),
        "/clear" | "/cls" => Some(ChatCommand::Clear),
        "/exit" | "/quit" | "/q" => Some(ChatCommand::Exit),
        "/new" | "/reset" => Some(ChatCommand::New),
        "/history" => Some(ChatCommand::History),
        "/remote" => Some(ChatCommand::Remote),
        "/suggest" | "/s" => match arg {
            None => Some(ChatCommand::Suggest(None)),
            Some(n) => match n.parse::<usize>() {
                Ok(index) if index > 0 => Some(ChatCommand::Suggest(Some(index))),
                _ => Some(ChatCommand::Unknown(format!(
                    "/suggest expects a question number, got '{n}'"
                ))),
            },
        },
        other => Some(ChatCommand::Unknown(other.to_string())),
    }
}

/// Print the help text listing all available commands.
pub fn print_help() {
    println!();
    println!("  {}", style("Available commands:").bold());
    println!();
    println!("  {}       {}", style("/help").cyan(), "Show this help message");
    println!("  {}      {}", style("/clear").cyan(), "Clear the screen");
    println!("  {}       {}", style("/exit").cyan(), "End the chat session");
    println!("  {}        {}", style("/new").cyan(), "Start a fresh conversation");
    println!("  {}    {}", style("/history").cyan(), "Show this conversation");
    println!("  {}     {}", style("/remote").cyan(), "Show the transcript saved by the server");
    println!("  {} {}", style("/suggest [n]").cyan(), "List starter questions or ask number n");
    println!();
    println!("  {}", style("Ctrl+D to exit").dim());
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_not_a_command() {
        assert_eq!(parse("What projects has Alex built?"), None);
        assert_eq!(parse("  hello /help"), None);
    }

    #[test]
    fn test_basic_commands_and_aliases() {
        assert_eq!(parse("/help"), Some(ChatCommand::Help));
        assert_eq!(parse("/?"), Some(ChatCommand::Help));
        assert_eq!(parse("/CLS"), Some(ChatCommand::Clear));
        assert_eq!(parse("/quit"), Some(ChatCommand::Exit));
        assert_eq!(parse(" /new "), Some(ChatCommand::New));
        assert_eq!(parse("/reset"), Some(ChatCommand::New));
        assert_eq!(parse("/history"), Some(ChatCommand::History));
        assert_eq!(parse("/remote"), Some(ChatCommand::Remote));
    }

    #[test]
    fn test_suggest_with_and_without_index() {
        assert_eq!(parse("/suggest"), Some(ChatCommand::Suggest(None)));
        assert_eq!(parse("/suggest 3"), Some(ChatCommand::Suggest(Some(3))));
        assert_eq!(parse("/s  2"), Some(ChatCommand::Suggest(Some(2))));
    }

    #[test]
    fn test_suggest_rejects_bad_index() {
        assert!(matches!(parse("/suggest 0"), Some(ChatCommand::Unknown(_))));
        assert!(matches!(parse("/suggest two"), Some(ChatCommand::Unknown(_))));
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(
            parse("/remember x"),
            Some(ChatCommand::Unknown("/remember".to_string()))
        );
    }
}
