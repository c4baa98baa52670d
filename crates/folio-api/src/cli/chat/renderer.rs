//! Terminal rendering of chat messages.
//!
//! Assistant replies are markdown and go through `termimad`; user lines and
//! error notices are printed with `console` styling.

use console::style;
use termimad::MadSkin;
use termimad::crossterm::style::Color;

use folio_types::message::{Message, MessageRole};

/// Markdown-aware message printer.
pub struct ChatRenderer {
    skin: MadSkin,
}

impl Default for ChatRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatRenderer {
    pub fn new() -> Self {
        let mut skin = MadSkin::default_dark();
        skin.bold.set_fg(Color::Cyan);
        skin.headers[0].set_fg(Color::Cyan);
        skin.headers[1].set_fg(Color::Cyan);
        skin.inline_code.set_fg(Color::Yellow);
        Self { skin }
    }

    /// Render markdown to a terminal string.
    pub fn render_markdown(&self, markdown: &str) -> String {
        self.skin.term_text(markdown).to_string()
    }

    /// Print one message from the log with its speaker label.
    pub fn print_message(&self, message: &Message) {
        match message.role {
            MessageRole::User => {
                println!("  {} {}", style("You >").green().bold(), message.content);
            }
            MessageRole::Assistant if message.synthetic && is_error_notice(&message.content) => {
                println!();
                println!("  {}", style(&message.content).red());
            }
            MessageRole::Assistant => {
                println!();
                println!(
                    "  {} {}",
                    style("Alex AI").cyan().bold(),
                    self.render_markdown(&message.content).trim_end()
                );
            }
        }
        println!();
    }

    /// Print a numbered list of starter questions.
    pub fn print_suggestions(&self, questions: &[String]) {
        if questions.is_empty() {
            return;
        }
        println!("  {}", style("Try asking:").dim());
        for (index, question) in questions.iter().enumerate() {
            println!(
                "  {} {}",
                style(format!("{}.", index + 1)).cyan(),
                question
            );
        }
        println!(
            "  {}",
            style("Type a number to ask one of these.").dim()
        );
        println!();
    }
}

/// Error notices carry the warning sign prefix.
fn is_error_notice(content: &str) -> bool {
    content.starts_with('\u{26a0}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_markdown_keeps_text() {
        let renderer = ChatRenderer::new();
        let out = renderer.render_markdown("Alex builds **Rust** services.");
        assert!(out.contains("Rust"));
        assert!(out.contains("services"));
    }

    #[test]
    fn test_error_notice_detection() {
        let notice = Message::error_notice("Server error: 500");
        assert!(notice.synthetic);
        assert!(is_error_notice(&notice.content));
        assert!(!is_error_notice("Hi there"));
    }
}
