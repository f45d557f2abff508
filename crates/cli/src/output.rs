//! Terminal rendering for assistant responses

use colored::Colorize;
use jarvis::Response;

/// Output handler for terminal display
#[derive(Debug, Default)]
pub struct OutputHandler;

impl OutputHandler {
    pub fn new() -> Self {
        Self
    }

    /// Print the welcome banner
    pub fn print_banner(&self, rules: usize, modes: &[String]) {
        println!();
        println!(
            "{}",
            "╔═══════════════════════════════════════════════════════════════╗".bright_cyan()
        );
        println!(
            "{}",
            "║                         J A R V I S                           ║".bright_cyan()
        );
        println!(
            "{}",
            "╚═══════════════════════════════════════════════════════════════╝".bright_cyan()
        );
        println!(
            "  {} intent rules, modes: {}",
            rules.to_string().bright_white(),
            if modes.is_empty() {
                "none".dimmed().to_string()
            } else {
                modes.join(", ").bright_white().to_string()
            }
        );
        println!("  Type {} for commands, {} to leave.", "/help".bright_green(), "/exit".bright_green());
    }

    /// Print an assistant response; silent responses are dimmed
    pub fn print_response(&self, response: &Response) {
        if response.text.is_empty() {
            println!("{}", "✓ done".dimmed());
        } else if response.speak {
            println!("{} {}", "🔊".bright_cyan(), response.text.bright_white());
        } else {
            println!("{} {}", "·".dimmed(), response.text.dimmed());
        }
    }

    pub fn print_header(&self, text: &str) {
        println!();
        println!("{}", format!("▶ {}", text).bright_yellow().bold());
        println!("{}", "─".repeat(60).dimmed());
    }

    pub fn print_error(&self, text: &str) {
        println!("{} {}", "✗".bright_red(), text.bright_red());
    }

    pub fn print_info(&self, text: &str) {
        println!("{} {}", "ℹ".bright_blue(), text);
    }
}
