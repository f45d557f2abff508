//! Interactive prompt

use anyhow::Result;
use colored::Colorize;
use jarvis::Dispatcher;
use rustyline::{error::ReadlineError, history::DefaultHistory, Editor};

use crate::output::OutputHandler;

/// What a line typed at the prompt asks for
#[derive(Debug, PartialEq, Eq)]
pub enum Input<'a> {
    Empty,
    Exit,
    Help,
    Modes,
    Rules,
    Unknown(&'a str),
    Command(&'a str),
}

pub fn parse_input(line: &str) -> Input<'_> {
    let input = line.trim();
    if input.is_empty() {
        return Input::Empty;
    }
    if !input.starts_with('/') {
        return Input::Command(input);
    }

    match input.split_whitespace().next().unwrap_or(input) {
        "/exit" | "/quit" | "/q" => Input::Exit,
        "/help" | "/h" | "/?" => Input::Help,
        "/modes" => Input::Modes,
        "/rules" => Input::Rules,
        other => Input::Unknown(other),
    }
}

pub struct JarvisRepl {
    dispatcher: Dispatcher,
    output: OutputHandler,
    editor: Editor<(), DefaultHistory>,
}

impl JarvisRepl {
    pub fn new(dispatcher: Dispatcher) -> Result<Self> {
        Ok(Self {
            dispatcher,
            output: OutputHandler::new(),
            editor: Editor::new()?,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let modes: Vec<String> = self
            .dispatcher
            .modes()
            .modes()
            .iter()
            .map(|m| m.name.clone())
            .collect();
        self.output
            .print_banner(self.dispatcher.matcher().rules().len(), &modes);

        let prompt = format!("\n{} {} ", "jarvis".bright_green().bold(), ">".bright_green());

        loop {
            match self.editor.readline(&prompt) {
                Ok(line) => {
                    let _ = self.editor.add_history_entry(line.trim());

                    match parse_input(&line) {
                        Input::Empty => continue,
                        Input::Exit => break,
                        Input::Help => self.print_help(),
                        Input::Modes => self.print_modes(),
                        Input::Rules => self.print_rules(),
                        Input::Unknown(command) => self
                            .output
                            .print_error(&format!("Unknown command: {}", command)),
                        Input::Command(text) => {
                            let response = self.dispatcher.interpret(text).await;
                            self.output.print_response(&response);
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!();
                    self.output.print_info("Use /exit to quit.");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!();
                    break;
                }
                Err(e) => {
                    self.output.print_error(&format!("Input error: {}", e));
                    break;
                }
            }
        }

        Ok(())
    }

    fn print_help(&self) {
        self.output.print_header("Commands");
        println!("  {}  list modes", "/modes".bright_green());
        println!("  {}  list intent rules in precedence order", "/rules".bright_green());
        println!("  {}   leave", "/exit".bright_green());
        println!();
        println!("  Anything else is sent to the assistant, e.g. {}", "\"cpu usage\"".bright_cyan());
    }

    fn print_modes(&self) {
        self.output.print_header("Modes");
        for mode in self.dispatcher.modes().modes() {
            println!("  {}", mode.trigger_phrase().bright_cyan());
        }
    }

    fn print_rules(&self) {
        self.output.print_header("Intent rules");
        for (i, rule) in self.dispatcher.matcher().rules().iter().enumerate() {
            let speak = if rule.speak { "" } else { " (silent)" };
            println!("  {:>2}. {}{}", i + 1, rule.name, speak.dimmed());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_input() {
        assert_eq!(parse_input("   "), Input::Empty);
        assert_eq!(parse_input("/quit"), Input::Exit);
        assert_eq!(parse_input("/help me"), Input::Help);
        assert_eq!(parse_input("/rules"), Input::Rules);
        assert_eq!(parse_input("/dance"), Input::Unknown("/dance"));
        assert_eq!(parse_input("  ping 8.8.8.8 "), Input::Command("ping 8.8.8.8"));
    }
}
