//! One-shot subcommands

use anyhow::Result;
use colored::Colorize;
use jarvis::{Dispatcher, JarvisConfig};

use crate::output::OutputHandler;

const MASK: &str = "***";

pub async fn ask(dispatcher: &Dispatcher, text: &str) {
    let response = dispatcher.interpret(text).await;
    OutputHandler::new().print_response(&response);
}

/// Copy of the config that is safe to print
pub fn redacted(config: &JarvisConfig) -> JarvisConfig {
    let mut config = config.clone();
    for secret in [
        &mut config.openai.api_key,
        &mut config.weather.api_key,
        &mut config.lights.username,
    ] {
        if secret.is_some() {
            *secret = Some(MASK.to_string());
        }
    }
    config
}

pub fn show_config(config: &JarvisConfig) -> Result<()> {
    OutputHandler::new().print_header("Configuration");
    println!();
    println!("{}", toml::to_string_pretty(&redacted(config))?);
    Ok(())
}

pub fn list_modes(config: &JarvisConfig) {
    let output = OutputHandler::new();
    output.print_header("Modes");

    for mode in config.resolved_modes() {
        println!(
            "  {} {}",
            format!("\"{}\"", mode.trigger_phrase()).bright_cyan(),
            format!("({} steps)", mode.steps.len()).dimmed()
        );
    }
}
