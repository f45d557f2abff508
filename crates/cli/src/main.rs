//! Jarvis CLI
//!
//! Sends commands to the assistant engine in-process, either one at a time
//! or from an interactive prompt.

mod commands;
mod output;
mod repl;

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser, Subcommand};
use jarvis::{Dispatcher, JarvisConfig, KeyValueStore};
use providers::{default_capabilities, JsonFileStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Jarvis - personal assistant command router
#[derive(Parser)]
#[command(name = "jarvis")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Talk to your assistant from the terminal")]
#[command(long_about = r#"
Jarvis turns short commands into actions: lights, media keys, system status,
websites, applications, a to-do list and more. Anything it doesn't recognize
is answered by the configured language model.

Examples:
  jarvis                               # Start an interactive session
  jarvis ask what time is it           # Run one command
  jarvis ask start movie mode
  jarvis config --show                 # Print the active configuration
"#)]
struct Cli {
    /// Config file (defaults to ~/.jarvis/config.toml)
    #[arg(short, long, env = "JARVIS_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single command and print the response
    Ask {
        /// Command text
        #[arg(required = true, trailing_var_arg = true)]
        text: Vec<String>,
    },

    /// Start the interactive prompt
    Repl,

    /// List the configured modes
    Modes,

    /// Configuration management
    #[command(group(ArgGroup::new("target").required(true).args(["show", "path"])))]
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Print the config file location
        #[arg(long)]
        path: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("jarvis={level},providers={level},warn", level = log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let config_path = cli.config.clone().unwrap_or_else(JarvisConfig::config_path);
    let config = JarvisConfig::load_from(&config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;

    match cli.command {
        Some(Commands::Config { path: true, .. }) => {
            println!("{}", config_path.display());
        }
        Some(Commands::Config { .. }) => {
            commands::show_config(&config)?;
        }
        Some(Commands::Modes) => {
            commands::list_modes(&config);
        }
        Some(Commands::Ask { text }) => {
            let dispatcher = build_dispatcher(&config)?;
            commands::ask(&dispatcher, &text.join(" ")).await;
        }
        Some(Commands::Repl) | None => {
            let dispatcher = build_dispatcher(&config)?;
            let mut repl = repl::JarvisRepl::new(dispatcher)?;
            repl.run().await?;
        }
    }

    Ok(())
}

fn build_dispatcher(config: &JarvisConfig) -> Result<Dispatcher> {
    let store: Arc<dyn KeyValueStore> =
        Arc::new(JsonFileStore::in_dir(&config.storage.resolved_data_dir()));
    let capabilities = default_capabilities(config, store);
    Dispatcher::new(config, capabilities).context("Failed to build the command dispatcher")
}
