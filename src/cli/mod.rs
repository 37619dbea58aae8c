//! Command-line interface parsing and handling
//!
//! This module parses arguments, resolves configuration, and dispatches to
//! the interactive session or one of the one-shot commands.

pub mod ask;
pub mod example_list;


use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;

use crate::cli::ask::run_ask;
use crate::cli::example_list::list_examples;
use crate::core::app::AppInitConfig;
use crate::core::config::data::path_display;
use crate::core::config::Config;
use crate::core::constants::ENDPOINT_ENV_VAR;
use crate::ui::chat_loop::run_chat;
use crate::utils::diagnostics::{init_file_diagnostics, init_stderr_diagnostics};
use crate::utils::url::resolve_ask_url;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERGEN_GIT_DESCRIBE"),
    ", built ",
    env!("VERGEN_BUILD_DATE"),
    ")"
);

#[derive(Parser)]
#[command(name = "ragask")]
#[command(version, long_version = LONG_VERSION)]
#[command(about = "Ask questions of a retrieval-augmented answering service")]
#[command(
    long_about = "ragask is a full-screen terminal client for a question answering service. \
Each question is sent to the service and the answer is shown together with \
the questions asked earlier in the session.\n\n\
Environment Variables:\n\
  RAGASK_ENDPOINT   Answering service URL (overrides the config file)\n\
  RAGASK_LOG        Diagnostic log filter, e.g. 'debug' (used with --debug-log)\n\n\
Controls:\n\
  Type              Enter your question in the input field\n\
  Enter             Send the question\n\
  Alt+Enter/Ctrl+J  Insert a new line\n\
  Ctrl+N/Ctrl+P     Load the next/previous example question\n\
  Up/Down/PgUp/PgDn Scroll answers\n\
  Ctrl+C/Ctrl+D     Quit the application"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Answering service URL; a bare server address gets `/ask` appended
    #[arg(short = 'e', long, global = true, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Append completed exchanges to the specified file
    #[arg(short = 'l', long, global = true, value_name = "FILE")]
    pub log: Option<String>,

    /// Write diagnostic logs to the specified file
    #[arg(long, global = true, value_name = "FILE")]
    pub debug_log: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the interactive interface (default)
    Chat,
    /// Ask a single question and print the answer
    Ask {
        /// The question (multiple words are joined with spaces)
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        question: Vec<String>,
    },
    /// List the example questions
    Examples,
    /// Set configuration values
    Set {
        /// Configuration key to set
        key: String,
        /// Value to set for the key (can be multiple words)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Option<Vec<String>>,
    },
    /// Unset configuration values
    Unset {
        /// Configuration key to unset
        key: String,
    },
}

pub fn main() -> Result<(), Box<dyn Error>> {
    tokio::runtime::Runtime::new()?.block_on(async_main())
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let command = args.command.unwrap_or(Commands::Chat);

    match &args.debug_log {
        Some(path) => init_file_diagnostics(path)?,
        None if !matches!(command, Commands::Chat) => init_stderr_diagnostics()?,
        None => {}
    }

    match command {
        Commands::Set { key, value } => {
            let mut config = Config::load()?;
            let value = value.map(|parts| parts.join(" ")).unwrap_or_default();
            if value.trim().is_empty() {
                config.print_all();
                return Ok(());
            }
            match config.set_value(&key, &value) {
                Ok(message) => {
                    config.save()?;
                    println!("✅ {message}");
                    println!("   (saved to {})", path_display(Config::get_config_path()?));
                }
                Err(message) => {
                    eprintln!("❌ {message}");
                    std::process::exit(1);
                }
            }
            Ok(())
        }
        Commands::Unset { key } => {
            let mut config = Config::load()?;
            match config.unset_value(&key) {
                Ok(message) => {
                    config.save()?;
                    println!("✅ {message}");
                }
                Err(message) => {
                    eprintln!("❌ {message}");
                    std::process::exit(1);
                }
            }
            Ok(())
        }
        Commands::Examples => list_examples(),
        Commands::Ask { question } => {
            let config = Config::load()?;
            let endpoint = endpoint_for(&config, args.endpoint.as_deref())?;
            let log_file = args.log.or_else(|| config.log_file.clone());
            run_ask(
                endpoint,
                config.request_timeout(),
                &question.join(" "),
                log_file,
            )
            .await
        }
        Commands::Chat => {
            let config = Config::load()?;
            let endpoint = endpoint_for(&config, args.endpoint.as_deref())?;
            let init = AppInitConfig {
                endpoint,
                examples: config.example_questions(),
                log_file: args.log.or_else(|| config.log_file.clone()),
            };
            run_chat(init, config.request_timeout()).await
        }
    }
}

/// Resolves the endpoint by precedence and normalizes it to the ask URL.
fn endpoint_for(config: &Config, cli: Option<&str>) -> Result<String, Box<dyn Error>> {
    let env = std::env::var(ENDPOINT_ENV_VAR).ok();
    let raw = config.resolve_endpoint(cli, env.as_deref());
    let url = resolve_ask_url(&raw)?;
    if url != raw {
        debug!(configured = %raw, resolved = %url, "Normalized answering service endpoint");
    }
    Ok(url)
}
