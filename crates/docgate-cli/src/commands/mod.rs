//! CLI command definitions and dispatch.

pub mod config;
pub mod explain;
pub mod find;
pub mod search;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use docgate_core::config::AppConfig;
use docgate_core::error::AppError;

/// DocGate: filter, sort, and page document metadata
#[derive(Debug, Parser)]
#[command(name = "docgate", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Search documents stored in a JSON file
    Search(search::SearchArgs),
    /// Find documents by typed fields, newest first by default
    Find(find::FindArgs),
    /// Show how a filter is parsed and grouped
    Explain(explain::ExplainArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, app_config: &AppConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Search(args) => search::execute(args, app_config, self.format).await,
            Commands::Find(args) => find::execute(args, app_config, self.format).await,
            Commands::Explain(args) => explain::execute(args, self.format),
            Commands::Config(args) => {
                config::execute(args, &self.config, app_config, self.format).await
            }
        }
    }

    /// Whether the command reports configuration errors itself, so startup
    /// must not abort on them.
    pub fn checks_config(&self) -> bool {
        matches!(
            &self.command,
            Commands::Config(config::ConfigArgs {
                command: config::ConfigCommand::Validate
            })
        )
    }
}

/// Helper: load configuration from file
pub fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    AppConfig::load(config_path)
}
