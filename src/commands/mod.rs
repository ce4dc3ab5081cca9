//! CLI command definitions and dispatch.

pub mod hooks;
pub mod inspect;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use hookmap_core::HookResult;
use hookmap_core::config::AppConfig;

use crate::output::OutputFormat;

/// HookMap inspector: resolve modifier hooks from definition files
#[derive(Debug, Parser)]
#[command(name = "hookmap-inspect", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format (overrides configuration)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the built-in hooks and their defaults
    Hooks,
    /// Build and resolve the hooks of each modifier in a definition file
    Inspect(inspect::InspectArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(&self, config: &AppConfig) -> HookResult<()> {
        let format = match self.format {
            Some(format) => format,
            None => OutputFormat::from_config(&config.output.format)?,
        };

        match &self.command {
            Commands::Hooks => hooks::execute(format),
            Commands::Inspect(args) => inspect::execute(args, format),
        }
    }
}
