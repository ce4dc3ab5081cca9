//! Table and JSON output formatting for inspector commands.

use serde::Serialize;
use tabled::{Table, Tabled};

use hookmap_core::{HookError, HookResult};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON output
    Json,
}

impl OutputFormat {
    /// Parses the format named in configuration.
    pub fn from_config(value: &str) -> HookResult<Self> {
        match value.to_ascii_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => Err(HookError::configuration(format!(
                "Unknown output format '{other}', expected 'table' or 'json'"
            ))),
        }
    }
}

/// Print a list of items in the selected format
pub fn print_list<T: Serialize + Tabled>(items: &[T], format: OutputFormat) -> HookResult<()> {
    println!("{}", render_list(items, format)?);
    Ok(())
}

/// Render a list of items in the selected format
pub fn render_list<T: Serialize + Tabled>(
    items: &[T],
    format: OutputFormat,
) -> HookResult<String> {
    match format {
        OutputFormat::Table => {
            if items.is_empty() {
                Ok("No results found.".to_string())
            } else {
                Ok(Table::new(items).to_string())
            }
        }
        OutputFormat::Json => Ok(serde_json::to_string_pretty(items)?),
    }
}
