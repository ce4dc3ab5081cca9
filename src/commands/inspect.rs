//! `inspect` command.

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use hookmap_core::{HookError, HookResult};

use crate::definition::DefinitionFile;
use crate::demo::{DemoHooks, HookRow};
use crate::output::{self, OutputFormat};

/// Arguments for `inspect`.
#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Modifier definition file (JSON)
    pub file: PathBuf,

    /// Only inspect the modifier with this name
    #[arg(short, long)]
    pub modifier: Option<String>,
}

/// Build each modifier's hook map and print the resolved demo hooks.
pub fn execute(args: &InspectArgs, format: OutputFormat) -> HookResult<()> {
    let rows = collect_rows(args)?;
    output::print_list(&rows, format)
}

fn collect_rows(args: &InspectArgs) -> HookResult<Vec<HookRow>> {
    let file = DefinitionFile::load(&args.file)?;
    let hooks = DemoHooks::new();
    let catalog = hooks.catalog()?;

    let modifiers: Vec<_> = file
        .modifiers
        .iter()
        .filter(|m| args.modifier.as_ref().is_none_or(|name| &m.name == name))
        .collect();

    match &args.modifier {
        Some(name) if modifiers.is_empty() => {
            return Err(HookError::not_found(format!(
                "Modifier '{name}' is not defined in {}",
                args.file.display()
            )));
        }
        _ => {}
    }

    let mut rows = Vec::new();
    for modifier in modifiers {
        let map = modifier.build(&catalog)?;
        info!(modifier = %modifier.name, hooks = map.len(), "Modifier inspected");
        rows.extend(hooks.resolve(&modifier.name, &map));
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFINITIONS: &str = r#"{
        "modifiers": [
            { "name": "swift", "modules": [
                { "type": "stat", "hooks": ["demo:speed"], "value": 2.0 },
                { "type": "stat", "hooks": ["demo:speed"], "value": 3.0 }
            ] },
            { "name": "sturdy", "modules": [
                { "type": "stat", "hooks": ["demo:defense"], "value": 4.0 }
            ] }
        ]
    }"#;

    fn write_definitions() -> (tempfile::TempDir, PathBuf) {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("modifiers.json");
        std::fs::write(&path, DEFINITIONS).expect("write");
        (temp, path)
    }

    #[test]
    fn test_rows_for_every_modifier() {
        let (_temp, file) = write_definitions();
        let rows = collect_rows(&InspectArgs {
            file,
            modifier: None,
        })
        .expect("rows");

        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0].modifier, "swift");
        assert_eq!(rows[0].value, "5.00");
        assert_eq!(rows[4].modifier, "sturdy");
        assert_eq!(rows[4].value, "4.00");
    }

    #[test]
    fn test_modifier_filter() {
        let (_temp, file) = write_definitions();
        let rows = collect_rows(&InspectArgs {
            file: file.clone(),
            modifier: Some("sturdy".to_string()),
        })
        .expect("rows");
        assert!(rows.iter().all(|r| r.modifier == "sturdy"));

        let err = collect_rows(&InspectArgs {
            file,
            modifier: Some("missing".to_string()),
        })
        .expect_err("unknown modifier");
        assert_eq!(err.kind, hookmap_core::ErrorKind::NotFound);
    }
}
