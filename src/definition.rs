//! Modifier definitions loaded from JSON.
//!
//! A definition file lists modifiers, each made of modules. A module names
//! the hooks it implements; every module becomes one shared object
//! registered under all of its hooks.
//!
//! ```json
//! {
//!   "modifiers": [
//!     {
//!       "name": "frostfire",
//!       "modules": [
//!         { "type": "stat", "hooks": ["demo:speed"], "value": 2.0 },
//!         { "type": "text", "hooks": ["demo:name"], "text": "fire" }
//!       ]
//!     }
//!   ]
//! }
//! ```

use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use hookmap_core::{HookError, HookResult};
use hookmap_registry::{HookCatalog, HookId, HookKey, HookMap, HookMapBuilder};

use crate::demo::{FlatStat, StatHook};

/// Root of a definition file.
#[derive(Debug, Clone, Deserialize)]
pub struct DefinitionFile {
    /// Modifiers in file order.
    #[serde(default)]
    pub modifiers: Vec<ModifierDefinition>,
}

/// A named set of modules.
#[derive(Debug, Clone, Deserialize)]
pub struct ModifierDefinition {
    /// Modifier name.
    pub name: String,
    /// Modules in registration order.
    #[serde(default)]
    pub modules: Vec<ModuleDefinition>,
}

/// A single module and the hooks it implements.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ModuleDefinition {
    /// Flat stat contribution.
    Stat {
        /// Stat hooks implemented.
        hooks: Vec<HookId>,
        /// Amount contributed.
        value: f64,
    },
    /// Text fragment.
    Text {
        /// Text hooks implemented.
        hooks: Vec<HookId>,
        /// Fragment contributed.
        text: String,
    },
}

impl DefinitionFile {
    /// Reads and parses a definition file.
    pub fn load(path: &Path) -> HookResult<Self> {
        debug!(path = %path.display(), "Loading modifier definitions");
        let raw = std::fs::read_to_string(path)?;
        Self::parse(&raw)
    }

    /// Parses a definition document.
    pub fn parse(raw: &str) -> HookResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

impl ModifierDefinition {
    /// Builds this modifier's hook map, resolving hook ids through `catalog`.
    pub fn build(&self, catalog: &HookCatalog) -> HookResult<HookMap> {
        let mut builder = HookMap::builder();

        for module in &self.modules {
            builder = match module {
                ModuleDefinition::Stat { hooks, value } => {
                    if !value.is_finite() {
                        return Err(HookError::validation(format!(
                            "Modifier '{}' has a non-finite stat value",
                            self.name
                        )));
                    }
                    let module: Arc<dyn StatHook> = Arc::new(FlatStat(*value));
                    self.register(builder, catalog, module, hooks)?
                }
                ModuleDefinition::Text { hooks, text } => {
                    let module: Arc<str> = Arc::from(text.as_str());
                    self.register(builder, catalog, module, hooks)?
                }
            };
        }

        let map = builder.build();
        debug!(modifier = %self.name, hooks = map.len(), "Modifier hooks built");
        Ok(map)
    }

    fn register<T>(
        &self,
        builder: HookMapBuilder,
        catalog: &HookCatalog,
        module: Arc<T>,
        hooks: &[HookId],
    ) -> HookResult<HookMapBuilder>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        if hooks.is_empty() {
            return Err(HookError::validation(format!(
                "Modifier '{}' has a module without hooks",
                self.name
            )));
        }

        let keys = hooks
            .iter()
            .map(|id| catalog.get::<T>(id))
            .collect::<HookResult<Vec<HookKey<T>>>>()?;
        let keys: Vec<&HookKey<T>> = keys.iter().collect();

        Ok(builder.add_hooks(module, &keys))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::DemoHooks;
    use hookmap_core::ErrorKind;

    const FROSTFIRE: &str = r#"{
        "modifiers": [
            {
                "name": "frostfire",
                "modules": [
                    { "type": "stat", "hooks": ["demo:speed"], "value": 2.0 },
                    { "type": "stat", "hooks": ["demo:speed", "demo:defense"], "value": 3.0 },
                    { "type": "text", "hooks": ["demo:name"], "text": "fire" },
                    { "type": "text", "hooks": ["demo:name"], "text": "ice" }
                ]
            },
            { "name": "plain" }
        ]
    }"#;

    #[test]
    fn test_build_from_definitions() {
        let hooks = DemoHooks::new();
        let catalog = hooks.catalog().expect("catalog");
        let file = DefinitionFile::parse(FROSTFIRE).expect("parse");
        assert_eq!(file.modifiers.len(), 2);

        let map = file.modifiers[0].build(&catalog).expect("build");
        assert_eq!(map.get(&hooks.speed).value(), 5.0);
        assert_eq!(map.get(&hooks.defense).value(), 3.0);
        assert_eq!(&*map.get(&hooks.name), "fire,ice");

        let plain = file.modifiers[1].build(&catalog).expect("build");
        assert!(HookMap::ptr_eq(&plain, &HookMap::empty()));
    }

    #[test]
    fn test_repeated_hook_in_one_module_counts_once() {
        let hooks = DemoHooks::new();
        let catalog = hooks.catalog().expect("catalog");
        let file = DefinitionFile::parse(
            r#"{ "modifiers": [ { "name": "twice", "modules": [
                { "type": "stat", "hooks": ["demo:speed", "demo:speed"], "value": 4.0 }
            ] } ] }"#,
        )
        .expect("parse");

        let map = file.modifiers[0].build(&catalog).expect("build");
        assert_eq!(map.get(&hooks.speed).value(), 4.0);
        assert_eq!(map.entries().next().map(|s| s.modules), Some(1));
    }

    #[test]
    fn test_text_module_on_stat_hook_is_type_mismatch() {
        let catalog = DemoHooks::new().catalog().expect("catalog");
        let file = DefinitionFile::parse(
            r#"{ "modifiers": [ { "name": "bad", "modules": [
                { "type": "text", "hooks": ["demo:speed"], "text": "fast" }
            ] } ] }"#,
        )
        .expect("parse");

        let err = file.modifiers[0].build(&catalog).expect_err("mismatch");
        assert_eq!(err.kind, ErrorKind::TypeMismatch);
    }

    #[test]
    fn test_unknown_hook_is_not_found() {
        let catalog = DemoHooks::new().catalog().expect("catalog");
        let file = DefinitionFile::parse(
            r#"{ "modifiers": [ { "name": "bad", "modules": [
                { "type": "stat", "hooks": ["demo:luck"], "value": 1.0 }
            ] } ] }"#,
        )
        .expect("parse");

        let err = file.modifiers[0].build(&catalog).expect_err("unknown");
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[test]
    fn test_module_without_hooks_is_rejected() {
        let catalog = DemoHooks::new().catalog().expect("catalog");
        let file = DefinitionFile::parse(
            r#"{ "modifiers": [ { "name": "bad", "modules": [
                { "type": "text", "hooks": [], "text": "orphan" }
            ] } ] }"#,
        )
        .expect("parse");

        let err = file.modifiers[0].build(&catalog).expect_err("no hooks");
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn test_invalid_hook_id_fails_parse() {
        let err = DefinitionFile::parse(
            r#"{ "modifiers": [ { "name": "bad", "modules": [
                { "type": "stat", "hooks": ["speed"], "value": 1.0 }
            ] } ] }"#,
        )
        .expect_err("id without namespace");
        assert_eq!(err.kind, ErrorKind::Serialization);
    }

    #[test]
    fn test_load_from_file() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("modifiers.json");
        std::fs::write(&path, FROSTFIRE).expect("write");

        let file = DefinitionFile::load(&path).expect("load");
        assert_eq!(file.modifiers[0].name, "frostfire");

        let err = DefinitionFile::load(&temp.path().join("missing.json")).expect_err("missing");
        assert_eq!(err.kind, ErrorKind::Io);
    }
}
