//! Built-in demo hooks the inspector knows how to resolve and render.

use std::sync::Arc;

use serde::Serialize;
use tabled::Tabled;

use hookmap_core::HookResult;
use hookmap_registry::{HookCatalog, HookId, HookKey, HookMap};

/// Stat capability: contributes a flat amount to a tool stat.
pub trait StatHook: Send + Sync {
    /// Amount contributed.
    fn value(&self) -> f64;
}

/// A fixed stat contribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatStat(pub f64);

impl StatHook for FlatStat {
    fn value(&self) -> f64 {
        self.0
    }
}

/// Keys for the demo hooks.
pub struct DemoHooks {
    /// `demo:speed`, summed, default 1.0.
    pub speed: HookKey<dyn StatHook>,
    /// `demo:defense`, summed, default 1.0.
    pub defense: HookKey<dyn StatHook>,
    /// `demo:name`, comma-joined, default `"none"`.
    pub name: HookKey<str>,
}

/// One demo hook as listed by the `hooks` command.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct HookInfo {
    /// Hook identifier.
    pub hook: String,
    /// Capability kind.
    pub kind: &'static str,
    /// Rendered default instance.
    pub default: String,
}

/// One demo hook as resolved for a modifier.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct HookRow {
    /// Modifier name.
    pub modifier: String,
    /// Hook identifier.
    pub hook: String,
    /// Whether any module implements the hook.
    pub present: bool,
    /// Distinct modules registered for the hook.
    pub modules: usize,
    /// Rendered resolved value.
    pub value: String,
}

impl DemoHooks {
    /// Creates the demo hook keys.
    pub fn new() -> Self {
        Self {
            speed: stat_key("speed"),
            defense: stat_key("defense"),
            name: HookKey::<str>::new(
                HookId::from_static("demo", "name"),
                Arc::from("none"),
                |names| {
                    let parts: Vec<&str> = names.iter().map(|n| &**n).collect();
                    Arc::from(parts.join(","))
                },
            ),
        }
    }

    /// Builds a catalog containing every demo hook.
    pub fn catalog(&self) -> HookResult<HookCatalog> {
        let mut catalog = HookCatalog::new();
        catalog.register(&self.speed)?;
        catalog.register(&self.defense)?;
        catalog.register(&self.name)?;
        Ok(catalog)
    }

    /// Describes every demo hook and its default.
    pub fn describe(&self) -> Vec<HookInfo> {
        vec![
            stat_info(&self.speed),
            stat_info(&self.defense),
            HookInfo {
                hook: self.name.id().to_string(),
                kind: "text",
                default: self.name.default_instance().to_string(),
            },
        ]
    }

    /// Resolves every demo hook against a modifier's map.
    pub fn resolve(&self, modifier: &str, map: &HookMap) -> Vec<HookRow> {
        let row = |id: &HookId, present: bool, value: String| HookRow {
            modifier: modifier.to_string(),
            hook: id.to_string(),
            present,
            modules: map
                .entries()
                .find(|summary| summary.id == id)
                .map_or(0, |summary| summary.modules),
            value,
        };

        vec![
            row(
                self.speed.id(),
                map.has_hook(&self.speed),
                format_stat(map.get(&self.speed).value()),
            ),
            row(
                self.defense.id(),
                map.has_hook(&self.defense),
                format_stat(map.get(&self.defense).value()),
            ),
            row(
                self.name.id(),
                map.has_hook(&self.name),
                map.get(&self.name).to_string(),
            ),
        ]
    }
}

impl Default for DemoHooks {
    fn default() -> Self {
        Self::new()
    }
}

fn stat_key(path: &'static str) -> HookKey<dyn StatHook> {
    HookKey::<dyn StatHook>::new(
        HookId::from_static("demo", path),
        Arc::new(FlatStat(1.0)),
        |modules| {
            let total: f64 = modules.iter().map(|m| m.value()).sum();
            Arc::new(FlatStat(total))
        },
    )
}

fn stat_info(key: &HookKey<dyn StatHook>) -> HookInfo {
    HookInfo {
        hook: key.id().to_string(),
        kind: "stat",
        default: format_stat(key.default_instance().value()),
    }
}

fn format_stat(value: f64) -> String {
    format!("{value:.2}")
}
