//! Immutable hook map: hook key to module, with default fallback.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock};

use serde::Serialize;

use crate::builder::HookMapBuilder;
use crate::id::HookId;
use crate::key::{HookKey, KeyToken};

/// Shared instance returned for builders that registered nothing.
static EMPTY: LazyLock<HookMap> = LazyLock::new(|| HookMap::from_entries(Vec::new()));

/// One collapsed hook as stored in a [`HookMap`].
pub(crate) struct HookEntry {
    /// Key identity.
    pub(crate) token: KeyToken,
    /// Key identifier, kept for introspection.
    pub(crate) id: HookId,
    /// Number of distinct modules that produced `value`.
    pub(crate) modules: usize,
    /// An `Arc<T>` where `T` is the key's capability type.
    pub(crate) value: Box<dyn Any + Send + Sync>,
}

struct Inner {
    index: HashMap<KeyToken, usize>,
    entries: Vec<HookEntry>,
}

/// Immutable mapping from hook keys to the module implementing them.
///
/// Cloning is cheap and clones share storage. Lookups never fail: a hook with
/// no registered module resolves to its key's default instance.
#[derive(Clone)]
pub struct HookMap {
    inner: Arc<Inner>,
}

/// Summary of one hook present in a [`HookMap`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HookSummary<'a> {
    /// Hook identifier.
    pub id: &'a HookId,
    /// Number of distinct modules registered for the hook.
    pub modules: usize,
}

impl HookMap {
    /// Starts a new builder.
    pub fn builder() -> HookMapBuilder {
        HookMapBuilder::new()
    }

    /// Returns the shared map with no hooks.
    pub fn empty() -> Self {
        EMPTY.clone()
    }

    pub(crate) fn from_entries(entries: Vec<HookEntry>) -> Self {
        let index = entries
            .iter()
            .enumerate()
            .map(|(slot, entry)| (entry.token, slot))
            .collect();
        Self {
            inner: Arc::new(Inner { index, entries }),
        }
    }

    /// Checks if a module is registered for the given hook.
    pub fn has_hook<T: ?Sized + 'static>(&self, hook: &HookKey<T>) -> bool {
        self.inner.index.contains_key(&hook.token())
    }

    /// Gets the module for the given hook, or the hook's default instance.
    pub fn get<T: ?Sized + Send + Sync + 'static>(&self, hook: &HookKey<T>) -> Arc<T> {
        self.find(hook).unwrap_or_else(|| hook.default_instance())
    }

    /// Gets the module for the given hook without falling back to the default.
    pub fn find<T: ?Sized + Send + Sync + 'static>(&self, hook: &HookKey<T>) -> Option<Arc<T>> {
        let slot = *self.inner.index.get(&hook.token())?;
        self.inner
            .entries
            .get(slot)
            .and_then(|entry| entry.value.downcast_ref::<Arc<T>>())
            .cloned()
    }

    /// Returns the number of hooks with at least one module.
    pub fn len(&self) -> usize {
        self.inner.entries.len()
    }

    /// Returns whether no hook has a module.
    pub fn is_empty(&self) -> bool {
        self.inner.entries.is_empty()
    }

    /// Iterates over the present hooks in first-registration order.
    pub fn entries(&self) -> impl Iterator<Item = HookSummary<'_>> {
        self.inner.entries.iter().map(|entry| HookSummary {
            id: &entry.id,
            modules: entry.modules,
        })
    }

    /// Returns whether both maps share the same storage.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }
}

impl Default for HookMap {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for HookMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookMap")
            .field(
                "hooks",
                &self.inner.entries.iter().map(|e| &e.id).collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter(path: &'static str) -> HookKey<usize> {
        HookKey::<usize>::new(HookId::from_static("test", path), Arc::new(0), |counts| {
            Arc::new(counts.iter().map(|c| **c).sum())
        })
    }

    #[test]
    fn test_empty_is_shared() {
        let a = HookMap::empty();
        let b = HookMap::default();
        assert!(HookMap::ptr_eq(&a, &b));
        assert!(a.is_empty());
        assert_eq!(a.len(), 0);
    }

    #[test]
    fn test_empty_returns_defaults() {
        let key = counter("hits");
        let map = HookMap::empty();
        assert!(!map.has_hook(&key));
        assert!(map.find(&key).is_none());
        assert!(Arc::ptr_eq(&map.get(&key), &key.default_instance()));
    }

    #[test]
    fn test_entries_report_module_counts() {
        let hits = counter("hits");
        let misses = counter("misses");
        let map = HookMap::builder()
            .add_hook(Arc::new(1), &hits)
            .add_hook(Arc::new(2), &misses)
            .add_hook(Arc::new(3), &hits)
            .build();

        let summaries: Vec<_> = map.entries().collect();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].id, hits.id());
        assert_eq!(summaries[0].modules, 2);
        assert_eq!(summaries[1].id, misses.id());
        assert_eq!(summaries[1].modules, 1);
        assert_eq!(*map.get(&hits), 4);
    }

    #[test]
    fn test_debug_lists_ids() {
        let hits = counter("hits");
        let map = HookMap::builder().add_hook(Arc::new(1), &hits).build();
        assert_eq!(
            format!("{map:?}"),
            "HookMap { hooks: [HookId { namespace: \"test\", path: \"hits\" }] }"
        );
    }
}
