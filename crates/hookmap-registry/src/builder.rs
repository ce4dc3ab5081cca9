//! Builder accumulating modules per hook before collapsing them into a
//! [`HookMap`].
//!
//! Each hook keeps the distinct modules registered for it, in the order they
//! were first added. Distinct means a different `Arc` allocation: adding the
//! same `Arc` twice under one hook is a no-op, while two equal-looking
//! modules in separate allocations are both kept.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::id::HookId;
use crate::key::{HookKey, KeyToken};
use crate::map::{HookEntry, HookMap};

/// Modules collected so far for one hook, with the capability type erased.
trait PendingHook: Send {
    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn id(&self) -> &HookId;

    fn len(&self) -> usize;

    /// Collapses the modules into a stored entry. `None` when empty.
    fn finish(self: Box<Self>) -> Option<HookEntry>;
}

struct Pending<T: ?Sized + 'static> {
    key: HookKey<T>,
    modules: Vec<Arc<T>>,
}

impl<T: ?Sized + Send + Sync + 'static> Pending<T> {
    fn insert(&mut self, module: Arc<T>) {
        let duplicate = self
            .modules
            .iter()
            .any(|existing| std::ptr::addr_eq(Arc::as_ptr(existing), Arc::as_ptr(&module)));

        if duplicate {
            trace!(hook = %self.key, "Module already registered for hook, skipping");
            return;
        }

        self.modules.push(module);
    }
}

impl<T: ?Sized + Send + Sync + 'static> PendingHook for Pending<T> {
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn id(&self) -> &HookId {
        self.key.id()
    }

    fn len(&self) -> usize {
        self.modules.len()
    }

    fn finish(self: Box<Self>) -> Option<HookEntry> {
        let Pending { key, modules } = *self;

        let value = match modules.as_slice() {
            [] => return None,
            [single] => Arc::clone(single),
            many => {
                trace!(hook = %key, modules = many.len(), "Merging modules");
                key.merge(many)
            }
        };

        Some(HookEntry {
            token: key.token(),
            id: key.id().clone(),
            modules: modules.len(),
            value: Box::new(value),
        })
    }
}

/// Accumulates modules per hook; consumed by [`build`](Self::build).
///
/// Hooks keep first-insertion order, as do the modules within each hook.
/// That order is the order the key's merge policy sees.
#[derive(Default)]
pub struct HookMapBuilder {
    /// Hook token → slot in `pending`.
    index: HashMap<KeyToken, usize>,
    /// Pending hooks in first-insertion order.
    pending: Vec<Box<dyn PendingHook>>,
}

impl HookMapBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `module` as an implementation of `hook`.
    ///
    /// The module must already be typed as the hook's capability, e.g.
    /// `Arc<dyn StatHook>`; [`HookKey::accept`] performs that coercion from a
    /// concrete `Arc`.
    pub fn add_hook<T>(mut self, module: Arc<T>, hook: &HookKey<T>) -> Self
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let next = self.pending.len();
        let slot = *self.index.entry(hook.token()).or_insert(next);
        if slot == next {
            self.pending.push(Box::new(Pending {
                key: hook.clone(),
                modules: Vec::new(),
            }));
        }

        match self.pending[slot].as_any_mut().downcast_mut::<Pending<T>>() {
            Some(pending) => pending.insert(module),
            None => warn!(
                hook = %hook,
                "Hook token bound to another capability type, module ignored"
            ),
        }

        self
    }

    /// Registers `module` under each of `hooks`, in order.
    ///
    /// Equivalent to calling [`add_hook`](Self::add_hook) once per hook. For
    /// hooks with different capability types use [`add_hooks!`](crate::add_hooks).
    pub fn add_hooks<T>(self, module: Arc<T>, hooks: &[&HookKey<T>]) -> Self
    where
        T: ?Sized + Send + Sync + 'static,
    {
        hooks
            .iter()
            .fold(self, |builder, hook| builder.add_hook(Arc::clone(&module), hook))
    }

    /// Returns whether no module has been registered.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Collapses the accumulated modules into an immutable [`HookMap`].
    ///
    /// A hook with one module stores it as is; a hook with several stores the
    /// result of its key's merge policy. With nothing registered, the shared
    /// [`HookMap::empty`] instance is returned.
    pub fn build(self) -> HookMap {
        if self.pending.is_empty() {
            return HookMap::empty();
        }

        let entries: Vec<HookEntry> = self
            .pending
            .into_iter()
            .filter_map(|pending| pending.finish())
            .collect();

        debug!(hooks = entries.len(), "Built hook map");

        HookMap::from_entries(entries)
    }
}

impl fmt::Debug for HookMapBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for pending in &self.pending {
            map.entry(pending.id(), &pending.len());
        }
        map.finish()
    }
}
