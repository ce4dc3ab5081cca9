//! Hook catalog: resolves hook identifiers to typed keys.
//!
//! Module definitions loaded from data name hooks by [`HookId`]. The catalog
//! holds every key a host knows about so those names can be turned back into
//! typed [`HookKey`]s, checking on the way that the caller asked for the
//! capability type the key was declared with.

use std::any::Any;
use std::collections::HashMap;

use tracing::info;

use hookmap_core::error::HookError;

use crate::id::HookId;
use crate::key::HookKey;

/// Registry of known hook keys by identifier.
#[derive(Default)]
pub struct HookCatalog {
    /// Hook id → `HookKey<T>` for the key's `T`.
    keys: HashMap<HookId, Box<dyn Any + Send + Sync>>,
    /// Ids in registration order.
    order: Vec<HookId>,
}

impl HookCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a key under its id.
    ///
    /// Fails with a conflict if a different key already uses the id.
    /// Registering the same key twice is accepted.
    pub fn register<T>(&mut self, key: &HookKey<T>) -> Result<(), HookError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        if let Some(existing) = self.keys.get(key.id()) {
            let same = existing
                .downcast_ref::<HookKey<T>>()
                .is_some_and(|existing| existing == key);
            if same {
                return Ok(());
            }
            return Err(HookError::conflict(format!(
                "Hook '{}' is already registered",
                key.id()
            )));
        }

        info!(hook = %key.id(), "Hook registered");

        self.keys.insert(key.id().clone(), Box::new(key.clone()));
        self.order.push(key.id().clone());

        Ok(())
    }

    /// Looks up the key registered under `id` as a `HookKey<T>`.
    pub fn get<T>(&self, id: &HookId) -> Result<HookKey<T>, HookError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let key = self
            .keys
            .get(id)
            .ok_or_else(|| HookError::not_found(format!("Hook '{id}' is not registered")))?;

        key.downcast_ref::<HookKey<T>>().cloned().ok_or_else(|| {
            HookError::type_mismatch(format!(
                "Hook '{id}' does not accept modules of type {}",
                std::any::type_name::<T>()
            ))
        })
    }

    /// Checks whether a key is registered under `id`.
    pub fn contains(&self, id: &HookId) -> bool {
        self.keys.contains_key(id)
    }

    /// Returns the number of registered keys.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterates over registered ids in registration order.
    pub fn ids(&self) -> impl Iterator<Item = &HookId> {
        self.order.iter()
    }
}
