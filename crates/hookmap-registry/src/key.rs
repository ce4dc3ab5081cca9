//! Typed hook keys.
//!
//! A [`HookKey<T>`] names a capability `T` (usually a `dyn Trait`) and knows
//! two things about it: the instance to use when no module implements the
//! hook, and how to combine several implementations into one.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::id::HookId;

static NEXT_TOKEN: AtomicU64 = AtomicU64::new(1);

/// Identity of a hook key.
///
/// Every call to [`HookKey::new`] yields a fresh token; clones of a key share
/// it. Keys built from identical arguments are still different keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyToken(u64);

impl KeyToken {
    fn next() -> Self {
        Self(NEXT_TOKEN.fetch_add(1, Ordering::Relaxed))
    }
}

/// A typed hook identifier with its default instance and merge policy.
pub struct HookKey<T: ?Sized + 'static> {
    inner: Arc<KeyInner<T>>,
}

struct KeyInner<T: ?Sized + 'static> {
    token: KeyToken,
    id: HookId,
    default_instance: Arc<T>,
    /// Combines an ordered slice of at least two modules.
    merger: Box<dyn Fn(&[Arc<T>]) -> Arc<T> + Send + Sync>,
}

impl<T: ?Sized + Send + Sync + 'static> HookKey<T> {
    /// Creates a new hook key.
    ///
    /// `merger` receives modules in first-registration order and is only
    /// called with two or more of them.
    pub fn new<F>(id: HookId, default_instance: Arc<T>, merger: F) -> Self
    where
        F: Fn(&[Arc<T>]) -> Arc<T> + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(KeyInner {
                token: KeyToken::next(),
                id,
                default_instance,
                merger: Box::new(merger),
            }),
        }
    }

    /// Returns the instance used when no module implements this hook.
    pub fn default_instance(&self) -> Arc<T> {
        Arc::clone(&self.inner.default_instance)
    }

    /// Combines several modules into one using this key's policy.
    pub fn merge(&self, modules: &[Arc<T>]) -> Arc<T> {
        debug_assert!(modules.len() >= 2, "merge called with fewer than two modules");
        (self.inner.merger)(modules)
    }

    /// Returns `module` unchanged, typed as this key's capability.
    ///
    /// Lets a concrete `Arc<M>` coerce to `Arc<T>` at a call site where the
    /// target type is fixed by the key, which is what [`add_hooks!`](crate::add_hooks)
    /// relies on when one module serves several capabilities.
    pub fn accept(&self, module: Arc<T>) -> Arc<T> {
        module
    }
}

impl<T: ?Sized + 'static> HookKey<T> {
    /// Returns the identity token.
    pub fn token(&self) -> KeyToken {
        self.inner.token
    }

    /// Returns the hook identifier.
    pub fn id(&self) -> &HookId {
        &self.inner.id
    }
}

impl<T: ?Sized + 'static> Clone for HookKey<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: ?Sized + 'static> PartialEq for HookKey<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner.token == other.inner.token
    }
}

impl<T: ?Sized + 'static> Eq for HookKey<T> {}

impl<T: ?Sized + 'static> Hash for HookKey<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.token.hash(state);
    }
}

impl<T: ?Sized + 'static> fmt::Debug for HookKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookKey")
            .field("id", &self.inner.id)
            .field("token", &self.inner.token)
            .finish()
    }
}

impl<T: ?Sized + 'static> fmt::Display for HookKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joined(id: &'static str) -> HookKey<str> {
        HookKey::<str>::new(HookId::from_static("test", id), Arc::from("none"), |names| {
            let parts: Vec<&str> = names.iter().map(|n| &**n).collect();
            Arc::from(parts.join(","))
        })
    }

    #[test]
    fn test_identity_not_structural() {
        let a = joined("name");
        let b = joined("name");
        assert_ne!(a, b);
        assert_eq!(a.id(), b.id());
        assert_eq!(a, a.clone());
        assert_eq!(a.token(), a.clone().token());
    }

    #[test]
    fn test_default_instance_is_shared() {
        let key = joined("name");
        let first = key.default_instance();
        let second = key.default_instance();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(&*first, "none");
    }

    #[test]
    fn test_merge_preserves_order() {
        let key = joined("name");
        let merged = key.merge(&[Arc::from("a"), Arc::from("b"), Arc::from("c")]);
        assert_eq!(&*merged, "a,b,c");
    }

    #[test]
    fn test_display_uses_id() {
        let key = joined("display");
        assert_eq!(key.to_string(), "test:display");
        assert!(format!("{key:?}").contains("HookKey"));
    }
}
