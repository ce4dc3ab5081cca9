//! Stock merge policies for capabilities that cannot be combined.
//!
//! Hooks whose modules compose (stat bonuses, tooltip lines) supply their own
//! merger to [`HookKey::new`](crate::HookKey::new). These helpers cover the
//! rest by picking a single module deterministically.

use std::sync::Arc;

use tracing::trace;

/// Keeps the first registered module.
pub fn first<T: ?Sized>(modules: &[Arc<T>]) -> Arc<T> {
    trace!(discarded = modules.len().saturating_sub(1), "Keeping first module");
    Arc::clone(&modules[0])
}

/// Keeps the last registered module.
pub fn last<T: ?Sized>(modules: &[Arc<T>]) -> Arc<T> {
    trace!(discarded = modules.len().saturating_sub(1), "Keeping last module");
    Arc::clone(&modules[modules.len() - 1])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HookId, HookKey, HookMap};

    trait Label: Send + Sync {
        fn label(&self) -> &str;
    }

    struct Fixed(&'static str);

    impl Label for Fixed {
        fn label(&self) -> &str {
            self.0
        }
    }

    #[test]
    fn test_first_and_last() {
        let a: Arc<dyn Label> = Arc::new(Fixed("a"));
        let b: Arc<dyn Label> = Arc::new(Fixed("b"));
        let modules = [Arc::clone(&a), Arc::clone(&b)];

        assert!(Arc::ptr_eq(&first(&modules), &a));
        assert!(Arc::ptr_eq(&last(&modules), &b));
    }

    #[test]
    fn test_first_as_key_policy() {
        let key = HookKey::<dyn Label>::new(
            HookId::from_static("test", "label"),
            Arc::new(Fixed("default")),
            first,
        );

        let map = HookMap::builder()
            .add_hook(key.accept(Arc::new(Fixed("one"))), &key)
            .add_hook(key.accept(Arc::new(Fixed("two"))), &key)
            .build();

        assert_eq!(map.get(&key).label(), "one");
    }
}
