//! Convenience macros for registering modules.

/// Registers one module under several hooks whose capability types differ.
///
/// `module` is a concrete `Arc<M>`; each hook is a `&HookKey<dyn Trait>` for
/// a trait `M` implements. Hooks are added in the order given, exactly as
/// chained [`HookMapBuilder::add_hook`](crate::HookMapBuilder::add_hook)
/// calls would, and the resulting builder is returned.
///
/// # Example
/// ```rust,ignore
/// let builder = add_hooks!(HookMap::builder(), Arc::new(Blazing) => &SPEED, &NAME);
/// ```
#[macro_export]
macro_rules! add_hooks {
    ($builder:expr, $module:expr => $($hook:expr),+ $(,)?) => {{
        let module = $module;
        let builder = $builder;
        $(
            let hook = $hook;
            let builder = builder.add_hook(hook.accept(module.clone()), hook);
        )+
        builder
    }};
}
