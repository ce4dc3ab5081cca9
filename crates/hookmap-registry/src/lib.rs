//! # hookmap-registry
//!
//! Typed hook registry for modifier modules. Provides:
//!
//! - [`HookKey`] tokens carrying a default instance and a merge policy
//! - [`HookMapBuilder`] accumulating distinct modules per hook
//! - [`HookMap`], the immutable result, with default fallback on lookup
//! - [`HookCatalog`] resolving hook identifiers to typed keys

pub mod builder;
pub mod catalog;
pub mod id;
pub mod key;
pub mod macros;
pub mod map;
pub mod merge;

pub use builder::HookMapBuilder;
pub use catalog::HookCatalog;
pub use id::HookId;
pub use key::{HookKey, KeyToken};
pub use map::{HookMap, HookSummary};
