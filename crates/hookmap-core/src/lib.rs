//! # hookmap-core
//!
//! Shared foundation for the HookMap crates: the unified error type, the
//! result alias, and the configuration schemas consumed by the inspector
//! binary.
//!
//! This crate has **no** internal dependencies on other HookMap crates.

pub mod config;
pub mod error;
pub mod result;

pub use error::{ErrorKind, HookError};
pub use result::HookResult;
