//! Convenience result type alias for HookMap.

use crate::error::HookError;

/// A specialized `Result` type for the fallible HookMap operations.
pub type HookResult<T> = Result<T, HookError>;
