//! Namespaced hook identifiers (`namespace:path`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use hookmap_core::error::HookError;

/// Identifier naming a hook, e.g. `tool:mining_speed`.
///
/// Identity of a [`HookKey`](crate::HookKey) is its token, not its id; the id
/// is what data files and logs refer to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HookId {
    namespace: String,
    path: String,
}

impl HookId {
    /// Creates an identifier from its two parts, validating both.
    pub fn new(namespace: &str, path: &str) -> Result<Self, HookError> {
        if namespace.is_empty() || !namespace.chars().all(is_namespace_char) {
            return Err(HookError::invalid_id(format!(
                "invalid hook namespace '{namespace}'"
            )));
        }
        if path.is_empty() || !path.chars().all(is_path_char) {
            return Err(HookError::invalid_id(format!("invalid hook path '{path}'")));
        }
        Ok(Self {
            namespace: namespace.to_string(),
            path: path.to_string(),
        })
    }

    /// Creates an identifier from string literals.
    ///
    /// # Panics
    ///
    /// Panics if either part contains characters not allowed in an id.
    /// Intended for hook keys declared in code.
    pub fn from_static(namespace: &'static str, path: &'static str) -> Self {
        match Self::new(namespace, path) {
            Ok(id) => id,
            Err(e) => panic!("invalid static hook id '{namespace}:{path}': {e}"),
        }
    }

    /// Returns the namespace part.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Returns the path part.
    pub fn path(&self) -> &str {
        &self.path
    }
}

fn is_namespace_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '_' | '.' | '-')
}

fn is_path_char(c: char) -> bool {
    is_namespace_char(c) || c == '/'
}

impl fmt::Display for HookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

impl FromStr for HookId {
    type Err = HookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (namespace, path) = s
            .split_once(':')
            .ok_or_else(|| HookError::invalid_id(format!("hook id '{s}' is missing a namespace")))?;
        Self::new(namespace, path)
    }
}

impl TryFrom<String> for HookId {
    type Error = HookError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HookId> for String {
    fn from(id: HookId) -> String {
        id.to_string()
    }
}
