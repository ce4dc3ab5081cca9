//! Configuration schemas.
//!
//! Configuration is deserialized from an optional TOML file via the
//! `config` crate, overlaid with `HOOKMAP__`-separated environment
//! variables. Every field has a default, so no file is required.

pub mod logging;
pub mod output;

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use self::logging::LoggingConfig;
use self::output::OutputConfig;

use crate::error::HookError;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Output rendering settings.
    #[serde(default)]
    pub output: OutputConfig,
}

impl AppConfig {
    /// Load configuration from an optional TOML file and the environment.
    ///
    /// A missing file is not an error; a present but malformed one is.
    /// Environment variables use the `HOOKMAP` prefix and `__` as the
    /// section separator, e.g. `HOOKMAP__LOGGING__LEVEL=debug`.
    pub fn load(path: Option<&Path>) -> Result<Self, HookError> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            debug!(path = %path.display(), "Loading configuration file");
            builder = builder.add_source(config::File::from(path).required(false));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix("HOOKMAP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| HookError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| HookError::configuration(format!("Failed to deserialize config: {e}")))
    }
}
