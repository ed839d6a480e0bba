//! Registry configuration.

use serde::{Deserialize, Serialize};

/// Tunables for a [`BlockRegistry`](crate::core::BlockRegistry).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistryConfig {
    /// Seconds counted for a stored block whose type is not registered.
    pub fallback_duration_secs: u32,

    /// Check every definition's defaults and examples against its own rule
    /// when building a registry from custom definitions.
    pub verify_definitions: bool,
}

impl RegistryConfig {
    /// Parse a JSON config; missing fields take their defaults.
    ///
    /// # Errors
    /// Returns [`ConfigError`] if the JSON is malformed or a value is out of range.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Builder-style override of the unknown-type duration.
    #[must_use]
    pub fn with_fallback_duration_secs(mut self, secs: u32) -> Self {
        self.fallback_duration_secs = secs;
        self
    }

    /// # Errors
    /// Returns [`ConfigError::OutOfRange`] for a zero fallback duration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fallback_duration_secs == 0 {
            return Err(ConfigError::OutOfRange {
                field: "fallbackDurationSecs",
                reason: "must be greater than zero".to_owned(),
            });
        }
        Ok(())
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            fallback_duration_secs: 30,
            verify_definitions: true,
        }
    }
}

/// Errors produced while loading a [`RegistryConfig`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The config document is not valid JSON for this struct.
    #[error("invalid registry config: {0}")]
    Parse(String),

    /// A field holds a value outside its accepted range.
    #[error("registry config field '{field}' {reason}")]
    OutOfRange { field: &'static str, reason: String },
}
