//! Widget configuration.
//!
//! # Invariants
//! - `namespace` is non-empty after trimming.

use crate::filter::FilterMode;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage key used when the host does not configure one.
pub const DEFAULT_NAMESPACE: &str = "todoItems";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetConfig {
    /// Key under which the snapshot is persisted.
    pub namespace: String,
    /// Filter tab selected at startup.
    pub initial_filter: FilterMode,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            initial_filter: FilterMode::All,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyNamespace,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyNamespace => write!(f, "storage namespace cannot be empty"),
        }
    }
}

impl Error for ConfigError {}

impl WidgetConfig {
    /// Builds a config from host-provided values.
    ///
    /// `namespace` is trimmed; `filter` uses `FilterMode::parse` rules.
    pub fn from_parts(namespace: &str, filter: &str) -> Result<Self, ConfigError> {
        let config = Self {
            namespace: namespace.trim().to_string(),
            initial_filter: FilterMode::parse(filter),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.namespace.trim().is_empty() {
            return Err(ConfigError::EmptyNamespace);
        }
        Ok(())
    }
}
