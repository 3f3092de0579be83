//! # Host Configuration
//!
//! Which plugins the host loads. Read from YAML:
//!
//! ```yaml
//! plugins:
//!   - histomicsui_textbox
//! ```
//!
//! Without a `plugins` key every registered plugin is enabled. An empty
//! list enables none.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::PluginError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HostConfig {
    /// Entry point names to load. `None` means all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugins: Option<Vec<String>>,
}

impl HostConfig {
    /// Enable every registered plugin.
    pub fn all() -> Self {
        Self { plugins: None }
    }

    /// Enable only the named plugins.
    pub fn only<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            plugins: Some(names.into_iter().map(Into::into).collect()),
        }
    }

    /// Parse a configuration from YAML text. An empty document is the
    /// default configuration.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, PluginError> {
        Self::parse(yaml, "<inline>")
    }

    /// Read and parse a YAML configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, PluginError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| PluginError::Config {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::parse(&text, &path.display().to_string())
    }

    fn parse(yaml: &str, origin: &str) -> Result<Self, PluginError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml).map_err(|e| PluginError::Config {
            path: origin.to_string(),
            reason: e.to_string(),
        })?;
        tracing::debug!(source = origin, plugins = ?config.plugins, "loaded host configuration");
        Ok(config)
    }

    /// Whether the plugin under `entry_point` should be loaded.
    pub fn is_enabled(&self, entry_point: &str) -> bool {
        match &self.plugins {
            None => true,
            Some(names) => names.iter().any(|n| n == entry_point),
        }
    }

    /// Explicitly named plugins, or an empty slice when all are enabled.
    pub fn named_plugins(&self) -> &[String] {
        self.plugins.as_deref().unwrap_or(&[])
    }
}
