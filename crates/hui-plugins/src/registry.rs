//! # Plugin Registry
//!
//! Plugins keyed by entry point, kept in registration order. Loading walks
//! that order, so a plugin registered later can rely on the schema patches
//! of the ones before it.

use std::collections::BTreeSet;

use crate::arrow::ArrowPlugin;
use crate::config::HostConfig;
use crate::error::PluginError;
use crate::plugin::{ClientBundle, HostPlugin, PluginInfo};
use crate::textbox::TextboxPlugin;

/// Registered plugins and the entry points already loaded.
#[derive(Debug, Default)]
pub struct PluginRegistry {
    plugins: Vec<Box<dyn HostPlugin>>,
    loaded: BTreeSet<&'static str>,
}

impl PluginRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the textbox and arrow plugins.
    pub fn builtin() -> Result<Self, PluginError> {
        let mut registry = Self::new();
        registry.register(Box::new(TextboxPlugin))?;
        registry.register(Box::new(ArrowPlugin))?;
        Ok(registry)
    }

    /// Register a plugin under its entry point.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::AlreadyRegistered`] if the entry point is taken.
    pub fn register(&mut self, plugin: Box<dyn HostPlugin>) -> Result<(), PluginError> {
        let name = plugin.entry_point();
        if self.get(name).is_some() {
            return Err(PluginError::AlreadyRegistered {
                name: name.to_string(),
            });
        }
        tracing::info!(plugin = name, display_name = plugin.display_name(), "registered plugin");
        self.plugins.push(plugin);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, entry_point: &str) -> Option<&dyn HostPlugin> {
        self.plugins
            .iter()
            .find(|p| p.entry_point() == entry_point)
            .map(|p| &**p)
    }

    /// Entry points in registration order.
    #[must_use]
    pub fn entry_points(&self) -> Vec<&'static str> {
        self.plugins.iter().map(|p| p.entry_point()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    #[must_use]
    pub fn is_loaded(&self, entry_point: &str) -> bool {
        self.loaded.contains(entry_point)
    }

    /// Load every enabled plugin that has not been loaded yet, in
    /// registration order. Returns the entry points loaded by this call.
    ///
    /// # Errors
    ///
    /// [`PluginError::NotFound`] if `config` names an unregistered plugin;
    /// nothing is loaded in that case. Otherwise the first plugin failure,
    /// after which later plugins are not loaded.
    pub fn load_all(
        &mut self,
        info: &PluginInfo<'_>,
        config: &HostConfig,
    ) -> Result<Vec<&'static str>, PluginError> {
        if let Some(unknown) = config
            .named_plugins()
            .iter()
            .find(|name| self.get(name).is_none())
        {
            return Err(PluginError::NotFound {
                name: unknown.clone(),
            });
        }

        let mut newly_loaded = Vec::new();
        for plugin in &self.plugins {
            let name = plugin.entry_point();
            if !config.is_enabled(name) {
                tracing::debug!(plugin = name, "plugin disabled by configuration");
                continue;
            }
            if self.loaded.contains(name) {
                tracing::debug!(plugin = name, "plugin already loaded; skipping");
                continue;
            }
            plugin.load(info)?;
            self.loaded.insert(name);
            newly_loaded.push(name);
            tracing::info!(plugin = name, display_name = plugin.display_name(), "loaded plugin");
        }
        Ok(newly_loaded)
    }

    /// Client bundles of the loaded plugins, in registration order.
    #[must_use]
    pub fn client_bundles(&self) -> Vec<ClientBundle> {
        self.plugins
            .iter()
            .filter(|p| self.loaded.contains(p.entry_point()))
            .filter_map(|p| p.client_bundle())
            .collect()
    }
}
