//! # Host Bootstrap
//!
//! Startup sequence: build the schema host, load the enabled plugins into
//! it, and collect the client bundles to serve. Any plugin failure aborts.

use std::path::Path;

use hui_core::{AnnotationElement, HuiError};
use hui_schema::{AnnotationSchemaHost, SchemaValidationError};
use serde_json::Value;

use crate::config::HostConfig;
use crate::error::PluginError;
use crate::plugin::{ClientBundle, PluginInfo};
use crate::registry::PluginRegistry;

/// A started host.
#[derive(Debug)]
pub struct LoadedHost {
    pub schema_host: AnnotationSchemaHost,
    pub plugins: PluginRegistry,
    pub client_bundles: Vec<ClientBundle>,
}

impl LoadedHost {
    /// Validate an element against the active schema.
    pub fn validate(&self, element: &Value) -> Result<(), SchemaValidationError> {
        self.schema_host.validate(element)
    }

    /// Validate an element against the active schema, then decode it into
    /// the typed model.
    pub fn decode_element(&self, element: &Value) -> Result<AnnotationElement, HuiError> {
        self.validate(element)
            .map_err(|e| HuiError::SchemaValidation(e.to_string()))?;
        Ok(AnnotationElement::from_value(element)?)
    }

    /// [`LoadedHost::decode_element`] for an element still in JSON text.
    pub fn decode_element_str(&self, json: &str) -> Result<AnnotationElement, HuiError> {
        let element: Value = serde_json::from_str(json)?;
        self.decode_element(&element)
    }
}

/// Start a host with the annotation host's own shared schemas and the
/// built-in plugins.
///
/// # Errors
///
/// Fails if the baseline schema does not build, if `config` names an unknown
/// plugin, or if a plugin fails to load.
pub fn bootstrap(config: &HostConfig) -> Result<LoadedHost, PluginError> {
    let schema_host = AnnotationSchemaHost::large_image().map_err(PluginError::Host)?;
    bootstrap_with(schema_host, PluginRegistry::builtin()?, config)
}

/// [`bootstrap`] with the configuration read from a YAML file.
pub fn bootstrap_from_path(path: impl AsRef<Path>) -> Result<LoadedHost, PluginError> {
    bootstrap(&HostConfig::from_path(path)?)
}

/// Start a host from an explicit schema host and plugin registry.
pub fn bootstrap_with(
    schema_host: AnnotationSchemaHost,
    mut plugins: PluginRegistry,
    config: &HostConfig,
) -> Result<LoadedHost, PluginError> {
    let loaded = plugins.load_all(&PluginInfo::new(&schema_host), config)?;
    let client_bundles = plugins.client_bundles();
    tracing::info!(
        plugins = ?loaded,
        bundles = client_bundles.len(),
        element_types = ?schema_host.type_names(),
        "annotation host started"
    );
    Ok(LoadedHost {
        schema_host,
        plugins,
        client_bundles,
    })
}
