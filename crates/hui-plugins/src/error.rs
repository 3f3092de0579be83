//! # Plugin Errors
//!
//! Every error here aborts host startup. Load failures name the plugin that
//! failed so the operator knows which entry point to disable or fix.

use hui_schema::SchemaError;
use thiserror::Error;

/// Errors raised while discovering, configuring, or loading plugins.
#[derive(Error, Debug)]
pub enum PluginError {
    /// A plugin's `load` failed to extend the element schema.
    #[error("plugin '{entry_point}' failed to load: {source}")]
    Load {
        /// Entry point of the failing plugin.
        entry_point: String,
        /// Underlying schema failure.
        #[source]
        source: SchemaError,
    },

    /// The schema host itself could not be built.
    #[error("schema host failed to start: {0}")]
    Host(#[source] SchemaError),

    /// The configuration names a plugin that is not registered.
    #[error("plugin '{name}' not found in registry")]
    NotFound {
        /// Name that was looked up.
        name: String,
    },

    /// Two plugins were registered under the same entry point.
    #[error("plugin '{name}' is already registered")]
    AlreadyRegistered {
        /// Conflicting entry point.
        name: String,
    },

    /// The host configuration could not be read or parsed.
    #[error("configuration error for '{path}': {reason}")]
    Config {
        /// Configuration source (file path, or `<inline>`).
        path: String,
        /// Why it was rejected.
        reason: String,
    },
}
