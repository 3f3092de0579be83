//! # Host Plugin Contract
//!
//! A plugin is discovered under its entry point name, describes the client
//! bundle it ships, and gets one `load` call at startup with access to the
//! schema host it may extend.

use std::fmt;

use hui_schema::AnnotationSchemaHost;

use crate::error::PluginError;

/// What the host hands a plugin when loading it.
#[derive(Debug, Clone, Copy)]
pub struct PluginInfo<'a> {
    /// The schema host the plugin may patch.
    pub schema_host: &'a AnnotationSchemaHost,
}

impl<'a> PluginInfo<'a> {
    pub fn new(schema_host: &'a AnnotationSchemaHost) -> Self {
        Self { schema_host }
    }
}

/// A client bundle the host should serve for a loaded plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientBundle {
    pub entry_point: &'static str,
    pub display_name: &'static str,
    /// Directory of the client sources, relative to the plugin package.
    pub source_path: &'static str,
}

/// An annotation host plugin.
pub trait HostPlugin: Send + Sync + fmt::Debug {
    /// Name the host discovers the plugin under.
    fn entry_point(&self) -> &'static str;

    /// Human-readable name shown by the host.
    fn display_name(&self) -> &'static str;

    /// Client source directory, if the plugin ships one.
    fn client_source_path(&self) -> Option<&'static str> {
        None
    }

    /// Called once at startup.
    ///
    /// # Errors
    ///
    /// Any error aborts host startup.
    fn load(&self, info: &PluginInfo<'_>) -> Result<(), PluginError>;

    /// The bundle to serve for this plugin, if it has client sources.
    fn client_bundle(&self) -> Option<ClientBundle> {
        self.client_source_path().map(|source_path| ClientBundle {
            entry_point: self.entry_point(),
            display_name: self.display_name(),
            source_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Headless;

    impl HostPlugin for Headless {
        fn entry_point(&self) -> &'static str {
            "headless"
        }
        fn display_name(&self) -> &'static str {
            "Headless"
        }
        fn load(&self, _info: &PluginInfo<'_>) -> Result<(), PluginError> {
            Ok(())
        }
    }

    #[test]
    fn no_client_source_means_no_bundle() {
        assert!(Headless.client_bundle().is_none());
    }
}
