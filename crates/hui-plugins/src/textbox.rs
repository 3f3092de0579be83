//! The textbox plugin: registers the textbox element schema with the host.

use hui_schema::PatchOutcome;

use crate::error::PluginError;
use crate::plugin::{HostPlugin, PluginInfo};

pub const TEXTBOX_ENTRY_POINT: &str = "histomicsui_textbox";

#[derive(Debug, Default, Clone, Copy)]
pub struct TextboxPlugin;

impl HostPlugin for TextboxPlugin {
    fn entry_point(&self) -> &'static str {
        TEXTBOX_ENTRY_POINT
    }

    fn display_name(&self) -> &'static str {
        "HistomicsUI Textbox Annotation"
    }

    fn client_source_path(&self) -> Option<&'static str> {
        Some("web_client")
    }

    fn load(&self, info: &PluginInfo<'_>) -> Result<(), PluginError> {
        let outcome = info
            .schema_host
            .patch_textbox()
            .map_err(|source| PluginError::Load {
                entry_point: TEXTBOX_ENTRY_POINT.to_string(),
                source,
            })?;
        if outcome == PatchOutcome::AlreadyRegistered {
            tracing::debug!(
                plugin = TEXTBOX_ENTRY_POINT,
                "textbox schema was already registered"
            );
        }
        Ok(())
    }
}
