//! The arrow plugin. Arrow is part of the baseline element schema, so the
//! plugin only ships client code.

use crate::error::PluginError;
use crate::plugin::{HostPlugin, PluginInfo};

pub const ARROW_ENTRY_POINT: &str = "histomicsui_arrow";

#[derive(Debug, Default, Clone, Copy)]
pub struct ArrowPlugin;

impl HostPlugin for ArrowPlugin {
    fn entry_point(&self) -> &'static str {
        ARROW_ENTRY_POINT
    }

    fn display_name(&self) -> &'static str {
        "HistomicsUI Arrow Annotation"
    }

    fn client_source_path(&self) -> Option<&'static str> {
        Some("web_client")
    }

    fn load(&self, _info: &PluginInfo<'_>) -> Result<(), PluginError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hui_schema::AnnotationSchemaHost;

    #[test]
    fn load_leaves_registry_alone() {
        let host = AnnotationSchemaHost::large_image().unwrap();
        let before = host.registry();
        let validator = host.validator();

        ArrowPlugin.load(&PluginInfo::new(&host)).unwrap();

        assert_eq!(host.registry(), before);
        assert!(std::sync::Arc::ptr_eq(&validator, &host.validator()));
        assert_eq!(host.count_type("arrow"), 1);
    }
}
