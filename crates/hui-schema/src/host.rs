//! # Annotation Schema Host
//!
//! The registry / validator pair the annotation host validates elements
//! with, plus the patch operation plugins use to add element kinds.
//!
//! ## Patch discipline
//!
//! [`AnnotationSchemaHost::patch_with`] is idempotent and keyed on the
//! element type value:
//!
//! 1. If the registry already has an entry for the type, nothing changes.
//! 2. Otherwise the fragment is built, appended to a copy of the registry,
//!    and a validator is compiled from that copy.
//! 3. The new registry and validator are published together under one
//!    write lock.
//!
//! A failure in step 2 leaves the active registry and validator untouched.
//! Readers take an `Arc` snapshot of the validator, so they never observe a
//! validator that disagrees with the registry it was published with.

use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;
use serde_json::Value;

use crate::audit::audit_closed_fragment;
use crate::error::SchemaError;
use crate::registry::ElementSchemaRegistry;
use crate::shared::SharedSchemas;
use crate::textbox::{build_textbox_schema, TEXTBOX_TYPE};
use crate::validate::{ElementValidator, SchemaValidationError};

static GLOBAL_HOST: OnceLock<AnnotationSchemaHost> = OnceLock::new();

/// Result of a patch request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOutcome {
    /// The fragment was appended and a new validator installed.
    Registered,
    /// The type was already registered; nothing changed.
    AlreadyRegistered,
}

#[derive(Debug)]
struct HostState {
    registry: ElementSchemaRegistry,
    validator: Arc<ElementValidator>,
}

/// Shared element schema registry and its active validator.
#[derive(Debug)]
pub struct AnnotationSchemaHost {
    shared: SharedSchemas,
    state: RwLock<HostState>,
}

impl AnnotationSchemaHost {
    /// A host whose registry starts with the baseline element schemas built
    /// from `shared`.
    ///
    /// # Errors
    ///
    /// Fails if the baseline cannot be built or compiled.
    pub fn new(shared: SharedSchemas) -> Result<Self, SchemaError> {
        let registry = ElementSchemaRegistry::large_image(&shared)?;
        Self::with_registry(shared, registry)
    }

    /// A host with the annotation host's own shared fragments.
    pub fn large_image() -> Result<Self, SchemaError> {
        Self::new(SharedSchemas::large_image())
    }

    /// A host over an explicit starting registry.
    pub fn with_registry(
        shared: SharedSchemas,
        registry: ElementSchemaRegistry,
    ) -> Result<Self, SchemaError> {
        let validator = Arc::new(ElementValidator::compile(&registry)?);
        Ok(Self {
            shared,
            state: RwLock::new(HostState {
                registry,
                validator,
            }),
        })
    }

    /// Install `host` as the process-wide schema host.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::GlobalAlreadyInstalled`] if a host was
    /// installed before; the existing host stays in place.
    pub fn install_global(host: AnnotationSchemaHost) -> Result<&'static Self, SchemaError> {
        let mut installed = false;
        let global = GLOBAL_HOST.get_or_init(|| {
            installed = true;
            host
        });
        if installed {
            tracing::info!(
                types = ?global.type_names(),
                "installed process-wide annotation schema host"
            );
            Ok(global)
        } else {
            Err(SchemaError::GlobalAlreadyInstalled)
        }
    }

    /// The process-wide schema host, if one was installed.
    pub fn global() -> Option<&'static Self> {
        GLOBAL_HOST.get()
    }

    /// The shared fragments element builders draw from.
    pub fn shared(&self) -> &SharedSchemas {
        &self.shared
    }

    /// The active validator.
    pub fn validator(&self) -> Arc<ElementValidator> {
        Arc::clone(&self.state.read().validator)
    }

    /// Validate an element with the active validator.
    pub fn validate(&self, element: &Value) -> Result<(), SchemaValidationError> {
        self.validator().validate(element)
    }

    /// A copy of the current registry.
    pub fn registry(&self) -> ElementSchemaRegistry {
        self.state.read().registry.clone()
    }

    /// The merged `anyOf` element schema.
    pub fn element_schema(&self) -> Value {
        self.state.read().registry.to_schema()
    }

    /// Registered type values, in registration order.
    pub fn type_names(&self) -> Vec<String> {
        self.state
            .read()
            .registry
            .type_names()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Number of registry entries declaring `type_name`.
    pub fn count_type(&self, type_name: &str) -> usize {
        self.state.read().registry.count_type(type_name)
    }

    /// Register the textbox element schema, once.
    pub fn patch_textbox(&self) -> Result<PatchOutcome, SchemaError> {
        self.patch_with(TEXTBOX_TYPE, build_textbox_schema)
    }

    /// Register the fragment produced by `build` under `type_name`, unless
    /// the type is already registered.
    ///
    /// `build` runs only when the type is missing, or to compare a
    /// registered fragment against a fresh build.
    ///
    /// # Errors
    ///
    /// Propagates builder, registration, and compilation failures. The
    /// active registry and validator are unchanged on error.
    pub fn patch_with<F>(&self, type_name: &str, build: F) -> Result<PatchOutcome, SchemaError>
    where
        F: FnOnce(&SharedSchemas) -> Result<Value, SchemaError>,
    {
        let mut state = self.state.write();

        if let Some(existing) = state.registry.fragment_for(type_name) {
            match build(&self.shared) {
                Ok(fresh) if &fresh != existing => {
                    tracing::warn!(
                        type_name,
                        "registered element schema differs from a fresh build; keeping the registered one"
                    );
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::debug!(type_name, error = %e, "could not rebuild registered element schema for comparison");
                }
            }
            tracing::debug!(type_name, "element type already registered; patch skipped");
            return Ok(PatchOutcome::AlreadyRegistered);
        }

        let fragment = build(&self.shared)?;
        for finding in audit_closed_fragment(&fragment) {
            tracing::warn!(type_name, finding = %finding.json_path, value = %finding.current_value, "element schema is not closed");
        }

        let mut registry = state.registry.clone();
        registry.register(fragment)?;
        let validator = Arc::new(ElementValidator::compile(&registry)?);

        state.registry = registry;
        state.validator = validator;

        tracing::info!(
            type_name,
            alternatives = state.registry.len(),
            "registered element schema and installed rebuilt validator"
        );
        Ok(PatchOutcome::Registered)
    }

    /// Register an already-built fragment. Keyed on the fragment's first
    /// type value.
    pub fn patch(&self, fragment: Value) -> Result<PatchOutcome, SchemaError> {
        let type_name = crate::registry::fragment_type_names(&fragment)
            .first()
            .map(|s| s.to_string())
            .ok_or_else(|| SchemaError::MissingTypeEnum {
                reason: "fragment has no string values in properties.type.enum".to_string(),
            })?;
        self.patch_with(&type_name, move |_| Ok(fragment))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn hello_textbox() -> Value {
        json!({
            "type": "textbox",
            "center": [100, 200, 0],
            "width": 50,
            "height": 30,
            "text": "Hello World"
        })
    }

    #[test]
    fn patch_registers_textbox_once() {
        let host = AnnotationSchemaHost::large_image().unwrap();
        assert_eq!(host.count_type("textbox"), 0);
        assert_eq!(host.patch_textbox().unwrap(), PatchOutcome::Registered);
        assert_eq!(host.count_type("textbox"), 1);
        assert_eq!(host.patch_textbox().unwrap(), PatchOutcome::AlreadyRegistered);
        assert_eq!(host.count_type("textbox"), 1);
    }

    #[test]
    fn patch_swaps_validator() {
        let host = AnnotationSchemaHost::large_image().unwrap();
        let before = host.validator();
        assert!(!before.is_valid(&hello_textbox()));

        host.patch_textbox().unwrap();
        let after = host.validator();
        assert!(after.is_valid(&hello_textbox()));
        assert!(!Arc::ptr_eq(&before, &after));
        // An old snapshot keeps answering for the registry it was built from.
        assert!(!before.is_valid(&hello_textbox()));
    }

    #[test]
    fn second_patch_keeps_validator() {
        let host = AnnotationSchemaHost::large_image().unwrap();
        host.patch_textbox().unwrap();
        let first = host.validator();
        host.patch_textbox().unwrap();
        assert!(Arc::ptr_eq(&first, &host.validator()));
    }

    #[test]
    fn validator_matches_registry() {
        let host = AnnotationSchemaHost::large_image().unwrap();
        host.patch_textbox().unwrap();
        let names: Vec<String> = host.validator().type_names().to_vec();
        assert_eq!(names, host.type_names());
    }

    #[test]
    fn failed_build_leaves_state_untouched() {
        let shared = SharedSchemas::large_image();
        let registry = ElementSchemaRegistry::large_image(&shared).unwrap();
        let host = AnnotationSchemaHost::with_registry(
            shared.without_fragment(crate::shared::COORDINATE),
            registry,
        )
        .unwrap();
        let before = host.validator();

        let err = host.patch_textbox().unwrap_err();
        assert!(matches!(err, SchemaError::MissingFragment { .. }));
        assert_eq!(host.count_type("textbox"), 0);
        assert!(Arc::ptr_eq(&before, &host.validator()));
    }

    #[test]
    fn guard_skips_build_failure_when_registered() {
        let shared = SharedSchemas::large_image();
        let registry = ElementSchemaRegistry::large_image(&shared)
            .unwrap()
            .with_fragment(build_textbox_schema(&shared).unwrap())
            .unwrap();
        let host = AnnotationSchemaHost::with_registry(SharedSchemas::empty(), registry).unwrap();
        assert_eq!(host.patch_textbox().unwrap(), PatchOutcome::AlreadyRegistered);
    }

    #[test]
    fn patch_generic_fragment() {
        let host = AnnotationSchemaHost::large_image().unwrap();
        let fragment = json!({
            "type": "object",
            "properties": {
                "type": {"type": "string", "enum": ["marker"]},
                "center": {"type": "array", "minItems": 3, "maxItems": 3}
            },
            "required": ["type", "center"],
            "additionalProperties": false
        });
        assert_eq!(host.patch(fragment.clone()).unwrap(), PatchOutcome::Registered);
        assert_eq!(host.patch(fragment).unwrap(), PatchOutcome::AlreadyRegistered);
        host.validate(&json!({"type": "marker", "center": [0, 0, 0]}))
            .unwrap();
    }

    #[test]
    fn patch_untyped_fragment_rejected() {
        let host = AnnotationSchemaHost::large_image().unwrap();
        let err = host.patch(json!({"type": "object"})).unwrap_err();
        assert!(matches!(err, SchemaError::MissingTypeEnum { .. }));
    }

    #[test]
    fn element_schema_lists_alternatives() {
        let host = AnnotationSchemaHost::large_image().unwrap();
        host.patch_textbox().unwrap();
        let schema = host.element_schema();
        assert_eq!(schema["anyOf"].as_array().map(Vec::len), Some(8));
    }

    #[test]
    fn empty_host_accepts_nothing_until_patched() {
        let host = AnnotationSchemaHost::with_registry(
            SharedSchemas::large_image(),
            ElementSchemaRegistry::new(),
        )
        .unwrap();
        assert!(!host.validator().is_valid(&hello_textbox()));
        assert_eq!(host.element_schema(), json!({"not": {}}));

        assert_eq!(host.patch_textbox().unwrap(), PatchOutcome::Registered);
        host.validate(&hello_textbox()).unwrap();
        assert_eq!(host.type_names(), vec!["textbox".to_string()]);
    }

    #[test]
    fn host_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AnnotationSchemaHost>();
    }
}
