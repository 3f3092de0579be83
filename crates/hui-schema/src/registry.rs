//! # Element Schema Registry
//!
//! The ordered `anyOf` list of element schema alternatives. Each entry is
//! identified by the values of its `properties.type.enum`; no two entries
//! may share a type value.
//!
//! The registry is a plain owned value. It can be composed once at startup
//! (baseline plus plugin fragments) and compiled into an immutable
//! [`ElementValidator`](crate::validate::ElementValidator), or held by an
//! [`AnnotationSchemaHost`](crate::host::AnnotationSchemaHost) which patches
//! it in place.

use serde_json::{json, Value};

use crate::baseline::baseline_element_schemas;
use crate::error::SchemaError;
use crate::shared::SharedSchemas;

/// Ordered list of element schema alternatives.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementSchemaRegistry {
    fragments: Vec<Value>,
}

/// Type values declared by a fragment's `properties.type.enum`.
///
/// Returns an empty list for fragments without a type enum.
pub fn fragment_type_names(fragment: &Value) -> Vec<&str> {
    fragment
        .pointer("/properties/type/enum")
        .and_then(Value::as_array)
        .map(|values| values.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}

impl ElementSchemaRegistry {
    /// An empty registry. A validator compiled from it accepts nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// The host's baseline element schemas.
    ///
    /// # Errors
    ///
    /// Fails if a shared fragment the baseline needs is missing.
    pub fn large_image(shared: &SharedSchemas) -> Result<Self, SchemaError> {
        let mut registry = Self::new();
        for fragment in baseline_element_schemas(shared)? {
            registry.register(fragment)?;
        }
        Ok(registry)
    }

    /// Append a fragment.
    ///
    /// # Errors
    ///
    /// - [`SchemaError::MissingTypeEnum`] if the fragment declares no type.
    /// - [`SchemaError::DuplicateType`] if any declared type is already
    ///   registered.
    pub fn register(&mut self, fragment: Value) -> Result<(), SchemaError> {
        let names = fragment_type_names(&fragment);
        if names.is_empty() {
            return Err(SchemaError::MissingTypeEnum {
                reason: "fragment has no string values in properties.type.enum".to_string(),
            });
        }
        if let Some(dup) = names.iter().find(|name| self.contains_type(name)) {
            return Err(SchemaError::DuplicateType {
                type_name: (*dup).to_string(),
            });
        }
        self.fragments.push(fragment);
        Ok(())
    }

    /// Builder-style [`register`](Self::register).
    pub fn with_fragment(mut self, fragment: Value) -> Result<Self, SchemaError> {
        self.register(fragment)?;
        Ok(self)
    }

    /// Whether any entry's type enum contains `type_name`.
    pub fn contains_type(&self, type_name: &str) -> bool {
        self.count_type(type_name) > 0
    }

    /// Number of entries whose type enum contains `type_name`.
    pub fn count_type(&self, type_name: &str) -> usize {
        self.fragments
            .iter()
            .filter(|f| fragment_type_names(f).contains(&type_name))
            .count()
    }

    /// The entry declaring `type_name`, if any.
    pub fn fragment_for(&self, type_name: &str) -> Option<&Value> {
        self.fragments
            .iter()
            .find(|f| fragment_type_names(f).contains(&type_name))
    }

    /// All declared type values, in registration order.
    pub fn type_names(&self) -> Vec<&str> {
        self.fragments
            .iter()
            .flat_map(|f| fragment_type_names(f))
            .collect()
    }

    /// Registered fragments, in registration order.
    pub fn fragments(&self) -> &[Value] {
        &self.fragments
    }

    /// Number of registered fragments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// The merged element schema: `{"anyOf": [...]}`, or `{"not": {}}` when
    /// empty since `anyOf` must have at least one alternative.
    pub fn to_schema(&self) -> Value {
        if self.fragments.is_empty() {
            return json!({ "not": {} });
        }
        json!({ "anyOf": self.fragments })
    }
}
