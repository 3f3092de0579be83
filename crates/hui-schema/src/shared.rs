//! # Shared Schema Fragments
//!
//! Reusable sub-schemas that element schemas embed: the free-form `user`
//! object, the `label` object, the `group` string, `[x, y, z]`
//! coordinates, and colors. The host owns these fragments; element schema
//! builders look them up by name and fail when one is missing or is not a
//! schema object.
//!
//! [`SharedSchemas::large_image`] provides the fragments as the annotation
//! host defines them.

use std::collections::BTreeMap;

use serde_json::{json, Value};

use crate::error::SchemaError;

/// Name of the free-form user data fragment.
pub const USER: &str = "user";
/// Name of the element label fragment.
pub const LABEL: &str = "label";
/// Name of the group fragment.
pub const GROUP: &str = "group";
/// Name of the `[x, y, z]` coordinate fragment.
pub const COORDINATE: &str = "coordinate";
/// Name of the color fragment.
pub const COLOR: &str = "color";

/// Color pattern accepted by the host. Kept in step with
/// `hui_core::Color::is_valid`.
pub const COLOR_PATTERN: &str = r"^(#([0-9a-fA-F]{3,4}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})|rgb\(\d+,\s*\d+,\s*\d+\)|rgba\(\d+,\s*\d+,\s*\d+,\s*(\d?\.|)\d+\))$";

/// Pattern of a 24-character lowercase hex element id.
pub const ELEMENT_ID_PATTERN: &str = "^[0-9a-f]{24}$";

/// Named collection of shared sub-schemas.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SharedSchemas {
    fragments: BTreeMap<String, Value>,
}

impl SharedSchemas {
    /// An empty collection. Builders fail against it.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The fragments defined by the annotation host.
    pub fn large_image() -> Self {
        let color = json!({
            "type": "string",
            "pattern": COLOR_PATTERN,
        });
        Self::empty()
            .with_fragment(
                USER,
                json!({
                    "type": "object",
                    "additionalProperties": true,
                }),
            )
            .with_fragment(
                LABEL,
                json!({
                    "type": "object",
                    "properties": {
                        "value": {"type": "string"},
                        "visibility": {
                            "type": "string",
                            "enum": ["hidden", "always", "onhover"],
                        },
                        "fontSize": {
                            "type": "number",
                            "exclusiveMinimum": 0,
                        },
                        "color": color.clone(),
                    },
                    "required": ["value"],
                    "additionalProperties": false,
                }),
            )
            .with_fragment(GROUP, json!({"type": "string"}))
            .with_fragment(
                COORDINATE,
                json!({
                    "type": "array",
                    "items": {"type": "number"},
                    "minItems": 3,
                    "maxItems": 3,
                    "name": "Coordinate",
                    "description": "An X, Y, Z coordinate tuple, in base layer pixel coordinates, where the origin is the upper-left.",
                }),
            )
            .with_fragment(COLOR, color)
    }

    /// Add or replace a fragment.
    pub fn with_fragment(mut self, name: impl Into<String>, schema: Value) -> Self {
        self.fragments.insert(name.into(), schema);
        self
    }

    /// Remove a fragment, if present.
    pub fn without_fragment(mut self, name: &str) -> Self {
        self.fragments.remove(name);
        self
    }

    /// Look up a fragment by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fragments.get(name)
    }

    /// Names of all fragments, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.fragments.keys().map(String::as_str).collect()
    }

    /// Look up a fragment that a builder cannot do without.
    ///
    /// # Errors
    ///
    /// - [`SchemaError::MissingFragment`] if no fragment has this name.
    /// - [`SchemaError::IncompatibleFragment`] if the fragment is not a
    ///   JSON object, and so cannot be embedded as a sub-schema.
    pub fn require(&self, name: &str) -> Result<Value, SchemaError> {
        match self.fragments.get(name) {
            None => Err(SchemaError::MissingFragment {
                name: name.to_string(),
            }),
            Some(schema @ Value::Object(_)) => Ok(schema.clone()),
            Some(other) => Err(SchemaError::IncompatibleFragment {
                name: name.to_string(),
                reason: format!("expected a JSON object, found {}", json_type_name(other)),
            }),
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn large_image_provides_all_fragments() {
        let shared = SharedSchemas::large_image();
        assert_eq!(
            shared.names(),
            vec![COLOR, COORDINATE, GROUP, LABEL, USER]
        );
        for name in [USER, LABEL, GROUP, COORDINATE, COLOR] {
            assert!(shared.require(name).is_ok(), "{name} should be usable");
        }
    }

    #[test]
    fn require_missing_fragment() {
        let shared = SharedSchemas::large_image().without_fragment(COORDINATE);
        assert_eq!(
            shared.require(COORDINATE),
            Err(SchemaError::MissingFragment {
                name: COORDINATE.to_string()
            })
        );
    }

    #[test]
    fn require_non_object_fragment() {
        let shared = SharedSchemas::large_image().with_fragment(COLOR, json!("string"));
        let err = shared.require(COLOR).unwrap_err();
        match err {
            SchemaError::IncompatibleFragment { name, reason } => {
                assert_eq!(name, COLOR);
                assert!(reason.contains("found string"));
            }
            other => panic!("expected IncompatibleFragment, got {other}"),
        }
    }

    #[test]
    fn empty_has_nothing() {
        assert!(SharedSchemas::empty().names().is_empty());
        assert!(SharedSchemas::empty().get(USER).is_none());
    }
}
