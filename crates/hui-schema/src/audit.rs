//! # Closed-Schema Audit
//!
//! Element fragments must be closed (`additionalProperties: false`) so that
//! malformed elements are rejected instead of silently accepted. The audit
//! walks a fragment and reports every object schema that is left open.
//!
//! The `user` property is exempt: it is the free-form extension point for
//! client data and is open on purpose.

use serde_json::Value;

/// Properties whose sub-schema may stay open.
pub const OPEN_BY_DESIGN: &[&str] = &["user"];

/// A finding about an object schema that accepts undeclared properties.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenSchemaFinding {
    /// JSON Pointer path to the `additionalProperties` field.
    pub json_path: String,
    /// Current value of `additionalProperties`.
    pub current_value: String,
}

impl std::fmt::Display for OpenSchemaFinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "  {}: {}", self.json_path, self.current_value)
    }
}

/// Audit an element fragment and its object-typed properties.
pub fn audit_closed_fragment(fragment: &Value) -> Vec<OpenSchemaFinding> {
    let mut findings = Vec::new();
    check_object_additional_properties(fragment, "", &mut findings);

    if let Some(props) = fragment.get("properties").and_then(Value::as_object) {
        for (name, schema) in props {
            if OPEN_BY_DESIGN.contains(&name.as_str()) {
                continue;
            }
            check_object_additional_properties(schema, &format!("/properties/{name}"), &mut findings);
        }
    }
    findings
}

/// Check a single object schema for additionalProperties.
fn check_object_additional_properties(
    schema: &Value,
    path: &str,
    findings: &mut Vec<OpenSchemaFinding>,
) {
    let is_object_schema = schema.get("type") == Some(&Value::String("object".to_string()))
        || schema.get("properties").is_some();
    if !is_object_schema {
        return;
    }
    match schema.get("additionalProperties") {
        Some(Value::Bool(false)) | Some(Value::Object(_)) => {}
        Some(Value::Bool(true)) => findings.push(OpenSchemaFinding {
            json_path: format!("{path}/additionalProperties"),
            current_value: "true".to_string(),
        }),
        None => findings.push(OpenSchemaFinding {
            json_path: format!("{path}/additionalProperties"),
            current_value: "(absent, defaults to true)".to_string(),
        }),
        Some(other) => findings.push(OpenSchemaFinding {
            json_path: format!("{path}/additionalProperties"),
            current_value: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::baseline::baseline_element_schemas;
    use crate::shared::SharedSchemas;
    use crate::textbox::build_textbox_schema;
    use serde_json::json;

    #[test]
    fn textbox_fragment_is_closed() {
        let fragment = build_textbox_schema(&SharedSchemas::large_image()).unwrap();
        let findings = audit_closed_fragment(&fragment);
        assert!(findings.is_empty(), "unexpected findings: {findings:?}");
    }

    #[test]
    fn baseline_fragments_are_closed() {
        for fragment in baseline_element_schemas(&SharedSchemas::large_image()).unwrap() {
            let findings = audit_closed_fragment(&fragment);
            assert!(findings.is_empty(), "unexpected findings: {findings:?}");
        }
    }

    #[test]
    fn open_fragment_reported() {
        let fragment = json!({
            "type": "object",
            "properties": {
                "type": {"enum": ["loose"]},
                "style": {"type": "object"},
                "user": {"type": "object", "additionalProperties": true}
            }
        });
        let findings = audit_closed_fragment(&fragment);
        let paths: Vec<&str> = findings.iter().map(|f| f.json_path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["/additionalProperties", "/properties/style/additionalProperties"]
        );
    }

    #[test]
    fn finding_display() {
        let finding = OpenSchemaFinding {
            json_path: "/additionalProperties".to_string(),
            current_value: "true".to_string(),
        };
        assert_eq!(finding.to_string(), "  /additionalProperties: true");
    }
}
