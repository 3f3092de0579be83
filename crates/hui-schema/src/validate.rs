//! # Element Validation
//!
//! Compiles an [`ElementSchemaRegistry`] into a JSON Schema (Draft 6)
//! validator and checks annotation elements against it.
//!
//! ## Invariant
//!
//! A validator is derived from exactly one registry state and records the
//! type values it was compiled with. Validation failures are returned with
//! structured violations (instance path, schema path, message) and are
//! never recovered from locally; the caller decides what to do with a
//! rejected element.

use std::fmt;

use jsonschema::{Draft, Validator};
use serde_json::Value;
use thiserror::Error;

use crate::error::SchemaError;
use crate::registry::ElementSchemaRegistry;

/// An element did not match any registered alternative.
#[derive(Error, Debug, Clone)]
#[error("element failed schema validation:\n{violations}")]
pub struct SchemaValidationError {
    /// Structured list of individual violations.
    pub violations: ValidationViolations,
}

/// One failed constraint.
#[derive(Debug, Clone)]
pub struct Violation {
    /// JSON Pointer into the element; empty for the element itself.
    pub instance_path: String,
    /// JSON Pointer to the failed keyword in the merged schema.
    pub schema_path: String,
    pub message: String,
}

impl Violation {
    /// Index of the element this violation belongs to, for violations
    /// reported by [`ElementValidator::validate_elements`].
    pub fn element_index(&self) -> Option<usize> {
        self.instance_path
            .strip_prefix('/')?
            .split('/')
            .next()?
            .parse()
            .ok()
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let at = if self.instance_path.is_empty() {
            "/"
        } else {
            self.instance_path.as_str()
        };
        write!(f, "  at {at}: {} [{}]", self.message, self.schema_path)
    }
}

/// Violations reported for one validation call.
#[derive(Debug, Clone)]
pub struct ValidationViolations {
    violations: Vec<Violation>,
}

impl ValidationViolations {
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Violations of the element at `index` in a batch.
    pub fn for_element(&self, index: usize) -> impl Iterator<Item = &Violation> {
        self.violations
            .iter()
            .filter(move |v| v.element_index() == Some(index))
    }
}

impl fmt::Display for ValidationViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self.violations.iter().map(Violation::to_string).collect();
        f.write_str(&lines.join("\n"))
    }
}

/// Compiled validator for annotation elements.
///
/// `Send + Sync`; shared behind an `Arc` by the schema host so that
/// validation never holds the registry lock.
pub struct ElementValidator {
    validator: Validator,
    type_names: Vec<String>,
}

impl fmt::Debug for ElementValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementValidator")
            .field("type_names", &self.type_names)
            .finish_non_exhaustive()
    }
}

impl ElementValidator {
    /// Compile the registry's merged `anyOf` schema with Draft 6 semantics.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::ValidatorBuild`] if the merged schema is not a
    /// valid JSON Schema.
    pub fn compile(registry: &ElementSchemaRegistry) -> Result<Self, SchemaError> {
        let schema = registry.to_schema();
        let mut opts = jsonschema::options();
        opts.with_draft(Draft::Draft6);
        let validator = opts
            .build(&schema)
            .map_err(|e| SchemaError::ValidatorBuild {
                reason: e.to_string(),
            })?;

        Ok(Self {
            validator,
            type_names: registry.type_names().into_iter().map(str::to_string).collect(),
        })
    }

    /// Type values of the registry this validator was compiled from.
    pub fn type_names(&self) -> &[String] {
        &self.type_names
    }

    /// Whether the validator was compiled with an alternative for `type_name`.
    pub fn supports_type(&self, type_name: &str) -> bool {
        self.type_names.iter().any(|t| t == type_name)
    }

    pub fn is_valid(&self, element: &Value) -> bool {
        self.validator.is_valid(element)
    }

    /// Validate one element.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaValidationError`] listing every violation.
    pub fn validate(&self, element: &Value) -> Result<(), SchemaValidationError> {
        let violations = self.collect_violations(element, "");
        if violations.is_empty() {
            Ok(())
        } else {
            Err(SchemaValidationError {
                violations: ValidationViolations { violations },
            })
        }
    }

    /// Validate a list of elements, as stored in an annotation's
    /// `elements` array. Violations are reported with the element index as
    /// the first instance path segment.
    pub fn validate_elements(&self, elements: &[Value]) -> Result<(), SchemaValidationError> {
        let violations: Vec<Violation> = elements
            .iter()
            .enumerate()
            .flat_map(|(i, element)| self.collect_violations(element, &format!("/{i}")))
            .collect();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(SchemaValidationError {
                violations: ValidationViolations { violations },
            })
        }
    }

    fn collect_violations(&self, element: &Value, prefix: &str) -> Vec<Violation> {
        self.validator
            .iter_errors(element)
            .map(|e| Violation {
                instance_path: format!("{prefix}{}", e.instance_path),
                schema_path: e.schema_path.to_string(),
                message: e.to_string(),
            })
            .collect()
    }
}
