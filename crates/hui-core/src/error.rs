//! # Error Hierarchy
//!
//! Structured error types for the typed annotation model, built with
//! `thiserror`. No `Box<dyn Error>`, no `.unwrap()` outside tests.
//!
//! Each error carries the rejected input and, where it helps, the expected
//! format, so that a rejected element can be diagnosed from the message alone.

use thiserror::Error;

/// Top-level error type for the annotation plugins.
#[derive(Error, Debug)]
pub enum HuiError {
    /// Domain primitive or element validation failure.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Schema validation failure reported by a compiled validator.
    #[error("schema validation error: {0}")]
    SchemaValidation(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Validation errors for domain primitives and typed elements.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Element identifier is not a 24-character lowercase hex string.
    #[error("invalid element id: \"{0}\" (expected 24 lowercase hex characters)")]
    InvalidElementId(String),

    /// Color string is not one of the accepted CSS-like forms.
    #[error("invalid color: \"{0}\" (expected #rgb, #rgba, #rrggbb, #rrggbbaa, rgb(r, g, b) or rgba(r, g, b, a))")]
    InvalidColor(String),

    /// The element has no string `type` property.
    #[error("element has no string \"type\" property")]
    MissingType,

    /// The element `type` names no known element kind.
    #[error("unknown element type: \"{0}\"")]
    UnknownElementType(String),

    /// The element does not have the fields its kind requires.
    #[error("malformed {kind} element: {reason}")]
    Malformed {
        /// Element kind being decoded.
        kind: &'static str,
        /// Decoder message.
        reason: String,
    },

    /// A numeric field violates its range constraint.
    #[error("{field} out of range: {value} (expected {expected})")]
    OutOfRange {
        /// Wire name of the field.
        field: &'static str,
        /// Rejected value.
        value: f64,
        /// Human-readable constraint.
        expected: &'static str,
    },

    /// A point list has the wrong number of coordinates.
    #[error("{field} has {count} coordinate(s) (expected at least {min})")]
    TooFewPoints {
        /// Wire name of the field.
        field: &'static str,
        /// Number of coordinates supplied.
        count: usize,
        /// Minimum accepted.
        min: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hui_error_validation_display() {
        let inner = ValidationError::InvalidElementId("xyz".to_string());
        let err = HuiError::Validation(inner);
        let msg = format!("{err}");
        assert!(msg.contains("validation error"));
        assert!(msg.contains("xyz"));
    }

    #[test]
    fn hui_error_schema_validation_display() {
        let err = HuiError::SchemaValidation("missing text".to_string());
        assert!(format!("{err}").contains("missing text"));
    }

    #[test]
    fn hui_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: HuiError = json_err.into();
        assert!(matches!(err, HuiError::Json(_)));
    }

    #[test]
    fn validation_error_invalid_color() {
        let err = ValidationError::InvalidColor("red".to_string());
        let msg = format!("{err}");
        assert!(msg.contains("red"));
        assert!(msg.contains("#rrggbb"));
    }

    #[test]
    fn validation_error_out_of_range() {
        let err = ValidationError::OutOfRange {
            field: "width",
            value: -1.0,
            expected: ">= 0",
        };
        let msg = format!("{err}");
        assert!(msg.contains("width"));
        assert!(msg.contains("-1"));
    }

    #[test]
    fn validation_error_too_few_points() {
        let err = ValidationError::TooFewPoints {
            field: "points",
            count: 1,
            min: 2,
        };
        assert!(format!("{err}").contains("1 coordinate(s)"));
    }

    #[test]
    fn validation_error_unknown_type() {
        let err = ValidationError::UnknownElementType("hexagon".to_string());
        assert!(format!("{err}").contains("hexagon"));
    }
}
