//! # Textbox Element Schema
//!
//! Builds the schema fragment for `"textbox"` elements: a rotatable
//! rectangle that carries a text string. The coordinate, color, user,
//! label and group sub-schemas come from the host's [`SharedSchemas`], so
//! the fragment stays consistent with the rest of the element schemas.

use serde_json::{json, Value};

use crate::error::SchemaError;
use crate::shared::{self, SharedSchemas, ELEMENT_ID_PATTERN};

/// Literal `type` value of textbox elements.
pub const TEXTBOX_TYPE: &str = "textbox";

/// Properties a textbox element must carry.
pub const TEXTBOX_REQUIRED: &[&str] = &["type", "center", "width", "height", "text"];

/// Build the closed JSON Schema of a textbox element.
///
/// # Errors
///
/// Returns [`SchemaError::MissingFragment`] or
/// [`SchemaError::IncompatibleFragment`] when one of the shared
/// sub-schemas is absent or unusable.
pub fn build_textbox_schema(shared: &SharedSchemas) -> Result<Value, SchemaError> {
    let coord = shared.require(shared::COORDINATE)?;
    let color = shared.require(shared::COLOR)?;

    Ok(json!({
        "type": "object",
        "properties": {
            "id": {
                "type": "string",
                "pattern": ELEMENT_ID_PATTERN,
            },
            "type": {
                "type": "string",
                "enum": [TEXTBOX_TYPE],
            },
            "user": shared.require(shared::USER)?,
            "label": shared.require(shared::LABEL)?,
            "group": shared.require(shared::GROUP)?,
            "center": coord.clone(),
            "width": {
                "type": "number",
                "minimum": 0,
            },
            "height": {
                "type": "number",
                "minimum": 0,
            },
            "rotation": {
                "type": "number",
                "description": "radians counterclockwise around normal",
            },
            "normal": coord,
            "fillColor": color.clone(),
            "lineColor": color,
            "lineWidth": {
                "type": "number",
                "minimum": 0,
            },
            "text": {
                "type": "string",
                "description": "The text content displayed inside the textbox.",
            },
        },
        "required": TEXTBOX_REQUIRED,
        "additionalProperties": false,
    }))
}
