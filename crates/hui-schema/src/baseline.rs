//! # Baseline Element Schemas
//!
//! The element schemas every annotation host accepts out of the box:
//! arrow, circle, ellipse, point, polyline, rectangle and rectanglegrid.
//! Each is derived from a common base element schema (id, user, label,
//! group) and a base shape schema (line color and width) with
//! [`extend_schema`], then closed with `additionalProperties: false`.
//!
//! Plugins add element kinds on top of this list; they never edit it.

use serde_json::{json, Map, Value};

use crate::error::SchemaError;
use crate::shared::{self, SharedSchemas, ELEMENT_ID_PATTERN};

/// Derive a schema from `base`.
///
/// - `properties` entries are merged into the base's properties.
/// - `required` lists are unioned and sorted.
/// - Any other key replaces the base's value.
pub fn extend_schema(base: &Value, add: &Value) -> Value {
    let mut extended = base.clone();
    if let (Some(target), Some(add)) = (extended.as_object_mut(), add.as_object()) {
        for (key, value) in add {
            let merged = match (key.as_str(), target.get_mut(key)) {
                ("properties", Some(Value::Object(props))) => {
                    if let Some(extra) = value.as_object() {
                        for (name, schema) in extra {
                            props.insert(name.clone(), schema.clone());
                        }
                    }
                    true
                }
                ("required", Some(Value::Array(required))) => {
                    let mut names: Vec<String> = required
                        .iter()
                        .chain(value.as_array().into_iter().flatten())
                        .filter_map(|v| v.as_str().map(str::to_string))
                        .collect();
                    names.sort();
                    names.dedup();
                    *required = names.into_iter().map(Value::String).collect();
                    true
                }
                _ => false,
            };
            if !merged {
                target.insert(key.clone(), value.clone());
            }
        }
    }
    extended
}

/// Properties common to every element: `id`, `type`, `user`, `label`, `group`.
pub fn base_element_schema(shared: &SharedSchemas) -> Result<Value, SchemaError> {
    Ok(json!({
        "type": "object",
        "properties": {
            "id": {
                "type": "string",
                "pattern": ELEMENT_ID_PATTERN,
            },
            "type": {"type": "string"},
            "user": shared.require(shared::USER)?,
            "label": shared.require(shared::LABEL)?,
            "group": shared.require(shared::GROUP)?,
        },
        "required": ["type"],
        "additionalProperties": true,
    }))
}

/// Base element plus `lineColor` and `lineWidth`.
pub fn base_shape_schema(shared: &SharedSchemas) -> Result<Value, SchemaError> {
    Ok(extend_schema(
        &base_element_schema(shared)?,
        &json!({
            "properties": {
                "lineColor": shared.require(shared::COLOR)?,
                "lineWidth": {
                    "type": "number",
                    "minimum": 0,
                },
            },
        }),
    ))
}

/// `type` property restricted to a single literal.
fn type_literal(name: &str) -> Value {
    json!({
        "type": "string",
        "enum": [name],
    })
}

fn shape(
    shared: &SharedSchemas,
    type_name: &str,
    properties: Map<String, Value>,
    required: &[&str],
    description: Option<&str>,
) -> Result<Value, SchemaError> {
    let mut properties = properties;
    properties.insert("type".to_string(), type_literal(type_name));

    let mut add = json!({
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": false,
    });
    if let (Some(description), Some(obj)) = (description, add.as_object_mut()) {
        obj.insert("description".to_string(), json!(description));
    }
    Ok(extend_schema(&base_shape_schema(shared)?, &add))
}

fn props(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// Two-point arrow; the first point is the head.
pub fn arrow_schema(shared: &SharedSchemas) -> Result<Value, SchemaError> {
    let coord = shared.require(shared::COORDINATE)?;
    shape(
        shared,
        "arrow",
        props(json!({
            "points": {
                "type": "array",
                "items": coord,
                "minItems": 2,
                "maxItems": 2,
            },
            "fillColor": shared.require(shared::COLOR)?,
        })),
        &["type", "points"],
        Some("The first point is the head of the arrow"),
    )
}

pub fn circle_schema(shared: &SharedSchemas) -> Result<Value, SchemaError> {
    shape(
        shared,
        "circle",
        props(json!({
            "center": shared.require(shared::COORDINATE)?,
            "radius": {
                "type": "number",
                "minimum": 0,
            },
            "fillColor": shared.require(shared::COLOR)?,
        })),
        &["type", "center", "radius"],
        None,
    )
}

pub fn point_schema(shared: &SharedSchemas) -> Result<Value, SchemaError> {
    shape(
        shared,
        "point",
        props(json!({
            "center": shared.require(shared::COORDINATE)?,
            "fillColor": shared.require(shared::COLOR)?,
        })),
        &["type", "center"],
        None,
    )
}

pub fn polyline_schema(shared: &SharedSchemas) -> Result<Value, SchemaError> {
    let coord = shared.require(shared::COORDINATE)?;
    shape(
        shared,
        "polyline",
        props(json!({
            "points": {
                "type": "array",
                "items": coord.clone(),
                "minItems": 2,
            },
            "fillColor": shared.require(shared::COLOR)?,
            "closed": {
                "type": "boolean",
                "description": "polyline is open if closed flag is not specified",
            },
            "holes": {
                "type": "array",
                "description": "If closed is true, this is a list of polylines that are treated as holes in the base polygon.",
                "items": {
                    "type": "array",
                    "items": coord,
                    "minItems": 3,
                },
            },
        })),
        &["type", "points"],
        None,
    )
}

/// Properties of a rotatable box: center, size, rotation, normal, fill.
fn box_properties(shared: &SharedSchemas) -> Result<Map<String, Value>, SchemaError> {
    let coord = shared.require(shared::COORDINATE)?;
    Ok(props(json!({
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
        "fillColor": shared.require(shared::COLOR)?,
    })))
}

pub fn rectangle_schema(shared: &SharedSchemas) -> Result<Value, SchemaError> {
    shape(
        shared,
        "rectangle",
        box_properties(shared)?,
        &["type", "center", "width", "height"],
        None,
    )
}

pub fn ellipse_schema(shared: &SharedSchemas) -> Result<Value, SchemaError> {
    shape(
        shared,
        "ellipse",
        box_properties(shared)?,
        &["type", "center", "width", "height"],
        None,
    )
}

pub fn rectangle_grid_schema(shared: &SharedSchemas) -> Result<Value, SchemaError> {
    let mut properties = box_properties(shared)?;
    for name in ["widthSubdivisions", "heightSubdivisions"] {
        properties.insert(
            name.to_string(),
            json!({
                "type": "integer",
                "minimum": 1,
            }),
        );
    }
    shape(
        shared,
        "rectanglegrid",
        properties,
        &[
            "type",
            "center",
            "width",
            "height",
            "widthSubdivisions",
            "heightSubdivisions",
        ],
        None,
    )
}

/// All baseline element schemas, in host order.
pub fn baseline_element_schemas(shared: &SharedSchemas) -> Result<Vec<Value>, SchemaError> {
    Ok(vec![
        arrow_schema(shared)?,
        circle_schema(shared)?,
        ellipse_schema(shared)?,
        point_schema(shared)?,
        polyline_schema(shared)?,
        rectangle_schema(shared)?,
        rectangle_grid_schema(shared)?,
    ])
}
