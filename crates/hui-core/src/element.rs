//! # Typed Annotation Elements
//!
//! A tagged union over element kinds, dispatched on the wire `type`
//! property. Every variant has a closed field set (`deny_unknown_fields`)
//! and its required fields are non-optional, so shape errors surface at
//! decode time. Numeric ranges that the type system cannot express
//! (non-negative sizes, minimum point counts) are checked by
//! [`AnnotationElement::validate_ranges`], which [`AnnotationElement::from_value`]
//! runs after decoding.
//!
//! This model accepts the same elements as the host's JSON Schema for the
//! fields it covers; the schema remains the authority for the host contract.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::color::Color;
use crate::error::ValidationError;
use crate::geometry::Coordinate;
use crate::identity::ElementId;
use crate::kind::ElementKind;

/// One annotation element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AnnotationElement {
    Arrow(ArrowElement),
    Circle(CircleElement),
    Ellipse(BoxElement),
    Point(PointElement),
    Polyline(PolylineElement),
    Rectangle(BoxElement),
    RectangleGrid(RectangleGridElement),
    Textbox(TextboxElement),
}

/// Visibility of an element label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelVisibility {
    Hidden,
    Always,
    OnHover,
}

/// Text label attached to an element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Label {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<LabelVisibility>,
    /// Must be strictly positive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

/// Arrow from `points[1]` to its head at `points[0]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ArrowElement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ElementId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<Label>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    pub points: [Coordinate; 2],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_width: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CircleElement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ElementId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<Label>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    pub center: Coordinate,
    pub radius: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_width: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PointElement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ElementId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<Label>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    pub center: Coordinate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_width: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PolylineElement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ElementId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<Label>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// At least two coordinates.
    pub points: Vec<Coordinate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed: Option<bool>,
    /// Rings of at least three coordinates each.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holes: Option<Vec<Vec<Coordinate>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_width: Option<f64>,
}

/// Rotatable box shape shared by rectangles and ellipses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BoxElement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ElementId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<Label>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    pub center: Coordinate,
    pub width: f64,
    pub height: f64,
    /// Radians counterclockwise around `normal`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normal: Option<Coordinate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_width: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RectangleGridElement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ElementId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<Label>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    pub center: Coordinate,
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normal: Option<Coordinate>,
    #[serde(deserialize_with = "integral_count")]
    pub width_subdivisions: u64,
    #[serde(deserialize_with = "integral_count")]
    pub height_subdivisions: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_width: Option<f64>,
}

/// Rectangle carrying a text string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TextboxElement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ElementId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<Label>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    pub center: Coordinate,
    pub width: f64,
    pub height: f64,
    /// Radians counterclockwise around `normal`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normal: Option<Coordinate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_width: Option<f64>,
    pub text: String,
}

impl TextboxElement {
    /// A textbox with only its required fields set.
    pub fn new(center: Coordinate, width: f64, height: f64, text: impl Into<String>) -> Self {
        Self {
            id: None,
            user: None,
            label: None,
            group: None,
            center,
            width,
            height,
            rotation: None,
            normal: None,
            fill_color: None,
            line_color: None,
            line_width: None,
            text: text.into(),
        }
    }
}

impl AnnotationElement {
    /// Decode an element from JSON, dispatching on its `type` property,
    /// and check its numeric ranges.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::MissingType`] if `type` is absent or not a string.
    /// - [`ValidationError::UnknownElementType`] for an unrecognised `type`.
    /// - [`ValidationError::Malformed`] for missing, mistyped or undeclared fields.
    /// - [`ValidationError::OutOfRange`] / [`ValidationError::TooFewPoints`]
    ///   for range violations.
    pub fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let kind: ElementKind = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or(ValidationError::MissingType)?
            .parse()?;

        let element: Self =
            serde_json::from_value(value.clone()).map_err(|e| ValidationError::Malformed {
                kind: kind.as_str(),
                reason: e.to_string(),
            })?;
        element.validate_ranges()?;
        Ok(element)
    }

    /// The kind of this element.
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Arrow(_) => ElementKind::Arrow,
            Self::Circle(_) => ElementKind::Circle,
            Self::Ellipse(_) => ElementKind::Ellipse,
            Self::Point(_) => ElementKind::Point,
            Self::Polyline(_) => ElementKind::Polyline,
            Self::Rectangle(_) => ElementKind::Rectangle,
            Self::RectangleGrid(_) => ElementKind::RectangleGrid,
            Self::Textbox(_) => ElementKind::Textbox,
        }
    }

    /// The element id, if one was assigned.
    pub fn id(&self) -> Option<&ElementId> {
        match self {
            Self::Arrow(e) => e.id.as_ref(),
            Self::Circle(e) => e.id.as_ref(),
            Self::Ellipse(e) | Self::Rectangle(e) => e.id.as_ref(),
            Self::Point(e) => e.id.as_ref(),
            Self::Polyline(e) => e.id.as_ref(),
            Self::RectangleGrid(e) => e.id.as_ref(),
            Self::Textbox(e) => e.id.as_ref(),
        }
    }

    /// Check the range constraints the type system does not encode.
    pub fn validate_ranges(&self) -> Result<(), ValidationError> {
        match self {
            Self::Arrow(e) => {
                check_label(e.label.as_ref())?;
                check_line_width(e.line_width)
            }
            Self::Circle(e) => {
                check_label(e.label.as_ref())?;
                non_negative("radius", e.radius)?;
                check_line_width(e.line_width)
            }
            Self::Ellipse(e) | Self::Rectangle(e) => {
                check_label(e.label.as_ref())?;
                non_negative("width", e.width)?;
                non_negative("height", e.height)?;
                check_line_width(e.line_width)
            }
            Self::Point(e) => {
                check_label(e.label.as_ref())?;
                check_line_width(e.line_width)
            }
            Self::Polyline(e) => {
                check_label(e.label.as_ref())?;
                min_points("points", e.points.len(), 2)?;
                for hole in e.holes.iter().flatten() {
                    min_points("holes", hole.len(), 3)?;
                }
                check_line_width(e.line_width)
            }
            Self::RectangleGrid(e) => {
                check_label(e.label.as_ref())?;
                non_negative("width", e.width)?;
                non_negative("height", e.height)?;
                at_least_one("widthSubdivisions", e.width_subdivisions)?;
                at_least_one("heightSubdivisions", e.height_subdivisions)?;
                check_line_width(e.line_width)
            }
            Self::Textbox(e) => {
                check_label(e.label.as_ref())?;
                non_negative("width", e.width)?;
                non_negative("height", e.height)?;
                check_line_width(e.line_width)
            }
        }
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange {
            field,
            value,
            expected: ">= 0",
        })
    }
}

fn check_line_width(line_width: Option<f64>) -> Result<(), ValidationError> {
    line_width.map_or(Ok(()), |w| non_negative("lineWidth", w))
}

fn check_label(label: Option<&Label>) -> Result<(), ValidationError> {
    match label.and_then(|l| l.font_size) {
        Some(size) if size <= 0.0 => Err(ValidationError::OutOfRange {
            field: "fontSize",
            value: size,
            expected: "> 0",
        }),
        _ => Ok(()),
    }
}

fn min_points(field: &'static str, count: usize, min: usize) -> Result<(), ValidationError> {
    if count < min {
        return Err(ValidationError::TooFewPoints { field, count, min });
    }
    Ok(())
}

fn at_least_one(field: &'static str, value: u64) -> Result<(), ValidationError> {
    if value == 0 {
        return Err(ValidationError::OutOfRange {
            field,
            value: 0.0,
            expected: ">= 1",
        });
    }
    Ok(())
}

/// A JSON integer in the JSON Schema sense: any number with a zero
/// fractional part, so `2.0` counts. Integral values beyond `u64::MAX`
/// saturate.
fn integral_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error as _;

    let number = serde_json::Number::deserialize(deserializer)?;
    if let Some(n) = number.as_u64() {
        return Ok(n);
    }
    match number.as_f64() {
        Some(f) if f.is_finite() && f.fract() == 0.0 && f >= 0.0 => Ok(f as u64),
        _ => Err(D::Error::custom(format!(
            "expected a non-negative integer, got {number}"
        ))),
    }
}
