//! # Element Kinds
//!
//! The closed set of annotation element kinds known to the typed model.
//! The wire name of a kind is the literal value of the element's `type`
//! property, which is also the single `enum` value of its schema fragment.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ValidationError;

/// Every element kind the typed model can decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// Two-point arrow; the first point is the head.
    Arrow,
    /// Circle given by center and radius.
    Circle,
    /// Ellipse inscribed in a (possibly rotated) box.
    Ellipse,
    /// Single point.
    Point,
    /// Open or closed polyline, optionally with holes.
    Polyline,
    /// Rotatable rectangle.
    Rectangle,
    /// Rectangle subdivided into a regular grid.
    RectangleGrid,
    /// Rectangle carrying a text string.
    Textbox,
}

impl ElementKind {
    /// Returns all kinds in wire-name order.
    pub fn all_kinds() -> &'static [ElementKind] {
        &[
            Self::Arrow,
            Self::Circle,
            Self::Ellipse,
            Self::Point,
            Self::Polyline,
            Self::Rectangle,
            Self::RectangleGrid,
            Self::Textbox,
        ]
    }

    /// Returns the wire name used as the element's `type` value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Arrow => "arrow",
            Self::Circle => "circle",
            Self::Ellipse => "ellipse",
            Self::Point => "point",
            Self::Polyline => "polyline",
            Self::Rectangle => "rectangle",
            Self::RectangleGrid => "rectanglegrid",
            Self::Textbox => "textbox",
        }
    }
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all_kinds()
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownElementType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_kinds_unique() {
        let mut seen = std::collections::HashSet::new();
        for k in ElementKind::all_kinds() {
            assert!(seen.insert(k.as_str()), "Duplicate kind: {k}");
        }
    }

    #[test]
    fn from_str_roundtrip() {
        for k in ElementKind::all_kinds() {
            assert_eq!(k.as_str().parse::<ElementKind>().unwrap(), *k);
        }
    }

    #[test]
    fn from_str_unknown() {
        let err = "hexagon".parse::<ElementKind>().unwrap_err();
        assert_eq!(err, ValidationError::UnknownElementType("hexagon".to_string()));
    }

    #[test]
    fn serde_matches_as_str() {
        for k in ElementKind::all_kinds() {
            let json = serde_json::to_string(k).unwrap();
            assert_eq!(json, format!("\"{}\"", k.as_str()));
        }
    }
}
