//! # hui-core — Foundational Types for Annotation Elements
//!
//! Defines the primitives shared by the HistomicsUI annotation plugins and
//! the typed model of annotation elements. Every other crate in the
//! workspace depends on `hui-core`; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Validated newtypes.** `ElementId` and `Color` can only be built from
//!    well-formed strings, both directly and through serde.
//!
//! 2. **Closed element variants.** `AnnotationElement` is a tagged union over
//!    `ElementKind`; each variant rejects undeclared fields and makes its
//!    required fields non-optional.
//!
//! 3. **One wire name per kind.** `ElementKind::as_str()` is the literal
//!    `type` value, used both by the decoder and by schema fragments.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `hui-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod color;
pub mod element;
pub mod error;
pub mod geometry;
pub mod identity;
pub mod kind;

// Re-export primary types for ergonomic imports.
pub use color::Color;
pub use element::{
    AnnotationElement, ArrowElement, BoxElement, CircleElement, Label, LabelVisibility,
    PointElement, PolylineElement, RectangleGridElement, TextboxElement,
};
pub use error::{HuiError, ValidationError};
pub use geometry::Coordinate;
pub use identity::{ElementId, ELEMENT_ID_LEN};
pub use kind::ElementKind;
