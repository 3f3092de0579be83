//! # Coordinates
//!
//! Element geometry is expressed in base-layer pixel coordinates with the
//! origin at the upper-left of the slide. Every coordinate is an
//! `[x, y, z]` triple on the wire.

use serde::{Deserialize, Serialize};

/// An `[x, y, z]` coordinate in base-layer pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate(pub [f64; 3]);

impl Coordinate {
    /// Build a coordinate from its components.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self([x, y, z])
    }

    pub fn x(&self) -> f64 {
        self.0[0]
    }

    pub fn y(&self) -> f64 {
        self.0[1]
    }

    pub fn z(&self) -> f64 {
        self.0[2]
    }
}

impl From<[f64; 3]> for Coordinate {
    fn from(value: [f64; 3]) -> Self {
        Self(value)
    }
}
