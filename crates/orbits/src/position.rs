use neo_core::vector::{self, Vector3};
use serde::{Deserialize, Serialize};

/// Heliocentric ecliptic position in AU.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CartesianPosition {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl CartesianPosition {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Heliocentric distance in AU.
    pub fn norm(&self) -> f64 {
        vector::norm(&self.to_array())
    }

    pub fn to_array(&self) -> Vector3 {
        [self.x, self.y, self.z]
    }

    /// Euclidean distance to another position in AU.
    pub fn distance_to(&self, other: &CartesianPosition) -> f64 {
        vector::norm(&vector::sub(&self.to_array(), &other.to_array()))
    }
}

impl From<Vector3> for CartesianPosition {
    fn from(v: Vector3) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}
