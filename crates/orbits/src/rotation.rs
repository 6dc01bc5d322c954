//! Perifocal to heliocentric-ecliptic rotation.
//!
//! The matrix is the 3-1-3 Euler product `Rz(Ω) · Rx(i) · Rz(ω)`: argument of
//! periapsis about the orbit normal first, then inclination, then the node.
//! Entries are written out in closed form and must stay exactly as below.

use neo_core::units::deg_to_rad;
use neo_core::vector::{self, Matrix3, Vector3};

use crate::OrbitalElements;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerifocalRotation {
    matrix: Matrix3,
}

impl PerifocalRotation {
    /// Build the rotation from angles in radians.
    pub fn new(inclination: f64, ascending_node: f64, periapsis_argument: f64) -> Self {
        let (sin_o, cos_o) = ascending_node.sin_cos();
        let (sin_i, cos_i) = inclination.sin_cos();
        let (sin_w, cos_w) = periapsis_argument.sin_cos();

        let matrix = [
            [
                cos_o * cos_w - sin_o * sin_w * cos_i,
                -cos_o * sin_w - sin_o * cos_w * cos_i,
                sin_o * sin_i,
            ],
            [
                sin_o * cos_w + cos_o * sin_w * cos_i,
                -sin_o * sin_w + cos_o * cos_w * cos_i,
                -cos_o * sin_i,
            ],
            [sin_w * sin_i, cos_w * sin_i, cos_i],
        ];
        Self { matrix }
    }

    /// Rotation for an element set (angles stored in degrees).
    pub fn from_elements(elements: &OrbitalElements) -> Self {
        Self::new(
            deg_to_rad(elements.inclination_deg()),
            deg_to_rad(elements.ascending_node_deg()),
            deg_to_rad(elements.periapsis_argument_deg()),
        )
    }

    pub fn matrix(&self) -> &Matrix3 {
        &self.matrix
    }

    /// Rotate an in-plane perifocal point (`z_pf = 0`).
    #[inline]
    pub fn apply_in_plane(&self, x_pf: f64, y_pf: f64) -> Vector3 {
        let m = &self.matrix;
        [
            m[0][0] * x_pf + m[0][1] * y_pf,
            m[1][0] * x_pf + m[1][1] * y_pf,
            m[2][0] * x_pf + m[2][1] * y_pf,
        ]
    }

    /// Rotate an arbitrary perifocal vector.
    pub fn apply(&self, v: &Vector3) -> Vector3 {
        vector::mat_vec(&self.matrix, v)
    }

    /// Unit vector toward periapsis in the ecliptic frame.
    pub fn periapsis_direction(&self) -> Vector3 {
        vector::column(&self.matrix, 0)
    }

    /// Unit normal of the orbit plane (direction of angular momentum).
    pub fn orbit_normal(&self) -> Vector3 {
        vector::column(&self.matrix, 2)
    }
}
